use ndarray::{ArrayD, IxDyn};

use crate::error::ScatteriaError;

/// Resolve a possibly negative axis to a concrete one.
pub fn normalize_dim(dim: isize, ndim: usize) -> Result<usize, ScatteriaError> {
    let resolved = if dim < 0 { dim + ndim as isize } else { dim };
    if resolved < 0 || resolved as usize >= ndim {
        return Err(ScatteriaError::InvalidDim { dim, ndim });
    }
    Ok(resolved as usize)
}

/// Broadcast a group-index array so it matches `src`'s shape element for
/// element.
///
/// An index of the same rank as `src` is stretched across its size-1 axes.
/// A lower-rank index is treated as laid out along `dim`: it is reshaped to
/// `src`'s rank with size 1 everywhere except `dim`, then broadcast across
/// the remaining axes.
pub fn expand_index<T>(
    index: &ArrayD<usize>,
    src: &ArrayD<T>,
    dim: usize,
) -> Result<ArrayD<usize>, ScatteriaError> {
    let mismatch = || ScatteriaError::CannotBroadcastIndex {
        index_shape: index.shape().to_vec(),
        src_shape: src.shape().to_vec(),
    };

    if index.ndim() == src.ndim() {
        return index
            .broadcast(src.raw_dim())
            .map(|view| view.to_owned())
            .ok_or_else(mismatch);
    }
    if index.ndim() > src.ndim() {
        return Err(mismatch());
    }

    let mut view_shape = vec![1usize; src.ndim()];
    view_shape[dim] = index.len();
    let reshaped = index
        .to_owned()
        .into_shape(IxDyn(&view_shape))
        .map_err(|_| mismatch())?;
    reshaped
        .broadcast(src.raw_dim())
        .map(|view| view.to_owned())
        .ok_or_else(mismatch)
}

#[cfg(test)]
mod test {
    use ndarray::{ArrayD, IxDyn};

    use super::{expand_index, normalize_dim};
    use crate::error::ScatteriaError;

    #[test]
    fn normalize() {
        assert_eq!(normalize_dim(0, 3).unwrap(), 0);
        assert_eq!(normalize_dim(2, 3).unwrap(), 2);
        assert_eq!(normalize_dim(-1, 3).unwrap(), 2);
        assert_eq!(normalize_dim(-3, 3).unwrap(), 0);
        assert!(normalize_dim(3, 3).is_err());
        assert!(normalize_dim(-4, 3).is_err());
    }

    #[test]
    fn expand_lower_rank() -> Result<(), ScatteriaError> {
        let src = ArrayD::<f32>::zeros(IxDyn(&[2, 3, 4]));
        let index = ArrayD::from_shape_vec(IxDyn(&[3]), vec![0usize, 1, 0]).unwrap();

        let expanded = expand_index(&index, &src, 1)?;
        assert_eq!(expanded.shape(), src.shape());
        // constant along every axis except dim
        for i in 0..2 {
            for j in 0..3 {
                for k in 0..4 {
                    assert_eq!(expanded[[i, j, k]], index[[j]]);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn expand_same_rank() -> Result<(), ScatteriaError> {
        let src = ArrayD::<f32>::zeros(IxDyn(&[2, 3]));
        let index = ArrayD::from_shape_vec(IxDyn(&[2, 1]), vec![1usize, 0]).unwrap();

        let expanded = expand_index(&index, &src, 0)?;
        assert_eq!(expanded.shape(), &[2, 3]);
        assert_eq!(
            expanded.iter().cloned().collect::<Vec<usize>>(),
            vec![1, 1, 1, 0, 0, 0]
        );
        Ok(())
    }

    #[test]
    fn expand_mismatch() {
        let src = ArrayD::<f32>::zeros(IxDyn(&[2, 3]));

        // rank matches but a non-unit axis disagrees
        let index = ArrayD::from_shape_vec(IxDyn(&[2, 2]), vec![0usize; 4]).unwrap();
        assert!(expand_index(&index, &src, 0).is_err());

        // lower rank but wrong length along dim
        let index = ArrayD::from_shape_vec(IxDyn(&[4]), vec![0usize; 4]).unwrap();
        assert!(expand_index(&index, &src, 0).is_err());

        // higher rank than src
        let index = ArrayD::from_shape_vec(IxDyn(&[2, 3, 1]), vec![0usize; 6]).unwrap();
        assert!(expand_index(&index, &src, 0).is_err());
    }
}
