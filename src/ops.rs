use ndarray::{ArrayD, IxDyn};
use num_traits::Float;

use crate::error::ScatteriaError;
use crate::shape::{expand_index, normalize_dim};
use crate::traits::ScatterElement;

/// Divisor floor for the softmax normalization. Keeps degenerate groups
/// (empty, or numerically collapsed to a zero sum) from dividing by zero.
const SOFTMAX_EPS: f64 = 1e-12;

fn resolve_group_count(index: &ArrayD<usize>, group_count: Option<usize>) -> usize {
    group_count.unwrap_or_else(|| index.iter().max().map(|max| max + 1).unwrap_or(0))
}

fn grouped_shape<T>(src: &ArrayD<T>, dim: usize, group_count: usize) -> IxDyn {
    let mut shape = src.shape().to_vec();
    shape[dim] = group_count;
    IxDyn(&shape)
}

/// Sum source values into groups selected by `index` along `dim`.
///
/// The output has `src`'s shape with `dim` resized to `group_count`
/// (inferred as `max(index) + 1` when not given). Groups with no
/// contributing elements read `0`. Group ids are validated against the
/// group count and reductions fail on the first out-of-range id.
pub fn grouped_sum<T>(
    src: &ArrayD<T>,
    index: &ArrayD<usize>,
    dim: isize,
    group_count: Option<usize>,
) -> Result<ArrayD<T>, ScatteriaError>
where
    T: ScatterElement,
{
    let dim = normalize_dim(dim, src.ndim())?;
    let group_count = resolve_group_count(index, group_count);
    let index = expand_index(index, src, dim)?;

    let mut out = ArrayD::zeros(grouped_shape(src, dim, group_count));
    for (coords, &val) in src.indexed_iter() {
        let group = index[&coords];
        if group >= group_count {
            return Err(ScatteriaError::GroupIdOutOfRange {
                group_id: group,
                group_count,
            });
        }
        let mut target = coords.clone();
        target[dim] = group;
        out[&target] += val;
    }
    Ok(out)
}

/// Maximum source value per group, along with the position (along `dim`)
/// of the winning element.
///
/// Groups with no contributing elements read `0`, not the accumulator
/// identity; a group whose true maximum is exactly `lower_bound()`
/// collapses to `0` as well, so callers cannot tell the two apart. Ties
/// resolve to the first contributor in row-major order; the argmax of an
/// empty group is `0`.
pub fn grouped_max<T>(
    src: &ArrayD<T>,
    index: &ArrayD<usize>,
    dim: isize,
    group_count: Option<usize>,
) -> Result<(ArrayD<T>, ArrayD<usize>), ScatteriaError>
where
    T: ScatterElement,
{
    let dim = normalize_dim(dim, src.ndim())?;
    let group_count = resolve_group_count(index, group_count);
    let index = expand_index(index, src, dim)?;

    let out_shape = grouped_shape(src, dim, group_count);
    let mut out = ArrayD::from_elem(out_shape.clone(), T::lower_bound());
    let mut argmax = ArrayD::zeros(out_shape.clone());
    let mut seen = ArrayD::from_elem(out_shape, false);

    for (coords, &val) in src.indexed_iter() {
        let group = index[&coords];
        if group >= group_count {
            return Err(ScatteriaError::GroupIdOutOfRange {
                group_id: group,
                group_count,
            });
        }
        let mut target = coords.clone();
        target[dim] = group;
        if !seen[&target] || val > out[&target] {
            out[&target] = val;
            argmax[&target] = coords[dim];
            seen[&target] = true;
        }
    }

    out.mapv_inplace(|val| {
        if val == T::lower_bound() {
            T::zero()
        } else {
            val
        }
    });
    Ok((out, argmax))
}

/// Softmax computed independently within each group along `dim`.
///
/// Each element's group maximum is subtracted before exponentiating, so
/// the result is invariant to a uniform shift of `src` and safe from
/// overflow for large inputs.
pub fn grouped_softmax<T>(
    src: &ArrayD<T>,
    index: &ArrayD<usize>,
    dim: isize,
    group_count: Option<usize>,
) -> Result<ArrayD<T>, ScatteriaError>
where
    T: ScatterElement + Float,
{
    let dim = normalize_dim(dim, src.ndim())?;
    let group_count = resolve_group_count(index, group_count);
    let expanded = expand_index(index, src, dim)?;

    let (max_vals, _) = grouped_max(src, index, dim as isize, Some(group_count))?;

    let mut out = src.to_owned();
    for (coords, val) in out.indexed_iter_mut() {
        let mut group_pos = coords.clone();
        group_pos[dim] = expanded[&coords];
        *val = (*val - max_vals[&group_pos]).exp();
    }

    let sums = grouped_sum(&out, index, dim as isize, Some(group_count))?;

    let eps = T::from(SOFTMAX_EPS).unwrap();
    for (coords, val) in out.indexed_iter_mut() {
        let mut group_pos = coords.clone();
        group_pos[dim] = expanded[&coords];
        let denom = sums[&group_pos];
        let denom = if denom < eps { eps } else { denom };
        *val = *val / denom;
    }
    Ok(out)
}
