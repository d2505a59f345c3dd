use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScatteriaError {
    CannotBroadcastIndex {
        index_shape: Vec<usize>,
        src_shape: Vec<usize>,
    },
    InvalidDim {
        dim: isize,
        ndim: usize,
    },
    GroupIdOutOfRange {
        group_id: usize,
        group_count: usize,
    },
}

impl Display for ScatteriaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ScatteriaError::CannotBroadcastIndex {
                index_shape,
                src_shape,
            } => write!(
                f,
                "cannot broadcast index of shape {:?} to source shape {:?}",
                index_shape, src_shape
            ),
            ScatteriaError::InvalidDim { dim, ndim } => {
                write!(f, "dim {} is out of range for a rank-{} array", dim, ndim)
            }
            ScatteriaError::GroupIdOutOfRange {
                group_id,
                group_count,
            } => write!(
                f,
                "group id {} is out of range for group count {}",
                group_id, group_count
            ),
        }
    }
}

impl std::error::Error for ScatteriaError {}
