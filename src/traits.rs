use std::fmt::Debug;
use std::ops::AddAssign;

use num_traits::Zero;

/// Element types the scatter reductions operate on.
///
/// `lower_bound` is the identity of the running-max accumulator: negative
/// infinity for floats, the minimum representable value for integers.
pub trait ScatterElement: Copy + Debug + Default + PartialOrd + Zero + AddAssign {
    fn lower_bound() -> Self;
}

impl ScatterElement for f32 {
    fn lower_bound() -> Self {
        f32::NEG_INFINITY
    }
}

impl ScatterElement for f64 {
    fn lower_bound() -> Self {
        f64::NEG_INFINITY
    }
}

impl ScatterElement for i32 {
    fn lower_bound() -> Self {
        i32::MIN
    }
}

impl ScatterElement for i64 {
    fn lower_bound() -> Self {
        i64::MIN
    }
}
