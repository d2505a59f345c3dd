//! Grouped (segmented) reductions over dense arrays: sum, max, and a
//! numerically stable softmax, aggregated by a group-index array. Built as
//! the feature-pooling layer of a visual-SLAM pipeline, where attention
//! weights are normalized over variable-sized neighbor sets.

pub mod error;
pub mod ops;
pub mod shape;
pub mod traits;
