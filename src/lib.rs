//! Regression decision tree used as the weak learner of a gradient boosting ensemble.
//!
//! The tree is grown by recursive partitioning of a dense feature matrix
//! (dimensions x samples), minimizing the squared error. Numeric dimensions are split
//! on a threshold, categorical dimensions get one child per category.

extern crate itertools;
#[macro_use]
extern crate log;
extern crate ordered_float;
extern crate rand;
extern crate rayon;
#[macro_use]
extern crate serde_derive;

mod data;
mod decision_tree;
mod error;
mod gain;
mod importance;
mod math;
mod matrix;
mod select;
mod split;
mod tree;

pub use crate::data::*;
pub use crate::decision_tree::*;
pub use crate::error::*;
pub use crate::gain::*;
pub use crate::importance::*;
pub use crate::math::*;
pub use crate::matrix::*;
pub use crate::select::*;
pub use crate::split::*;
pub use crate::tree::*;

pub(crate) static DEFAULT_MIN_LEAF_SIZE: usize = 1;
pub(crate) static DEFAULT_MIN_SPLIT_GAIN: f64 = 1e-7;
pub(crate) static DEFAULT_MAX_DEPTH: usize = 3;
