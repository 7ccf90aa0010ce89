//! Pattern model
//!
//! Templates describe a parametrized cut as an ordered list of operations.
//! A [`CutProfile`] is a template cloned onto the workpiece.

pub mod cut;
pub mod operation;
pub mod template;

pub use cut::{CutProfile, Orientation};
pub use operation::{
    accessor, OperationProperties, PatternOperation, PropertyAccessor, PROPERTY_ACCESSORS,
};
pub use template::{PatternTemplate, SharedVariable};
