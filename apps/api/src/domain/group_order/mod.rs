// Group order domain module
// Pooled purchases where vendors commit quantity toward a discount target

#![allow(clippy::module_inception)]

pub mod group_order;
pub mod value_objects;

pub use group_order::{GroupOrder, GroupOrderDraft, Participant};
pub use value_objects::GroupOrderStatus;
