// Order domain module
// Direct vendor-to-supplier purchase orders and their fulfilment lifecycle

#![allow(clippy::module_inception)]

pub mod order;
pub mod value_objects;

pub use order::Order;
pub use value_objects::OrderStatus;
