//! VendorLink API Library
//!
//! Backend of the VendorLink B2B marketplace: vendors buy from suppliers,
//! pool demand through group orders, review suppliers, and watch prices.
//! Includes domain logic, repositories, and the HTTP layer.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod state;
