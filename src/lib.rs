//! Seller dashboard product forms
//!
//! This library provides the add/edit product screens of the seller
//! dashboard as headless controllers: field handling and validation,
//! image constraints, and the multipart create/update calls to the
//! product backend. A hosting shell renders the state and forwards events.

pub mod config;
pub mod context;
pub mod forms;
pub mod models;
pub mod services;
