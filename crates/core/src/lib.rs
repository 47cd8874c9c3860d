//! FIBEM domain logic: roles, capabilities, the subscription plan catalog,
//! the registration draft aggregate, the wizard step machine, and payment
//! math/validation.
//!
//! This crate is pure: no I/O, no async, no HTTP types. The API crate maps
//! [`error::CoreError`] values onto HTTP responses.

pub mod capabilities;
pub mod catalog;
pub mod draft;
pub mod error;
pub mod payment;
pub mod role;
pub mod wizard;
