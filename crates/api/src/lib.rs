//! FIBEM registration API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! stores, payment gateway) so integration tests and the binary entrypoint
//! can both access them.

pub mod accounts;
pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod sessions;
pub mod state;
