//! Core, DOM-free primitives and helpers for the Web UI.
pub mod auth;
pub mod logic;
pub mod oidc;
pub mod store;
pub mod time;
