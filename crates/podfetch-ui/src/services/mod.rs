//! HTTP client helpers for the PodFetch API.
pub(crate) mod api;
