//! Podcast library feature slice.
//!
//! # Design
//! - The grid view loads the subscription list; the detail view loads one
//!   podcast with its episodes.
//! - Both pages cache results in the `AppStore` so navigation back is instant.

pub(crate) mod detail;
pub(crate) mod view;
