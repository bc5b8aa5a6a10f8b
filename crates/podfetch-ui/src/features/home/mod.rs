//! Home feature slice.
//!
//! # Design
//! - Fetch the recently played list on mount and cache it in the `AppStore`.
//! - Resuming an entry hands it to the shared audio player.

pub(crate) mod view;
