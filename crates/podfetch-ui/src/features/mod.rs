//! Page-level feature slices.

pub(crate) mod home;
pub(crate) mod podcasts;

/// Progress of a page's initial fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FetchStatus {
    Loading,
    Ready,
    Failed,
}
