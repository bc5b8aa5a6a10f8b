//! Routing definitions for the PodFetch UI, mounted under `/ui`.
use yew_router::prelude::*;

/// Router base path.
pub(crate) const BASENAME: &str = "/ui";

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Root,
    #[at("/home")]
    Home,
    #[at("/podcasts")]
    Podcasts,
    #[at("/podcasts/:id")]
    PodcastDetail { id: String },
    #[at("/login")]
    Login,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Routes that show user content and sit behind the login gate.
    pub(crate) const fn is_protected(&self) -> bool {
        matches!(
            self,
            Self::Home | Self::Podcasts | Self::PodcastDetail { .. }
        )
    }
}
