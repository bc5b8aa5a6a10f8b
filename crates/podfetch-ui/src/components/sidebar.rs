use crate::app::Route;
use crate::core::store::AppStore;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

#[function_component(Sidebar)]
pub(crate) fn sidebar() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let collapsed = use_selector(|store: &AppStore| store.common.sidebar_collapsed);
    let active = use_route::<Route>().unwrap_or(Route::NotFound);

    html! {
        <aside class={classes!(
            "md:block", "bg-gray-800", "text-white", "p-4",
            if *collapsed { "hidden" } else { "col-span-6" }
        )}>
            <nav class="flex flex-col gap-2">
                {nav_item(Route::Home, "fa-house", &bundle.text("nav.home"), &active)}
                {nav_item(Route::Podcasts, "fa-guitar", &bundle.text("nav.podcasts"), &active)}
            </nav>
        </aside>
    }
}

fn nav_item(route: Route, icon: &'static str, label: &str, active: &Route) -> Html {
    let is_active = match (&route, active) {
        (Route::Podcasts, Route::PodcastDetail { .. }) => true,
        _ => &route == active,
    };
    let classes = classes!(
        "flex",
        "items-center",
        "gap-3",
        "rounded",
        "px-3",
        "py-2",
        "hover:bg-gray-700",
        is_active.then_some("bg-gray-700")
    );
    html! {
        <Link<Route> to={route} classes={classes}>
            <i class={classes!("fa-solid", icon)}></i>
            <span>{label.to_string()}</span>
        </Link<Route>>
    }
}
