use crate::app::api::ApiCtx;
use crate::components::audio_player::AudioPlayer;
use crate::components::header::Header;
use crate::components::loading::Loading;
use crate::components::login::LoginPage;
use crate::components::sidebar::Sidebar;
use crate::core::logic::{content_column_classes, needs_login};
use crate::core::store::{AppStore, select_show_audio_player, set_config, set_login};
use crate::features::home::view::Homepage;
use crate::features::podcasts::detail::PodcastDetailPage;
use crate::features::podcasts::view::PodcastsPage;
use crate::i18n::{DEFAULT_LOCALE, LocaleCode, TranslationBundle};
use crate::services::api::ApiError;
use gloo::console;
use preferences::{api_base_url, load_locale, load_sidebar_collapsed, persist_locale};
pub(crate) use routes::Route;
use routes::BASENAME;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

pub(crate) mod api;
pub(crate) mod preferences;
mod routes;

#[function_component(PodFetchApp)]
pub(crate) fn podfetch_app() -> Html {
    let locale = use_state(load_locale);
    let dispatch = Dispatch::<AppStore>::new();
    let api_ctx = use_memo(|_| ApiCtx::new(api_base_url()), ());
    let bundle = {
        let locale = *locale;
        use_memo(move |_| TranslationBundle::new(locale), locale)
    };

    {
        let dispatch = dispatch.clone();
        let api_ctx = (*api_ctx).clone();
        use_effect_with_deps(
            move |_| {
                let restored = api_ctx.restore();
                let collapsed = load_sidebar_collapsed();
                dispatch.reduce_mut(|store| {
                    store.common.sidebar_collapsed = collapsed;
                    if let Some(user) = restored {
                        set_login(&mut store.common, user);
                    }
                });
                let client = api_ctx.client.clone();
                yew::platform::spawn_local(async move {
                    match client.fetch_config().await {
                        Ok(config) => dispatch.reduce_mut(|store| {
                            set_config(&mut store.common, config);
                        }),
                        Err(err) => log_api_error("sys/config", &err),
                    }
                });
                || ()
            },
            (),
        );
    }
    {
        use_effect_with_deps(
            move |locale| {
                persist_locale(**locale);
                || ()
            },
            locale.clone(),
        );
    }

    let set_locale = {
        let locale = locale.clone();
        Callback::from(move |next: LocaleCode| locale.set(next))
    };

    html! {
        <ContextProvider<ApiCtx> context={(*api_ctx).clone()}>
            <ContextProvider<TranslationBundle> context={(*bundle).clone()}>
                <BrowserRouter basename={BASENAME}>
                    <AppLayout locale={*locale} on_locale_change={set_locale} />
                </BrowserRouter>
            </ContextProvider<TranslationBundle>>
        </ContextProvider<ApiCtx>>
    }
}

#[derive(Properties, PartialEq)]
struct AppLayoutProps {
    locale: LocaleCode,
    on_locale_change: Callback<LocaleCode>,
}

#[function_component(AppLayout)]
fn app_layout(props: &AppLayoutProps) -> Html {
    let sidebar_collapsed = use_selector(|store: &AppStore| store.common.sidebar_collapsed);
    let show_player = use_selector(select_show_audio_player);

    html! {
        <div class="grid grid-rows-[auto_1fr] h-full md:grid-cols-[300px_1fr]">
            <Header locale={props.locale} on_locale_change={props.on_locale_change.clone()} />
            <Sidebar />
            <div class={content_column_classes(*sidebar_collapsed)}>
                <div class="grid grid-rows-[1fr_auto] h-full">
                    <Switch<Route> render={switch} />
                    {if *show_player { html! { <AudioPlayer /> } } else { html! {} }}
                </div>
            </div>
        </div>
    }
}

fn switch(route: Route) -> Html {
    html! { <RouteGate route={route} /> }
}

#[derive(Properties, PartialEq)]
struct RouteGateProps {
    route: Route,
}

/// Holds protected routes until config is known, then redirects to the login
/// screen when the server requires it and no session exists.
#[function_component(RouteGate)]
fn route_gate(props: &RouteGateProps) -> Html {
    let config = use_selector(|store: &AppStore| store.common.config.clone());
    let authenticated = use_selector(|store: &AppStore| store.common.login_data.is_some());

    if props.route.is_protected() {
        if config.is_none() {
            return html! { <Loading /> };
        }
        if needs_login((*config).as_ref(), *authenticated) {
            return html! { <Redirect<Route> to={Route::Login} /> };
        }
    }

    match props.route.clone() {
        Route::Root => html! { <Redirect<Route> to={Route::Home} /> },
        Route::Home => html! { <Homepage /> },
        Route::Podcasts => html! { <PodcastsPage /> },
        Route::PodcastDetail { id } => html! { <PodcastDetailPage id={id} /> },
        Route::Login => html! { <LoginPage /> },
        Route::NotFound => html! { <NotFound /> },
    }
}

#[function_component(NotFound)]
fn not_found() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    html! {
        <div class="p-8">
            <h2 class="text-2xl font-bold">{bundle.text("common.not_found_title")}</h2>
            <p class="text-gray-400">{bundle.text("common.not_found_body")}</p>
        </div>
    }
}

pub(crate) fn log_api_error(operation: &'static str, err: &ApiError) {
    let status = err.status.map_or_else(|| "-".to_string(), |code| code.to_string());
    console::error!("api request failed", operation, status, err.to_string());
}

/// Entrypoint invoked by Trunk for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<PodFetchApp>::with_root(root).render();
    } else {
        yew::Renderer::<PodFetchApp>::new().render();
    }
}
