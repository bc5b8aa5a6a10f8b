//! Podcast grid view.

use crate::app::Route;
use crate::app::api::ApiCtx;
use crate::app::log_api_error;
use crate::components::loading::Loading;
use crate::core::store::{AppStore, set_podcasts};
use crate::features::FetchStatus;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use podfetch_api_models::Podcast;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

#[function_component(PodcastsPage)]
pub(crate) fn podcasts_page() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key);
    let api_ctx = use_context::<ApiCtx>();
    let podcasts = use_selector(|store: &AppStore| store.common.podcasts.clone());
    let status = use_state(|| FetchStatus::Loading);

    {
        let status = status.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(api_ctx) = api_ctx {
                    yew::platform::spawn_local(async move {
                        match api_ctx.client.fetch_podcasts().await {
                            Ok(list) => {
                                Dispatch::<AppStore>::new().reduce_mut(|store| {
                                    set_podcasts(&mut store.common, list);
                                });
                                status.set(FetchStatus::Ready);
                            }
                            Err(err) => {
                                log_api_error("podcasts", &err);
                                status.set(FetchStatus::Failed);
                            }
                        }
                    });
                }
                || ()
            },
            (),
        );
    }

    let body = match (*status, podcasts.is_empty()) {
        (FetchStatus::Loading, true) => html! { <Loading /> },
        (FetchStatus::Failed, true) => html! { <p class="text-red-400">{t("podcasts.load_failed")}</p> },
        (_, true) => html! { <p class="text-gray-400">{t("podcasts.empty")}</p> },
        (_, false) => html! {
            <ul class="grid gap-4 grid-cols-2 sm:grid-cols-3 lg:grid-cols-4 xl:grid-cols-6">
                {for podcasts.iter().map(render_card)}
            </ul>
        },
    };

    html! {
        <section class="p-4 md:p-8 space-y-6">
            <h2 class="text-2xl font-bold">{t("podcasts.title")}</h2>
            {body}
        </section>
    }
}

fn render_card(podcast: &Podcast) -> Html {
    html! {
        <li key={podcast.id}>
            <Link<Route> to={Route::PodcastDetail { id: podcast.id.to_string() }}
                classes={classes!("block", "rounded-lg", "overflow-hidden", "bg-gray-800", "hover:ring-2", "ring-blue-500", (!podcast.active).then_some("opacity-60"))}>
                <img class="w-full aspect-square object-cover" src={podcast.image_url.clone()} alt="" />
                <div class="p-2 flex items-center gap-2">
                    <span class="truncate text-sm font-medium flex-1">{podcast.name.clone()}</span>
                    {if podcast.favorites {
                        html! { <i class="fa-solid fa-star text-yellow-400"></i> }
                    } else { html! {} }}
                </div>
            </Link<Route>>
        </li>
    }
}
