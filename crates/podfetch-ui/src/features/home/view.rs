//! Homepage view: recently played episodes.

use crate::app::api::ApiCtx;
use crate::app::log_api_error;
use crate::components::loading::Loading;
use crate::core::store::{AppStore, play_episode, set_last_watched};
use crate::core::time::{format_time, format_timestamp};
use crate::features::FetchStatus;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use podfetch_api_models::WatchedEpisode;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

#[function_component(Homepage)]
pub(crate) fn homepage() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key);
    let api_ctx = use_context::<ApiCtx>();
    let items = use_selector(|store: &AppStore| store.common.last_watched.clone());
    let status = use_state(|| FetchStatus::Loading);

    {
        let status = status.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(api_ctx) = api_ctx {
                    yew::platform::spawn_local(async move {
                        match api_ctx.client.fetch_last_watched().await {
                            Ok(list) => {
                                Dispatch::<AppStore>::new().reduce_mut(|store| {
                                    set_last_watched(&mut store.common, list);
                                });
                                status.set(FetchStatus::Ready);
                            }
                            Err(err) => {
                                log_api_error("podcast/episode/lastwatched", &err);
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

    let body = match (*status, items.is_empty()) {
        (FetchStatus::Loading, true) => html! { <Loading /> },
        (FetchStatus::Failed, true) => html! { <p class="text-red-400">{t("home.load_failed")}</p> },
        (_, true) => html! { <p class="text-gray-400">{t("home.empty")}</p> },
        (_, false) => html! {
            <ul class="grid gap-4 sm:grid-cols-2 xl:grid-cols-3">
                {for items.iter().map(|item| render_item(&t, item))}
            </ul>
        },
    };

    html! {
        <section class="p-4 md:p-8 space-y-6">
            <h2 class="text-2xl font-bold">{t("home.title")}</h2>
            {body}
        </section>
    }
}

fn render_item(t: &impl Fn(&str) -> String, item: &WatchedEpisode) -> Html {
    let on_resume = {
        let episode = item.podcast_episode.clone();
        let podcast = item.podcast.clone();
        let start_at = f64::from(item.watched_time);
        Callback::from(move |_: MouseEvent| {
            let (episode, podcast) = (episode.clone(), podcast.clone());
            Dispatch::<AppStore>::new().reduce_mut(|store| {
                play_episode(&mut store.audio_player, episode, Some(podcast), start_at);
            });
        })
    };
    let percent = item.progress() * 100.0;

    html! {
        <li class="rounded-lg bg-gray-800 overflow-hidden flex flex-col">
            <img class="w-full aspect-square object-cover" src={item.image_url.clone()} alt="" />
            <div class="h-1 bg-gray-700">
                <div class="h-1 bg-blue-500" style={format!("width: {percent:.1}%")}></div>
            </div>
            <div class="p-3 space-y-1 flex-1">
                <div class="font-semibold line-clamp-2">{item.name.clone()}</div>
                <div class="text-sm text-gray-400 truncate">{item.podcast.name.clone()}</div>
                <div class="text-xs text-gray-500 tabular-nums">
                    {format!(
                        "{} / {} · {}",
                        format_time(f64::from(item.watched_time)),
                        format_time(f64::from(item.total_time)),
                        format_timestamp(&item.date)
                    )}
                </div>
            </div>
            <button class="m-3 mt-0 rounded bg-blue-800 hover:bg-blue-700 px-3 py-1.5 text-sm" onclick={on_resume}>
                <i class="fa-solid fa-play mr-2"></i>
                {t("home.resume")}
            </button>
        </li>
    }
}
