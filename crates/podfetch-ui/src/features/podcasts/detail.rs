//! Podcast detail view: metadata plus the episode list.

use crate::app::Route;
use crate::app::api::ApiCtx;
use crate::app::log_api_error;
use crate::components::loading::Loading;
use crate::core::logic::parse_podcast_id;
use crate::core::store::{AppStore, play_episode, request_podcast, set_selected_podcast};
use crate::core::time::{format_recording_date, format_time};
use crate::features::FetchStatus;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use podfetch_api_models::{Podcast, PodcastEpisode};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::{Dispatch, use_selector_with_deps};

#[derive(Properties, PartialEq)]
pub(crate) struct PodcastDetailProps {
    /// Raw `:id` route segment.
    pub id: String,
}

#[function_component(PodcastDetailPage)]
pub(crate) fn podcast_detail_page(props: &PodcastDetailProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key);
    let api_ctx = use_context::<ApiCtx>();
    let podcast_id = parse_podcast_id(&props.id);
    let selected = use_selector_with_deps(
        |store: &AppStore, podcast_id: &Option<i32>| {
            store
                .common
                .selected_podcast
                .as_ref()
                .filter(|podcast| Some(podcast.id) == *podcast_id)
                .map(|podcast| (podcast.clone(), store.common.selected_episodes.clone()))
        },
        podcast_id,
    );
    let status = use_state(|| FetchStatus::Loading);

    {
        let status = status.clone();
        use_effect_with_deps(
            move |podcast_id: &Option<i32>| {
                match (*podcast_id, api_ctx) {
                    (Some(id), Some(api_ctx)) => {
                        status.set(FetchStatus::Loading);
                        let dispatch = Dispatch::<AppStore>::new();
                        dispatch.reduce_mut(|store| request_podcast(&mut store.common, id));
                        yew::platform::spawn_local(async move {
                            let client = &api_ctx.client;
                            let loaded = match client.fetch_podcast(id).await {
                                Ok(podcast) => client
                                    .fetch_episodes(id)
                                    .await
                                    .map(|episodes| (podcast, episodes)),
                                Err(err) => Err(err),
                            };
                            let current = dispatch.get().common.requested_podcast == Some(id);
                            match loaded {
                                Ok((podcast, episodes)) => {
                                    let mut applied = false;
                                    dispatch.reduce_mut(|store| {
                                        applied = set_selected_podcast(
                                            &mut store.common,
                                            podcast,
                                            episodes,
                                        );
                                    });
                                    if applied {
                                        status.set(FetchStatus::Ready);
                                    }
                                }
                                Err(err) => {
                                    log_api_error("podcast detail", &err);
                                    if current {
                                        status.set(FetchStatus::Failed);
                                    }
                                }
                            }
                        });
                    }
                    (None, _) => status.set(FetchStatus::Failed),
                    (Some(_), None) => {}
                }
                || ()
            },
            podcast_id,
        );
    }

    let back = html! {
        <Link<Route> to={Route::Podcasts} classes="text-sm text-blue-400 hover:underline">
            <i class="fa-solid fa-arrow-left mr-2"></i>
            {t("podcasts.back")}
        </Link<Route>>
    };

    let body = match ((*selected).clone(), *status) {
        (Some((podcast, episodes)), _) => render_podcast(&t, &podcast, &episodes),
        (None, FetchStatus::Failed) => html! { <p class="text-gray-400">{t("podcasts.not_found")}</p> },
        (None, _) => html! { <Loading /> },
    };

    html! {
        <section class="p-4 md:p-8 space-y-6">
            {back}
            {body}
        </section>
    }
}

fn render_podcast(
    t: &impl Fn(&str) -> String,
    podcast: &Podcast,
    episodes: &[PodcastEpisode],
) -> Html {
    let keywords = podcast.keyword_list();
    html! {
        <>
            <div class="flex flex-col md:flex-row gap-6">
                <img class="w-48 h-48 rounded-lg object-cover" src={podcast.image_url.clone()} alt="" />
                <div class="space-y-2 min-w-0">
                    <h2 class="text-2xl font-bold">{podcast.name.clone()}</h2>
                    {if let Some(author) = &podcast.author {
                        html! { <p class="text-gray-400">{format!("{} {author}", t("podcasts.by_author"))}</p> }
                    } else { html! {} }}
                    {if let Some(summary) = &podcast.summary {
                        html! { <p class="text-sm text-gray-300 line-clamp-4">{summary.clone()}</p> }
                    } else { html! {} }}
                    <div class="flex flex-wrap gap-2">
                        {for keywords.into_iter().map(|keyword| html! {
                            <span class="rounded-full bg-gray-700 px-2 py-0.5 text-xs">{keyword}</span>
                        })}
                    </div>
                </div>
            </div>
            <h3 class="text-xl font-semibold">{t("podcasts.episodes")}</h3>
            {if episodes.is_empty() {
                html! { <p class="text-gray-400">{t("podcasts.no_episodes")}</p> }
            } else {
                html! {
                    <ul class="divide-y divide-gray-700">
                        {for episodes.iter().map(|episode| render_episode(t, podcast, episode))}
                    </ul>
                }
            }}
        </>
    }
}

fn render_episode(
    t: &impl Fn(&str) -> String,
    podcast: &Podcast,
    episode: &PodcastEpisode,
) -> Html {
    let on_play = {
        let episode = episode.clone();
        let podcast = podcast.clone();
        Callback::from(move |_: MouseEvent| {
            let (episode, podcast) = (episode.clone(), podcast.clone());
            Dispatch::<AppStore>::new().reduce_mut(|store| {
                play_episode(&mut store.audio_player, episode, Some(podcast), 0.0);
            });
        })
    };

    html! {
        <li key={episode.id} class="flex items-center gap-4 py-3">
            <img class="w-14 h-14 rounded object-cover" src={episode.artwork_url().to_string()} alt="" />
            <div class="min-w-0 flex-1">
                <div class="text-xs text-gray-500">
                    {format_recording_date(&episode.date_of_recording)}
                    {if episode.total_time > 0 {
                        html! { <span class="ml-2 tabular-nums">{format_time(f64::from(episode.total_time))}</span> }
                    } else { html! {} }}
                    {if episode.is_downloaded() {
                        html! { <span class="ml-2 rounded bg-green-800 px-1.5 text-green-100">{t("podcasts.downloaded")}</span> }
                    } else { html! {} }}
                </div>
                <div class="font-medium truncate">{episode.name.clone()}</div>
            </div>
            <button class="text-2xl hover:text-blue-400" aria-label={t("podcasts.play_episode")} onclick={on_play}>
                <i class="fa-solid fa-circle-play"></i>
            </button>
        </li>
    }
}
