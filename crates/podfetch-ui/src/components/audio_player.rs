//! Global audio player bar.
//!
//! # Design
//! - The store is the source of truth; effects push it into the `<audio>` element.
//! - Media events report position and end-of-stream back through reducers.
//! - Seeks requested before metadata loads stay pending until `loadedmetadata`.

use crate::core::store::{
    AppStore, SKIP_BACK_SECS, SKIP_FORWARD_SECS, clear_seek, cycle_playback_rate, seek_by,
    seek_to, select_playback_progress, set_playing, set_volume, stop, toggle_playback,
    update_position,
};
use crate::core::time::format_time;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use gloo::console;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

/// `HAVE_METADATA` ready state of a media element.
const HAVE_METADATA: u16 = 1;

#[function_component(AudioPlayer)]
pub(crate) fn audio_player() -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str| bundle.text(key);
    let player = use_selector(|store: &AppStore| store.audio_player.clone());
    let audio_ref = use_node_ref();

    let src = player
        .current_episode
        .as_ref()
        .map(|episode| episode.playback_url().to_string())
        .unwrap_or_default();

    {
        let audio_ref = audio_ref.clone();
        use_effect_with_deps(
            move |(playing, _src)| {
                if let Some(audio) = audio_ref.cast::<HtmlAudioElement>() {
                    if *playing {
                        match audio.play() {
                            Ok(promise) => yew::platform::spawn_local(async move {
                                // Autoplay policies reject the promise; reflect that as paused.
                                if let Err(err) = JsFuture::from(promise).await {
                                    console::error!("audio playback rejected", err);
                                    Dispatch::<AppStore>::new().reduce_mut(|store| {
                                        set_playing(&mut store.audio_player, false);
                                    });
                                }
                            }),
                            Err(err) => console::error!("audio play failed", err),
                        }
                    } else if let Err(err) = audio.pause() {
                        console::error!("audio pause failed", err);
                    }
                }
                || ()
            },
            (player.playing, src.clone()),
        );
    }
    {
        let audio_ref = audio_ref.clone();
        use_effect_with_deps(
            move |seek: &Option<f64>| {
                if let (Some(target), Some(audio)) = (*seek, audio_ref.cast::<HtmlAudioElement>()) {
                    if audio.ready_state() >= HAVE_METADATA {
                        audio.set_current_time(target);
                        Dispatch::<AppStore>::new().reduce_mut(|store| {
                            clear_seek(&mut store.audio_player);
                        });
                    }
                }
                || ()
            },
            player.seek_to,
        );
    }
    {
        let audio_ref = audio_ref.clone();
        use_effect_with_deps(
            move |(volume, rate): &(u8, f64)| {
                if let Some(audio) = audio_ref.cast::<HtmlAudioElement>() {
                    audio.set_volume(f64::from(*volume) / 100.0);
                    audio.set_playback_rate(*rate);
                }
                || ()
            },
            (player.volume, player.playback_rate),
        );
    }

    let report_position = {
        let audio_ref = audio_ref.clone();
        Callback::from(move |_: Event| {
            if let Some(audio) = audio_ref.cast::<HtmlAudioElement>() {
                let (position, duration) = (audio.current_time(), audio.duration());
                Dispatch::<AppStore>::new().reduce_mut(|store| {
                    update_position(&mut store.audio_player, position, duration);
                });
            }
        })
    };
    let on_metadata = {
        let audio_ref = audio_ref.clone();
        Callback::from(move |_: Event| {
            let Some(audio) = audio_ref.cast::<HtmlAudioElement>() else {
                return;
            };
            let dispatch = Dispatch::<AppStore>::new();
            let pending = dispatch.get().audio_player.seek_to;
            if let Some(target) = pending {
                audio.set_current_time(target);
            }
            let duration = audio.duration();
            dispatch.reduce_mut(|store| {
                clear_seek(&mut store.audio_player);
                let position = store.audio_player.position_secs;
                update_position(&mut store.audio_player, position, duration);
            });
        })
    };
    let on_play = Callback::from(|_: Event| {
        Dispatch::<AppStore>::new().reduce_mut(|store| set_playing(&mut store.audio_player, true));
    });
    let on_pause = Callback::from(|_: Event| {
        Dispatch::<AppStore>::new().reduce_mut(|store| set_playing(&mut store.audio_player, false));
    });
    let on_toggle = Callback::from(|_: MouseEvent| {
        Dispatch::<AppStore>::new().reduce_mut(|store| toggle_playback(&mut store.audio_player));
    });
    let on_back = Callback::from(|_: MouseEvent| {
        Dispatch::<AppStore>::new()
            .reduce_mut(|store| seek_by(&mut store.audio_player, -SKIP_BACK_SECS));
    });
    let on_forward = Callback::from(|_: MouseEvent| {
        Dispatch::<AppStore>::new()
            .reduce_mut(|store| seek_by(&mut store.audio_player, SKIP_FORWARD_SECS));
    });
    let on_seek = Callback::from(|e: InputEvent| {
        if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
            let target = input.value_as_number();
            Dispatch::<AppStore>::new().reduce_mut(|store| seek_to(&mut store.audio_player, target));
        }
    });
    let on_volume = Callback::from(|e: InputEvent| {
        if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
            let volume = input.value().parse::<u8>().unwrap_or(100);
            Dispatch::<AppStore>::new().reduce_mut(|store| set_volume(&mut store.audio_player, volume));
        }
    });
    let on_rate = Callback::from(|_: MouseEvent| {
        Dispatch::<AppStore>::new().reduce_mut(|store| {
            cycle_playback_rate(&mut store.audio_player);
        });
    });
    let on_close = Callback::from(|_: MouseEvent| {
        Dispatch::<AppStore>::new().reduce_mut(|store| stop(&mut store.audio_player));
    });

    let Some(episode) = player.current_episode.clone() else {
        return html! {};
    };
    let podcast_name = player
        .current_podcast
        .as_ref()
        .map(|podcast| podcast.name.clone())
        .unwrap_or_default();
    let progress_pct = select_playback_progress(&player) * 100.0;

    html! {
        <div class="sticky bottom-0 w-full bg-gray-800 text-white border-t border-gray-700 px-4 py-3">
            <audio
                ref={audio_ref}
                src={src}
                preload="metadata"
                ontimeupdate={report_position}
                onloadedmetadata={on_metadata}
                onplay={on_play}
                onpause={on_pause.clone()}
                onended={on_pause}
            />
            <div class="h-1 w-full bg-gray-700 mb-3" aria-hidden="true">
                <div class="h-1 bg-blue-500" style={format!("width: {progress_pct:.1}%")}></div>
            </div>
            <div class="flex items-center gap-4">
                <img class="w-12 h-12 rounded object-cover" src={episode.artwork_url().to_string()} alt="" />
                <div class="min-w-0 flex-1">
                    <div class="truncate font-semibold">{episode.name.clone()}</div>
                    <div class="truncate text-sm text-gray-400">{podcast_name}</div>
                </div>
                <div class="flex items-center gap-3">
                    <button aria-label={t("player.skip_back")} onclick={on_back}>
                        <i class="fa-solid fa-backward"></i>
                    </button>
                    <button class="text-2xl" aria-label={if player.playing { t("player.pause") } else { t("player.play") }} onclick={on_toggle}>
                        <i class={classes!("fa-solid", if player.playing { "fa-pause" } else { "fa-play" })}></i>
                    </button>
                    <button aria-label={t("player.skip_forward")} onclick={on_forward}>
                        <i class="fa-solid fa-forward"></i>
                    </button>
                </div>
                <div class="hidden md:flex items-center gap-2 text-sm tabular-nums">
                    <span>{format_time(player.position_secs)}</span>
                    <input type="range" min="0" step="1" aria-label={t("player.seek")}
                        max={player.duration_secs.max(0.0).to_string()}
                        value={player.position_secs.to_string()}
                        oninput={on_seek} />
                    <span>{format_time(player.duration_secs)}</span>
                </div>
                <input type="range" min="0" max="100" class="hidden md:block w-24" aria-label={t("player.volume")}
                    value={player.volume.to_string()}
                    oninput={on_volume} />
                <button class="text-sm tabular-nums" aria-label={t("player.rate")} onclick={on_rate}>
                    {format!("{}x", player.playback_rate)}
                </button>
                <button aria-label={t("player.close")} onclick={on_close}>
                    <i class="fa-solid fa-xmark"></i>
                </button>
            </div>
        </div>
    }
}
