//! App-wide yewdux store slices.
//!
//! # Design
//! - Keep shared UI state in one store to avoid ad-hoc contexts.
//! - Two slices: `common` (config, session, loaded content) and `audio_player`.
//! - Reducers are free functions over a slice so they stay testable off-browser.

use crate::core::auth::SessionUser;
use podfetch_api_models::{ConfigModel, Podcast, PodcastEpisode, WatchedEpisode};
use yewdux::store::Store;

/// Playback rates offered by the player, in cycling order.
pub const PLAYBACK_RATES: [f64; 5] = [1.0, 1.25, 1.5, 2.0, 0.75];

/// Seconds skipped by the rewind control.
pub const SKIP_BACK_SECS: f64 = 15.0;

/// Seconds skipped by the fast-forward control.
pub const SKIP_FORWARD_SECS: f64 = 30.0;

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Store, Default)]
pub struct AppStore {
    /// Config, session, and page content.
    pub common: CommonSlice,
    /// Global audio player state.
    pub audio_player: AudioPlayerSlice,
}

/// Shared state read by the layout and the routed pages.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CommonSlice {
    /// Whether the sidebar is collapsed.
    pub sidebar_collapsed: bool,
    /// Server configuration; `None` until `/sys/config` answers.
    pub config: Option<ConfigModel>,
    /// Signed-in user, if any.
    pub login_data: Option<SessionUser>,
    /// Subscribed podcasts.
    pub podcasts: Vec<Podcast>,
    /// Podcast id the detail page is currently showing or loading.
    pub requested_podcast: Option<i32>,
    /// Podcast shown on the detail page.
    pub selected_podcast: Option<Podcast>,
    /// Episodes of the selected podcast.
    pub selected_episodes: Vec<PodcastEpisode>,
    /// Recently played episodes for the homepage.
    pub last_watched: Vec<WatchedEpisode>,
}

/// State of the global audio player.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioPlayerSlice {
    /// Episode loaded in the player.
    pub current_episode: Option<PodcastEpisode>,
    /// Podcast the loaded episode belongs to.
    pub current_podcast: Option<Podcast>,
    /// Whether playback is running.
    pub playing: bool,
    /// Playback position in seconds.
    pub position_secs: f64,
    /// Media duration in seconds (0 until metadata loads).
    pub duration_secs: f64,
    /// Volume percentage, 0..=100.
    pub volume: u8,
    /// Playback speed multiplier.
    pub playback_rate: f64,
    /// Pending seek target the media element should apply.
    pub seek_to: Option<f64>,
}

impl Default for AudioPlayerSlice {
    fn default() -> Self {
        Self {
            current_episode: None,
            current_podcast: None,
            playing: false,
            position_secs: 0.0,
            duration_secs: 0.0,
            volume: 100,
            playback_rate: 1.0,
            seek_to: None,
        }
    }
}

/// Store the server configuration.
pub fn set_config(common: &mut CommonSlice, config: ConfigModel) {
    common.config = Some(config);
}

/// Flip the sidebar and return the new collapsed flag.
pub fn toggle_sidebar(common: &mut CommonSlice) -> bool {
    common.sidebar_collapsed = !common.sidebar_collapsed;
    common.sidebar_collapsed
}

/// Record the signed-in user.
pub fn set_login(common: &mut CommonSlice, user: SessionUser) {
    common.login_data = Some(user);
}

/// Drop the session and any user-scoped content.
pub fn clear_login(common: &mut CommonSlice) {
    common.login_data = None;
    common.podcasts.clear();
    common.requested_podcast = None;
    common.selected_podcast = None;
    common.selected_episodes.clear();
    common.last_watched.clear();
}

/// Replace the podcast list, ordered by name.
pub fn set_podcasts(common: &mut CommonSlice, mut podcasts: Vec<Podcast>) {
    podcasts.sort_by_key(|podcast| podcast.name.to_lowercase());
    common.podcasts = podcasts;
}

/// Mark `id` as the podcast the detail page wants; older responses are dropped.
pub fn request_podcast(common: &mut CommonSlice, id: i32) {
    common.requested_podcast = Some(id);
}

/// Replace the detail page's podcast and episode list.
///
/// Returns `false` and leaves the slice untouched when `podcast` is not the
/// one last requested.
pub fn set_selected_podcast(
    common: &mut CommonSlice,
    podcast: Podcast,
    episodes: Vec<PodcastEpisode>,
) -> bool {
    if common.requested_podcast != Some(podcast.id) {
        return false;
    }
    common.selected_podcast = Some(podcast);
    common.selected_episodes = episodes;
    true
}

/// Replace the recently played list.
pub fn set_last_watched(common: &mut CommonSlice, mut items: Vec<WatchedEpisode>) {
    items.sort_by(|a, b| b.date.cmp(&a.date));
    common.last_watched = items;
}

/// Load an episode and start playback at `start_at` seconds.
pub fn play_episode(
    player: &mut AudioPlayerSlice,
    episode: PodcastEpisode,
    podcast: Option<Podcast>,
    start_at: f64,
) {
    let start_at = start_at.max(0.0);
    player.duration_secs = f64::from(episode.total_time.max(0));
    player.current_episode = Some(episode);
    player.current_podcast = podcast;
    player.position_secs = start_at;
    player.seek_to = (start_at > 0.0).then_some(start_at);
    player.playing = true;
}

/// Toggle between playing and paused; no-op without an episode.
pub fn toggle_playback(player: &mut AudioPlayerSlice) {
    if player.current_episode.is_some() {
        player.playing = !player.playing;
    }
}

/// Set the running flag directly (media element events).
pub fn set_playing(player: &mut AudioPlayerSlice, playing: bool) {
    player.playing = playing && player.current_episode.is_some();
}

/// Apply a position/duration report from the media element.
pub fn update_position(player: &mut AudioPlayerSlice, position_secs: f64, duration_secs: f64) {
    if duration_secs.is_finite() && duration_secs > 0.0 {
        player.duration_secs = duration_secs;
    }
    player.position_secs = clamp_position(position_secs, player.duration_secs);
}

/// Request a seek to an absolute position.
pub fn seek_to(player: &mut AudioPlayerSlice, position_secs: f64) {
    let target = clamp_position(position_secs, player.duration_secs);
    player.position_secs = target;
    player.seek_to = Some(target);
}

/// Request a seek relative to the current position.
pub fn seek_by(player: &mut AudioPlayerSlice, delta_secs: f64) {
    seek_to(player, player.position_secs + delta_secs);
}

/// Mark a pending seek as applied by the media element.
pub fn clear_seek(player: &mut AudioPlayerSlice) {
    player.seek_to = None;
}

/// Set the volume, clamped to 0..=100.
pub fn set_volume(player: &mut AudioPlayerSlice, volume: u8) {
    player.volume = volume.min(100);
}

/// Advance to the next rate in [`PLAYBACK_RATES`] and return it.
pub fn cycle_playback_rate(player: &mut AudioPlayerSlice) -> f64 {
    player.playback_rate = next_playback_rate(player.playback_rate);
    player.playback_rate
}

/// Unload the current episode, keeping volume and rate preferences.
pub fn stop(player: &mut AudioPlayerSlice) {
    *player = AudioPlayerSlice {
        volume: player.volume,
        playback_rate: player.playback_rate,
        ..AudioPlayerSlice::default()
    };
}

/// Rate following `current` in the cycle; unknown rates restart at 1.0.
#[must_use]
pub fn next_playback_rate(current: f64) -> f64 {
    PLAYBACK_RATES
        .iter()
        .position(|rate| (rate - current).abs() < f64::EPSILON)
        .map_or(PLAYBACK_RATES[0], |index| {
            PLAYBACK_RATES[(index + 1) % PLAYBACK_RATES.len()]
        })
}

/// Whether the global audio player should be mounted.
#[must_use]
pub const fn select_show_audio_player(store: &AppStore) -> bool {
    store.audio_player.current_episode.is_some()
}

/// Fraction of the current episode already played, in `0.0..=1.0`.
#[must_use]
pub fn select_playback_progress(player: &AudioPlayerSlice) -> f64 {
    if player.duration_secs <= 0.0 {
        0.0
    } else {
        (player.position_secs / player.duration_secs).clamp(0.0, 1.0)
    }
}

fn clamp_position(position_secs: f64, duration_secs: f64) -> f64 {
    if !position_secs.is_finite() {
        return 0.0;
    }
    let floor = position_secs.max(0.0);
    if duration_secs > 0.0 {
        floor.min(duration_secs)
    } else {
        floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(total_time: i32) -> PodcastEpisode {
        PodcastEpisode {
            id: 1,
            podcast_id: 2,
            episode_id: "guid-1".to_string(),
            name: "Episode".to_string(),
            url: "https://cdn.example/1.mp3".to_string(),
            date_of_recording: "2023-04-01T10:00:00".to_string(),
            image_url: String::new(),
            total_time,
            local_url: String::new(),
            local_image_url: String::new(),
            description: String::new(),
            status: "N".to_string(),
            download_time: None,
        }
    }

    fn podcast(id: i32) -> Podcast {
        Podcast {
            id,
            name: format!("Show {id}"),
            directory: String::new(),
            rssfeed: String::new(),
            image_url: String::new(),
            summary: None,
            language: None,
            explicit: None,
            keywords: None,
            author: None,
            active: true,
            favorites: false,
        }
    }

    #[test]
    fn late_detail_response_for_previous_route_is_dropped() {
        let mut common = CommonSlice::default();
        request_podcast(&mut common, 1);
        request_podcast(&mut common, 2);
        assert!(set_selected_podcast(&mut common, podcast(2), vec![episode(10)]));
        assert!(!set_selected_podcast(&mut common, podcast(1), Vec::new()));
        assert_eq!(common.selected_podcast.as_ref().map(|p| p.id), Some(2));
        assert_eq!(common.selected_episodes.len(), 1);
    }

    #[test]
    fn detail_response_without_request_is_ignored() {
        let mut common = CommonSlice::default();
        assert!(!set_selected_podcast(&mut common, podcast(4), Vec::new()));
        assert!(common.selected_podcast.is_none());
    }

    #[test]
    fn audio_player_hidden_until_episode_loaded() {
        let mut store = AppStore::default();
        assert!(!select_show_audio_player(&store));
        play_episode(&mut store.audio_player, episode(600), None, 0.0);
        assert!(select_show_audio_player(&store));
        stop(&mut store.audio_player);
        assert!(!select_show_audio_player(&store));
    }

    #[test]
    fn play_episode_seeds_position_and_duration() {
        let mut player = AudioPlayerSlice::default();
        play_episode(&mut player, episode(600), None, 120.0);
        assert!(player.playing);
        assert!((player.duration_secs - 600.0).abs() < f64::EPSILON);
        assert_eq!(player.seek_to, Some(120.0));
        play_episode(&mut player, episode(600), None, -5.0);
        assert_eq!(player.seek_to, None);
        assert!(player.position_secs.abs() < f64::EPSILON);
    }

    #[test]
    fn seeking_is_clamped_to_media_bounds() {
        let mut player = AudioPlayerSlice::default();
        play_episode(&mut player, episode(100), None, 90.0);
        seek_by(&mut player, SKIP_FORWARD_SECS);
        assert!((player.position_secs - 100.0).abs() < f64::EPSILON);
        seek_to(&mut player, 10.0);
        seek_by(&mut player, -SKIP_BACK_SECS);
        assert!(player.position_secs.abs() < f64::EPSILON);
        assert_eq!(player.seek_to, Some(0.0));
        clear_seek(&mut player);
        assert_eq!(player.seek_to, None);
    }

    #[test]
    fn position_reports_ignore_bogus_durations() {
        let mut player = AudioPlayerSlice::default();
        play_episode(&mut player, episode(0), None, 0.0);
        update_position(&mut player, 42.0, f64::NAN);
        assert!((player.position_secs - 42.0).abs() < f64::EPSILON);
        update_position(&mut player, 50.0, 40.0);
        assert!((player.duration_secs - 40.0).abs() < f64::EPSILON);
        assert!((player.position_secs - 40.0).abs() < f64::EPSILON);
        assert!((select_playback_progress(&player) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn playback_toggle_requires_episode() {
        let mut player = AudioPlayerSlice::default();
        toggle_playback(&mut player);
        assert!(!player.playing);
        set_playing(&mut player, true);
        assert!(!player.playing);
        play_episode(&mut player, episode(10), None, 0.0);
        toggle_playback(&mut player);
        assert!(!player.playing);
    }

    #[test]
    fn playback_rate_cycles_through_presets() {
        let mut player = AudioPlayerSlice::default();
        let seen: Vec<f64> = (0..5).map(|_| cycle_playback_rate(&mut player)).collect();
        assert_eq!(seen, vec![1.25, 1.5, 2.0, 0.75, 1.0]);
        assert!((next_playback_rate(3.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stop_keeps_listener_preferences() {
        let mut player = AudioPlayerSlice::default();
        set_volume(&mut player, 250);
        assert_eq!(player.volume, 100);
        set_volume(&mut player, 40);
        cycle_playback_rate(&mut player);
        play_episode(&mut player, episode(10), None, 0.0);
        stop(&mut player);
        assert_eq!(player.volume, 40);
        assert!((player.playback_rate - 1.25).abs() < f64::EPSILON);
        assert!(player.current_episode.is_none());
    }

    #[test]
    fn clear_login_drops_user_content() {
        let mut common = CommonSlice::default();
        set_login(
            &mut common,
            SessionUser {
                username: "alice".to_string(),
                remembered: false,
            },
        );
        common.selected_episodes.push(episode(10));
        clear_login(&mut common);
        assert!(common.login_data.is_none());
        assert!(common.selected_episodes.is_empty());
    }

    #[test]
    fn sidebar_toggle_flips_flag() {
        let mut common = CommonSlice::default();
        assert!(toggle_sidebar(&mut common));
        assert!(!toggle_sidebar(&mut common));
    }
}
