pub(crate) mod audio_player;
pub(crate) mod header;
pub(crate) mod loading;
pub(crate) mod login;
pub(crate) mod oidc;
pub(crate) mod sidebar;
