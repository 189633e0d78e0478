pub(crate) mod export;
pub(crate) mod playhead;
pub(crate) mod scene_session;
