//! UI state types and event definitions.
//!
//! This module contains the image state machine, the modal mode enum,
//! the single-slot request token, and the channel event types used by
//! the studio window.

/// The image being worked on, as held by the studio window.
///
/// Invariant: `is_processing` is true only while exactly one edit request
/// is outstanding, and `error` and a successful `edited` update are
/// mutually exclusive outcomes of a single request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageState {
    /// The uploaded photo, as a data URL.
    pub original: Option<String>,
    /// The current working result, as a data URL.
    pub edited: Option<String>,
    /// Whether an edit request is outstanding.
    pub is_processing: bool,
    /// The last failure message, shown until the next action.
    pub error: Option<String>,
}

impl ImageState {
    /// Replaces the state wholesale with a freshly uploaded photo.
    pub fn load(&mut self, data_url: String) {
        *self = Self {
            original: Some(data_url.clone()),
            edited: Some(data_url),
            is_processing: false,
            error: None,
        };
    }

    /// Marks the start of an edit request.
    ///
    /// Returns false (and leaves the state untouched) when there is no
    /// photo to edit or a request is already outstanding.
    pub fn begin_edit(&mut self) -> bool {
        if self.original.is_none() || self.is_processing {
            return false;
        }
        self.is_processing = true;
        self.error = None;
        true
    }

    /// Applies a successful edit result.
    pub fn finish_success(&mut self, data_url: String) {
        self.edited = Some(data_url);
        self.is_processing = false;
        self.error = None;
    }

    /// Records a failed edit. Previously held images are untouched.
    pub fn finish_failure(&mut self, message: String) {
        self.is_processing = false;
        self.error = Some(message);
    }

    /// Copies the original photo back into the working result.
    pub fn restore(&mut self) {
        self.edited = self.original.clone();
        self.error = None;
    }

    /// Resets to the empty state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn has_image(&self) -> bool {
        self.original.is_some()
    }
}

/// Which surface the studio window is showing.
///
/// A single enumerated mode replaces per-modal visibility booleans, so
/// the wardrobe picker and the help chat can never be open at once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UiMode {
    /// The main editing surface.
    #[default]
    Studio,
    /// The clothing picker overlay.
    Wardrobe,
    /// The help chat overlay.
    Help,
}

/// Single-slot request token.
///
/// Issuing a new token invalidates any token held by a prior in-flight
/// request; late responses carrying a stale token are discarded. This
/// is what prevents a cleared or re-submitted state from being clobbered
/// by an old response.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestSlot {
    seq: u64,
}

impl RequestSlot {
    /// Issues a fresh token, invalidating all previously issued ones.
    pub fn issue(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    /// Whether `token` is the most recently issued one.
    pub fn accepts(&self, token: u64) -> bool {
        token == self.seq
    }

    /// Invalidates every outstanding token without issuing a new one.
    pub fn invalidate(&mut self) {
        self.seq += 1;
    }
}

/// Author of a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

/// One entry in the help chat's append-only log.
#[derive(Clone, Debug)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: text.into(),
        }
    }
}

/// Events received from background request threads.
///
/// Every event carries the token of the request that produced it; the
/// studio window drops events whose token is no longer current.
pub(crate) enum StudioEvent {
    /// An edit request completed with a new data URL.
    EditDone { token: u64, data_url: String },
    /// An edit request failed.
    EditFailed { token: u64, message: String },
    /// The assistant replied to a chat message.
    ChatReply { token: u64, text: String },
    /// A chat request failed.
    ChatFailed { token: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL_A: &str = "data:image/png;base64,QQ==";
    const URL_B: &str = "data:image/png;base64,Qg==";

    #[test]
    fn load_replaces_wholesale() {
        let mut state = ImageState {
            error: Some("old".to_string()),
            ..Default::default()
        };
        state.load(URL_A.to_string());
        assert_eq!(state.original.as_deref(), Some(URL_A));
        assert_eq!(state.edited.as_deref(), Some(URL_A));
        assert!(!state.is_processing);
        assert!(state.error.is_none());
    }

    #[test]
    fn begin_edit_requires_image() {
        let mut state = ImageState::default();
        assert!(!state.begin_edit());
        state.load(URL_A.to_string());
        assert!(state.begin_edit());
        assert!(state.is_processing);
    }

    #[test]
    fn begin_edit_rejects_concurrent_request() {
        let mut state = ImageState::default();
        state.load(URL_A.to_string());
        assert!(state.begin_edit());
        assert!(!state.begin_edit());
    }

    #[test]
    fn begin_edit_dismisses_error() {
        let mut state = ImageState::default();
        state.load(URL_A.to_string());
        state.begin_edit();
        state.finish_failure("boom".to_string());
        assert!(state.error.is_some());
        assert!(state.begin_edit());
        assert!(state.error.is_none());
    }

    #[test]
    fn success_updates_edited_and_clears_processing() {
        let mut state = ImageState::default();
        state.load(URL_A.to_string());
        state.begin_edit();
        state.finish_success(URL_B.to_string());
        assert_eq!(state.edited.as_deref(), Some(URL_B));
        assert_eq!(state.original.as_deref(), Some(URL_A));
        assert!(!state.is_processing);
        assert!(state.error.is_none());
    }

    #[test]
    fn failure_preserves_images_and_clears_processing() {
        let mut state = ImageState::default();
        state.load(URL_A.to_string());
        state.begin_edit();
        state.finish_failure("quota".to_string());
        assert_eq!(state.original.as_deref(), Some(URL_A));
        assert_eq!(state.edited.as_deref(), Some(URL_A));
        assert!(!state.is_processing);
        assert_eq!(state.error.as_deref(), Some("quota"));
    }

    #[test]
    fn restore_copies_original_into_edited() {
        let mut state = ImageState::default();
        state.load(URL_A.to_string());
        state.begin_edit();
        state.finish_success(URL_B.to_string());
        state.restore();
        assert_eq!(state.edited.as_deref(), Some(URL_A));
    }

    #[test]
    fn clear_resets_everything() {
        let mut state = ImageState::default();
        state.load(URL_A.to_string());
        state.begin_edit();
        state.clear();
        assert_eq!(state, ImageState::default());
    }

    #[test]
    fn request_slot_accepts_only_latest_token() {
        let mut slot = RequestSlot::default();
        let first = slot.issue();
        assert!(slot.accepts(first));
        let second = slot.issue();
        assert!(!slot.accepts(first));
        assert!(slot.accepts(second));
    }

    #[test]
    fn request_slot_invalidate_stales_everything() {
        let mut slot = RequestSlot::default();
        let token = slot.issue();
        slot.invalidate();
        assert!(!slot.accepts(token));
    }

    #[test]
    fn clear_during_in_flight_request_discards_late_response() {
        // Clear while a request is outstanding, then the stale response arrives.
        let mut state = ImageState::default();
        let mut slot = RequestSlot::default();

        state.load(URL_A.to_string());
        state.begin_edit();
        let token = slot.issue();

        state.clear();
        slot.invalidate();

        // Late response bearing the stale token: must be dropped.
        if slot.accepts(token) {
            state.finish_success(URL_B.to_string());
        }
        assert_eq!(state, ImageState::default());
    }
}
