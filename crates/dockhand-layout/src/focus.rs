use std::sync::atomic::{AtomicU64, Ordering};

use dockhand_core::TimerToken;

static NEXT_BLUR_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Debounced focus state of one panel.
///
/// Losing focus only arms a blur; the blur lands when its timer token comes
/// back, unless a focus-enter disarmed it first. Tokens are unique across
/// all panels, so a host may hand every expired token to every panel.
#[derive(Debug, Default)]
pub(crate) struct FocusTracker {
    focused: bool,
    pending_blur: Option<TimerToken>,
}

impl FocusTracker {
    pub(crate) fn is_focused(&self) -> bool {
        self.focused
    }

    pub(crate) fn has_pending_blur(&self) -> bool {
        self.pending_blur.is_some()
    }

    /// Returns true if this moved the panel from unfocused to focused.
    pub(crate) fn focus_in(&mut self) -> bool {
        self.pending_blur = None;
        !std::mem::replace(&mut self.focused, true)
    }

    /// Arm a deferred blur and return the token that will complete it.
    pub(crate) fn focus_out(&mut self) -> TimerToken {
        let token = NEXT_BLUR_TOKEN.fetch_add(1, Ordering::Relaxed);
        self.pending_blur = Some(token);
        token
    }

    /// Complete the blur armed with `token`. Stale tokens are ignored.
    /// Returns true if the panel went from focused to unfocused.
    pub(crate) fn expire(&mut self, token: TimerToken) -> bool {
        if self.pending_blur != Some(token) {
            return false;
        }
        self.pending_blur = None;
        std::mem::replace(&mut self.focused, false)
    }
}
