use crate::domain::messages::random_quote;
use crate::domain::ToastKind;
use crate::store::Feedback;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    shown_at: Instant,
}

/// Transient toast, confetti and bell state
#[derive(Debug)]
pub struct FeedbackState {
    toast: Option<Toast>,
    celebration_started: Option<Instant>,
    lifetime: Duration,
    pending_bell: bool,
}

impl FeedbackState {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            toast: None,
            celebration_started: None,
            lifetime,
            pending_bell: false,
        }
    }

    /// Show a toast with a random quote of the given kind, replacing any current one
    pub fn show_toast(&mut self, kind: ToastKind, now: Instant) {
        self.show_message(random_quote(kind).to_string(), kind, now);
    }

    pub fn show_message(&mut self, message: String, kind: ToastKind, now: Instant) {
        self.toast = Some(Toast {
            message,
            kind,
            shown_at: now,
        });
    }

    pub fn celebrate(&mut self, now: Instant) {
        self.celebration_started = Some(now);
        self.pending_bell = true;
    }

    /// React to an event drained from the store
    pub fn apply(&mut self, feedback: Feedback, now: Instant) {
        self.show_toast(feedback.toast_kind(), now);
        if feedback == Feedback::Celebrate {
            self.celebrate(now);
        }
    }

    /// One aggregate cue for every batch of newly overdue tasks
    pub fn overdue(&mut self, now: Instant) {
        self.show_toast(ToastKind::Roast, now);
        self.pending_bell = true;
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebration_started.is_some()
    }

    /// Drop anything that has been on screen longer than its lifetime
    pub fn expire(&mut self, now: Instant) {
        let lifetime = self.lifetime;
        let expired = |started: Instant| now.saturating_duration_since(started) >= lifetime;

        if self.toast.as_ref().is_some_and(|t| expired(t.shown_at)) {
            self.toast = None;
        }
        if self.celebration_started.is_some_and(expired) {
            self.celebration_started = None;
        }
    }

    /// Whether a bell should ring; clears the request
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.pending_bell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::messages::quotes;

    fn state() -> FeedbackState {
        FeedbackState::new(Duration::from_secs(3))
    }

    #[test]
    fn test_celebrate_feedback_shows_success_and_confetti() {
        let mut feedback = state();
        let now = Instant::now();

        feedback.apply(Feedback::Celebrate, now);

        let toast = feedback.toast().unwrap();
        assert_eq!(toast.kind, ToastKind::Success);
        assert!(quotes(ToastKind::Success).contains(&toast.message.as_str()));
        assert!(feedback.is_celebrating());
        assert!(feedback.take_bell());
        assert!(!feedback.take_bell());
    }

    #[test]
    fn test_roast_has_no_confetti() {
        let mut feedback = state();
        feedback.apply(Feedback::Roast, Instant::now());

        assert_eq!(feedback.toast().unwrap().kind, ToastKind::Roast);
        assert!(!feedback.is_celebrating());
        assert!(!feedback.take_bell());
    }

    #[test]
    fn test_expires_after_lifetime() {
        let mut feedback = state();
        let start = Instant::now();
        feedback.apply(Feedback::Celebrate, start);

        feedback.expire(start + Duration::from_secs(2));
        assert!(feedback.toast().is_some());
        assert!(feedback.is_celebrating());

        feedback.expire(start + Duration::from_secs(3));
        assert!(feedback.toast().is_none());
        assert!(!feedback.is_celebrating());
    }

    #[test]
    fn test_new_toast_restarts_lifetime() {
        let mut feedback = state();
        let start = Instant::now();
        feedback.show_toast(ToastKind::Success, start);
        feedback.overdue(start + Duration::from_secs(2));

        feedback.expire(start + Duration::from_secs(4));
        assert_eq!(feedback.toast().unwrap().kind, ToastKind::Roast);
        assert!(feedback.take_bell());
    }
}
