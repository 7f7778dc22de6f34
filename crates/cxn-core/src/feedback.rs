use std::time::Duration;

/// Default lifetime of a feedback message
pub const DEFAULT_FEEDBACK_DELAY: Duration = Duration::from_millis(5000);

/// Identifies one scheduled expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryHandle(u64);

#[derive(Debug, Clone)]
struct PendingExpiry {
    handle: ExpiryHandle,
    remaining: Duration,
}

/// A transient user-facing message with a one-shot expiry.
///
/// At most one expiry is pending; showing a new message cancels the previous
/// one first. Time advances only through [`Feedback::advance`], which the
/// caller's event loop drives on each tick.
#[derive(Debug, Clone)]
pub struct Feedback {
    message: Option<String>,
    pending: Option<PendingExpiry>,
    delay: Duration,
    next_handle: u64,
}

impl Default for Feedback {
    fn default() -> Self {
        Self::new(DEFAULT_FEEDBACK_DELAY)
    }
}

impl Feedback {
    pub fn new(delay: Duration) -> Self {
        Self {
            message: None,
            pending: None,
            delay,
            next_handle: 0,
        }
    }

    /// The message currently shown, if any
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The handle of the pending expiry, if any
    pub fn pending(&self) -> Option<ExpiryHandle> {
        self.pending.as_ref().map(|p| p.handle)
    }

    /// Show a message and schedule its expiry
    pub fn show(&mut self, msg: &str) -> ExpiryHandle {
        self.cancel();
        self.next_handle += 1;
        let handle = ExpiryHandle(self.next_handle);
        self.message = Some(msg.to_string());
        self.pending = Some(PendingExpiry {
            handle,
            remaining: self.delay,
        });
        handle
    }

    /// Drop the message and any pending expiry
    pub fn clear(&mut self) {
        self.cancel();
        self.message = None;
    }

    /// Cancel the pending expiry, leaving the message in place
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Advance time; returns true if the message expired during this step
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        let Some(pending) = self.pending.as_mut() else {
            return false;
        };
        pending.remaining = pending.remaining.saturating_sub(elapsed);
        if pending.remaining.is_zero() {
            self.pending = None;
            self.message = None;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_expires_after_delay() {
        let mut feedback = Feedback::new(Duration::from_millis(300));
        feedback.show("Sorry");
        assert_eq!(feedback.message(), Some("Sorry"));

        assert!(!feedback.advance(Duration::from_millis(100)));
        assert!(!feedback.advance(Duration::from_millis(100)));
        assert_eq!(feedback.message(), Some("Sorry"));

        assert!(feedback.advance(Duration::from_millis(100)));
        assert_eq!(feedback.message(), None);
        assert_eq!(feedback.pending(), None);
    }

    #[test]
    fn test_show_replaces_pending_expiry() {
        let mut feedback = Feedback::new(Duration::from_millis(300));
        let first = feedback.show("One away");
        feedback.advance(Duration::from_millis(200));

        let second = feedback.show("Sorry");
        assert_ne!(first, second);
        assert_eq!(feedback.pending(), Some(second));

        // The replacement starts a full delay of its own
        assert!(!feedback.advance(Duration::from_millis(200)));
        assert_eq!(feedback.message(), Some("Sorry"));
        assert!(feedback.advance(Duration::from_millis(100)));
    }

    #[test]
    fn test_clear_cancels_expiry() {
        let mut feedback = Feedback::default();
        feedback.show("Sorry");
        feedback.clear();
        assert_eq!(feedback.message(), None);
        assert_eq!(feedback.pending(), None);
        assert!(!feedback.advance(DEFAULT_FEEDBACK_DELAY));
    }
}
