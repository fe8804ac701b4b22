use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const TOAST_LIFETIME: Duration = Duration::from_secs(3);
pub const TOAST_FADE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub created: Instant,
}

impl Toast {
    /// Fully visible for [`TOAST_LIFETIME`], then fading.
    pub fn is_fading(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created) >= TOAST_LIFETIME
    }

    fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created) >= TOAST_LIFETIME + TOAST_FADE
    }
}

/// Transient status messages, oldest first.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push_at(ToastLevel::Success, message.into(), Instant::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push_at(ToastLevel::Error, message.into(), Instant::now());
    }

    pub fn push_at(&mut self, level: ToastLevel, message: String, created: Instant) {
        match level {
            ToastLevel::Success => tracing::info!(%message, "toast"),
            ToastLevel::Error => tracing::warn!(%message, "toast"),
        }
        self.toasts.push_back(Toast {
            level,
            message,
            created,
        });
    }

    /// Drop every toast whose fade has finished.
    pub fn prune(&mut self, now: Instant) {
        self.toasts.retain(|toast| !toast.is_expired(now));
    }

    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.back()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_lives_three_seconds_then_fades() {
        let start = Instant::now();
        let mut queue = ToastQueue::new();
        queue.push_at(ToastLevel::Success, "ok".to_string(), start);

        queue.prune(start + Duration::from_millis(2_999));
        let toast = queue.latest().unwrap();
        assert!(!toast.is_fading(start + Duration::from_millis(2_999)));
        assert!(toast.is_fading(start + TOAST_LIFETIME));

        queue.prune(start + Duration::from_millis(3_299));
        assert!(!queue.is_empty());

        queue.prune(start + TOAST_LIFETIME + TOAST_FADE);
        assert!(queue.is_empty());
    }

    #[test]
    fn older_toasts_expire_first() {
        let start = Instant::now();
        let mut queue = ToastQueue::new();
        queue.push_at(ToastLevel::Error, "first".to_string(), start);
        queue.push_at(
            ToastLevel::Success,
            "second".to_string(),
            start + Duration::from_secs(2),
        );

        queue.prune(start + Duration::from_secs(4));

        let messages: Vec<&str> = queue.visible().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["second"]);
    }
}
