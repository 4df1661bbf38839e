//! Leveled, auto-expiring notification channel.
//!
//! The hub is a shared state cell: any component may post, the shell is the
//! single reader that renders. Messages expire `ttl` milliseconds after being
//! posted unless `ttl <= 0`, which keeps them until explicitly dismissed.
//! Expired entries are purged lazily on read; there is no background task.

use colored::Colorize;
use std::sync::{Arc, Mutex};
use tokio::time::{Duration, Instant};

/// Default time-to-live for a notification
pub const DEFAULT_TTL_MS: i64 = 3500;

/// Semantic level of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Success,
    Error,
    Warning,
    Info,
}

/// A posted notification
#[derive(Debug, Clone)]
pub struct Alert {
    pub id: u64,
    pub text: String,
    pub level: AlertLevel,
    /// None = persists until dismissed
    deadline: Option<Instant>,
    /// Set once the shell has printed it
    printed: bool,
}

#[derive(Debug, Default)]
struct HubState {
    next_id: u64,
    items: Vec<Alert>,
}

/// Shared notification hub. Cloning shares the underlying state.
#[derive(Debug, Clone, Default)]
pub struct AlertHub {
    inner: Arc<Mutex<HubState>>,
}

impl AlertHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Post a message. `ttl_ms <= 0` keeps it until [`AlertHub::dismiss`].
    pub fn post(&self, text: impl Into<String>, level: AlertLevel, ttl_ms: i64) -> u64 {
        let mut state = self.inner.lock().expect("alert hub poisoned");
        state.next_id += 1;
        let id = state.next_id;
        let deadline = if ttl_ms > 0 {
            Some(Instant::now() + Duration::from_millis(ttl_ms as u64))
        } else {
            None
        };
        state.items.push(Alert {
            id,
            text: text.into(),
            level,
            deadline,
            printed: false,
        });
        id
    }

    pub fn success(&self, text: impl Into<String>) -> u64 {
        self.post(text, AlertLevel::Success, DEFAULT_TTL_MS)
    }

    pub fn error(&self, text: impl Into<String>) -> u64 {
        self.post(text, AlertLevel::Error, DEFAULT_TTL_MS)
    }

    pub fn warning(&self, text: impl Into<String>) -> u64 {
        self.post(text, AlertLevel::Warning, DEFAULT_TTL_MS)
    }

    pub fn info(&self, text: impl Into<String>) -> u64 {
        self.post(text, AlertLevel::Info, DEFAULT_TTL_MS)
    }

    /// Remove one message by id
    pub fn dismiss(&self, id: u64) {
        let mut state = self.inner.lock().expect("alert hub poisoned");
        state.items.retain(|a| a.id != id);
    }

    /// Remove all messages
    pub fn clear(&self) {
        let mut state = self.inner.lock().expect("alert hub poisoned");
        state.items.clear();
    }

    /// Currently live messages (expired ones are purged first)
    pub fn active(&self) -> Vec<Alert> {
        let mut state = self.inner.lock().expect("alert hub poisoned");
        let now = Instant::now();
        state
            .items
            .retain(|a| a.deadline.map(|d| now < d).unwrap_or(true));
        state.items.clone()
    }

    /// Live messages not yet shown, marking them shown.
    ///
    /// The shell calls this once per loop iteration so each message prints
    /// exactly once regardless of which task posted it.
    pub fn take_unprinted(&self) -> Vec<Alert> {
        let mut state = self.inner.lock().expect("alert hub poisoned");
        let now = Instant::now();
        state
            .items
            .retain(|a| a.deadline.map(|d| now < d).unwrap_or(true));
        let fresh: Vec<Alert> = state.items.iter().filter(|a| !a.printed).cloned().collect();
        for item in state.items.iter_mut() {
            item.printed = true;
        }
        fresh
    }
}

/// Render one alert as a colored console line
pub fn render_alert(alert: &Alert, color: bool) -> String {
    let (tag, text) = match alert.level {
        AlertLevel::Success => ("✔", alert.text.green()),
        AlertLevel::Error => ("✖", alert.text.red()),
        AlertLevel::Warning => ("⚠", alert.text.yellow()),
        AlertLevel::Info => ("ℹ", alert.text.cyan()),
    };
    if color {
        format!("{tag} {text}")
    } else {
        format!("{tag} {}", alert.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_ttl_expiry() {
        let hub = AlertHub::new();
        hub.post("sumiu", AlertLevel::Info, 3500);

        assert_eq!(hub.active().len(), 1);
        tokio::time::advance(Duration::from_millis(3499)).await;
        assert_eq!(hub.active().len(), 1);
        tokio::time::advance(Duration::from_millis(2)).await;
        assert_eq!(hub.active().len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_positive_ttl_persists() {
        let hub = AlertHub::new();
        let id = hub.post("fica", AlertLevel::Error, 0);

        tokio::time::advance(Duration::from_secs(3600)).await;
        assert_eq!(hub.active().len(), 1);

        hub.dismiss(id);
        assert_eq!(hub.active().len(), 0);
    }

    #[tokio::test]
    async fn test_dismiss_only_target() {
        let hub = AlertHub::new();
        let a = hub.success("a");
        let _b = hub.warning("b");
        hub.dismiss(a);

        let active = hub.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].text, "b");
        assert_eq!(active[0].level, AlertLevel::Warning);
    }

    #[tokio::test]
    async fn test_take_unprinted_once() {
        let hub = AlertHub::new();
        hub.info("uma vez");
        assert_eq!(hub.take_unprinted().len(), 1);
        assert_eq!(hub.take_unprinted().len(), 0);
        // still active, just already printed
        assert_eq!(hub.active().len(), 1);
    }
}
