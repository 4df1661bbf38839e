//! Session monitor: inactivity detection and forced logout.
//!
//! Tracks the instant of the last qualifying user interaction and, on each
//! periodic tick, compares the idle time against the configured threshold.
//! When the threshold is reached the persisted session is cleared, a
//! warning notification is posted, and the monitor returns to `Idle`. No
//! screen polls for this; the shell runs the tick on a fixed interval.
//!
//! The monitor is the single writer of session state. Ticks never fail:
//! a storage error on a tick simply reads as "not authenticated".

use crate::alerts::AlertHub;
use crate::store::SessionStore;
use sales_link::token_is_live;
use tokio::time::{Duration, Instant};

/// Message posted when the session is ended for inactivity
const EXPIRY_MESSAGE: &str = "Sua sessão expirou por inatividade. Faça login novamente.";

/// Monitor lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    /// Not authenticated; ticks are no-ops
    Idle,
    /// Authenticated; idle time is being measured
    Active,
}

/// Outcome of a periodic tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing to do (idle monitor, or no valid token)
    Skipped,
    /// Session still within the inactivity threshold
    StillActive,
    /// Threshold reached: session cleared, warning posted
    Expired,
}

pub struct SessionMonitor {
    state: MonitorState,
    last_activity: Instant,
    threshold: Duration,
}

impl SessionMonitor {
    pub fn new(inactivity_timeout_minutes: u64) -> Self {
        Self {
            state: MonitorState::Idle,
            last_activity: Instant::now(),
            threshold: Duration::from_secs(inactivity_timeout_minutes * 60),
        }
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Begin monitoring after a successful login
    pub fn start(&mut self) {
        self.state = MonitorState::Active;
        self.last_activity = Instant::now();
    }

    /// A qualifying user interaction happened.
    ///
    /// Only the latest timestamp matters; calls are idempotent and safe in
    /// any state.
    pub fn record_activity(&mut self) {
        self.last_activity = Instant::now();
    }

    /// Idle time since the last qualifying interaction
    pub fn idle_time(&self) -> Duration {
        self.last_activity.elapsed()
    }

    /// Whether a live session exists: token present and not yet expired.
    ///
    /// Malformed tokens and storage failures read as `false`.
    pub fn is_authenticated(store: &SessionStore) -> bool {
        match store.token() {
            Some(token) => token_is_live(token, chrono::Utc::now().timestamp()),
            None => false,
        }
    }

    /// One periodic check.
    ///
    /// On expiry, clears the store, posts the warning, and goes `Idle`. The
    /// caller is responsible for returning the UI to the login entry point.
    pub fn tick(&mut self, store: &mut SessionStore, alerts: &AlertHub) -> TickOutcome {
        if self.state != MonitorState::Active {
            return TickOutcome::Skipped;
        }
        if !Self::is_authenticated(store) {
            return TickOutcome::Skipped;
        }

        if self.idle_time() >= self.threshold {
            self.expire(store, alerts);
            TickOutcome::Expired
        } else {
            TickOutcome::StillActive
        }
    }

    fn expire(&mut self, store: &mut SessionStore, alerts: &AlertHub) {
        // A failed write must not keep the monitor looping on a dead session
        if let Err(e) = store.clear_session() {
            log::warn!("[MONITOR] failed to clear session on expiry: {e}");
        }
        alerts.warning(EXPIRY_MESSAGE);
        self.state = MonitorState::Idle;
        log::info!(
            "[MONITOR] session expired after {:?} idle",
            self.threshold
        );
    }

    /// Explicit logout: clear state without the elapsed-time check.
    ///
    /// Idempotent; calling while already `Idle` is a safe no-op.
    pub fn logout(&mut self, store: &mut SessionStore) {
        if let Err(e) = store.clear_session() {
            log::warn!("[MONITOR] failed to clear session on logout: {e}");
        }
        self.state = MonitorState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
    use tempfile::TempDir;

    fn live_token() -> String {
        let exp = chrono::Utc::now().timestamp() + 3600;
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{exp}}}"#));
        format!("h.{payload}.s")
    }

    fn expired_token() -> String {
        let exp = chrono::Utc::now().timestamp() - 3600;
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{exp}}}"#));
        format!("h.{payload}.s")
    }

    fn store_with_token(token: &str) -> (SessionStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let mut store = SessionStore::with_path(dir.path().join("session.toml")).unwrap();
        store.set_session(token, None).unwrap();
        (store, dir)
    }

    #[tokio::test(start_paused = true)]
    async fn test_stays_active_below_threshold() {
        let (mut store, _dir) = store_with_token(&live_token());
        let alerts = AlertHub::new();
        let mut monitor = SessionMonitor::new(15);
        monitor.start();

        tokio::time::advance(Duration::from_secs(14 * 60 + 59)).await;
        assert_eq!(monitor.tick(&mut store, &alerts), TickOutcome::StillActive);
        assert_eq!(monitor.state(), MonitorState::Active);
        assert!(store.token().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expires_at_threshold_and_clears_storage() {
        let (mut store, _dir) = store_with_token(&live_token());
        let alerts = AlertHub::new();
        let mut monitor = SessionMonitor::new(15);
        monitor.start();

        tokio::time::advance(Duration::from_secs(15 * 60)).await;
        assert_eq!(monitor.tick(&mut store, &alerts), TickOutcome::Expired);
        assert_eq!(monitor.state(), MonitorState::Idle);
        assert!(store.token().is_none());

        let active = alerts.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].level, crate::alerts::AlertLevel::Warning);
        assert!(active[0].text.contains("inatividade"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_activity_reset_prevents_expiry() {
        let (mut store, _dir) = store_with_token(&live_token());
        let alerts = AlertHub::new();
        let mut monitor = SessionMonitor::new(15);
        monitor.start();

        tokio::time::advance(Duration::from_secs(14 * 60)).await;
        monitor.record_activity();
        tokio::time::advance(Duration::from_secs(2 * 60)).await;

        // 16 minutes since start, but only 2 since the last interaction
        assert_eq!(monitor.tick(&mut store, &alerts), TickOutcome::StillActive);
        assert!(store.token().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_without_valid_token_is_noop() {
        let (mut store, _dir) = store_with_token(&expired_token());
        let alerts = AlertHub::new();
        let mut monitor = SessionMonitor::new(15);
        monitor.start();

        tokio::time::advance(Duration::from_secs(60 * 60)).await;
        assert_eq!(monitor.tick(&mut store, &alerts), TickOutcome::Skipped);
        // no warning posted: the tick did nothing
        assert!(alerts.active().is_empty());
    }

    #[tokio::test]
    async fn test_idle_monitor_skips_ticks() {
        let (mut store, _dir) = store_with_token(&live_token());
        let alerts = AlertHub::new();
        let mut monitor = SessionMonitor::new(15);

        assert_eq!(monitor.tick(&mut store, &alerts), TickOutcome::Skipped);
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let (mut store, _dir) = store_with_token(&live_token());
        let alerts = AlertHub::new();
        let mut monitor = SessionMonitor::new(15);
        monitor.start();

        monitor.logout(&mut store);
        assert_eq!(monitor.state(), MonitorState::Idle);
        assert!(store.token().is_none());

        // second logout while Idle: safe no-op
        monitor.logout(&mut store);
        assert_eq!(monitor.state(), MonitorState::Idle);
        assert!(alerts.active().is_empty());
    }

    #[tokio::test]
    async fn test_is_authenticated_checks_expiry() {
        let (store, _dir) = store_with_token(&live_token());
        assert!(SessionMonitor::is_authenticated(&store));

        let (store, _dir) = store_with_token(&expired_token());
        assert!(!SessionMonitor::is_authenticated(&store));

        let (store, _dir) = store_with_token("garbage");
        assert!(!SessionMonitor::is_authenticated(&store));
    }
}
