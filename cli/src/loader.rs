//! Shared loading indicator with flicker hysteresis.
//!
//! Concurrent requests increment/decrement a counter. Visibility follows the
//! counter through two delays: a show-delay so requests faster than 120 ms
//! never flash the indicator, and a hide-delay so back-to-back requests do
//! not blink it off and on. Each transition cancels the opposing pending
//! task, and the delayed tasks re-check the counter before acting.

use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};

/// Delay before the indicator becomes visible
pub const SHOW_DELAY: Duration = Duration::from_millis(120);

/// Delay before the indicator is hidden after the last request finishes
pub const HIDE_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug)]
struct GateState {
    count: usize,
    pending_show: Option<JoinHandle<()>>,
    pending_hide: Option<JoinHandle<()>>,
}

/// Shared gate; clone freely, all clones observe the same counter.
#[derive(Debug, Clone)]
pub struct LoadingGate {
    state: Arc<Mutex<GateState>>,
    visible_tx: Arc<watch::Sender<bool>>,
    visible_rx: watch::Receiver<bool>,
}

impl Default for LoadingGate {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingGate {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            state: Arc::new(Mutex::new(GateState {
                count: 0,
                pending_show: None,
                pending_hide: None,
            })),
            visible_tx: Arc::new(tx),
            visible_rx: rx,
        }
    }

    /// A request began
    pub fn start(&self) {
        let mut state = self.state.lock().expect("loading gate poisoned");
        state.count += 1;

        if let Some(hide) = state.pending_hide.take() {
            hide.abort();
        }

        if !*self.visible_rx.borrow() && state.pending_show.is_none() {
            let gate = self.clone();
            state.pending_show = Some(tokio::spawn(async move {
                sleep(SHOW_DELAY).await;
                let mut state = gate.state.lock().expect("loading gate poisoned");
                state.pending_show = None;
                // The request may have finished during the delay
                if state.count > 0 {
                    let _ = gate.visible_tx.send(true);
                }
            }));
        }
    }

    /// A request finished
    pub fn stop(&self) {
        let mut state = self.state.lock().expect("loading gate poisoned");
        state.count = state.count.saturating_sub(1);

        if state.count == 0 {
            if let Some(show) = state.pending_show.take() {
                show.abort();
            }
            if state.pending_hide.is_none() {
                let gate = self.clone();
                state.pending_hide = Some(tokio::spawn(async move {
                    sleep(HIDE_DELAY).await;
                    let mut state = gate.state.lock().expect("loading gate poisoned");
                    state.pending_hide = None;
                    if state.count == 0 {
                        let _ = gate.visible_tx.send(false);
                    }
                }));
            }
        }
    }

    /// Current visibility
    pub fn is_visible(&self) -> bool {
        *self.visible_rx.borrow()
    }

    /// Observe visibility transitions (spinner wiring)
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.visible_rx.clone()
    }

    /// Requests currently in flight
    pub fn in_flight(&self) -> usize {
        self.state.lock().expect("loading gate poisoned").count
    }
}

/// Run `future` with the gate held for its duration
pub async fn with_gate<T, F>(gate: &LoadingGate, future: F) -> T
where
    F: std::future::Future<Output = T>,
{
    gate.start();
    let result = future.await;
    gate.stop();
    result
}
