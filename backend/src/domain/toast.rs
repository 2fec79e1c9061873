//! Transient toast notifications.
//!
//! At most one toast is active. Showing a new one replaces the current toast
//! and cancels its pending dismissal, so a stale timer can never clear a
//! newer message. Dropping the last handle to the service cancels the timer.
use shared::{Toast, ToastKind};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

#[derive(Default)]
struct ToastState {
    current: Mutex<Option<Toast>>,
    timer: Mutex<Option<JoinHandle<()>>>,
    next_id: AtomicU64,
}

impl ToastState {
    fn cancel_timer(&self) {
        if let Ok(mut timer) = self.timer.lock() {
            if let Some(handle) = timer.take() {
                handle.abort();
            }
        }
    }

    /// Clear the toast only if it is still the one with `id`
    fn expire(&self, id: u64) {
        if let Ok(mut current) = self.current.lock() {
            if current.as_ref().map(|t| t.id) == Some(id) {
                debug!("Toast {} expired", id);
                *current = None;
            }
        }
    }
}

impl Drop for ToastState {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

#[derive(Clone)]
pub struct ToastService {
    state: Arc<ToastState>,
    duration: Duration,
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl ToastService {
    pub fn new(duration: Duration) -> Self {
        Self {
            state: Arc::new(ToastState::default()),
            duration,
        }
    }

    /// Show a toast and schedule its dismissal. Must be called from within a
    /// tokio runtime.
    pub fn show(&self, message: impl Into<String>, kind: ToastKind) -> Toast {
        let id = self.state.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let toast = Toast {
            id,
            message: message.into(),
            kind,
        };

        if let Ok(mut current) = self.state.current.lock() {
            *current = Some(toast.clone());
        }

        let weak: Weak<ToastState> = Arc::downgrade(&self.state);
        let duration = self.duration;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            if let Some(state) = weak.upgrade() {
                state.expire(id);
            }
        });

        if let Ok(mut timer) = self.state.timer.lock() {
            if let Some(previous) = timer.replace(handle) {
                previous.abort();
            }
        }

        toast
    }

    pub fn success(&self, message: impl Into<String>) -> Toast {
        self.show(message, ToastKind::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> Toast {
        self.show(message, ToastKind::Error)
    }

    pub fn current(&self) -> Option<Toast> {
        self.state.current.lock().ok().and_then(|current| current.clone())
    }

    /// Hide the active toast right away
    pub fn dismiss(&self) {
        self.state.cancel_timer();
        if let Ok(mut current) = self.state.current.lock() {
            *current = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn test_toast_auto_dismisses() {
        let toasts = ToastService::default();
        let shown = toasts.success("Order ORD-ABC selesai");
        assert_eq!(toasts.current(), Some(shown));

        sleep(Duration::from_millis(2999)).await;
        assert!(toasts.current().is_some());

        sleep(Duration::from_millis(2)).await;
        assert_eq!(toasts.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_toast_replaces_and_restarts_timer() {
        let toasts = ToastService::default();
        toasts.success("first");
        sleep(Duration::from_millis(2000)).await;

        let second = toasts.error("second");
        assert_eq!(toasts.current().map(|t| t.message), Some("second".to_string()));

        // The first toast's deadline passes without clearing the second
        sleep(Duration::from_millis(1500)).await;
        assert_eq!(toasts.current(), Some(second.clone()));

        sleep(Duration::from_millis(1600)).await;
        assert_eq!(toasts.current(), None);
        assert!(second.id > 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_clears_immediately() {
        let toasts = ToastService::new(Duration::from_millis(500));
        toasts.show("info", ToastKind::Info);
        toasts.dismiss();
        assert_eq!(toasts.current(), None);

        let again = toasts.show("again", ToastKind::Info);
        sleep(Duration::from_millis(499)).await;
        assert_eq!(toasts.current(), Some(again));
    }
}
