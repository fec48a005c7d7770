use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub id: u64,
    pub msg: String,
    pub kind: AlertKind,
}

/// Transient user-facing messages.
///
/// Each pushed alert removes itself after the timeout. Clones share the
/// same queue.
#[derive(Debug, Clone)]
pub struct Alerts {
    queue: Arc<Mutex<Vec<Alert>>>,
    next_id: Arc<AtomicU64>,
    timeout: Duration,
}

impl Alerts {
    pub fn new(timeout: Duration) -> Self {
        Self {
            queue: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            timeout,
        }
    }

    /// Queue an alert and schedule its removal.
    ///
    /// Outside a tokio runtime the alert stays until dismissed.
    pub fn push(&self, msg: impl Into<String>, kind: AlertKind) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let alert = Alert {
            id,
            msg: msg.into(),
            kind,
        };
        tracing::debug!(alert_id = id, kind = ?kind, msg = %alert.msg, "Alert raised");

        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(alert);

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let alerts = self.clone();
                let timeout = self.timeout;
                handle.spawn(async move {
                    tokio::time::sleep(timeout).await;
                    alerts.dismiss(id);
                });
            }
            Err(_) => tracing::debug!(alert_id = id, "No runtime, alert will not expire"),
        }

        id
    }

    pub fn dismiss(&self, id: u64) {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|alert| alert.id != id);
    }

    pub fn current(&self) -> Vec<Alert> {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for Alerts {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_ALERT_TIMEOUT)
    }
}
