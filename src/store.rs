//! Alert store: where registered alerts live while they are displayed.
//!
//! The alert factory only talks to the store through the [`AlertStore`]
//! trait: it creates alerts, and the handlers of their actions delete them.
//! [`MemoryStore`] is an in-memory implementation keeping the displayed
//! alerts in registration order.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use log::{debug, info};
use mockall::automock;

use crate::alerts::Alert;

/// Holds the alerts currently displayed.
///
/// Both operations are total: the store never reports an error to the
/// factory. Deleting an id that is not displayed must be a no-op.
#[automock]
#[async_trait]
pub trait AlertStore: Send + Sync {
    /// Registers `alert` for display.
    fn create_alert(&self, alert: Alert);

    /// Removes the alert `id`.
    async fn delete_alert(&self, id: &str);
}

/// In-memory [`AlertStore`].
///
/// The lock is never held across an await point, so a blocking mutex is used
/// and registration stays synchronous.
///
/// # Examples
///
/// ```
/// use alertwait::store::MemoryStore;
///
/// let store = MemoryStore::new();
/// assert!(store.is_empty());
/// ```
#[derive(Default)]
pub struct MemoryStore {
    /// Displayed alerts, oldest first
    alerts: Mutex<Vec<Alert>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Alert>> {
        // Alerts are only pushed or removed under the lock, a poisoned list is still consistent
        self.alerts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Ids of the displayed alerts, oldest first.
    pub fn alerts(&self) -> Vec<String> {
        self.lock().iter().map(|alert| alert.id.clone()).collect()
    }

    /// Returns a copy of the displayed alert `id`.
    pub fn get(&self, id: &str) -> Option<Alert> {
        self.lock().iter().find(|alert| alert.id == id).cloned()
    }

    /// Returns the most recently registered alert.
    pub fn last(&self) -> Option<Alert> {
        self.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Fires the action `action_id` of the displayed alert `alert_id`.
    ///
    /// The action runs on a copy of the alert, without the store being
    /// locked, so that it can delete its alert. Returns `false` if the alert
    /// or the action does not exist.
    pub async fn trigger(&self, alert_id: &str, action_id: &str) -> bool {
        let Some(alert) = self.get(alert_id) else {
            debug!("cannot trigger action {}: no alert {}", action_id, alert_id);
            return false;
        };
        alert.trigger(action_id).await
    }
}

#[async_trait]
impl AlertStore for MemoryStore {
    fn create_alert(&self, alert: Alert) {
        info!("displaying alert {}", alert.id);
        self.lock().push(alert);
    }

    async fn delete_alert(&self, id: &str) {
        let mut alerts = self.lock();
        let before = alerts.len();
        alerts.retain(|alert| alert.id != id);

        if alerts.len() == before {
            debug!("alert {} already deleted", id);
        } else {
            info!("deleted alert {}", id);
        }
    }
}
