use crate::entities::{AlertRow, RuntimeConfig};

/// Outbound push of newly created alerts. Delivery is fire-and-forget: the
/// detection run never waits on, or fails because of, the notifier.
pub trait AlertNotifier: Send + Sync {
    fn spawn_notifications(&self, config: RuntimeConfig, alerts: Vec<AlertRow>);
}
