pub mod alert_notifier;

pub use alert_notifier::WebhookAlertNotifier;
