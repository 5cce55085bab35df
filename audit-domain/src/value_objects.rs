pub mod alert_kind;
pub mod alert_status;
pub mod category;
pub mod severity;

pub use alert_kind::AlertKind;
pub use alert_status::AlertStatus;
pub use category::Category;
pub use severity::Severity;
