pub mod repositories;
pub mod services;

pub use repositories::{AlertRepository, TransactionRepository};
pub use services::AlertNotifier;
