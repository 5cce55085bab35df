pub mod detect_handlers;
pub mod import_handlers;
pub mod ops_handlers;

pub use detect_handlers::*;
pub use import_handlers::*;
pub use ops_handlers::*;
