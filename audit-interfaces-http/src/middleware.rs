pub mod auth;
pub mod statement;

pub use auth::*;
pub use statement::*;
