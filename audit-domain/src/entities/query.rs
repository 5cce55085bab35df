// Query DTOs for the HTTP read endpoints

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertQuery {
    pub date: Option<String>,
    pub card_holder: Option<String>,
    pub limit: Option<usize>,
}
