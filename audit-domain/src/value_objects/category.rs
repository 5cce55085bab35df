// Transaction category value object
// Derived once at import time by keyword matching on the statement's
// free-text transaction kind. CPGF statements are Brazilian government
// data, hence the Portuguese keywords.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Purchase,
    Withdrawal,
    Food,
    Fuel,
    Material,
    Other,
}

impl Category {
    /// Classify a statement's transaction-kind descriptor.
    pub fn from_kind(kind: &str) -> Self {
        let upper = kind.to_uppercase();
        if upper.contains("SAQUE") {
            Category::Withdrawal
        } else if upper.contains("COMBUSTIVEL") {
            Category::Fuel
        } else if upper.contains("REFEICAO") || upper.contains("ALIMENTACAO") {
            Category::Food
        } else if upper.contains("MATERIAL") {
            Category::Material
        } else if upper.contains("COMPRA") {
            Category::Purchase
        } else {
            Category::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Purchase => "purchase",
            Category::Withdrawal => "withdrawal",
            Category::Food => "food",
            Category::Fuel => "fuel",
            Category::Material => "material",
            Category::Other => "other",
        }
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "purchase" => Category::Purchase,
            "withdrawal" => Category::Withdrawal,
            "food" => Category::Food,
            "fuel" => Category::Fuel,
            "material" => Category::Material,
            _ => Category::Other,
        }
    }
}
