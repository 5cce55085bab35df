// Supplier concentration rule
// A dominant share of one holder's spend flowing to a single counterparty
// is a conflict-of-interest indicator. Only transactions with an identified
// counterparty participate; the grand total is computed over the same set.

use std::collections::HashMap;

use crate::entities::AlertCandidate;
use crate::utils::format_brl;
use crate::value_objects::{AlertKind, Severity};

use super::{DetectionContext, Detector};

pub struct SupplierConcentration;

#[derive(Default)]
struct SupplierSpend {
    name: Option<String>,
    total: f64,
    count: usize,
}

#[derive(Default)]
struct HolderSpend {
    holder_name: String,
    grand_total: f64,
    suppliers: HashMap<String, SupplierSpend>,
}

impl Detector for SupplierConcentration {
    fn kind(&self) -> AlertKind {
        AlertKind::SupplierConcentration
    }

    fn scan(&self, ctx: &DetectionContext<'_>) -> Vec<AlertCandidate> {
        let mut holders: HashMap<&str, HolderSpend> = HashMap::new();
        for t in ctx.transactions {
            let Some(counterparty_id) = t.counterparty_tax_id.as_deref() else {
                continue;
            };
            let holder = holders.entry(t.holder_tax_id.as_str()).or_default();
            if holder.holder_name.is_empty() {
                holder.holder_name = t.holder_name.clone();
            }
            holder.grand_total += t.amount;
            let supplier = holder
                .suppliers
                .entry(counterparty_id.to_string())
                .or_default();
            if supplier.name.is_none() {
                supplier.name = t.counterparty_name.clone();
            }
            supplier.total += t.amount;
            supplier.count += 1;
        }

        let mut candidates = Vec::new();
        for holder in holders.into_values() {
            if holder.grand_total <= 0.0 {
                continue;
            }
            for (counterparty_id, supplier) in holder.suppliers {
                let concentration = supplier.total / holder.grand_total;
                if supplier.count >= ctx.config.concentration_min_count
                    && concentration > ctx.config.concentration_ratio
                {
                    let supplier_name = supplier.name.as_deref().unwrap_or(&counterparty_id);
                    candidates.push(AlertCandidate {
                        transaction_id: None,
                        severity: Severity::Medium,
                        alert_type: AlertKind::SupplierConcentration,
                        title: "Concentração de Fornecedor".to_string(),
                        description: format!(
                            "{:.1}% das transações ({}) concentradas no fornecedor {} ({}).",
                            concentration * 100.0,
                            format_brl(supplier.total),
                            supplier_name,
                            counterparty_id
                        ),
                        amount: supplier.total,
                        alert_date: ctx.today,
                        card_holder: holder.holder_name.clone(),
                        dedup_key: format!("{}:{}", holder.holder_name, counterparty_id),
                    });
                }
            }
        }
        candidates
    }
}
