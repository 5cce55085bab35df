// Benford's-law digit rule
// Leading significant digits of naturally occurring amounts follow a
// logarithmic distribution; a holder whose digits drift far from it may be
// fabricating values. Pearson chi-square against the expected distribution,
// 8 degrees of freedom.

use std::collections::HashMap;

use crate::entities::AlertCandidate;
use crate::value_objects::{AlertKind, Severity};

use super::{DetectionContext, Detector};

pub const BENFORD_EXPECTED: [f64; 9] = [
    0.301, 0.176, 0.125, 0.097, 0.079, 0.067, 0.058, 0.051, 0.046,
];

pub struct BenfordAnomaly;

impl Detector for BenfordAnomaly {
    fn kind(&self) -> AlertKind {
        AlertKind::BenfordAnomaly
    }

    fn scan(&self, ctx: &DetectionContext<'_>) -> Vec<AlertCandidate> {
        let mut holders: HashMap<&str, (&str, [u64; 9])> = HashMap::new();
        for t in ctx.transactions {
            let Some(digit) = leading_digit(t.amount) else {
                continue;
            };
            let entry = holders
                .entry(t.holder_tax_id.as_str())
                .or_insert((t.holder_name.as_str(), [0; 9]));
            entry.1[digit - 1] += 1;
        }

        let mut candidates = Vec::new();
        for (holder_name, digits) in holders.into_values() {
            let sample: u64 = digits.iter().sum();
            if (sample as usize) < ctx.config.benford_min_sample {
                continue;
            }
            let chi_square = chi_square(&digits, sample);
            if chi_square > ctx.config.benford_chi_square_critical {
                candidates.push(AlertCandidate {
                    transaction_id: None,
                    severity: Severity::Low,
                    alert_type: AlertKind::BenfordAnomaly,
                    title: "Anomalia na Lei de Benford".to_string(),
                    description: format!(
                        "Distribuição dos primeiros dígitos das transações não segue o padrão \
                         esperado pela Lei de Benford (χ² = {chi_square:.2}). Pode indicar \
                         manipulação de valores."
                    ),
                    amount: 0.0,
                    alert_date: ctx.today,
                    card_holder: holder_name.to_string(),
                    dedup_key: holder_name.to_string(),
                });
            }
        }
        candidates
    }
}

/// Leading significant digit of the amount's textual form. Degenerate
/// amounts whose first digit character is '0' (e.g. 0.75) carry no signal
/// and are excluded from the sample.
pub fn leading_digit(amount: f64) -> Option<usize> {
    let text = amount.to_string();
    let first = text.chars().find(|c| c.is_ascii_digit())?;
    let digit = first.to_digit(10)? as usize;
    if digit == 0 {
        None
    } else {
        Some(digit)
    }
}

pub fn chi_square(observed: &[u64; 9], sample: u64) -> f64 {
    let n = sample as f64;
    observed
        .iter()
        .zip(BENFORD_EXPECTED.iter())
        .map(|(&obs, &p)| {
            let expected = p * n;
            let diff = obs as f64 - expected;
            diff * diff / expected
        })
        .sum()
}
