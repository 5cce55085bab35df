use std::io::Read;

use anyhow::{anyhow, Result};
use axum::http::HeaderMap;
use chrono::NaiveDate;
use flate2::read::GzDecoder;
use tracing::warn;

use audit_domain::{Category, StatementRecord};

// Statement CSV layout (semicolon separated, quoted fields allowed).
// Only the columns below are consumed; the leading agency columns are
// ignored. A line needs at least 15 fields to qualify.
const COL_STATEMENT_YEAR: usize = 6;
const COL_STATEMENT_MONTH: usize = 7;
const COL_HOLDER_TAX_ID: usize = 8;
const COL_HOLDER_NAME: usize = 9;
const COL_COUNTERPARTY_TAX_ID: usize = 10;
const COL_COUNTERPARTY_NAME: usize = 11;
const COL_KIND: usize = 12;
const COL_DATE: usize = 13;
const COL_AMOUNT: usize = 14;
const MIN_FIELDS: usize = 15;

// Placeholder values the source files use for "no counterparty".
const NO_COUNTERPARTY_ID: &str = "-2";
const NO_COUNTERPARTY_NAME: &str = "NAO SE APLICA";

/// Parses a statement body into validated records plus the count of lines
/// that were dropped. The header line is always skipped; a malformed line is
/// skipped and counted rather than failing the whole upload.
pub fn parse_statement(headers: &HeaderMap, body: &[u8]) -> Result<(Vec<StatementRecord>, usize)> {
    let content = maybe_gunzip(headers, body)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    let mut header_seen = false;
    // Enumerate the physical lines so the skip warning points at the line
    // number the uploader sees in their file.
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        if !header_seen {
            header_seen = true;
            continue;
        }
        match parse_line(line) {
            Some(record) => records.push(record),
            None => {
                warn!("statement line {} skipped", index + 1);
                skipped += 1;
            }
        }
    }
    if !header_seen {
        return Err(anyhow!("empty statement body"));
    }
    Ok((records, skipped))
}

fn parse_line(line: &str) -> Option<StatementRecord> {
    let fields: Vec<String> = line
        .split(';')
        .map(|field| {
            field
                .trim()
                .trim_start_matches('"')
                .trim_end_matches('"')
                .trim()
                .to_string()
        })
        .collect();
    if fields.len() < MIN_FIELDS {
        return None;
    }

    let holder_tax_id = non_empty(&fields[COL_HOLDER_TAX_ID])?;
    let holder_name = non_empty(&fields[COL_HOLDER_NAME])?;
    let kind = non_empty(&fields[COL_KIND])?;
    let date = parse_statement_date(&fields[COL_DATE])?;
    let amount: f64 = fields[COL_AMOUNT].replace(',', ".").parse().ok()?;

    let statement_year: u16 = fields[COL_STATEMENT_YEAR].parse().ok()?;
    let statement_month: u8 = fields[COL_STATEMENT_MONTH].parse().ok()?;
    if !(1..=12).contains(&statement_month) {
        return None;
    }

    let counterparty_tax_id = match fields[COL_COUNTERPARTY_TAX_ID].as_str() {
        "" | NO_COUNTERPARTY_ID => None,
        value => Some(value.to_string()),
    };
    let counterparty_name = match fields[COL_COUNTERPARTY_NAME].as_str() {
        "" | NO_COUNTERPARTY_NAME => None,
        value => Some(value.to_string()),
    };

    Some(StatementRecord {
        holder_tax_id,
        holder_name,
        counterparty_tax_id,
        counterparty_name,
        category: Category::from_kind(&kind),
        kind,
        date,
        amount,
        statement_month,
        statement_year,
    })
}

fn parse_statement_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%d/%m/%Y").ok()
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn maybe_gunzip(headers: &HeaderMap, body: &[u8]) -> Result<String> {
    if let Some(encoding) = headers.get("Content-Encoding") {
        if encoding.to_str().unwrap_or("") == "gzip" {
            let mut decoder = GzDecoder::new(body);
            let mut out = String::new();
            decoder.read_to_string(&mut out)?;
            return Ok(out);
        }
    }
    Ok(String::from_utf8(body.to_vec())?)
}
