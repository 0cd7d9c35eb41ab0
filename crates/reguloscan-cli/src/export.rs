//! Tabular import/export: variant lists in, scored rows out.

use anyhow::Context;
use reguloscan_common::{EvidenceKind, VariantQuery};
use reguloscan_ranker::ScoreResult;
use serde::Serialize;
use std::io;
use tracing::warn;

/// One CSV output row. Column names follow the dashboard export.
#[derive(Debug, Serialize)]
struct ResultRow<'a> {
    #[serde(rename = "Variant")]
    variant: &'a str,
    #[serde(rename = "Score")]
    score: f64,
    #[serde(rename = "Priority")]
    priority: &'static str,
    #[serde(rename = "Regulatory")]
    regulatory: f64,
    #[serde(rename = "Functional")]
    functional: f64,
    #[serde(rename = "Expression")]
    expression: f64,
    #[serde(rename = "Conservation")]
    conservation: f64,
    /// Defaulted evidence dimensions, `;`-separated.
    #[serde(rename = "Fallbacks")]
    fallbacks: String,
}

impl<'a> From<&'a ScoreResult> for ResultRow<'a> {
    fn from(r: &'a ScoreResult) -> Self {
        Self {
            variant: r.variant.as_str(),
            score: round3(r.score),
            priority: r.priority.as_str(),
            regulatory: r.evidence.regulatory,
            functional: r.evidence.functional,
            expression: r.evidence.expression,
            conservation: r.evidence.conservation,
            fallbacks: fallback_kinds(r),
        }
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

fn fallback_kinds(r: &ScoreResult) -> String {
    r.fallbacks
        .iter()
        .map(|f| f.kind.as_str())
        .collect::<Vec<_>>()
        .join(";")
}

/// Read variant identifiers from `column` of a headered CSV.
/// Blank cells are skipped with a warning.
pub fn read_variants<R: io::Read>(reader: R, column: &str) -> anyhow::Result<Vec<VariantQuery>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let idx = rdr
        .headers()
        .context("Failed to read CSV header")?
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| anyhow::anyhow!("CSV must contain a column named '{}'", column))?;

    let mut variants = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read CSV row {}", i + 2))?;
        match VariantQuery::new(record.get(idx).unwrap_or_default()) {
            Ok(v) => variants.push(v),
            Err(_) => warn!(row = i + 2, "Skipping row with blank variant identifier"),
        }
    }
    Ok(variants)
}

/// Write scored results as CSV, one row per result.
pub fn write_results<W: io::Write>(writer: W, results: &[ScoreResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for r in results {
        wtr.serialize(ResultRow::from(r))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Fixed-width text table for terminal output.
pub fn render_table(results: &[ScoreResult]) -> String {
    let mut out = format!(
        "{:<16} {:>6} {:<8} {:>10} {:>10} {:>10} {:>12}  {}\n",
        "Variant", "Score", "Priority", "Regulatory", "Functional", "Expression", "Conservation", "Fallbacks"
    );
    for r in results {
        let e = &r.evidence;
        out.push_str(&format!(
            "{:<16} {:>6.3} {:<8} {:>10.3} {:>10.3} {:>10.3} {:>12.3}  {}\n",
            r.variant.as_str(),
            r.score,
            r.priority.as_str(),
            e.get(EvidenceKind::Regulatory),
            e.get(EvidenceKind::Functional),
            e.get(EvidenceKind::Expression),
            e.get(EvidenceKind::Conservation),
            fallback_kinds(r),
        ));
    }
    out
}
