//! Catalog and access commands

use afterdark_gate::{AgeGate, FactBackend};
use afterdark_types::Rating;
use chrono::NaiveDate;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{print_denied, print_output, print_single, print_success, OutputFormat};

#[derive(Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
struct RatingRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Min Age")]
    min_age: u32,
    #[tabled(rename = "Band")]
    band: String,
    #[tabled(rename = "Label")]
    label: String,
}

impl From<&Rating> for RatingRow {
    fn from(r: &Rating) -> Self {
        Self {
            id: r.id.clone(),
            min_age: r.min_age,
            band: r.band.to_string(),
            label: r.label.clone(),
        }
    }
}

pub fn catalog<B: FactBackend>(gate: &AgeGate<B>, format: OutputFormat) -> anyhow::Result<()> {
    let rows = gate.catalog().iter().map(RatingRow::from).collect();
    print_output::<RatingRow>(rows, format)
}

pub fn check<B: FactBackend>(
    gate: &AgeGate<B>,
    rating_id: &str,
    now: NaiveDate,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let decision = gate.check(rating_id, now)?;

    if !matches!(format, OutputFormat::Table) {
        return print_single(&decision, format);
    }

    if decision.allowed {
        print_success(&format!("{rating_id} allowed"));
    } else if let Some(missing) = decision.shortfall() {
        print_denied(&format!(
            "{rating_id} requires age {} ({missing} more year{})",
            decision.required_min_age,
            if missing == 1 { "" } else { "s" }
        ));
    } else {
        print_denied(&format!(
            "{rating_id} requires age {}; verify your age first",
            decision.required_min_age
        ));
    }
    Ok(())
}

pub fn accessible<B: FactBackend>(
    gate: &AgeGate<B>,
    now: NaiveDate,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let rows = gate
        .accessible(now)
        .into_iter()
        .map(RatingRow::from)
        .collect();
    print_output::<RatingRow>(rows, format)
}
