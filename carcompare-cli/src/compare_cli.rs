//! Side-by-side trim comparison command

use anyhow::{Context, Result};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

use carcompare_core::catalog::{CatalogStore, EntityId, Trim};
use carcompare_core::compare::{self, Comparison, Metric};
use carcompare_core::config::CatalogConfig;

use crate::catalog_cli::{or_dash, print_json};

pub fn execute_compare(
    store: &CatalogStore,
    config: &CatalogConfig,
    ids: &[EntityId],
    json: bool,
) -> Result<()> {
    let comparison = compare::compare(&store.snapshot(), ids, config.max_compare)
        .context("Cannot compare the requested trims")?;

    if comparison.trims.len() < ids.len() {
        let found: Vec<EntityId> = comparison.trims.iter().map(|t| t.id).collect();
        let missing: Vec<String> = ids
            .iter()
            .filter(|id| !found.contains(id))
            .map(ToString::to_string)
            .collect();
        if !missing.is_empty() {
            eprintln!("Skipping unknown trim id(s): {}", missing.join(", "));
        }
    }

    if json {
        return print_json(&comparison);
    }

    println!("{}", render_table(&comparison));
    if comparison.highlights.is_empty() && comparison.trims.len() > 1 {
        println!("\nNo highlights: at least one trim has no technical details.");
    }
    Ok(())
}

fn render_table(comparison: &Comparison) -> String {
    let mut builder = Builder::default();

    let mut header = vec!["".to_string()];
    header.extend(comparison.trims.iter().map(|t| format!("{} [{}]", t.name, t.id)));
    builder.push_record(header);

    builder.push_record(text_row("Transmission", &comparison.trims, |t| {
        t.transmission_type.clone()
    }));
    builder.push_record(text_row("Fuel type", &comparison.trims, |t| {
        t.technical_details.as_ref().and_then(|d| d.fuel_type.clone())
    }));

    for metric in Metric::ALL {
        let mut row = vec![metric_label(metric).to_string()];
        for (index, trim) in comparison.trims.iter().enumerate() {
            let value = trim
                .technical_details
                .as_ref()
                .and_then(|d| metric.value(d));
            row.push(format!(
                "{}{}",
                or_dash(&value),
                marker(comparison, metric, index)
            ));
        }
        builder.push_record(row);
    }

    builder
        .build()
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string()
}

fn text_row(label: &str, trims: &[Trim], value: impl Fn(&Trim) -> Option<String>) -> Vec<String> {
    let mut row = vec![label.to_string()];
    row.extend(trims.iter().map(|t| or_dash(&value(t))));
    row
}

fn metric_label(metric: Metric) -> &'static str {
    match metric {
        Metric::MaxSpeed => "Max speed (km/h)",
        Metric::Acceleration => "0-100 km/h (s)",
        Metric::Power => "Power (hp)",
        Metric::Torque => "Torque (Nm)",
        Metric::FuelConsumption => "Consumption (l/100km)",
    }
}

/// Suffix marking a cell as best or worst; all-tied metrics get none
fn marker(comparison: &Comparison, metric: Metric, index: usize) -> &'static str {
    let highlights = &comparison.highlights;
    let is_best = highlights
        .best(metric)
        .is_some_and(|indices| indices.contains(&index));
    let is_worst = highlights
        .worst(metric)
        .is_some_and(|indices| indices.contains(&index));

    match (is_best, is_worst) {
        (true, false) => " (best)",
        (false, true) => " (worst)",
        _ => "",
    }
}
