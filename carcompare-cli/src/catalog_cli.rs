//! Catalog browsing and search commands
//!
//! Browse commands walk the brand tree one level at a time; `search` runs
//! the query engine with validated filters.

use anyhow::{bail, Context, Result};
use chrono::Datelike;
use clap::Args;
use serde::Serialize;
use std::fmt::Display;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use carcompare_core::catalog::{CatalogStore, EntityId, TechnicalDetails};
use carcompare_core::config::CatalogConfig;
use carcompare_core::query::{GenerationCard, SearchFilters};

/// Filters accepted by `carcompare search`
#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Brand name (substring, case-insensitive)
    #[clap(long)]
    pub brand: Option<String>,

    /// Model name (substring); requires --brand
    #[clap(long)]
    pub model: Option<String>,

    /// Generation name (substring); requires --brand and --model
    #[clap(long)]
    pub generation: Option<String>,

    /// Earliest model year
    #[clap(long)]
    pub min_year: Option<i32>,

    /// Latest model year
    #[clap(long)]
    pub max_year: Option<i32>,

    /// Body type (substring)
    #[clap(long)]
    pub body_type: Option<String>,

    /// Transmission type
    #[clap(long)]
    pub transmission: Option<String>,

    /// Fuel type
    #[clap(long)]
    pub fuel_type: Option<String>,

    /// Return the matching part of the brand tree instead of generation cards
    /// (years match by overlap, trim attributes by substring)
    #[clap(long)]
    pub tree: bool,
}

impl SearchArgs {
    pub fn filters(&self) -> SearchFilters {
        SearchFilters {
            brand: self.brand.clone(),
            model: self.model.clone(),
            generation: self.generation.clone(),
            min_year: self.min_year,
            max_year: self.max_year,
            body_type: self.body_type.clone(),
            transmission: self.transmission.clone(),
            fuel_type: self.fuel_type.clone(),
        }
    }
}

#[derive(Tabled)]
struct BrandRow {
    #[tabled(rename = "Id")]
    id: EntityId,
    #[tabled(rename = "Brand")]
    name: String,
    #[tabled(rename = "Models")]
    models: usize,
}

#[derive(Tabled)]
struct ModelRow {
    #[tabled(rename = "Id")]
    id: EntityId,
    #[tabled(rename = "Model")]
    name: String,
    #[tabled(rename = "Body type")]
    body_type: String,
    #[tabled(rename = "Generations")]
    generations: usize,
}

#[derive(Tabled)]
struct GenerationRow {
    #[tabled(rename = "Id")]
    id: EntityId,
    #[tabled(rename = "Generation")]
    name: String,
    #[tabled(rename = "Years")]
    years: String,
    #[tabled(rename = "Trims")]
    trims: usize,
}

#[derive(Tabled)]
struct TrimRow {
    #[tabled(rename = "Id")]
    id: EntityId,
    #[tabled(rename = "Trim")]
    name: String,
    #[tabled(rename = "Transmission")]
    transmission: String,
    #[tabled(rename = "Doors")]
    doors: String,
    #[tabled(rename = "Seats")]
    seats: String,
}

#[derive(Tabled)]
struct CardRow {
    #[tabled(rename = "Id")]
    id: EntityId,
    #[tabled(rename = "Brand")]
    brand: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Generation")]
    generation: String,
    #[tabled(rename = "Years")]
    years: String,
    #[tabled(rename = "Body type")]
    body_type: String,
    #[tabled(rename = "Trims")]
    trims: usize,
}

#[derive(Tabled)]
struct SpecRow {
    #[tabled(rename = "Specification")]
    name: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

impl From<&GenerationCard> for CardRow {
    fn from(card: &GenerationCard) -> Self {
        Self {
            id: card.generation_id,
            brand: card.brand_name.clone(),
            model: card.model_name.clone(),
            generation: card.generation_name.clone(),
            years: years(card.year_from, card.year_to),
            body_type: or_dash(&card.body_type),
            trims: card.trim_count,
        }
    }
}

pub fn list_brands(store: &CatalogStore, json: bool) -> Result<()> {
    let brands = store.all_brands();

    if json {
        let summaries: Vec<serde_json::Value> = brands
            .iter()
            .map(|b| serde_json::json!({ "Id": b.id, "Name": b.name }))
            .collect();
        return print_json(&summaries);
    }

    let rows: Vec<BrandRow> = brands
        .iter()
        .map(|b| BrandRow {
            id: b.id,
            name: b.name.clone(),
            models: b.models.len(),
        })
        .collect();
    print_table(&rows);
    Ok(())
}

pub fn list_models(store: &CatalogStore, brand_id: EntityId, json: bool) -> Result<()> {
    let brand = store
        .brand_by_id(brand_id)
        .with_context(|| format!("Brand {brand_id} not found in catalog"))?;

    if json {
        let models: Vec<serde_json::Value> = brand
            .models
            .iter()
            .map(|m| {
                serde_json::json!({
                    "Id": m.id,
                    "Name": m.name,
                    "BrandId": m.brand_id,
                    "BodyType": m.body_type,
                })
            })
            .collect();
        return print_json(&models);
    }

    println!("{}\n", brand.name);
    let rows: Vec<ModelRow> = brand
        .models
        .iter()
        .map(|m| ModelRow {
            id: m.id,
            name: m.name.clone(),
            body_type: or_dash(&m.body_type),
            generations: m.generations.len(),
        })
        .collect();
    print_table(&rows);
    Ok(())
}

pub fn list_generations(store: &CatalogStore, model_id: EntityId, json: bool) -> Result<()> {
    let model = store
        .model_by_id(model_id)
        .with_context(|| format!("Model {model_id} not found in catalog"))?;

    if json {
        let generations: Vec<serde_json::Value> = model
            .generations
            .iter()
            .map(|g| {
                serde_json::json!({
                    "Id": g.id,
                    "Name": g.name,
                    "ModelId": g.model_id,
                    "YearFrom": g.year_from,
                    "YearTo": g.year_to,
                    "PhotoUrl": g.photo_url,
                })
            })
            .collect();
        return print_json(&generations);
    }

    println!("{}\n", model.name);
    let rows: Vec<GenerationRow> = model
        .generations
        .iter()
        .map(|g| GenerationRow {
            id: g.id,
            name: g.name.clone(),
            years: years(g.year_from, g.year_to),
            trims: g.trims.len(),
        })
        .collect();
    print_table(&rows);
    Ok(())
}

pub fn list_trims(store: &CatalogStore, generation_id: EntityId, json: bool) -> Result<()> {
    let details = store
        .generation_details(generation_id)
        .with_context(|| format!("Generation {generation_id} not found in catalog"))?;

    if json {
        return print_json(&details.trims);
    }

    let rows: Vec<TrimRow> = details
        .trims
        .iter()
        .map(|t| TrimRow {
            id: t.id,
            name: t.name.clone(),
            transmission: or_dash(&t.transmission_type),
            doors: or_dash(&t.doors_count),
            seats: or_dash(&t.seats_count),
        })
        .collect();
    print_table(&rows);
    Ok(())
}

pub fn show_generation(store: &CatalogStore, id: EntityId, json: bool) -> Result<()> {
    let details = store
        .generation_details(id)
        .with_context(|| format!("Generation {id} not found in catalog"))?;

    if json {
        return print_json(&details);
    }

    println!(
        "{} {} {} ({})",
        details.brand.name,
        details.model.name,
        details.generation.name,
        years(details.generation.year_from, details.generation.year_to)
    );
    if let Some(body_type) = &details.model.body_type {
        println!("Body type: {body_type}");
    }
    if let Some(photo) = &details.generation.photo_url {
        println!("Photo:     {photo}");
    }
    println!();

    if details.trims.is_empty() {
        println!("No trims listed for this generation.");
        return Ok(());
    }

    let rows: Vec<TrimRow> = details
        .trims
        .iter()
        .map(|t| TrimRow {
            id: t.id,
            name: t.name.clone(),
            transmission: or_dash(&t.transmission_type),
            doors: or_dash(&t.doors_count),
            seats: or_dash(&t.seats_count),
        })
        .collect();
    print_table(&rows);
    Ok(())
}

pub fn show_trim(store: &CatalogStore, id: EntityId, json: bool) -> Result<()> {
    let details = store
        .trim_details(id)
        .with_context(|| format!("Trim {id} not found in catalog"))?;

    if json {
        return print_json(&details);
    }

    println!(
        "{} {} {} {}",
        details.brand.name, details.model.name, details.generation.name, details.trim.name
    );
    println!(
        "Transmission: {}",
        or_dash(&details.trim.transmission_type)
    );
    println!();

    match &details.technical_details {
        Some(tech) => print_table(&spec_rows(tech)),
        None => println!("No technical details available."),
    }
    Ok(())
}

pub fn execute_search(
    store: &CatalogStore,
    config: &CatalogConfig,
    args: SearchArgs,
    json: bool,
) -> Result<()> {
    let filters = args.filters();
    filters.validate_with(config.min_search_year, chrono::Local::now().year())?;

    if args.tree {
        let brands = store.search_tree(&filters);
        if brands.is_empty() {
            bail!("No vehicles match the given filters");
        }
        if json {
            return print_json(&brands);
        }

        for brand in &brands {
            println!("{}", brand.name);
            for model in &brand.models {
                println!("  {}", model.name);
                for generation in &model.generations {
                    println!(
                        "    {} ({}): {}",
                        generation.name,
                        years(generation.year_from, generation.year_to),
                        generation
                            .trims
                            .iter()
                            .map(|t| format!("{} [{}]", t.name, t.id))
                            .collect::<Vec<_>>()
                            .join(", ")
                    );
                }
            }
        }
        return Ok(());
    }

    let cards = store.search(&filters);
    if cards.is_empty() {
        bail!("No generations match the given filters");
    }

    if json {
        return print_json(&cards);
    }

    println!("Found {} generation(s):\n", cards.len());
    let rows: Vec<CardRow> = cards.iter().map(CardRow::from).collect();
    print_table(&rows);
    Ok(())
}

pub fn show_stats(store: &CatalogStore, json: bool) -> Result<()> {
    let stats = store.stats();

    if json {
        return print_json(&stats);
    }

    println!("Brands:      {}", stats.brands);
    println!("Models:      {}", stats.models);
    println!("Generations: {}", stats.generations);
    println!(
        "Trims:       {} ({} with technical details)",
        stats.trims, stats.trims_with_details
    );
    Ok(())
}

/// Non-empty specification lines of a technical-details record
fn spec_rows(tech: &TechnicalDetails) -> Vec<SpecRow> {
    let entries: [(&'static str, Option<String>); 18] = [
        ("Fuel type", tech.fuel_type.clone()),
        ("Engine type", tech.engine_type.clone()),
        ("Engine code", tech.engine_code.clone()),
        ("Displacement", fmt_opt(&tech.engine_displacement)),
        ("Cylinders", fmt_opt(&tech.cylinders_count)),
        ("Power (hp)", fmt_opt(&tech.power)),
        ("Max power at (rpm)", fmt_opt(&tech.max_power_at_rpm)),
        ("Torque (Nm)", fmt_opt(&tech.torque)),
        ("Max torque at (rpm)", fmt_opt(&tech.max_torque_at_rpm)),
        ("Max speed (km/h)", fmt_opt(&tech.max_speed)),
        ("0-100 km/h (s)", fmt_opt(&tech.acceleration_0_to_100)),
        ("Drive type", tech.drive_type.clone()),
        ("Consumption city", fmt_opt(&tech.fuel_consumption_city)),
        ("Consumption mixed", fmt_opt(&tech.fuel_consumption_mixed)),
        ("Consumption highway", fmt_opt(&tech.fuel_consumption_highway)),
        ("Electric range (km)", fmt_opt(&tech.electric_range)),
        ("Curb weight (kg)", fmt_opt(&tech.curb_weight)),
        ("Fuel tank (l)", fmt_opt(&tech.fuel_tank_capacity)),
    ];

    entries
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| SpecRow { name, value }))
        .collect()
}

pub(crate) fn print_table<T: Tabled>(rows: &[T]) {
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string();

    println!("{table}");
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn fmt_opt<T: Display>(value: &Option<T>) -> Option<String> {
    value.as_ref().map(ToString::to_string)
}

pub(crate) fn or_dash<T: Display>(value: &Option<T>) -> String {
    fmt_opt(value).unwrap_or_else(|| "-".to_string())
}

fn years(from: i32, to: i32) -> String {
    if from == to {
        from.to_string()
    } else {
        format!("{from}-{to}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_args_map_to_filters() {
        let args = SearchArgs {
            brand: Some("toyota".into()),
            min_year: Some(2018),
            fuel_type: Some("hybrid".into()),
            ..Default::default()
        };

        assert_eq!(
            args.filters(),
            SearchFilters::new()
                .brand("toyota")
                .min_year(2018)
                .fuel_type("hybrid")
        );
    }

    #[test]
    fn test_spec_rows_skip_missing_values() {
        let tech = TechnicalDetails {
            power: Some(203),
            acceleration_0_to_100: Some(8.2),
            ..Default::default()
        };

        let rows = spec_rows(&tech);
        let names: Vec<&str> = rows.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Power (hp)", "0-100 km/h (s)"]);
        assert_eq!(rows[1].value, "8.2");
    }

    #[test]
    fn test_formatting_helpers() {
        assert_eq!(or_dash::<i32>(&None), "-");
        assert_eq!(or_dash(&Some("SUV")), "SUV");
        assert_eq!(years(2017, 2024), "2017-2024");
        assert_eq!(years(2026, 2026), "2026");
    }
}
