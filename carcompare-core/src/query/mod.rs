//! Catalog query engine
//!
//! Two search flavors walk the catalog top-down, applying each filter at the
//! level it describes:
//!
//! - [`search`] emits one [`GenerationCard`] per matching generation. Years
//!   are matched against the generation's first model year only, and the
//!   transmission and fuel-type filters must match a trim exactly.
//! - [`search_tree`] returns a pruned copy of the brand tree. Years are
//!   matched by interval overlap, and transmission and fuel type match as
//!   substrings.
//!
//! Text filters are always case-insensitive. Both flavors preserve catalog
//! order and never fail; an empty result means "no match".

mod details;
mod filters;

pub use details::{
    generation_details, trim_details, BrandSummary, GenerationDetails, GenerationSummary,
    ModelSummary, TrimDetails, TrimSummary,
};
pub use filters::{FilterError, FilterViolation, SearchFilters, DEFAULT_MIN_SEARCH_YEAR};

use serde::Serialize;
use tracing::debug;

use crate::catalog::{Brand, CatalogTree, EntityId, Generation, Model, Trim};
use filters::{active, contains_ci, equals_ci, name_contains, optional_contains};

/// Flattened summary of one generation and its owners
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GenerationCard {
    pub generation_id: EntityId,
    pub generation_name: String,
    pub year_from: i32,
    pub year_to: i32,
    pub photo_url: Option<String>,

    pub model_id: EntityId,
    pub model_name: String,
    pub body_type: Option<String>,

    pub brand_id: EntityId,
    pub brand_name: String,

    /// Trims that passed the trim-level filters, not the generation total
    pub trim_count: usize,
}

/// Search for generations matching every given filter
pub fn search(tree: &CatalogTree, filters: &SearchFilters) -> Vec<GenerationCard> {
    let mut cards = Vec::new();

    for brand in brands_matching(tree, filters) {
        for model in models_matching(brand, filters) {
            for generation in &model.generations {
                if !name_contains(&generation.name, &filters.generation)
                    || !starts_within(generation, filters)
                {
                    continue;
                }

                let trim_count = generation
                    .trims
                    .iter()
                    .filter(|t| trim_matches_exact(t, filters))
                    .count();
                if trim_count == 0 {
                    continue;
                }

                cards.push(GenerationCard {
                    generation_id: generation.id,
                    generation_name: generation.name.clone(),
                    year_from: generation.year_from,
                    year_to: generation.year_to,
                    photo_url: generation.photo_url.clone(),
                    model_id: model.id,
                    model_name: model.name.clone(),
                    body_type: model.body_type.clone(),
                    brand_id: brand.id,
                    brand_name: brand.name.clone(),
                    trim_count,
                });
            }
        }
    }

    debug!(?filters, cards = cards.len(), "Generation search finished");
    cards
}

/// Search returning the matching part of the brand tree
///
/// Empty generations, models and brands are pruned. Surviving trims are
/// returned without their technical details.
pub fn search_tree(tree: &CatalogTree, filters: &SearchFilters) -> Vec<Brand> {
    let mut brands = Vec::new();

    for brand in brands_matching(tree, filters) {
        let mut models = Vec::new();

        for model in models_matching(brand, filters) {
            let generations: Vec<Generation> = model
                .generations
                .iter()
                .filter(|g| {
                    name_contains(&g.name, &filters.generation) && overlaps_years(g, filters)
                })
                .filter_map(|g| {
                    let trims: Vec<Trim> = g
                        .trims
                        .iter()
                        .filter(|t| trim_matches_partial(t, filters))
                        .map(|t| Trim {
                            technical_details: None,
                            ..t.clone()
                        })
                        .collect();

                    (!trims.is_empty()).then(|| Generation {
                        trims,
                        ..g.clone_shallow()
                    })
                })
                .collect();

            if !generations.is_empty() {
                models.push(Model {
                    generations,
                    ..model.clone_shallow()
                });
            }
        }

        if !models.is_empty() {
            brands.push(Brand {
                id: brand.id,
                name: brand.name.clone(),
                models,
            });
        }
    }

    debug!(?filters, brands = brands.len(), "Tree search finished");
    brands
}

fn brands_matching<'a>(
    tree: &'a CatalogTree,
    filters: &'a SearchFilters,
) -> impl Iterator<Item = &'a Brand> {
    tree.brands()
        .iter()
        .filter(move |b| name_contains(&b.name, &filters.brand))
}

fn models_matching<'a>(
    brand: &'a Brand,
    filters: &'a SearchFilters,
) -> impl Iterator<Item = &'a Model> {
    brand.models.iter().filter(move |m| {
        name_contains(&m.name, &filters.model)
            && optional_contains(m.body_type.as_deref(), &filters.body_type)
    })
}

/// Both year bounds apply to the first model year
fn starts_within(generation: &Generation, filters: &SearchFilters) -> bool {
    filters.min_year.map_or(true, |min| generation.year_from >= min)
        && filters.max_year.map_or(true, |max| generation.year_from <= max)
}

/// The production span intersects the requested span
fn overlaps_years(generation: &Generation, filters: &SearchFilters) -> bool {
    filters.min_year.map_or(true, |min| generation.year_to >= min)
        && filters.max_year.map_or(true, |max| generation.year_from <= max)
}

fn trim_matches_exact(trim: &Trim, filters: &SearchFilters) -> bool {
    trim_matches(trim, filters, equals_ci)
}

fn trim_matches_partial(trim: &Trim, filters: &SearchFilters) -> bool {
    trim_matches(trim, filters, contains_ci)
}

fn trim_matches(trim: &Trim, filters: &SearchFilters, matcher: fn(&str, &str) -> bool) -> bool {
    let transmission_ok = active(&filters.transmission).map_or(true, |wanted| {
        trim.transmission_type
            .as_deref()
            .is_some_and(|t| matcher(t, wanted))
    });

    let fuel_ok = active(&filters.fuel_type).map_or(true, |wanted| {
        trim.technical_details
            .as_ref()
            .and_then(|d| d.fuel_type.as_deref())
            .is_some_and(|f| matcher(f, wanted))
    });

    transmission_ok && fuel_ok
}

impl Model {
    /// Copy without the owned generations
    fn clone_shallow(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            brand_id: self.brand_id,
            body_type: self.body_type.clone(),
            generations: Vec::new(),
        }
    }
}

impl Generation {
    /// Copy without the owned trims
    fn clone_shallow(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            model_id: self.model_id,
            year_from: self.year_from,
            year_to: self.year_to,
            photo_url: self.photo_url.clone(),
            trims: Vec::new(),
        }
    }
}
