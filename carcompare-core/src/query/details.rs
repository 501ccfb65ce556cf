//! Detail projections for a single generation or trim

use serde::Serialize;

use crate::catalog::{Brand, CatalogTree, EntityId, Generation, Model, TechnicalDetails, Trim};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BrandSummary {
    pub id: EntityId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModelSummary {
    pub id: EntityId,
    pub name: String,
    pub body_type: Option<String>,
    pub brand_id: EntityId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GenerationSummary {
    pub id: EntityId,
    pub name: String,
    pub year_from: i32,
    pub year_to: i32,
    pub photo_url: Option<String>,
}

/// Trim without its specification record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrimSummary {
    pub id: EntityId,
    pub name: String,
    pub transmission_type: Option<String>,
    pub doors_count: Option<i32>,
    pub seats_count: Option<i32>,
}

/// A generation with its owners and the list of its trims
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GenerationDetails {
    #[serde(flatten)]
    pub generation: GenerationSummary,
    pub brand: BrandSummary,
    pub model: ModelSummary,
    pub trims: Vec<TrimSummary>,
}

/// A trim with its owners and technical details
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrimDetails {
    #[serde(flatten)]
    pub trim: TrimSummary,
    pub generation: GenerationSummary,
    pub model: ModelSummary,
    pub brand: BrandSummary,
    pub technical_details: Option<TechnicalDetails>,
}

impl From<&Brand> for BrandSummary {
    fn from(brand: &Brand) -> Self {
        Self {
            id: brand.id,
            name: brand.name.clone(),
        }
    }
}

impl From<&Model> for ModelSummary {
    fn from(model: &Model) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            body_type: model.body_type.clone(),
            brand_id: model.brand_id,
        }
    }
}

impl From<&Generation> for GenerationSummary {
    fn from(generation: &Generation) -> Self {
        Self {
            id: generation.id,
            name: generation.name.clone(),
            year_from: generation.year_from,
            year_to: generation.year_to,
            photo_url: generation.photo_url.clone(),
        }
    }
}

impl From<&Trim> for TrimSummary {
    fn from(trim: &Trim) -> Self {
        Self {
            id: trim.id,
            name: trim.name.clone(),
            transmission_type: trim.transmission_type.clone(),
            doors_count: trim.doors_count,
            seats_count: trim.seats_count,
        }
    }
}

/// Look up a generation together with its brand, model and trims
pub fn generation_details(tree: &CatalogTree, id: EntityId) -> Option<GenerationDetails> {
    tree.generations()
        .find(|(_, _, g)| g.id == id)
        .map(|(brand, model, generation)| GenerationDetails {
            generation: generation.into(),
            brand: brand.into(),
            model: model.into(),
            trims: generation.trims.iter().map(TrimSummary::from).collect(),
        })
}

/// Look up a trim together with its owners and technical details
pub fn trim_details(tree: &CatalogTree, id: EntityId) -> Option<TrimDetails> {
    tree.trims()
        .find(|(_, _, _, t)| t.id == id)
        .map(|(brand, model, generation, trim)| TrimDetails {
            trim: trim.into(),
            generation: generation.into(),
            model: model.into(),
            brand: brand.into(),
            technical_details: trim.technical_details.clone(),
        })
}
