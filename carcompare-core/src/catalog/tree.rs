//! Immutable catalog tree and its lookup primitives
//!
//! A `CatalogTree` is built once from the source data and never mutated
//! afterwards. Readers share it behind an `Arc` handed out by
//! [`CatalogStore`](super::CatalogStore).

use serde::Serialize;
use tracing::warn;

use super::model::{Brand, EntityId, Generation, Model, TechnicalDetails, Trim};
use crate::error::CatalogError;

/// Entity counts for one loaded tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub brands: usize,
    pub models: usize,
    pub generations: usize,
    pub trims: usize,
    /// Trims carrying a technical-details record
    pub trims_with_details: usize,
}

/// A child whose declared parent id disagrees with the parent that owns it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentMismatch {
    pub kind: &'static str,
    pub id: EntityId,
    pub declared_parent: EntityId,
    pub actual_parent: EntityId,
}

/// The brand → model → generation → trim hierarchy
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogTree {
    brands: Vec<Brand>,
}

impl CatalogTree {
    /// An empty tree
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(brands: Vec<Brand>) -> Self {
        Self { brands }
    }

    /// Parse a tree from the JSON array of brands
    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let brands: Vec<Brand> =
            serde_json::from_str(content).map_err(|source| CatalogError::Parse { source })?;
        Ok(Self::new(brands))
    }

    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }

    pub fn stats(&self) -> CatalogStats {
        let mut stats = CatalogStats {
            brands: self.brands.len(),
            ..Default::default()
        };
        for (_, model) in self.models() {
            stats.models += 1;
            stats.generations += model.generations.len();
        }
        for (_, _, _, trim) in self.trims() {
            stats.trims += 1;
            if trim.technical_details.is_some() {
                stats.trims_with_details += 1;
            }
        }
        stats
    }

    /// All brands in catalog order
    pub fn brands(&self) -> &[Brand] {
        &self.brands
    }

    /// Every model with its owning brand, in hierarchical order
    pub fn models(&self) -> impl Iterator<Item = (&Brand, &Model)> {
        self.brands
            .iter()
            .flat_map(|brand| brand.models.iter().map(move |model| (brand, model)))
    }

    /// Every generation with its owners, in hierarchical order
    pub fn generations(&self) -> impl Iterator<Item = (&Brand, &Model, &Generation)> {
        self.models().flat_map(|(brand, model)| {
            model
                .generations
                .iter()
                .map(move |generation| (brand, model, generation))
        })
    }

    /// Every trim with its owners, in hierarchical order
    pub fn trims(&self) -> impl Iterator<Item = (&Brand, &Model, &Generation, &Trim)> {
        self.generations().flat_map(|(brand, model, generation)| {
            generation
                .trims
                .iter()
                .map(move |trim| (brand, model, generation, trim))
        })
    }

    pub fn brand_by_id(&self, id: EntityId) -> Option<&Brand> {
        self.brands.iter().find(|b| b.id == id)
    }

    /// Models of the brand with `id`; empty when the brand does not exist
    pub fn models_by_brand_id(&self, id: EntityId) -> &[Model] {
        self.brand_by_id(id)
            .map(|b| b.models.as_slice())
            .unwrap_or_default()
    }

    pub fn model_by_id(&self, id: EntityId) -> Option<&Model> {
        self.models().map(|(_, m)| m).find(|m| m.id == id)
    }

    /// Generations of the model with `id`; empty when the model does not exist
    pub fn generations_by_model_id(&self, id: EntityId) -> &[Generation] {
        self.model_by_id(id)
            .map(|m| m.generations.as_slice())
            .unwrap_or_default()
    }

    pub fn generation_by_id(&self, id: EntityId) -> Option<&Generation> {
        self.generations().map(|(_, _, g)| g).find(|g| g.id == id)
    }

    /// Trims of the generation with `id`; empty when the generation does not exist
    pub fn trims_by_generation_id(&self, id: EntityId) -> &[Trim] {
        self.generation_by_id(id)
            .map(|g| g.trims.as_slice())
            .unwrap_or_default()
    }

    pub fn trim_by_id(&self, id: EntityId) -> Option<&Trim> {
        self.trims().map(|(_, _, _, t)| t).find(|t| t.id == id)
    }

    pub fn technical_details_by_trim_id(&self, id: EntityId) -> Option<&TechnicalDetails> {
        self.trim_by_id(id)
            .and_then(|t| t.technical_details.as_ref())
    }

    /// Children whose declared parent id does not match their owner
    ///
    /// Lookups always follow ownership, so a mismatch never breaks a read.
    /// It is reported so bad source data is visible in the logs.
    pub fn parent_mismatches(&self) -> Vec<ParentMismatch> {
        let mut mismatches = Vec::new();

        for (brand, model) in self.models() {
            if model.brand_id != brand.id {
                mismatches.push(ParentMismatch {
                    kind: "model",
                    id: model.id,
                    declared_parent: model.brand_id,
                    actual_parent: brand.id,
                });
            }
        }
        for (_, model, generation) in self.generations() {
            if generation.model_id != model.id {
                mismatches.push(ParentMismatch {
                    kind: "generation",
                    id: generation.id,
                    declared_parent: generation.model_id,
                    actual_parent: model.id,
                });
            }
        }
        for (_, _, generation, trim) in self.trims() {
            if trim.generation_id != generation.id {
                mismatches.push(ParentMismatch {
                    kind: "trim",
                    id: trim.id,
                    declared_parent: trim.generation_id,
                    actual_parent: generation.id,
                });
            }
        }

        mismatches
    }

    /// Log every parent mismatch at warn level
    pub(crate) fn warn_on_mismatches(&self) {
        for m in self.parent_mismatches() {
            warn!(
                kind = m.kind,
                id = m.id,
                declared_parent = m.declared_parent,
                actual_parent = m.actual_parent,
                "Catalog entity declares a parent that does not own it"
            );
        }
    }
}
