//! Shared catalog store with atomic reload
//!
//! The store holds an `Arc<CatalogTree>` behind a short-lived lock. Readers
//! clone the `Arc` and traverse their snapshot without holding the lock, so
//! a reload never blocks an in-flight search and is never observed halfway.
//! Load and reload build the new tree completely before swapping it in.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::{debug, error, info};

use super::model::{Brand, EntityId, Generation, Model, TechnicalDetails, Trim};
use super::tree::{CatalogStats, CatalogTree};
use crate::compare::{self, Comparison};
use crate::error::{CatalogError, CompareError};
use crate::query::{self, GenerationCard, GenerationDetails, SearchFilters, TrimDetails};

/// Process-wide, read-mostly catalog
#[derive(Debug, Default)]
pub struct CatalogStore {
    tree: RwLock<Arc<CatalogTree>>,

    /// Where the current tree was loaded from, used by `reload`
    source: Mutex<Option<PathBuf>>,
}

impl CatalogStore {
    /// Create a store holding an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store around an already-built tree
    pub fn with_tree(tree: CatalogTree) -> Self {
        Self {
            tree: RwLock::new(Arc::new(tree)),
            source: Mutex::new(None),
        }
    }

    /// Current tree. The snapshot stays valid across later reloads.
    pub fn snapshot(&self) -> Arc<CatalogTree> {
        self.tree
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap in a new tree, returning the previous one
    pub fn replace(&self, tree: CatalogTree) -> Arc<CatalogTree> {
        let new_tree = Arc::new(tree);
        let mut guard = self.tree.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, new_tree)
    }

    /// Load the catalog from a JSON data file
    ///
    /// On any failure the error is logged, the store is reset to an empty
    /// tree and the error is returned for the caller's information. Reads
    /// keep working either way.
    pub fn load_from_path(&self, path: &Path) -> Result<CatalogStats, CatalogError> {
        let mut source = self.source.lock().unwrap_or_else(PoisonError::into_inner);
        self.load_locked(&mut source, path.to_path_buf())
    }

    /// Load the catalog from an in-memory JSON document
    ///
    /// Same fallback behavior as [`load_from_path`](Self::load_from_path).
    pub fn load_from_str(&self, content: &str) -> Result<CatalogStats, CatalogError> {
        self.install(CatalogTree::from_json(content))
    }

    /// Re-read the file the store was last loaded from
    pub fn reload(&self) -> Result<CatalogStats, CatalogError> {
        let mut source = self.source.lock().unwrap_or_else(PoisonError::into_inner);

        match source.clone() {
            Some(path) => self.load_locked(&mut source, path),
            None => Err(CatalogError::NoSource),
        }
    }

    /// Path where the last file load came from, if any
    pub fn source_path(&self) -> Option<PathBuf> {
        self.source
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Read, parse and swap in a file while the caller holds the source
    /// lock, so the recorded path always matches the installed tree
    fn load_locked(
        &self,
        source: &mut Option<PathBuf>,
        path: PathBuf,
    ) -> Result<CatalogStats, CatalogError> {
        info!("Loading catalog data from {}", path.display());
        let result = std::fs::read_to_string(&path)
            .map_err(|err| CatalogError::Read {
                path: path.clone(),
                source: err,
            })
            .and_then(|content| CatalogTree::from_json(&content));

        let stats = self.install(result);
        *source = Some(path);
        stats
    }

    fn install(
        &self,
        result: Result<CatalogTree, CatalogError>,
    ) -> Result<CatalogStats, CatalogError> {
        match result {
            Ok(tree) => {
                tree.warn_on_mismatches();
                let stats = tree.stats();
                self.replace(tree);
                info!(
                    brands = stats.brands,
                    models = stats.models,
                    generations = stats.generations,
                    trims = stats.trims,
                    "Catalog loaded"
                );
                Ok(stats)
            }
            Err(e) => {
                error!("Catalog load failed, falling back to an empty catalog: {e:#}");
                self.replace(CatalogTree::empty());
                Err(e)
            }
        }
    }

    pub fn stats(&self) -> CatalogStats {
        self.snapshot().stats()
    }

    // Lookups. These return owned values so callers never hold a snapshot
    // longer than the call.

    pub fn all_brands(&self) -> Vec<Brand> {
        self.snapshot().brands().to_vec()
    }

    pub fn brand_by_id(&self, id: EntityId) -> Option<Brand> {
        self.snapshot().brand_by_id(id).cloned()
    }

    pub fn models_by_brand_id(&self, id: EntityId) -> Vec<Model> {
        self.snapshot().models_by_brand_id(id).to_vec()
    }

    pub fn model_by_id(&self, id: EntityId) -> Option<Model> {
        self.snapshot().model_by_id(id).cloned()
    }

    pub fn generations_by_model_id(&self, id: EntityId) -> Vec<Generation> {
        self.snapshot().generations_by_model_id(id).to_vec()
    }

    pub fn generation_by_id(&self, id: EntityId) -> Option<Generation> {
        self.snapshot().generation_by_id(id).cloned()
    }

    pub fn trims_by_generation_id(&self, id: EntityId) -> Vec<Trim> {
        self.snapshot().trims_by_generation_id(id).to_vec()
    }

    pub fn trim_by_id(&self, id: EntityId) -> Option<Trim> {
        self.snapshot().trim_by_id(id).cloned()
    }

    pub fn technical_details_by_trim_id(&self, id: EntityId) -> Option<TechnicalDetails> {
        self.snapshot().technical_details_by_trim_id(id).cloned()
    }

    // Engines, each run against one consistent snapshot

    pub fn search(&self, filters: &SearchFilters) -> Vec<GenerationCard> {
        query::search(&self.snapshot(), filters)
    }

    pub fn search_tree(&self, filters: &SearchFilters) -> Vec<Brand> {
        query::search_tree(&self.snapshot(), filters)
    }

    pub fn generation_details(&self, id: EntityId) -> Option<GenerationDetails> {
        query::generation_details(&self.snapshot(), id)
    }

    pub fn trim_details(&self, id: EntityId) -> Option<TrimDetails> {
        query::trim_details(&self.snapshot(), id)
    }

    pub fn compare(&self, trim_ids: &[EntityId]) -> Result<Comparison, CompareError> {
        debug!(?trim_ids, "Comparing trims");
        compare::compare(&self.snapshot(), trim_ids, compare::MAX_COMPARED_TRIMS)
    }
}
