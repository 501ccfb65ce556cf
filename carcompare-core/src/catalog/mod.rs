//! Vehicle catalog - hierarchical data model and shared store
//!
//! # Overview
//!
//! The catalog holds every brand, model, generation and trim known to the
//! process, with an optional technical-details record per trim. It is loaded
//! in one piece from a JSON data file and replaced in one piece on reload.
//!
//! # Architecture
//!
//! ```text
//! Data/cars.json
//!     │
//!     ▼
//! CatalogStore ── RwLock<Arc<CatalogTree>> ── swapped whole on reload
//!     │
//!     ├── query::search        ← generation cards
//!     ├── query::search_tree   ← pruned brand tree
//!     └── compare::compare     ← trims + best/worst highlights
//! ```

mod model;
mod store;
mod tree;

pub use model::{Brand, EntityId, Generation, Model, TechnicalDetails, Trim};
pub use store::CatalogStore;
pub use tree::{CatalogStats, CatalogTree, ParentMismatch};
