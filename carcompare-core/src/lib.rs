//! CarCompare core library exports

pub mod catalog;
pub mod compare;
pub mod config;
pub mod error;
pub mod query;

pub use catalog::CatalogStore;
pub use error::{CatalogError, CompareError};
