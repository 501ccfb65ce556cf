//! Search filter set, text matching rules and boundary validation

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Earliest model year accepted by [`SearchFilters::validate`]
pub const DEFAULT_MIN_SEARCH_YEAR: i32 = 1900;

/// Optional search criteria. An absent or empty field places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub generation: Option<String>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub body_type: Option<String>,
    pub transmission: Option<String>,
    pub fuel_type: Option<String>,
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn generation(mut self, generation: impl Into<String>) -> Self {
        self.generation = Some(generation.into());
        self
    }

    pub fn min_year(mut self, year: i32) -> Self {
        self.min_year = Some(year);
        self
    }

    pub fn max_year(mut self, year: i32) -> Self {
        self.max_year = Some(year);
        self
    }

    pub fn body_type(mut self, body_type: impl Into<String>) -> Self {
        self.body_type = Some(body_type.into());
        self
    }

    pub fn transmission(mut self, transmission: impl Into<String>) -> Self {
        self.transmission = Some(transmission.into());
        self
    }

    pub fn fuel_type(mut self, fuel_type: impl Into<String>) -> Self {
        self.fuel_type = Some(fuel_type.into());
        self
    }

    /// Check the filter combination against the current calendar year
    pub fn validate(&self) -> Result<(), FilterError> {
        self.validate_with(DEFAULT_MIN_SEARCH_YEAR, chrono::Local::now().year())
    }

    /// Check the filter combination
    ///
    /// Every violation is collected so the caller can report them together.
    pub fn validate_with(&self, min_allowed_year: i32, current_year: i32) -> Result<(), FilterError> {
        let mut violations = Vec::new();

        let has_brand = active(&self.brand).is_some();
        let has_model = active(&self.model).is_some();

        if has_model && !has_brand {
            violations.push(FilterViolation::ModelWithoutBrand);
        }
        if active(&self.generation).is_some() {
            if !has_brand {
                violations.push(FilterViolation::GenerationWithoutBrand);
            }
            if !has_model {
                violations.push(FilterViolation::GenerationWithoutModel);
            }
        }

        if let (Some(min), Some(max)) = (self.min_year, self.max_year) {
            if min > max {
                violations.push(FilterViolation::YearRangeInverted { min, max });
            }
        }
        if let Some(min) = self.min_year {
            if min < min_allowed_year {
                violations.push(FilterViolation::MinYearTooEarly {
                    min,
                    limit: min_allowed_year,
                });
            }
        }
        if let Some(max) = self.max_year {
            let limit = current_year + 1;
            if max > limit {
                violations.push(FilterViolation::MaxYearTooLate { max, limit });
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(FilterError { violations })
        }
    }
}

/// One rejected aspect of a filter set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterViolation {
    ModelWithoutBrand,
    GenerationWithoutBrand,
    GenerationWithoutModel,
    YearRangeInverted { min: i32, max: i32 },
    MinYearTooEarly { min: i32, limit: i32 },
    MaxYearTooLate { max: i32, limit: i32 },
}

impl fmt::Display for FilterViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModelWithoutBrand => write!(f, "searching by model requires a brand"),
            Self::GenerationWithoutBrand => write!(f, "searching by generation requires a brand"),
            Self::GenerationWithoutModel => write!(f, "searching by generation requires a model"),
            Self::YearRangeInverted { min, max } => {
                write!(f, "minimum year {min} is greater than maximum year {max}")
            }
            Self::MinYearTooEarly { min, limit } => {
                write!(f, "minimum year {min} is earlier than {limit}")
            }
            Self::MaxYearTooLate { max, limit } => {
                write!(f, "maximum year {max} is later than {limit}")
            }
        }
    }
}

/// Rejected filter set
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid search filters: {}", join_violations(.violations))]
pub struct FilterError {
    pub violations: Vec<FilterViolation>,
}

fn join_violations(violations: &[FilterViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A text filter that is present and non-empty
pub(crate) fn active(filter: &Option<String>) -> Option<&str> {
    filter.as_deref().filter(|s| !s.is_empty())
}

/// Case-insensitive substring match
pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Case-insensitive whole-value match
pub(crate) fn equals_ci(value: &str, expected: &str) -> bool {
    value.to_lowercase() == expected.to_lowercase()
}

/// Substring filter against an optional field; a missing field never matches
pub(crate) fn optional_contains(field: Option<&str>, filter: &Option<String>) -> bool {
    match active(filter) {
        None => true,
        Some(needle) => field.is_some_and(|value| contains_ci(value, needle)),
    }
}

/// Substring filter against a required field
pub(crate) fn name_contains(field: &str, filter: &Option<String>) -> bool {
    active(filter).map_or(true, |needle| contains_ci(field, needle))
}
