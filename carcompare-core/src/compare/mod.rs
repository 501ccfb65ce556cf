//! Trim comparison engine
//!
//! Resolves a handful of trims and marks, for each numeric metric, which of
//! them are best and which are worst. Ties are reported in full.

mod highlight;
mod ranking;

pub use highlight::{Highlight, HighlightKind, Highlights, Metric};
pub use ranking::{rank_extremes, rank_optional, Direction, Extremes};

use serde::Serialize;
use tracing::debug;

use crate::catalog::{CatalogTree, EntityId, Trim};
use crate::error::CompareError;

/// Largest number of trims a comparison accepts
pub const MAX_COMPARED_TRIMS: usize = 4;

/// Resolved trims and their highlights
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Comparison {
    /// Trims in catalog order; highlight indices point into this list
    pub trims: Vec<Trim>,
    pub highlights: Highlights,
}

/// Compare the trims with the given ids
///
/// Requests with no ids, more than `max_trims` ids, or no resolvable id are
/// rejected. Unknown ids are otherwise skipped. Trims come back in catalog
/// order, each at most once.
pub fn compare(
    tree: &CatalogTree,
    trim_ids: &[EntityId],
    max_trims: usize,
) -> Result<Comparison, CompareError> {
    if trim_ids.is_empty() {
        return Err(CompareError::TooFewTrims);
    }
    if trim_ids.len() > max_trims {
        return Err(CompareError::TooManyTrims {
            requested: trim_ids.len(),
            max: max_trims,
        });
    }

    let trims: Vec<Trim> = tree
        .trims()
        .map(|(_, _, _, trim)| trim)
        .filter(|trim| trim_ids.contains(&trim.id))
        .take(max_trims)
        .cloned()
        .collect();

    if trims.is_empty() {
        return Err(CompareError::NoTrimsResolved {
            requested: trim_ids.to_vec(),
        });
    }

    let highlights = highlight_trims(&trims);
    debug!(
        requested = trim_ids.len(),
        resolved = trims.len(),
        highlights = highlights.len(),
        "Comparison finished"
    );

    Ok(Comparison { trims, highlights })
}

/// Best/worst highlights for every metric
///
/// Produces nothing unless every trim has technical details, and nothing
/// for a single trim.
pub fn highlight_trims(trims: &[Trim]) -> Highlights {
    let mut highlights = Highlights::new();

    let Some(details) = trims
        .iter()
        .map(|t| t.technical_details.as_ref())
        .collect::<Option<Vec<_>>>()
    else {
        return highlights;
    };

    for metric in Metric::ALL {
        let values: Vec<Option<f64>> = details.iter().map(|d| metric.value(d)).collect();

        if let Some(extremes) = rank_optional(&values, metric.direction()) {
            highlights.push(Highlight {
                metric,
                kind: HighlightKind::Best,
                indices: extremes.best,
            });
            highlights.push(Highlight {
                metric,
                kind: HighlightKind::Worst,
                indices: extremes.worst,
            });
        }
    }

    highlights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TechnicalDetails;

    fn trim(id: EntityId, details: Option<TechnicalDetails>) -> Trim {
        Trim {
            id,
            name: format!("Trim {id}"),
            generation_id: 1,
            transmission_type: None,
            doors_count: None,
            seats_count: None,
            technical_details: details,
        }
    }

    #[test]
    fn test_highlights_need_details_on_every_trim() {
        let trims = vec![
            trim(1, Some(TechnicalDetails::default())),
            trim(2, None),
        ];
        assert!(highlight_trims(&trims).is_empty());
    }

    #[test]
    fn test_unknown_values_lose_to_known() {
        let trims = vec![
            trim(
                1,
                Some(TechnicalDetails {
                    fuel_consumption_mixed: Some(6.1),
                    ..Default::default()
                }),
            ),
            trim(2, Some(TechnicalDetails::default())),
        ];

        let highlights = highlight_trims(&trims);
        assert_eq!(highlights.best(Metric::FuelConsumption), Some(&[0][..]));
        assert_eq!(highlights.worst(Metric::FuelConsumption), Some(&[1][..]));
        // Both unknown: equal sentinels tie.
        assert_eq!(highlights.best(Metric::Power), Some(&[0, 1][..]));
        assert_eq!(highlights.len(), Metric::ALL.len() * 2);
    }

    #[test]
    fn test_key_map_uses_wire_names() {
        let trims = vec![
            trim(
                1,
                Some(TechnicalDetails {
                    acceleration_0_to_100: Some(8.0),
                    ..Default::default()
                }),
            ),
            trim(
                2,
                Some(TechnicalDetails {
                    acceleration_0_to_100: Some(7.0),
                    ..Default::default()
                }),
            ),
        ];

        let map = highlight_trims(&trims).to_key_map();
        assert_eq!(map["Acceleration0To100_Best"], vec![1]);
        assert_eq!(map["Acceleration0To100_Worst"], vec![0]);
        assert!(map.contains_key("MaxSpeed_Best"));
        assert!(map.contains_key("FuelConsumption_Worst"));
    }

    #[test]
    fn test_cardinality_is_enforced() {
        let tree = CatalogTree::empty();
        assert_eq!(
            compare(&tree, &[], MAX_COMPARED_TRIMS),
            Err(CompareError::TooFewTrims)
        );
        assert_eq!(
            compare(&tree, &[1, 2, 3, 4, 5], MAX_COMPARED_TRIMS),
            Err(CompareError::TooManyTrims {
                requested: 5,
                max: 4
            })
        );
        assert_eq!(
            compare(&tree, &[1], MAX_COMPARED_TRIMS),
            Err(CompareError::NoTrimsResolved { requested: vec![1] })
        );
    }
}
