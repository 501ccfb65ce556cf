//! Typed best/worst annotations for compared trims

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use super::ranking::Direction;
use crate::catalog::TechnicalDetails;

/// Numeric specification compared across trims
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    MaxSpeed,
    Acceleration,
    Power,
    Torque,
    FuelConsumption,
}

impl Metric {
    /// Every metric, in reporting order
    pub const ALL: [Metric; 5] = [
        Metric::MaxSpeed,
        Metric::Acceleration,
        Metric::Power,
        Metric::Torque,
        Metric::FuelConsumption,
    ];

    pub fn direction(self) -> Direction {
        match self {
            Metric::MaxSpeed | Metric::Power | Metric::Torque => Direction::HigherIsBetter,
            Metric::Acceleration | Metric::FuelConsumption => Direction::LowerIsBetter,
        }
    }

    /// The metric's value in a specification record, if known
    pub fn value(self, details: &TechnicalDetails) -> Option<f64> {
        match self {
            Metric::MaxSpeed => details.max_speed.map(f64::from),
            Metric::Acceleration => details.acceleration_0_to_100,
            Metric::Power => details.power.map(f64::from),
            Metric::Torque => details.torque.map(f64::from),
            Metric::FuelConsumption => details.fuel_consumption_mixed,
        }
    }

    /// Name used in highlight keys
    pub fn key_name(self) -> &'static str {
        match self {
            Metric::MaxSpeed => "MaxSpeed",
            Metric::Acceleration => "Acceleration0To100",
            Metric::Power => "Power",
            Metric::Torque => "Torque",
            Metric::FuelConsumption => "FuelConsumption",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HighlightKind {
    Best,
    Worst,
}

impl HighlightKind {
    pub fn suffix(self) -> &'static str {
        match self {
            HighlightKind::Best => "Best",
            HighlightKind::Worst => "Worst",
        }
    }
}

/// Positions of the trims that are best or worst for one metric
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub metric: Metric,
    pub kind: HighlightKind,
    /// Indices into the compared trim list
    pub indices: Vec<usize>,
}

impl Highlight {
    /// Wire key, e.g. `Power_Best`
    pub fn key(&self) -> String {
        format!("{}_{}", self.metric.key_name(), self.kind.suffix())
    }
}

/// All highlights of one comparison
///
/// Serializes as the flat `"<Metric>_<Best|Worst>" -> [indices]` map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlights {
    entries: Vec<Highlight>,
}

impl Highlights {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, highlight: Highlight) {
        self.entries.push(highlight);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Highlight> {
        self.entries.iter()
    }

    pub fn get(&self, metric: Metric, kind: HighlightKind) -> Option<&[usize]> {
        self.entries
            .iter()
            .find(|h| h.metric == metric && h.kind == kind)
            .map(|h| h.indices.as_slice())
    }

    pub fn best(&self, metric: Metric) -> Option<&[usize]> {
        self.get(metric, HighlightKind::Best)
    }

    pub fn worst(&self, metric: Metric) -> Option<&[usize]> {
        self.get(metric, HighlightKind::Worst)
    }

    /// Flat string-keyed form used at the serialization boundary
    pub fn to_key_map(&self) -> BTreeMap<String, Vec<usize>> {
        self.entries
            .iter()
            .map(|h| (h.key(), h.indices.clone()))
            .collect()
    }
}

impl Serialize for Highlights {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_key_map().serialize(serializer)
    }
}
