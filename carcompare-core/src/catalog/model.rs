//! Catalog entity types
//!
//! The catalog is a strict tree: a brand owns its models, a model owns its
//! generations and a generation owns its trims. Each child also carries the
//! id of its declared parent, which mirrors the source data and is only
//! checked for consistency at load time.
//!
//! Field names follow the PascalCase keys of the `cars.json` source file.

use serde::{Deserialize, Serialize};

/// Identifier shared by every catalog entity type
///
/// Ids are unique within one entity type across the whole catalog.
pub type EntityId = i32;

/// A vehicle manufacturer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Brand {
    pub id: EntityId,

    pub name: String,

    /// Models in catalog order
    #[serde(default)]
    pub models: Vec<Model>,
}

/// A named vehicle line under a brand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Model {
    pub id: EntityId,

    pub name: String,

    /// Declared owning brand
    #[serde(default)]
    pub brand_id: EntityId,

    /// Body-type classification (e.g. "Sedan", "SUV")
    #[serde(default)]
    pub body_type: Option<String>,

    /// Generations in catalog order
    #[serde(default)]
    pub generations: Vec<Generation>,
}

/// A model-year span of a model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Generation {
    pub id: EntityId,

    pub name: String,

    /// Declared owning model
    #[serde(default)]
    pub model_id: EntityId,

    /// First model year. Not checked against `year_to`.
    #[serde(default)]
    pub year_from: i32,

    /// Last model year
    #[serde(default)]
    pub year_to: i32,

    #[serde(default)]
    pub photo_url: Option<String>,

    /// Trims in catalog order
    #[serde(default)]
    pub trims: Vec<Trim>,
}

/// A concrete configuration of a generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Trim {
    pub id: EntityId,

    pub name: String,

    /// Declared owning generation
    #[serde(default)]
    pub generation_id: EntityId,

    /// Transmission label (e.g. "Automatic", "CVT")
    #[serde(default)]
    pub transmission_type: Option<String>,

    #[serde(default)]
    pub doors_count: Option<i32>,

    #[serde(default)]
    pub seats_count: Option<i32>,

    /// At most one specification record per trim
    #[serde(default)]
    pub technical_details: Option<TechnicalDetails>,
}

/// Flat specification record attached to a trim
///
/// Every field is optional. An absent value means "unknown", never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TechnicalDetails {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub trim_id: Option<EntityId>,

    // Performance
    /// km/h
    #[serde(default)]
    pub max_speed: Option<i32>,
    /// Seconds from 0 to 100 km/h
    #[serde(default, rename = "Acceleration0To100")]
    pub acceleration_0_to_100: Option<f64>,

    // Engine
    #[serde(default)]
    pub engine_code: Option<String>,
    #[serde(default)]
    pub engine_type: Option<String>,
    #[serde(default)]
    pub cylinders_count: Option<i32>,
    #[serde(default)]
    pub valves_count: Option<i32>,
    #[serde(default)]
    pub compression_ratio: Option<f64>,
    #[serde(default)]
    pub fuel_type: Option<String>,
    /// Horsepower
    #[serde(default)]
    pub power: Option<i32>,
    /// Nm
    #[serde(default)]
    pub torque: Option<i32>,
    #[serde(default, rename = "MaxPowerAtRPM")]
    pub max_power_at_rpm: Option<i32>,
    #[serde(default, rename = "MaxTorqueAtRPM")]
    pub max_torque_at_rpm: Option<i32>,
    #[serde(default)]
    pub engine_displacement: Option<f64>,

    #[serde(default)]
    pub drive_type: Option<String>,

    // Consumption, l/100km
    #[serde(default)]
    pub fuel_consumption_city: Option<f64>,
    #[serde(default)]
    pub fuel_consumption_mixed: Option<f64>,
    #[serde(default)]
    pub fuel_consumption_highway: Option<f64>,
    #[serde(default)]
    pub electric_range: Option<f64>,

    // Dimensions
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub wheelbase: Option<f64>,
    #[serde(default)]
    pub front_track: Option<f64>,
    #[serde(default)]
    pub rear_track: Option<f64>,
    #[serde(default)]
    pub curb_weight: Option<f64>,
    #[serde(default)]
    pub gross_weight: Option<f64>,
    #[serde(default)]
    pub fuel_tank_capacity: Option<f64>,
    #[serde(default)]
    pub turning_circle: Option<f64>,

    // Chassis
    #[serde(default)]
    pub front_brakes: Option<String>,
    #[serde(default)]
    pub rear_brakes: Option<String>,
    #[serde(default)]
    pub front_suspension: Option<String>,
    #[serde(default)]
    pub rear_suspension: Option<String>,
}
