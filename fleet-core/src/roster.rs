//! Fleet rosters: serde-friendly vehicle descriptions that build a [`Fleet`].
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fleet::Fleet;
use crate::vehicle::{Car, ElectricCar, Motorcycle, Truck, Vehicle, VehicleSpecError};

const DEFAULT_ROSTER_DATA: &str = include_str!("../assets/demo_fleet.json");

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("roster JSON could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("vehicle #{index} ({brand} {model}) is invalid: {source}")]
    InvalidVehicle {
        index: usize,
        brand: String,
        model: String,
        #[source]
        source: VehicleSpecError,
    },
}

/// Constructor arguments for one vehicle, tagged by variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VehicleSpec {
    Car {
        brand: String,
        model: String,
        #[serde(default = "VehicleSpec::default_doors")]
        doors: u8,
        #[serde(default)]
        luxury: bool,
    },
    Truck {
        brand: String,
        model: String,
        cargo_capacity: f64,
    },
    Motorcycle {
        brand: String,
        model: String,
        #[serde(default)]
        sidecar: bool,
    },
    ElectricCar {
        brand: String,
        model: String,
        battery_capacity: f64,
    },
}

impl VehicleSpec {
    const fn default_doors() -> u8 {
        4
    }

    #[must_use]
    pub fn brand(&self) -> &str {
        match self {
            Self::Car { brand, .. }
            | Self::Truck { brand, .. }
            | Self::Motorcycle { brand, .. }
            | Self::ElectricCar { brand, .. } => brand,
        }
    }

    #[must_use]
    pub fn model(&self) -> &str {
        match self {
            Self::Car { model, .. }
            | Self::Truck { model, .. }
            | Self::Motorcycle { model, .. }
            | Self::ElectricCar { model, .. } => model,
        }
    }

    /// Construct the described vehicle.
    ///
    /// # Errors
    ///
    /// Returns [`VehicleSpecError`] when a capacity is not positive.
    pub fn build(&self) -> Result<Box<dyn Vehicle>, VehicleSpecError> {
        let vehicle: Box<dyn Vehicle> = match self {
            Self::Car {
                brand,
                model,
                doors,
                luxury,
            } => Box::new(Car::new(brand.as_str(), model.as_str(), *doors, *luxury)),
            Self::Truck {
                brand,
                model,
                cargo_capacity,
            } => Box::new(Truck::new(brand.as_str(), model.as_str(), *cargo_capacity)?),
            Self::Motorcycle {
                brand,
                model,
                sidecar,
            } => Box::new(Motorcycle::new(brand.as_str(), model.as_str(), *sidecar)),
            Self::ElectricCar {
                brand,
                model,
                battery_capacity,
            } => Box::new(ElectricCar::new(
                brand.as_str(),
                model.as_str(),
                *battery_capacity,
            )?),
        };
        Ok(vehicle)
    }
}

/// Ordered list of vehicles to put in a fleet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub vehicles: Vec<VehicleSpec>,
}

impl Roster {
    /// Parse a roster from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Parse`] when the JSON does not describe a roster.
    pub fn from_json(json: &str) -> Result<Self, RosterError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load the built-in demonstration roster.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::default_config()
    }

    /// Embedded roster, falling back to the same five vehicles built in code.
    #[must_use]
    pub fn default_config() -> Self {
        Self::from_json(DEFAULT_ROSTER_DATA).unwrap_or_else(|_| Self {
            vehicles: vec![
                VehicleSpec::Car {
                    brand: "Toyota".to_string(),
                    model: "Camry".to_string(),
                    doors: 4,
                    luxury: false,
                },
                VehicleSpec::Car {
                    brand: "BMW".to_string(),
                    model: "7 Series".to_string(),
                    doors: 4,
                    luxury: true,
                },
                VehicleSpec::Truck {
                    brand: "Volvo".to_string(),
                    model: "FH16".to_string(),
                    cargo_capacity: 40.0,
                },
                VehicleSpec::Motorcycle {
                    brand: "Harley-Davidson".to_string(),
                    model: "Street Glide".to_string(),
                    sidecar: false,
                },
                VehicleSpec::ElectricCar {
                    brand: "Tesla".to_string(),
                    model: "Model S".to_string(),
                    battery_capacity: 100.0,
                },
            ],
        })
    }

    /// Build every vehicle in order. The first invalid entry aborts the build.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::InvalidVehicle`] naming the offending entry.
    pub fn build_fleet(&self) -> Result<Fleet, RosterError> {
        self.vehicles
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                spec.build().map_err(|source| RosterError::InvalidVehicle {
                    index,
                    brand: spec.brand().to_string(),
                    model: spec.model().to_string(),
                    source,
                })
            })
            .collect()
    }
}
