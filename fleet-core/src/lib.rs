//! Fleet Simulation Core
//!
//! Platform-agnostic vehicle and fleet logic. Every vehicle variant implements
//! the [`Vehicle`] contract and the [`Fleet`] drives them through that contract
//! alone. This crate provides no console output; callers render the returned
//! reports however they like.

pub mod constants;
pub mod fleet;
pub mod numbers;
pub mod outcome;
pub mod roster;
pub mod vehicle;

// Re-export commonly used types
pub use fleet::{Fleet, MaintenanceRecord, TripAssessment};
pub use outcome::{Action, Outcome, Refusal, VehicleReport};
pub use roster::{Roster, RosterError, VehicleSpec};
pub use vehicle::{
    Car, ElectricCar, EnergyStore, Motorcycle, Truck, VariantMut, Vehicle, VehicleCore,
    VehicleKind, VehicleSpecError, VehicleStatus,
};
