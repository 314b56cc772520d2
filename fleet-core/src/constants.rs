//! Centralized tuning constants for the fleet simulation.
//!
//! Every variant's speed limit, consumption rate and acceleration cost
//! lives here so the numbers can only change through reviewed code.

// Shared energy model ------------------------------------------------------
/// Full tank, expressed as a percentage.
pub const ENERGY_MAX: f64 = 100.0;
/// Extra percentage points added on top of the shortfall when a trip needs a refuel.
pub const TRIP_REFUEL_BUFFER: f64 = 10.0;
/// Consumption formulas are expressed per this many kilometres.
pub const CONSUMPTION_DISTANCE_UNIT: f64 = 100.0;

// Car ----------------------------------------------------------------------
pub const CAR_MAX_SPEED: f64 = 180.0;
pub const CAR_CONSUMPTION: f64 = 8.0;
pub const CAR_LUXURY_MULTIPLIER: f64 = 1.5;
pub const CAR_ACCELERATION_COST: f64 = 0.5;

// Truck --------------------------------------------------------------------
pub const TRUCK_MAX_SPEED: f64 = 120.0;
pub const TRUCK_CONSUMPTION: f64 = 25.0;
/// Additional consumption share at full load (80% more fuel).
pub const TRUCK_FULL_LOAD_PENALTY: f64 = 0.8;
pub const TRUCK_ACCELERATION_COST: f64 = 1.0;

// Motorcycle ---------------------------------------------------------------
pub const MOTORCYCLE_MAX_SPEED: f64 = 200.0;
pub const MOTORCYCLE_CONSUMPTION: f64 = 3.0;
pub const MOTORCYCLE_SIDECAR_MULTIPLIER: f64 = 1.3;
pub const MOTORCYCLE_ACCELERATION_COST: f64 = 0.3;

// Electric car -------------------------------------------------------------
pub const ELECTRIC_MAX_SPEED: f64 = 160.0;
pub const ELECTRIC_CONSUMPTION: f64 = 20.0;
/// Battery units drained per acceleration.
pub const ELECTRIC_ACCELERATION_COST: f64 = 2.0;
/// Battery units recovered by regenerative braking on stop.
pub const ELECTRIC_REGEN_RECOVERY: f64 = 1.0;
