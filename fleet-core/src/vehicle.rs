//! Vehicle contract and the state shared by every variant.
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::constants::ENERGY_MAX;
use crate::numbers::{clamp_finite, is_valid_amount, is_valid_capacity, percent_of};
use crate::outcome::{Action, Outcome, Refusal};

mod car;
mod electric_car;
mod motorcycle;
mod truck;

pub use car::Car;
pub use electric_car::ElectricCar;
pub use motorcycle::Motorcycle;
pub use truck::Truck;

/// Errors raised when a vehicle is constructed with impossible parameters.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum VehicleSpecError {
    #[error("{field} must be a positive, finite number (got {value})")]
    NonPositiveCapacity { field: &'static str, value: f64 },
}

impl VehicleSpecError {
    pub(crate) fn check_capacity(field: &'static str, value: f64) -> Result<f64, Self> {
        if is_valid_capacity(value) {
            Ok(value)
        } else {
            Err(Self::NonPositiveCapacity { field, value })
        }
    }
}

/// Tag identifying a vehicle variant without borrowing it.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum VehicleKind {
    Car,
    Truck,
    Motorcycle,
    ElectricCar,
    /// Implementors outside this crate.
    Other,
}

impl VehicleKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Car => "Car",
            Self::Truck => "Truck",
            Self::Motorcycle => "Motorcycle",
            Self::ElectricCar => "Electric Car",
            Self::Other => "Vehicle",
        }
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mutable handle to a concrete variant, for collaborators that need its extra operations.
#[derive(Debug)]
#[non_exhaustive]
pub enum VariantMut<'a> {
    Car(&'a mut Car),
    Truck(&'a mut Truck),
    Motorcycle(&'a mut Motorcycle),
    ElectricCar(&'a mut ElectricCar),
    Other,
}

/// Where a vehicle keeps its energy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "store", rename_all = "snake_case")]
pub enum EnergyStore {
    /// Fuel tank measured directly as a percentage.
    Tank { level: f64 },
    /// Battery measured in units; the percentage is derived from capacity.
    Battery { level: f64, capacity: f64 },
}

impl EnergyStore {
    #[must_use]
    pub const fn full_tank() -> Self {
        Self::Tank { level: ENERGY_MAX }
    }

    #[must_use]
    pub const fn full_battery(capacity: f64) -> Self {
        Self::Battery {
            level: capacity,
            capacity,
        }
    }

    /// Raw level in the store's own units.
    #[must_use]
    pub const fn units(&self) -> f64 {
        match self {
            Self::Tank { level } | Self::Battery { level, .. } => *level,
        }
    }

    #[must_use]
    pub const fn capacity(&self) -> f64 {
        match self {
            Self::Tank { .. } => ENERGY_MAX,
            Self::Battery { capacity, .. } => *capacity,
        }
    }

    /// Energy as a percentage of a full store.
    #[must_use]
    pub fn percent(&self) -> f64 {
        match self {
            Self::Tank { level } => *level,
            Self::Battery { level, capacity } => percent_of(*level, *capacity),
        }
    }

    #[must_use]
    pub fn is_depleted(&self) -> bool {
        self.units() <= 0.0
    }

    /// Add energy in store units, clamped to capacity. Invalid amounts are ignored.
    pub fn add(&mut self, amount: f64) {
        if !is_valid_amount(amount) {
            return;
        }
        self.set_units(self.units() + amount);
    }

    /// Remove energy in store units, clamped at zero. Invalid amounts are ignored.
    pub fn drain(&mut self, amount: f64) {
        if !is_valid_amount(amount) {
            return;
        }
        self.set_units(self.units() - amount);
    }

    fn set_units(&mut self, value: f64) {
        let capacity = self.capacity();
        match self {
            Self::Tank { level } | Self::Battery { level, .. } => {
                *level = clamp_finite(value, 0.0, capacity);
            }
        }
    }

    const fn depleted_refusal(&self) -> Refusal {
        match self {
            Self::Tank { .. } => Refusal::NoFuel,
            Self::Battery { .. } => Refusal::BatteryDepleted,
        }
    }
}

/// State every vehicle carries regardless of variant.
///
/// Serialize-only: vehicles are rebuilt from a roster entry so the
/// constructor checks always run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleCore {
    brand: String,
    model: String,
    energy: EnergyStore,
    running: bool,
    max_speed: f64,
}

impl VehicleCore {
    /// Stopped vehicle with a full fuel tank.
    #[must_use]
    pub fn with_tank(brand: impl Into<String>, model: impl Into<String>, max_speed: f64) -> Self {
        Self::with_store(brand, model, max_speed, EnergyStore::full_tank())
    }

    /// Stopped vehicle with a fully charged battery of `capacity` units.
    #[must_use]
    pub fn with_battery(
        brand: impl Into<String>,
        model: impl Into<String>,
        max_speed: f64,
        capacity: f64,
    ) -> Self {
        Self::with_store(brand, model, max_speed, EnergyStore::full_battery(capacity))
    }

    fn with_store(
        brand: impl Into<String>,
        model: impl Into<String>,
        max_speed: f64,
        energy: EnergyStore,
    ) -> Self {
        Self {
            brand: brand.into(),
            model: model.into(),
            energy,
            running: false,
            max_speed,
        }
    }

    #[must_use]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub const fn energy(&self) -> &EnergyStore {
        &self.energy
    }

    #[must_use]
    pub fn energy_level(&self) -> f64 {
        self.energy.percent()
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub const fn max_speed(&self) -> f64 {
        self.max_speed
    }

    /// Shared start transition: idempotent when running, refused when out of energy.
    ///
    /// # Errors
    ///
    /// Returns [`Refusal::NoFuel`] or [`Refusal::BatteryDepleted`] when the store is empty.
    pub fn ignite(&mut self, how: &'static str) -> Outcome {
        if self.running {
            return Ok(Action::AlreadyRunning);
        }
        if self.energy.is_depleted() {
            return Err(self.energy.depleted_refusal());
        }
        self.running = true;
        Ok(Action::Started { how })
    }

    /// Shared stop transition; a stopped vehicle reports [`Action::AlreadyStopped`].
    ///
    /// # Errors
    ///
    /// Never refuses; the `Result` keeps the contract uniform.
    pub fn shut_down(&mut self, how: &'static str) -> Outcome {
        if !self.running {
            return Ok(Action::AlreadyStopped);
        }
        self.running = false;
        Ok(Action::Stopped { how })
    }

    /// Shared acceleration: checks preconditions, then drains `cost` store units.
    ///
    /// # Errors
    ///
    /// Returns [`Refusal::NotStarted`] when stopped and [`Refusal::SpeedLimitExceeded`]
    /// when `target_speed` is above the limit. Neither mutates state.
    pub fn throttle(&mut self, target_speed: f64, cost: f64, how: &'static str) -> Outcome {
        if !self.running {
            return Err(Refusal::NotStarted);
        }
        if target_speed.is_nan() || target_speed > self.max_speed {
            return Err(Refusal::SpeedLimitExceeded {
                requested: target_speed,
                max: self.max_speed,
            });
        }
        self.energy.drain(cost);
        Ok(Action::Accelerated {
            speed: target_speed,
            how,
        })
    }

    /// Add `amount` store units and report the resulting percentage.
    pub fn replenish(&mut self, amount: f64) -> f64 {
        self.energy.add(amount);
        self.energy_level()
    }
}

/// Read-only snapshot used by status reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleStatus {
    pub vehicle: String,
    pub kind: VehicleKind,
    pub running: bool,
    pub energy_level: f64,
    pub max_speed: f64,
}

/// Capability contract every vehicle variant implements.
///
/// Callers that only hold a `dyn Vehicle` must never need to know which
/// variant they are driving; variant-specific operations are reached through
/// [`Vehicle::variant_mut`].
pub trait Vehicle: fmt::Debug {
    fn core(&self) -> &VehicleCore;

    fn core_mut(&mut self) -> &mut VehicleCore;

    fn type_name(&self) -> &'static str;

    /// # Errors
    ///
    /// Returns a [`Refusal`] when the vehicle has no energy to start with.
    fn start(&mut self) -> Outcome;

    /// # Errors
    ///
    /// Implementations in this crate never refuse to stop.
    fn stop(&mut self) -> Outcome;

    /// Energy needed for `distance` km, in percentage points of a full store.
    fn compute_consumption(&self, distance: f64) -> f64;

    /// # Errors
    ///
    /// Returns a [`Refusal`] when stopped or when `target_speed` exceeds the limit.
    fn accelerate(&mut self, target_speed: f64) -> Outcome;

    fn kind(&self) -> VehicleKind {
        VehicleKind::Other
    }

    fn variant_mut(&mut self) -> VariantMut<'_> {
        VariantMut::Other
    }

    /// Add energy, clamped to a full store.
    ///
    /// # Errors
    ///
    /// The default implementation never refuses.
    fn refuel(&mut self, amount: f64) -> Outcome {
        let level = self.core_mut().replenish(amount);
        log::debug!("{} refueled to {level:.2}%", self.label());
        Ok(Action::Refueled { level })
    }

    fn can_travel(&self, distance: f64) -> bool {
        self.compute_consumption(distance) <= self.energy_level()
    }

    fn energy_level(&self) -> f64 {
        self.core().energy_level()
    }

    fn is_running(&self) -> bool {
        self.core().is_running()
    }

    fn max_speed(&self) -> f64 {
        self.core().max_speed()
    }

    fn brand(&self) -> &str {
        self.core().brand()
    }

    fn model(&self) -> &str {
        self.core().model()
    }

    /// Human-readable identity, e.g. `Car (Toyota Camry)`.
    fn label(&self) -> String {
        format!("{} ({} {})", self.type_name(), self.brand(), self.model())
    }

    fn status(&self) -> VehicleStatus {
        VehicleStatus {
            vehicle: self.label(),
            kind: self.kind(),
            running: self.is_running(),
            energy_level: self.energy_level(),
            max_speed: self.max_speed(),
        }
    }
}

/// Per-100km consumption scaled to `distance`.
pub(crate) fn scaled_consumption(distance: f64, rate: f64) -> f64 {
    (distance / crate::constants::CONSUMPTION_DISTANCE_UNIT) * rate
}
