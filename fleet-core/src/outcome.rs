//! Reported results of single vehicle actions.
//!
//! Nothing in the simulation aborts on a failed action. Every operation
//! hands back an [`Outcome`] and the caller decides what to do with it.
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A state change (or deliberate non-change) performed by a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Started { how: &'static str },
    AlreadyRunning,
    Stopped { how: &'static str },
    AlreadyStopped,
    Accelerated { speed: f64, how: &'static str },
    /// Tank topped up; `level` is the resulting energy percentage.
    Refueled { level: f64 },
    /// Battery charged; `level` is the resulting energy percentage.
    Charged { level: f64 },
    TrunkOpened,
    CargoLoaded { weight: f64, cargo: f64, capacity: f64 },
    CargoUnloaded { weight: f64, cargo: f64, capacity: f64 },
    Wheelie,
    AutopilotEngaged,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started { how } => write!(f, "started {how}"),
            Self::AlreadyRunning => f.write_str("is already running"),
            Self::Stopped { how } => write!(f, "stopped {how}"),
            Self::AlreadyStopped => f.write_str("is already stopped"),
            Self::Accelerated { speed, how } => write!(f, "accelerating to {speed} km/h {how}"),
            Self::Refueled { level } => write!(f, "refueled, fuel level {level:.2}%"),
            Self::Charged { level } => write!(f, "charged, battery level {level:.1}%"),
            Self::TrunkOpened => f.write_str("trunk opened"),
            Self::CargoLoaded {
                weight,
                cargo,
                capacity,
            } => write!(f, "loaded {weight} tons, cargo {cargo}/{capacity} tons"),
            Self::CargoUnloaded {
                weight,
                cargo,
                capacity,
            } => write!(f, "unloaded {weight} tons, cargo {cargo}/{capacity} tons"),
            Self::Wheelie => f.write_str("performing a wheelie"),
            Self::AutopilotEngaged => f.write_str("autopilot engaged"),
        }
    }
}

/// Why a vehicle declined an action. Refusals never mutate state.
#[derive(Debug, Clone, Copy, PartialEq, Error, Serialize)]
#[serde(tag = "refusal", rename_all = "snake_case")]
pub enum Refusal {
    #[error("cannot start - no fuel")]
    NoFuel,
    #[error("cannot start - battery depleted")]
    BatteryDepleted,
    #[error("must be started first")]
    NotStarted,
    #[error("cannot exceed maximum speed of {max} km/h (requested {requested} km/h)")]
    SpeedLimitExceeded { requested: f64, max: f64 },
    #[error("cannot load {weight} tons, exceeds capacity ({cargo}/{capacity} tons loaded)")]
    CapacityExceeded {
        weight: f64,
        cargo: f64,
        capacity: f64,
    },
    #[error("cannot unload {weight} tons, only {cargo} tons loaded")]
    InsufficientCargo { weight: f64, cargo: f64 },
    #[error("cannot perform wheelie with sidecar")]
    IncompatibleEquipment,
    #[error("amount must be a finite, non-negative number (got {amount})")]
    InvalidAmount { amount: f64 },
}

pub type Outcome = Result<Action, Refusal>;

/// One vehicle's outcome within a batch operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleReport {
    pub vehicle: String,
    pub outcome: Outcome,
}

impl VehicleReport {
    #[must_use]
    pub fn new(vehicle: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            vehicle: vehicle.into(),
            outcome,
        }
    }

    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }
}

impl fmt::Display for VehicleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Ok(action) => write!(f, "{} {action}", self.vehicle),
            Err(refusal) => write!(f, "{} {refusal}", self.vehicle),
        }
    }
}
