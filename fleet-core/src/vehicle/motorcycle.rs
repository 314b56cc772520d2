use serde::Serialize;

use super::{VariantMut, Vehicle, VehicleCore, VehicleKind, scaled_consumption};
use crate::constants::{
    MOTORCYCLE_ACCELERATION_COST, MOTORCYCLE_CONSUMPTION, MOTORCYCLE_MAX_SPEED,
    MOTORCYCLE_SIDECAR_MULTIPLIER,
};
use crate::outcome::{Action, Outcome, Refusal};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Motorcycle {
    core: VehicleCore,
    sidecar: bool,
}

impl Motorcycle {
    #[must_use]
    pub fn new(brand: impl Into<String>, model: impl Into<String>, sidecar: bool) -> Self {
        Self {
            core: VehicleCore::with_tank(brand, model, MOTORCYCLE_MAX_SPEED),
            sidecar,
        }
    }

    #[must_use]
    pub const fn has_sidecar(&self) -> bool {
        self.sidecar
    }

    /// The sidecar check comes first: a sidecar rig refuses even when running.
    ///
    /// # Errors
    ///
    /// Returns [`Refusal::IncompatibleEquipment`] with a sidecar fitted and
    /// [`Refusal::NotStarted`] while stopped.
    pub fn wheelie(&self) -> Outcome {
        if self.sidecar {
            return Err(Refusal::IncompatibleEquipment);
        }
        if !self.core.is_running() {
            return Err(Refusal::NotStarted);
        }
        log::debug!("{} performing a wheelie", self.label());
        Ok(Action::Wheelie)
    }
}

impl Vehicle for Motorcycle {
    fn core(&self) -> &VehicleCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut VehicleCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        VehicleKind::Motorcycle.label()
    }

    fn kind(&self) -> VehicleKind {
        VehicleKind::Motorcycle
    }

    fn variant_mut(&mut self) -> VariantMut<'_> {
        VariantMut::Motorcycle(self)
    }

    fn start(&mut self) -> Outcome {
        self.core.ignite("with kick-start or electric start")
    }

    fn stop(&mut self) -> Outcome {
        self.core.shut_down("and engine turned off")
    }

    fn compute_consumption(&self, distance: f64) -> f64 {
        let base = scaled_consumption(distance, MOTORCYCLE_CONSUMPTION);
        if self.sidecar {
            base * MOTORCYCLE_SIDECAR_MULTIPLIER
        } else {
            base
        }
    }

    fn accelerate(&mut self, target_speed: f64) -> Outcome {
        self.core.throttle(target_speed, MOTORCYCLE_ACCELERATION_COST, "rapidly")
    }
}
