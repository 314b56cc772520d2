use serde::Serialize;

use super::{VariantMut, Vehicle, VehicleCore, VehicleKind, VehicleSpecError, scaled_consumption};
use crate::constants::{
    ELECTRIC_ACCELERATION_COST, ELECTRIC_CONSUMPTION, ELECTRIC_MAX_SPEED, ELECTRIC_REGEN_RECOVERY,
};
use crate::outcome::{Action, Outcome, Refusal};

/// Battery-powered car. Energy is tracked in battery units and reported as a percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElectricCar {
    core: VehicleCore,
}

impl ElectricCar {
    /// # Errors
    ///
    /// Returns [`VehicleSpecError::NonPositiveCapacity`] when `battery_capacity`
    /// is zero, negative or not finite.
    pub fn new(
        brand: impl Into<String>,
        model: impl Into<String>,
        battery_capacity: f64,
    ) -> Result<Self, VehicleSpecError> {
        let capacity = VehicleSpecError::check_capacity("battery_capacity", battery_capacity)?;
        Ok(Self {
            core: VehicleCore::with_battery(brand, model, ELECTRIC_MAX_SPEED, capacity),
        })
    }

    #[must_use]
    pub const fn battery_level(&self) -> f64 {
        self.core.energy().units()
    }

    #[must_use]
    pub const fn battery_capacity(&self) -> f64 {
        self.core.energy().capacity()
    }

    /// # Errors
    ///
    /// Returns [`Refusal::NotStarted`] while stopped.
    pub fn enable_autopilot(&self) -> Outcome {
        if !self.core.is_running() {
            return Err(Refusal::NotStarted);
        }
        log::debug!("{} autopilot engaged", self.label());
        Ok(Action::AutopilotEngaged)
    }
}

impl Vehicle for ElectricCar {
    fn core(&self) -> &VehicleCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut VehicleCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        VehicleKind::ElectricCar.label()
    }

    fn kind(&self) -> VehicleKind {
        VehicleKind::ElectricCar
    }

    fn variant_mut(&mut self) -> VariantMut<'_> {
        VariantMut::ElectricCar(self)
    }

    fn start(&mut self) -> Outcome {
        self.core.ignite("silently (electric motor)")
    }

    fn stop(&mut self) -> Outcome {
        let outcome = self.core.shut_down("(regenerative braking engaged)");
        if matches!(outcome, Ok(Action::Stopped { .. })) {
            self.core.replenish(ELECTRIC_REGEN_RECOVERY);
        }
        outcome
    }

    fn compute_consumption(&self, distance: f64) -> f64 {
        scaled_consumption(distance, ELECTRIC_CONSUMPTION)
    }

    fn accelerate(&mut self, target_speed: f64) -> Outcome {
        self.core.throttle(
            target_speed,
            ELECTRIC_ACCELERATION_COST,
            "instantly (electric torque)",
        )
    }

    /// Charging: `amount` is in battery units, not percentage points.
    fn refuel(&mut self, amount: f64) -> Outcome {
        let level = self.core.replenish(amount);
        log::debug!("{} charged to {level:.1}%", self.label());
        Ok(Action::Charged { level })
    }
}
