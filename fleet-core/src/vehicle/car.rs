use serde::Serialize;

use super::{VariantMut, Vehicle, VehicleCore, VehicleKind, scaled_consumption};
use crate::constants::{
    CAR_ACCELERATION_COST, CAR_CONSUMPTION, CAR_LUXURY_MULTIPLIER, CAR_MAX_SPEED,
};
use crate::outcome::{Action, Outcome};

/// Passenger car. Luxury models burn half again as much fuel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Car {
    core: VehicleCore,
    doors: u8,
    luxury: bool,
}

impl Car {
    #[must_use]
    pub fn new(
        brand: impl Into<String>,
        model: impl Into<String>,
        doors: u8,
        luxury: bool,
    ) -> Self {
        Self {
            core: VehicleCore::with_tank(brand, model, CAR_MAX_SPEED),
            doors,
            luxury,
        }
    }

    #[must_use]
    pub const fn doors(&self) -> u8 {
        self.doors
    }

    #[must_use]
    pub const fn is_luxury(&self) -> bool {
        self.luxury
    }

    /// # Errors
    ///
    /// Never refuses.
    pub fn open_trunk(&self) -> Outcome {
        log::debug!("{} trunk opened", self.label());
        Ok(Action::TrunkOpened)
    }
}

impl Vehicle for Car {
    fn core(&self) -> &VehicleCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut VehicleCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        VehicleKind::Car.label()
    }

    fn kind(&self) -> VehicleKind {
        VehicleKind::Car
    }

    fn variant_mut(&mut self) -> VariantMut<'_> {
        VariantMut::Car(self)
    }

    fn start(&mut self) -> Outcome {
        self.core.ignite("with ignition key")
    }

    fn stop(&mut self) -> Outcome {
        self.core.shut_down("and engine turned off")
    }

    fn compute_consumption(&self, distance: f64) -> f64 {
        let base = scaled_consumption(distance, CAR_CONSUMPTION);
        if self.luxury {
            base * CAR_LUXURY_MULTIPLIER
        } else {
            base
        }
    }

    fn accelerate(&mut self, target_speed: f64) -> Outcome {
        self.core.throttle(target_speed, CAR_ACCELERATION_COST, "smoothly")
    }
}
