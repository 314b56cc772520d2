use serde::Serialize;

use super::{VariantMut, Vehicle, VehicleCore, VehicleKind, VehicleSpecError, scaled_consumption};
use crate::constants::{
    TRUCK_ACCELERATION_COST, TRUCK_CONSUMPTION, TRUCK_FULL_LOAD_PENALTY, TRUCK_MAX_SPEED,
};
use crate::numbers::is_valid_amount;
use crate::outcome::{Action, Outcome, Refusal};

/// Cargo truck. Consumption grows linearly with the load factor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Truck {
    core: VehicleCore,
    /// Tons
    cargo_capacity: f64,
    /// Tons, always within `0..=cargo_capacity`
    cargo: f64,
}

impl Truck {
    /// # Errors
    ///
    /// Returns [`VehicleSpecError::NonPositiveCapacity`] when `cargo_capacity`
    /// is zero, negative or not finite.
    pub fn new(
        brand: impl Into<String>,
        model: impl Into<String>,
        cargo_capacity: f64,
    ) -> Result<Self, VehicleSpecError> {
        let cargo_capacity = VehicleSpecError::check_capacity("cargo_capacity", cargo_capacity)?;
        Ok(Self {
            core: VehicleCore::with_tank(brand, model, TRUCK_MAX_SPEED),
            cargo_capacity,
            cargo: 0.0,
        })
    }

    #[must_use]
    pub const fn cargo_capacity(&self) -> f64 {
        self.cargo_capacity
    }

    #[must_use]
    pub const fn cargo(&self) -> f64 {
        self.cargo
    }

    /// Share of capacity currently loaded, in `0.0..=1.0`.
    #[must_use]
    pub fn load_factor(&self) -> f64 {
        self.cargo / self.cargo_capacity
    }

    /// # Errors
    ///
    /// Returns [`Refusal::CapacityExceeded`] if the load would overflow the
    /// truck, or [`Refusal::InvalidAmount`] for negative or non-finite weights.
    pub fn load_cargo(&mut self, weight: f64) -> Outcome {
        if !is_valid_amount(weight) {
            return Err(Refusal::InvalidAmount { amount: weight });
        }
        if self.cargo + weight > self.cargo_capacity {
            log::debug!("{} refused {weight} tons", self.label());
            return Err(Refusal::CapacityExceeded {
                weight,
                cargo: self.cargo,
                capacity: self.cargo_capacity,
            });
        }
        self.cargo += weight;
        Ok(Action::CargoLoaded {
            weight,
            cargo: self.cargo,
            capacity: self.cargo_capacity,
        })
    }

    /// # Errors
    ///
    /// Returns [`Refusal::InsufficientCargo`] if less than `weight` is loaded,
    /// or [`Refusal::InvalidAmount`] for negative or non-finite weights.
    pub fn unload_cargo(&mut self, weight: f64) -> Outcome {
        if !is_valid_amount(weight) {
            return Err(Refusal::InvalidAmount { amount: weight });
        }
        if self.cargo < weight {
            return Err(Refusal::InsufficientCargo {
                weight,
                cargo: self.cargo,
            });
        }
        self.cargo -= weight;
        Ok(Action::CargoUnloaded {
            weight,
            cargo: self.cargo,
            capacity: self.cargo_capacity,
        })
    }
}

impl Vehicle for Truck {
    fn core(&self) -> &VehicleCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut VehicleCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        VehicleKind::Truck.label()
    }

    fn kind(&self) -> VehicleKind {
        VehicleKind::Truck
    }

    fn variant_mut(&mut self) -> VariantMut<'_> {
        VariantMut::Truck(self)
    }

    fn start(&mut self) -> Outcome {
        self.core.ignite("with diesel engine warming up")
    }

    fn stop(&mut self) -> Outcome {
        self.core.shut_down("with air brake system engaged")
    }

    fn compute_consumption(&self, distance: f64) -> f64 {
        let base = scaled_consumption(distance, TRUCK_CONSUMPTION);
        base * self.load_factor().mul_add(TRUCK_FULL_LOAD_PENALTY, 1.0)
    }

    fn accelerate(&mut self, target_speed: f64) -> Outcome {
        self.core.throttle(
            target_speed,
            TRUCK_ACCELERATION_COST,
            "(heavy acceleration due to weight)",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_capacity() {
        assert!(matches!(
            Truck::new("Volvo", "FH16", 0.0),
            Err(VehicleSpecError::NonPositiveCapacity {
                field: "cargo_capacity",
                ..
            })
        ));
        assert!(Truck::new("Volvo", "FH16", -4.0).is_err());
    }

    #[test]
    fn overloading_is_refused_without_mutation() {
        let mut truck = Truck::new("Volvo", "FH16", 40.0).unwrap();
        assert!(truck.load_cargo(15.0).is_ok());
        assert!((truck.cargo() - 15.0).abs() <= f64::EPSILON);

        let refusal = truck.load_cargo(30.0).unwrap_err();
        assert!(matches!(refusal, Refusal::CapacityExceeded { .. }));
        assert!((truck.cargo() - 15.0).abs() <= f64::EPSILON);

        assert!(truck.load_cargo(25.0).is_ok());
        assert!((truck.cargo() - 40.0).abs() <= f64::EPSILON);
    }

    #[test]
    fn load_then_unload_restores_cargo() {
        let mut truck = Truck::new("Scania", "R500", 30.0).unwrap();
        truck.load_cargo(7.5).unwrap();
        let before = truck.cargo();
        truck.load_cargo(12.0).unwrap();
        truck.unload_cargo(12.0).unwrap();
        assert!((truck.cargo() - before).abs() <= f64::EPSILON);
    }

    #[test]
    fn unloading_more_than_loaded_is_refused() {
        let mut truck = Truck::new("Volvo", "FH16", 40.0).unwrap();
        truck.load_cargo(5.0).unwrap();
        assert_eq!(
            truck.unload_cargo(6.0),
            Err(Refusal::InsufficientCargo {
                weight: 6.0,
                cargo: 5.0
            })
        );
        assert!((truck.cargo() - 5.0).abs() <= f64::EPSILON);
        assert!(matches!(
            truck.unload_cargo(-1.0),
            Err(Refusal::InvalidAmount { .. })
        ));
    }

    #[test]
    fn consumption_scales_with_load() {
        let mut truck = Truck::new("Volvo", "FH16", 40.0).unwrap();
        assert!((truck.compute_consumption(100.0) - 25.0).abs() <= 1e-9);
        truck.load_cargo(40.0).unwrap();
        assert!((truck.compute_consumption(100.0) - 45.0).abs() <= 1e-9);
        truck.unload_cargo(20.0).unwrap();
        assert!((truck.compute_consumption(100.0) - 35.0).abs() <= 1e-9);
    }

    #[test]
    fn acceleration_costs_one_point() {
        let mut truck = Truck::new("Volvo", "FH16", 40.0).unwrap();
        truck.start().unwrap();
        assert!(truck.accelerate(150.0).is_err());
        assert!(truck.accelerate(80.0).is_ok());
        assert!((truck.energy_level() - 99.0).abs() <= f64::EPSILON);
    }
}
