//! Fleet manager: owns the vehicles and drives them through the shared contract only.
use serde::Serialize;

use crate::constants::{ENERGY_MAX, TRIP_REFUEL_BUFFER};
use crate::outcome::{Outcome, VehicleReport};
use crate::vehicle::{Vehicle, VehicleStatus};

/// Per-vehicle result of [`Fleet::plan_trip`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripAssessment {
    pub vehicle: String,
    /// Energy the trip needs, in percentage points.
    pub needed: f64,
    pub energy_before: f64,
    pub can_travel: bool,
    /// Amount handed to `refuel` when the vehicle could not make the trip.
    pub refuel_amount: Option<f64>,
    pub refuel: Option<Outcome>,
    pub energy_after: f64,
}

/// Per-vehicle result of [`Fleet::perform_maintenance`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceRecord {
    pub vehicle: String,
    pub stop: Outcome,
    pub refuel_amount: f64,
    pub refuel: Outcome,
    pub energy_after: f64,
}

/// Ordered collection of vehicles, in insertion order.
#[derive(Debug, Default)]
pub struct Fleet {
    vehicles: Vec<Box<dyn Vehicle>>,
}

impl Fleet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vehicle and return its position.
    pub fn add_vehicle(&mut self, vehicle: Box<dyn Vehicle>) -> usize {
        log::info!("Added {} to fleet", vehicle.label());
        self.vehicles.push(vehicle);
        self.vehicles.len() - 1
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(dyn Vehicle + 'static)> {
        self.vehicles.iter().map(|vehicle| &**vehicle)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&(dyn Vehicle + 'static)> {
        self.vehicles.get(index).map(|vehicle| &**vehicle)
    }

    /// Mutable access for collaborators that need [`Vehicle::variant_mut`].
    pub fn get_mut(&mut self, index: usize) -> Option<&mut (dyn Vehicle + 'static)> {
        self.vehicles.get_mut(index).map(|vehicle| &mut **vehicle)
    }

    pub fn start_all(&mut self) -> Vec<VehicleReport> {
        log::info!("Starting all {} vehicles", self.len());
        self.for_each_vehicle(|vehicle| vehicle.start())
    }

    pub fn stop_all(&mut self) -> Vec<VehicleReport> {
        log::info!("Stopping all {} vehicles", self.len());
        self.for_each_vehicle(|vehicle| vehicle.stop())
    }

    pub fn test_acceleration(&mut self, target_speed: f64) -> Vec<VehicleReport> {
        log::info!("Testing acceleration to {target_speed} km/h");
        self.for_each_vehicle(|vehicle| vehicle.accelerate(target_speed))
    }

    /// Check every vehicle against `distance` km; any that fall short are refueled
    /// once with the shortfall plus [`TRIP_REFUEL_BUFFER`].
    pub fn plan_trip(&mut self, distance: f64) -> Vec<TripAssessment> {
        log::info!("Planning trip of {distance} km");
        self.vehicles
            .iter_mut()
            .map(|vehicle| {
                let needed = vehicle.compute_consumption(distance);
                let energy_before = vehicle.energy_level();
                let can_travel = vehicle.can_travel(distance);
                let (refuel_amount, refuel) = if can_travel {
                    (None, None)
                } else {
                    let amount = needed - energy_before + TRIP_REFUEL_BUFFER;
                    log::debug!("{} needs {amount:.2} more for the trip", vehicle.label());
                    (Some(amount), Some(vehicle.refuel(amount)))
                };
                TripAssessment {
                    vehicle: vehicle.label(),
                    needed,
                    energy_before,
                    can_travel,
                    refuel_amount,
                    refuel,
                    energy_after: vehicle.energy_level(),
                }
            })
            .collect()
    }

    /// Stop every vehicle, then top it up to a full store.
    pub fn perform_maintenance(&mut self) -> Vec<MaintenanceRecord> {
        log::info!("Performing maintenance on {} vehicles", self.len());
        self.vehicles
            .iter_mut()
            .map(|vehicle| {
                let stop = vehicle.stop();
                let refuel_amount = ENERGY_MAX - vehicle.energy_level();
                let refuel = vehicle.refuel(refuel_amount);
                MaintenanceRecord {
                    vehicle: vehicle.label(),
                    stop,
                    refuel_amount,
                    refuel,
                    energy_after: vehicle.energy_level(),
                }
            })
            .collect()
    }

    #[must_use]
    pub fn show_status(&self) -> Vec<VehicleStatus> {
        self.iter().map(Vehicle::status).collect()
    }

    fn for_each_vehicle<F>(&mut self, mut action: F) -> Vec<VehicleReport>
    where
        F: FnMut(&mut (dyn Vehicle + 'static)) -> Outcome,
    {
        self.vehicles
            .iter_mut()
            .map(|vehicle| {
                let outcome = action(&mut **vehicle);
                if let Err(refusal) = &outcome {
                    log::warn!("{}: {refusal}", vehicle.label());
                }
                VehicleReport::new(vehicle.label(), outcome)
            })
            .collect()
    }
}

impl FromIterator<Box<dyn Vehicle>> for Fleet {
    fn from_iter<I: IntoIterator<Item = Box<dyn Vehicle>>>(iter: I) -> Self {
        let mut fleet = Self::new();
        for vehicle in iter {
            fleet.add_vehicle(vehicle);
        }
        fleet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::{Action, Refusal};
    use crate::vehicle::{Car, ElectricCar, Motorcycle, Truck, VariantMut, VehicleKind};

    fn demo_fleet() -> Fleet {
        let mut fleet = Fleet::new();
        fleet.add_vehicle(Box::new(Car::new("Toyota", "Camry", 4, false)));
        fleet.add_vehicle(Box::new(Car::new("BMW", "7 Series", 4, true)));
        fleet.add_vehicle(Box::new(Truck::new("Volvo", "FH16", 40.0).unwrap()));
        fleet.add_vehicle(Box::new(Motorcycle::new(
            "Harley-Davidson",
            "Street Glide",
            false,
        )));
        fleet.add_vehicle(Box::new(ElectricCar::new("Tesla", "Model S", 100.0).unwrap()));
        fleet
    }

    #[test]
    fn add_vehicle_preserves_insertion_order() {
        let fleet = demo_fleet();
        assert_eq!(fleet.len(), 5);
        let kinds: Vec<VehicleKind> = fleet.iter().map(Vehicle::kind).collect();
        assert_eq!(
            kinds,
            vec![
                VehicleKind::Car,
                VehicleKind::Car,
                VehicleKind::Truck,
                VehicleKind::Motorcycle,
                VehicleKind::ElectricCar,
            ]
        );
    }

    #[test]
    fn collects_boxed_vehicles_in_order() {
        let vehicles: Vec<Box<dyn Vehicle>> = vec![
            Box::new(Motorcycle::new("Ural", "Gear Up", true)),
            Box::new(Car::new("Fiat", "Panda", 5, false)),
        ];
        let fleet: Fleet = vehicles.into_iter().collect();
        assert_eq!(fleet.len(), 2);
        assert_eq!(fleet.get(0).map(Vehicle::kind), Some(VehicleKind::Motorcycle));
        assert_eq!(fleet.get(1).map(Vehicle::label).as_deref(), Some("Car (Fiat Panda)"));
    }

    #[test]
    fn start_and_stop_all_report_every_vehicle() {
        let mut fleet = demo_fleet();
        let started = fleet.start_all();
        assert_eq!(started.len(), 5);
        assert!(started.iter().all(VehicleReport::succeeded));
        assert!(fleet.iter().all(Vehicle::is_running));

        let again = fleet.start_all();
        assert!(again.iter().all(|r| r.outcome == Ok(Action::AlreadyRunning)));

        let stopped = fleet.stop_all();
        assert!(stopped.iter().all(|r| matches!(r.outcome, Ok(Action::Stopped { .. }))));
        assert!(fleet.iter().all(|v| !v.is_running()));
    }

    #[test]
    fn acceleration_continues_past_refusals() {
        let mut fleet = demo_fleet();
        fleet.start_all();
        let reports = fleet.test_acceleration(150.0);
        let refused: Vec<&str> = reports
            .iter()
            .filter(|r| !r.succeeded())
            .map(|r| r.vehicle.as_str())
            .collect();
        assert_eq!(refused, vec!["Truck (Volvo FH16)"]);
        assert!((fleet.get(4).unwrap().energy_level() - 98.0).abs() <= f64::EPSILON);
        assert!((fleet.get(2).unwrap().energy_level() - 100.0).abs() <= f64::EPSILON);
    }

    #[test]
    fn acceleration_on_stopped_fleet_is_refused_everywhere() {
        let mut fleet = demo_fleet();
        let reports = fleet.test_acceleration(50.0);
        assert!(reports.iter().all(|r| r.outcome == Err(Refusal::NotStarted)));
        assert!(fleet.iter().all(|v| (v.energy_level() - 100.0).abs() <= f64::EPSILON));
    }

    #[test]
    fn plan_trip_refuels_only_vehicles_that_fall_short() {
        let mut fleet = demo_fleet();
        fleet.start_all();
        fleet.test_acceleration(80.0);
        let trip = fleet.plan_trip(500.0);

        let camry = &trip[0];
        assert!(camry.can_travel);
        assert!(camry.refuel.is_none());
        assert!((camry.energy_after - 99.5).abs() <= f64::EPSILON);

        let truck = &trip[2];
        assert!(!truck.can_travel);
        assert!((truck.needed - 125.0).abs() <= 1e-9);
        let amount = truck.refuel_amount.unwrap();
        assert!((amount - (125.0 - 99.0 + 10.0)).abs() <= 1e-9);
        assert!((truck.energy_after - 100.0).abs() <= f64::EPSILON);

        let tesla = &trip[4];
        assert!(!tesla.can_travel);
        assert!((tesla.needed - 100.0).abs() <= 1e-9);
        assert!((tesla.energy_before - 98.0).abs() <= f64::EPSILON);
        assert!((tesla.refuel_amount.unwrap() - 12.0).abs() <= 1e-9);
        assert_eq!(tesla.refuel, Some(Ok(Action::Charged { level: 100.0 })));

        let refuels = trip.iter().filter(|a| a.refuel.is_some()).count();
        assert_eq!(refuels, 2);
    }

    #[test]
    fn maintenance_stops_then_fills_every_vehicle() {
        let mut fleet = demo_fleet();
        fleet.start_all();
        fleet.test_acceleration(100.0);
        let records = fleet.perform_maintenance();
        assert_eq!(records.len(), 5);
        for record in &records {
            assert!(matches!(record.stop, Ok(Action::Stopped { .. })));
            assert!((record.energy_after - 100.0).abs() <= 1e-9);
        }
        assert!(fleet.iter().all(|v| !v.is_running()));

        let idle = fleet.perform_maintenance();
        assert!(idle.iter().all(|r| r.stop == Ok(Action::AlreadyStopped)));
    }

    #[test]
    fn status_is_read_only_snapshot() {
        let mut fleet = demo_fleet();
        fleet.start_all();
        let status = fleet.show_status();
        assert_eq!(status.len(), 5);
        assert_eq!(status[3].vehicle, "Motorcycle (Harley-Davidson Street Glide)");
        assert!(status.iter().all(|s| s.running));
        assert!((status[2].max_speed - 120.0).abs() <= f64::EPSILON);
        assert_eq!(fleet.show_status(), status);
    }

    #[test]
    fn variant_handles_reach_specific_operations() {
        let mut fleet = demo_fleet();
        let Some(vehicle) = fleet.get_mut(2) else {
            panic!("truck missing");
        };
        let VariantMut::Truck(truck) = vehicle.variant_mut() else {
            panic!("expected a truck handle");
        };
        truck.load_cargo(20.0).unwrap();
        let consumption = fleet.get(2).unwrap().compute_consumption(100.0);
        assert!((consumption - 35.0).abs() <= 1e-9);
    }
}
