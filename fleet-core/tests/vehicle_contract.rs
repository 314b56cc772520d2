use fleet_core::{
    Action, Car, ElectricCar, Fleet, Motorcycle, Outcome, Refusal, Roster, RosterError, Truck,
    VariantMut, Vehicle, VehicleCore, VehicleKind,
};
use std::cell::RefCell;
use std::rc::Rc;

const DISTANCES: [f64; 6] = [0.0, 50.0, 100.0, 480.0, 500.0, 1_250.0];

fn every_variant() -> Vec<Box<dyn Vehicle>> {
    vec![
        Box::new(Car::new("Toyota", "Camry", 4, false)),
        Box::new(Car::new("BMW", "7 Series", 4, true)),
        Box::new(Truck::new("Volvo", "FH16", 40.0).unwrap()),
        Box::new(Motorcycle::new("Ural", "Gear Up", true)),
        Box::new(ElectricCar::new("Nissan", "Leaf", 40.0).unwrap()),
    ]
}

/// A variant defined outside the crate; the fleet must drive it unchanged.
#[derive(Debug)]
struct Scooter {
    core: VehicleCore,
    refuels: Rc<RefCell<Vec<f64>>>,
}

impl Scooter {
    fn new(refuels: Rc<RefCell<Vec<f64>>>) -> Self {
        Self {
            core: VehicleCore::with_tank("Vespa", "Primavera", 90.0),
            refuels,
        }
    }
}

impl Vehicle for Scooter {
    fn core(&self) -> &VehicleCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut VehicleCore {
        &mut self.core
    }

    fn type_name(&self) -> &'static str {
        "Scooter"
    }

    fn start(&mut self) -> Outcome {
        self.core.ignite("with a push button")
    }

    fn stop(&mut self) -> Outcome {
        self.core.shut_down("on the kickstand")
    }

    fn compute_consumption(&self, distance: f64) -> f64 {
        distance / 100.0 * 50.0
    }

    fn accelerate(&mut self, target_speed: f64) -> Outcome {
        self.core.throttle(target_speed, 0.1, "gently")
    }

    fn refuel(&mut self, amount: f64) -> Outcome {
        self.refuels.borrow_mut().push(amount);
        let level = self.core.replenish(amount);
        Ok(Action::Refueled { level })
    }
}

#[test]
fn can_travel_matches_consumption_for_every_variant() {
    for mut vehicle in every_variant() {
        if let VariantMut::Truck(truck) = vehicle.variant_mut() {
            truck.load_cargo(22.0).unwrap();
        }
        vehicle.start().unwrap();
        vehicle.accelerate(90.0).unwrap();
        for distance in DISTANCES {
            assert_eq!(
                vehicle.can_travel(distance),
                vehicle.compute_consumption(distance) <= vehicle.energy_level(),
                "{} at {distance} km",
                vehicle.label()
            );
        }
    }
}

#[test]
fn refuel_adds_and_caps_for_tank_vehicles() {
    let mut car = Car::new("Toyota", "Camry", 4, false);
    car.start().unwrap();
    for _ in 0..10 {
        car.accelerate(120.0).unwrap();
    }
    let before = car.energy_level();
    car.refuel(2.0).unwrap();
    assert!((car.energy_level() - (before + 2.0).min(100.0)).abs() <= 1e-9);
    car.refuel(50.0).unwrap();
    assert!((car.energy_level() - 100.0).abs() <= f64::EPSILON);
}

#[test]
fn electric_refuel_works_in_battery_units() {
    let mut leaf = ElectricCar::new("Nissan", "Leaf", 40.0).unwrap();
    leaf.start().unwrap();
    for _ in 0..4 {
        leaf.accelerate(100.0).unwrap();
    }
    assert!((leaf.battery_level() - 32.0).abs() <= 1e-9);
    leaf.refuel(4.0).unwrap();
    assert!((leaf.battery_level() - 36.0).abs() <= 1e-9);
    assert!((leaf.energy_level() - 90.0).abs() <= 1e-9);
    leaf.refuel(10.0).unwrap();
    assert!((leaf.battery_level() - 40.0).abs() <= 1e-9);
    assert!((leaf.energy_level() - 100.0).abs() <= 1e-9);
}

#[test]
fn failed_acceleration_never_mutates() {
    for mut vehicle in every_variant() {
        let stopped_energy = vehicle.energy_level();
        assert_eq!(vehicle.accelerate(10.0), Err(Refusal::NotStarted));
        assert!(!vehicle.is_running());
        assert!((vehicle.energy_level() - stopped_energy).abs() <= f64::EPSILON);

        vehicle.start().unwrap();
        let over = vehicle.max_speed() + 1.0;
        assert!(matches!(
            vehicle.accelerate(over),
            Err(Refusal::SpeedLimitExceeded { .. })
        ));
        assert!(vehicle.is_running());
        assert!((vehicle.energy_level() - stopped_energy).abs() <= f64::EPSILON);
    }
}

#[test]
fn depleted_vehicle_cannot_start() {
    let mut bike = Motorcycle::new("Harley-Davidson", "Street Glide", false);
    bike.start().unwrap();
    for _ in 0..400 {
        let _ = bike.accelerate(100.0);
    }
    assert!(bike.energy_level().abs() <= f64::EPSILON);
    bike.stop().unwrap();
    assert_eq!(bike.start(), Err(Refusal::NoFuel));
    assert!(!bike.is_running());

    let mut leaf = ElectricCar::new("Nissan", "Leaf", 4.0).unwrap();
    leaf.start().unwrap();
    leaf.accelerate(50.0).unwrap();
    leaf.accelerate(50.0).unwrap();
    assert!(leaf.battery_level().abs() <= f64::EPSILON);
    // Regenerative braking leaves a single unit behind.
    leaf.stop().unwrap();
    assert!((leaf.battery_level() - 1.0).abs() <= f64::EPSILON);
    assert!(leaf.start().is_ok());
}

#[test]
fn reference_vehicles_behave_as_documented() {
    let mut camry = Car::new("Toyota", "Camry", 4, false);
    assert!((camry.max_speed() - 180.0).abs() <= f64::EPSILON);
    assert!((camry.energy_level() - 100.0).abs() <= f64::EPSILON);
    assert!(!camry.is_running());
    camry.start().unwrap();
    assert!((camry.compute_consumption(100.0) - 8.0).abs() <= f64::EPSILON);
    assert!(camry.can_travel(100.0));

    let mut volvo = Truck::new("Volvo", "FH16", 40.0).unwrap();
    assert!(volvo.load_cargo(15.0).is_ok());
    assert!(matches!(
        volvo.load_cargo(30.0),
        Err(Refusal::CapacityExceeded { .. })
    ));
    assert!((volvo.cargo() - 15.0).abs() <= f64::EPSILON);

    let mut tesla = ElectricCar::new("Tesla", "Model S", 100.0).unwrap();
    assert!((tesla.compute_consumption(100.0) - 20.0).abs() <= f64::EPSILON);
    tesla.start().unwrap();
    tesla.accelerate(100.0).unwrap();
    assert!((tesla.battery_level() - 98.0).abs() <= f64::EPSILON);
    assert!((tesla.energy_level() - 98.0).abs() <= f64::EPSILON);

    let mut ural = Motorcycle::new("Ural", "Gear Up", true);
    ural.start().unwrap();
    let before = ural.clone();
    assert_eq!(ural.wheelie(), Err(Refusal::IncompatibleEquipment));
    assert_eq!(ural, before);
}

#[test]
fn fleet_drives_foreign_variants_and_refuels_once_per_shortfall() {
    let refuels = Rc::new(RefCell::new(Vec::new()));
    let mut fleet = Fleet::new();
    fleet.add_vehicle(Box::new(Car::new("Toyota", "Camry", 4, false)));
    fleet.add_vehicle(Box::new(Scooter::new(Rc::clone(&refuels))));

    assert_eq!(fleet.get(1).map(Vehicle::kind), Some(VehicleKind::Other));
    assert!(matches!(
        fleet.get_mut(1).map(Vehicle::variant_mut),
        Some(VariantMut::Other)
    ));

    let started = fleet.start_all();
    assert!(started.iter().all(|r| r.succeeded()));
    assert_eq!(
        started[1].outcome,
        Ok(Action::Started {
            how: "with a push button"
        })
    );

    let trip = fleet.plan_trip(500.0);
    assert!(trip[0].can_travel);
    assert!(!trip[1].can_travel);

    let calls = refuels.borrow();
    assert_eq!(calls.len(), 1);
    assert!((calls[0] - (250.0 - 100.0 + 10.0)).abs() <= 1e-9);
}

#[test]
fn built_in_roster_runs_full_lifecycle() {
    let mut fleet = Roster::load_from_static().build_fleet().unwrap();
    fleet.start_all();
    fleet.test_acceleration(80.0);
    fleet.plan_trip(500.0);
    let high = fleet.test_acceleration(150.0);
    assert_eq!(high.iter().filter(|r| !r.succeeded()).count(), 1);
    let records = fleet.perform_maintenance();
    assert!(records.iter().all(|r| (r.energy_after - 100.0).abs() <= 1e-9));
    let status = fleet.show_status();
    assert!(status.iter().all(|s| !s.running));

    let Some(VariantMut::Truck(truck)) = fleet.get_mut(2).map(Vehicle::variant_mut) else {
        panic!("expected the truck at index 2");
    };
    truck.load_cargo(15.0).unwrap();
    assert!(truck.load_cargo(30.0).is_err());
    assert!(truck.unload_cargo(15.0).is_ok());
    assert!(truck.cargo().abs() <= f64::EPSILON);
}

#[test]
fn snapshots_serialize_but_rebuild_only_through_checked_roster() {
    let mut truck = Truck::new("Volvo", "FH16", 40.0).unwrap();
    truck.load_cargo(15.0).unwrap();
    let snapshot = serde_json::to_value(&truck).unwrap();
    assert_eq!(snapshot["cargo_capacity"], 40.0);
    assert_eq!(snapshot["cargo"], 15.0);
    assert_eq!(snapshot["core"]["energy"]["store"], "tank");

    let tesla = ElectricCar::new("Tesla", "Model S", 100.0).unwrap();
    let snapshot = serde_json::to_value(&tesla).unwrap();
    assert_eq!(snapshot["core"]["energy"]["store"], "battery");

    // A zero-capacity truck described in JSON never becomes a vehicle.
    let json = r#"{"vehicles": [
        {"kind": "truck", "brand": "Volvo", "model": "FH16", "cargo_capacity": 0.0}
    ]}"#;
    let roster = Roster::from_json(json).unwrap();
    assert!(matches!(
        roster.build_fleet(),
        Err(RosterError::InvalidVehicle { index: 0, .. })
    ));
}
