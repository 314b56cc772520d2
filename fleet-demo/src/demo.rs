//! The scripted walkthrough: batch operations first, then each variant's own trick.
use std::collections::HashSet;

use fleet_core::{
    Fleet, MaintenanceRecord, TripAssessment, VariantMut, Vehicle, VehicleKind, VehicleReport,
    VehicleStatus,
};
use serde::{Deserialize, Serialize};

/// Tunable numbers for the walkthrough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoScript {
    #[serde(default = "DemoScript::default_cruise_speed")]
    pub cruise_speed: f64,
    #[serde(default = "DemoScript::default_high_speed")]
    pub high_speed: f64,
    #[serde(default = "DemoScript::default_trip_distance")]
    pub trip_distance: f64,
    /// Loads attempted on the first truck, in order.
    #[serde(default = "DemoScript::default_cargo_loads")]
    pub cargo_loads: Vec<f64>,
}

impl Default for DemoScript {
    fn default() -> Self {
        Self {
            cruise_speed: Self::default_cruise_speed(),
            high_speed: Self::default_high_speed(),
            trip_distance: Self::default_trip_distance(),
            cargo_loads: Self::default_cargo_loads(),
        }
    }
}

/// One section of the walkthrough, in the order it ran.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    Roster { vehicles: Vec<String> },
    Status { vehicles: Vec<VehicleStatus> },
    StartAll { reports: Vec<VehicleReport> },
    Acceleration {
        target_speed: f64,
        reports: Vec<VehicleReport>,
    },
    TripPlan {
        distance: f64,
        assessments: Vec<TripAssessment>,
    },
    Maintenance { records: Vec<MaintenanceRecord> },
    Features { reports: Vec<VehicleReport> },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Transcript {
    pub steps: Vec<Step>,
}

impl Transcript {
    /// Number of refused actions across every step.
    #[must_use]
    pub fn refusal_count(&self) -> usize {
        self.steps
            .iter()
            .map(|step| match step {
                Step::StartAll { reports }
                | Step::Acceleration { reports, .. }
                | Step::Features { reports } => reports.iter().filter(|r| !r.succeeded()).count(),
                Step::Maintenance { records } => records
                    .iter()
                    .filter(|r| r.stop.is_err() || r.refuel.is_err())
                    .count(),
                Step::TripPlan { assessments, .. } => assessments
                    .iter()
                    .filter(|a| matches!(a.refuel, Some(Err(_))))
                    .count(),
                Step::Roster { .. } | Step::Status { .. } => 0,
            })
            .sum()
    }
}

impl DemoScript {
    const fn default_cruise_speed() -> f64 {
        80.0
    }

    const fn default_high_speed() -> f64 {
        150.0
    }

    const fn default_trip_distance() -> f64 {
        500.0
    }

    fn default_cargo_loads() -> Vec<f64> {
        vec![15.0, 30.0]
    }

    /// Drive `fleet` through the full walkthrough and record every outcome.
    pub fn run(&self, fleet: &mut Fleet) -> Transcript {
        let mut steps = vec![
            Step::Roster {
                vehicles: fleet.iter().map(Vehicle::label).collect(),
            },
            Step::Status {
                vehicles: fleet.show_status(),
            },
            Step::StartAll {
                reports: fleet.start_all(),
            },
            Step::Acceleration {
                target_speed: self.cruise_speed,
                reports: fleet.test_acceleration(self.cruise_speed),
            },
            Step::TripPlan {
                distance: self.trip_distance,
                assessments: fleet.plan_trip(self.trip_distance),
            },
            Step::Acceleration {
                target_speed: self.high_speed,
                reports: fleet.test_acceleration(self.high_speed),
            },
            Step::Maintenance {
                records: fleet.perform_maintenance(),
            },
            Step::Status {
                vehicles: fleet.show_status(),
            },
        ];
        steps.push(Step::Features {
            reports: self.show_features(fleet),
        });
        log::info!("Walkthrough finished with {} steps", steps.len());
        Transcript { steps }
    }

    /// Exercise the unique operation of the first vehicle of each variant.
    fn show_features(&self, fleet: &mut Fleet) -> Vec<VehicleReport> {
        let mut seen: HashSet<VehicleKind> = HashSet::new();
        let mut reports = Vec::new();
        for index in 0..fleet.len() {
            let Some(vehicle) = fleet.get_mut(index) else {
                continue;
            };
            if !seen.insert(vehicle.kind()) {
                continue;
            }
            let label = vehicle.label();
            match vehicle.variant_mut() {
                VariantMut::Car(car) => reports.push(VehicleReport::new(&label, car.open_trunk())),
                VariantMut::Truck(truck) => {
                    for weight in &self.cargo_loads {
                        reports.push(VehicleReport::new(&label, truck.load_cargo(*weight)));
                    }
                }
                VariantMut::Motorcycle(bike) => {
                    reports.push(VehicleReport::new(&label, bike.wheelie()));
                }
                VariantMut::ElectricCar(electric) => {
                    reports.push(VehicleReport::new(&label, electric.enable_autopilot()));
                }
                _ => log::debug!("{label} has no special feature to show"),
            }
        }
        reports
    }
}
