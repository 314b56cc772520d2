use anyhow::Result;
use colored::Colorize;
use fleet_core::{MaintenanceRecord, TripAssessment, VehicleReport, VehicleStatus};
use std::io::Write;

use crate::demo::{Step, Transcript};

pub fn generate_json_report(out: &mut dyn Write, transcript: &Transcript) -> Result<()> {
    let json_output = serde_json::to_string_pretty(transcript)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_console_report(out: &mut dyn Write, transcript: &Transcript) -> Result<()> {
    writeln!(out, "{}", "🚗 Fleet Simulation Walkthrough".bright_cyan().bold())?;
    writeln!(out, "{}", "===============================".cyan())?;

    for step in &transcript.steps {
        match step {
            Step::Roster { vehicles } => {
                heading(out, "Fleet Roster")?;
                for vehicle in vehicles {
                    writeln!(out, "Added {vehicle} to fleet.")?;
                }
            }
            Step::Status { vehicles } => {
                heading(out, "Fleet Status")?;
                for status in vehicles {
                    write_status(out, status)?;
                }
            }
            Step::StartAll { reports } => {
                heading(out, "Starting All Vehicles")?;
                write_reports(out, reports)?;
            }
            Step::Acceleration {
                target_speed,
                reports,
            } => {
                heading(out, &format!("Testing Acceleration to {target_speed} km/h"))?;
                write_reports(out, reports)?;
            }
            Step::TripPlan {
                distance,
                assessments,
            } => {
                heading(out, &format!("Planning Trip of {distance} km"))?;
                for assessment in assessments {
                    write_assessment(out, assessment)?;
                }
            }
            Step::Maintenance { records } => {
                heading(out, "Performing Maintenance")?;
                for record in records {
                    write_maintenance(out, record)?;
                }
            }
            Step::Features { reports } => {
                heading(out, "Demonstrating Specific Vehicle Features")?;
                write_reports(out, reports)?;
            }
        }
    }

    writeln!(out)?;
    let refusals = transcript.refusal_count();
    if refusals == 0 {
        writeln!(out, "{}", "Every action succeeded.".green())?;
    } else {
        writeln!(
            out,
            "{}",
            format!("{refusals} action(s) refused; the fleet carried on.").yellow()
        )?;
    }
    Ok(())
}

fn heading(out: &mut dyn Write, title: &str) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", format!("=== {title} ===").bright_yellow().bold())?;
    Ok(())
}

fn write_reports(out: &mut dyn Write, reports: &[VehicleReport]) -> Result<()> {
    for report in reports {
        write_report_line(out, report)?;
    }
    Ok(())
}

fn write_report_line(out: &mut dyn Write, report: &VehicleReport) -> Result<()> {
    if report.succeeded() {
        writeln!(out, "✅ {report}")?;
    } else {
        writeln!(out, "❌ {}", report.to_string().red())?;
    }
    Ok(())
}

fn write_status(out: &mut dyn Write, status: &VehicleStatus) -> Result<()> {
    let state = if status.running {
        "RUNNING".green()
    } else {
        "STOPPED".red()
    };
    writeln!(out, "{}:", status.vehicle.bold())?;
    writeln!(out, "  Status: {state}")?;
    writeln!(out, "  Fuel/Battery: {:.2}%", status.energy_level)?;
    writeln!(out, "  Max Speed: {} km/h", status.max_speed)?;
    Ok(())
}

fn write_assessment(out: &mut dyn Write, assessment: &TripAssessment) -> Result<()> {
    writeln!(out, "{}:", assessment.vehicle.bold())?;
    writeln!(out, "  Fuel needed: {:.2}%", assessment.needed)?;
    writeln!(out, "  Current fuel: {:.2}%", assessment.energy_before)?;
    let verdict = if assessment.can_travel {
        "YES".green()
    } else {
        "NO".red()
    };
    writeln!(out, "  Can make trip: {verdict}")?;
    if let Some(amount) = assessment.refuel_amount {
        writeln!(out, "  Needs refueling: {amount:.2}%")?;
    }
    if let Some(refuel) = &assessment.refuel {
        let report = VehicleReport::new(assessment.vehicle.as_str(), *refuel);
        write!(out, "  ")?;
        write_report_line(out, &report)?;
    }
    Ok(())
}

fn write_maintenance(out: &mut dyn Write, record: &MaintenanceRecord) -> Result<()> {
    write_report_line(out, &VehicleReport::new(record.vehicle.as_str(), record.stop))?;
    write_report_line(
        out,
        &VehicleReport::new(record.vehicle.as_str(), record.refuel),
    )?;
    writeln!(out, "{} maintenance completed.", record.vehicle)?;
    Ok(())
}
