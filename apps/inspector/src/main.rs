use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Parser;
use client_core::{
    transport::{HttpCheckPersistence, HttpVehicleDirectory},
    CheckFormController, ChecklistConfig, SuccessCallback, NOTE_MAX_LEN,
};
use shared::domain::CheckItemStatus;

mod config;

#[derive(Parser, Debug)]
#[command(about = "Record a vehicle safety inspection")]
struct Args {
    /// Base URL of the check backend; overrides configuration.
    #[arg(long)]
    api_url: Option<String>,
    /// Only print the selectable vehicles and exit.
    #[arg(long)]
    list_vehicles: bool,
    /// Directory id of the inspected vehicle.
    #[arg(long)]
    vehicle: Option<String>,
    /// Odometer reading as entered; the server validates the value.
    #[arg(long)]
    odometer: Option<String>,
    /// Optional inspection note.
    #[arg(long)]
    note: Option<String>,
    /// Comma-separated checklist keys to mark FAIL, e.g. "TYRES,BRAKES".
    #[arg(long, default_value = "")]
    fail: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = config::load_settings();
    if let Some(api_url) = args.api_url {
        settings.api_base_url = api_url;
    }

    let directory = Arc::new(HttpVehicleDirectory::new(settings.api_base_url.clone()));
    let persistence = Arc::new(HttpCheckPersistence::new(settings.api_base_url.clone()));
    let checklist = ChecklistConfig::new(settings.checklist_keys.iter().copied());
    let on_success: SuccessCallback = Arc::new(|| println!("Check recorded."));
    let controller =
        CheckFormController::new_with_dependencies(directory, persistence, checklist, on_success);

    controller.load_vehicles().await;
    if let Some(reason) = controller.vehicle_load_error() {
        return Err(anyhow!("vehicle directory unavailable: {reason}"));
    }

    for vehicle in controller.vehicles() {
        println!(
            "{}  {} - {} {} ({})",
            vehicle.id, vehicle.registration, vehicle.make, vehicle.model, vehicle.year
        );
    }
    if args.list_vehicles {
        return Ok(());
    }

    let vehicle = args
        .vehicle
        .ok_or_else(|| anyhow!("--vehicle is required to submit a check"))?;
    let odometer = args
        .odometer
        .ok_or_else(|| anyhow!("--odometer is required to submit a check"))?;

    controller.select_vehicle(vehicle.as_str());
    controller.set_odometer_text(odometer);
    if let Some(note) = args.note {
        // The input cap lives here in the presentation layer; the server
        // enforces the real bound.
        controller.set_note(note.chars().take(NOTE_MAX_LEN).collect::<String>());
    }
    for key in config::parse_checklist_keys(&args.fail) {
        controller.set_item_status(key, CheckItemStatus::Fail);
    }

    controller.submit().await;

    let draft = controller.draft();
    if !draft.field_errors.is_empty() {
        eprintln!("Validation errors:");
        for line in &draft.field_errors {
            eprintln!("  {line}");
        }
        return Err(anyhow!("check rejected by the server"));
    }
    if let Some(banner) = draft.banner_error {
        return Err(anyhow!(banner));
    }

    Ok(())
}
