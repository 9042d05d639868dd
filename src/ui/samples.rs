//! Sample records behind the "Add Sample" buttons.

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::models::{FolderInput, NewCar};

fn car(name: &str, engine: &str, hp: i64, features: [&str; 3]) -> NewCar {
    NewCar {
        name: name.to_string(),
        year: 2023,
        engine: engine.to_string(),
        hp,
        features: features.iter().map(|f| f.to_string()).collect(),
    }
}

/// The three cars "Add Sample Car" picks from.
pub static SAMPLE_CARS: Lazy<Vec<NewCar>> = Lazy::new(|| {
    vec![
        car(
            "Tesla Model S",
            "Electric",
            1020,
            ["Autopilot", "Ludicrous Mode", "Glass Roof"],
        ),
        car(
            "Porsche 911 Turbo S",
            "3.7L Twin-Turbo Flat-6",
            640,
            ["AWD", "Active Aero", "Sport Exhaust"],
        ),
        car(
            "Ferrari SF90 Stradale",
            "4.0L Twin-Turbo V8 + 3 Electric Motors",
            986,
            ["Hybrid", "AWD", "E-Diff"],
        ),
    ]
});

/// Sample car for any choice; out-of-range choices wrap around.
pub fn sample_car(choice: usize) -> NewCar {
    SAMPLE_CARS[choice % SAMPLE_CARS.len()].clone()
}

/// A pseudo-random choice for the server-side button.
pub fn random_choice() -> usize {
    chrono::Utc::now().timestamp_subsec_nanos() as usize % SAMPLE_CARS.len()
}

/// The folder added when `existing` folders are already shown.
pub fn sample_folder(existing: usize) -> FolderInput {
    let n = existing + 1;
    FolderInput {
        name: Some(format!("Folder {}", n)),
        url: Some(format!("https://example.com/folder-{}", n)),
        is_private: Some(Value::Bool(false)),
    }
}
