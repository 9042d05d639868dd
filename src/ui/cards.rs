//! Car card grid.

use std::fmt::Write;

use super::escape::escape_html;
use crate::models::Car;

pub const EMPTY_CARS: &str = "No cars found. Add some cars to see them here!";

/// Render one card per car, or the empty-state paragraph.
pub fn render_card_grid(cars: &[Car]) -> String {
    if cars.is_empty() {
        return format!(r#"<p class="empty-message">{}</p>"#, EMPTY_CARS);
    }

    let mut out = String::from(r#"<div class="car-grid">"#);
    for car in cars {
        render_card(&mut out, car);
    }
    out.push_str("</div>");
    out
}

fn render_card(out: &mut String, car: &Car) {
    // Writing into a String cannot fail.
    let _ = write!(
        out,
        concat!(
            r#"<div class="car-card" data-car="{id}">"#,
            r#"<h3>{name} <span class="car-year">({year})</span></h3>"#,
            r#"<div class="car-details">"#,
            "<p><strong>Engine:</strong> {engine}</p>",
            "<p><strong>Horsepower:</strong> {hp} HP</p>",
        ),
        id = car.id,
        name = escape_html(&car.name),
        year = car.year,
        engine = escape_html(&car.engine),
        hp = car.hp,
    );

    if !car.features.is_empty() {
        out.push_str(r#"<div class="car-features"><strong>Features:</strong><ul>"#);
        for feature in &car.features {
            let _ = write!(out, "<li>{}</li>", escape_html(feature));
        }
        out.push_str("</ul></div>");
    }
    out.push_str("</div></div>");
}
