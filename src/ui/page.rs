//! Page shell markup: header, the two sections and the footer.

use chrono::Datelike;
use std::fmt::Write;

use super::cards::render_card_grid;
use super::escape::escape_html;
use super::shell::{Section, ShellState};
use crate::models::Folder;
use crate::spiral::VIEWPORT_HEIGHT;

pub const TITLE: &str = "Fibonacci Car Explorer";
pub const SUBTITLE: &str = "Explore cars in a 3D Fibonacci spiral";
pub const EMPTY_FOLDERS: &str =
    "No folders to display. Add some folders to see them in the 3D visualization.";

/// How the folder spiral appears on the page.
#[derive(Debug, Clone, PartialEq)]
pub enum SpiralView {
    /// Clickable image served by `/spiral.svg`; clicks go to `/spiral/open`.
    Linked { width: f64 },
    /// A pre-rendered SVG document embedded as-is.
    Inline(String),
}

const STYLE: &str = r#"<style>
body { margin: 0; background: #121212; font-family: system-ui, sans-serif; }
.app-container { max-width: 1200px; margin: 0 auto; padding: 2rem; color: #f0f0f0; }
.app-header { text-align: center; margin-bottom: 2rem; }
.app-header h1 { font-size: 2.5rem; margin-bottom: 0.5rem; background: linear-gradient(90deg, #00ff88, #00a2ff); -webkit-background-clip: text; background-clip: text; color: transparent; }
.subtitle { color: #aaa; }
.section { margin-bottom: 3rem; }
.loading { color: #888; font-size: 0.9rem; margin-left: 0.5rem; }
.error { background: rgba(255, 50, 50, 0.1); border-left: 4px solid #ff4d4d; padding: 1rem; margin-bottom: 1rem; }
.spiral-frame { background: #1e1e1e; min-height: 400px; border-radius: 8px; overflow-x: auto; }
.spiral-frame input[type=image] { display: block; max-width: none; }
.empty-message { color: #888; text-align: center; padding: 2rem; }
.actions { margin-top: 1rem; }
.actions button { background: #00a2ff; color: #fff; border: none; border-radius: 4px; padding: 0.6rem 1.2rem; cursor: pointer; }
.actions button:hover { background: #0088cc; }
.car-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(300px, 1fr)); gap: 1.5rem; }
.car-card { background: #2a2a2a; border-radius: 8px; padding: 1.5rem; }
.car-year { color: #888; font-weight: normal; }
.app-footer { text-align: center; color: #666; margin-top: 3rem; }
</style>"#;

/// Head fragment: title and page styles.
pub fn page_head() -> String {
    format!("<title>{}</title>\n{}", TITLE, STYLE)
}

/// Render the whole shell. `base` prefixes every form action and asset link.
pub fn render_shell(state: &ShellState, base: &str, spiral: &SpiralView) -> String {
    render_shell_in_year(state, base, spiral, chrono::Utc::now().year())
}

fn render_shell_in_year(state: &ShellState, base: &str, spiral: &SpiralView, year: i32) -> String {
    let base = escape_html(base);
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<div class="app-container"><header class="app-header"><h1>{}</h1><p class="subtitle">{}</p></header><main>"#,
        TITLE, SUBTITLE
    );

    out.push_str(r#"<section class="section folders-section">"#);
    section_heading(&mut out, "3D Folder Visualization", &state.folders);
    match &state.folders.error {
        Some(message) => error_box(&mut out, message),
        None => folder_content(&mut out, &state.folders.items, &base, spiral),
    }
    action_button(&mut out, &base, "samples/folder", "Add Sample Folder");
    out.push_str("</section>");

    out.push_str(r#"<section class="section cars-section">"#);
    section_heading(&mut out, "Car Collection", &state.cars);
    match &state.cars.error {
        Some(message) => error_box(&mut out, message),
        None => out.push_str(&render_card_grid(&state.cars.items)),
    }
    action_button(&mut out, &base, "samples/car", "Add Sample Car");
    out.push_str("</section>");

    let _ = write!(
        out,
        r#"</main><footer class="app-footer"><p>{} &copy; {}</p></footer></div>"#,
        TITLE, year
    );
    out
}

fn section_heading<T>(out: &mut String, title: &str, section: &Section<T>) {
    let _ = write!(out, "<h2>{}", title);
    if section.loading {
        out.push_str(r#" <span class="loading">(Loading...)</span>"#);
    }
    out.push_str("</h2>");
}

fn error_box(out: &mut String, message: &str) {
    let _ = write!(out, r#"<div class="error">{}</div>"#, escape_html(message));
}

fn folder_content(out: &mut String, folders: &[Folder], base: &str, spiral: &SpiralView) {
    if folders.is_empty() {
        let _ = write!(out, r#"<p class="empty-message">{}</p>"#, EMPTY_FOLDERS);
        return;
    }

    out.push_str(r#"<div class="spiral-frame">"#);
    match spiral {
        SpiralView::Linked { width } => {
            let width = width.round();
            let _ = write!(
                out,
                concat!(
                    r#"<form action="{base}spiral/open" method="get" target="_blank">"#,
                    r#"<input type="hidden" name="width" value="{width}">"#,
                    r#"<input type="image" src="{base}spiral.svg?width={width}" width="{width}" height="{height}" alt="Folder spiral">"#,
                    "</form>",
                ),
                base = base,
                width = width,
                height = VIEWPORT_HEIGHT,
            );
        }
        SpiralView::Inline(svg) => out.push_str(svg),
    }
    out.push_str("</div>");
}

fn action_button(out: &mut String, base: &str, path: &str, label: &str) {
    let _ = write!(
        out,
        r#"<form class="actions" action="{}{}" method="post"><button type="submit">{}</button></form>"#,
        base, path, label
    );
}
