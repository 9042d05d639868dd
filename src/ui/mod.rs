//! Browser UI shell.
//!
//! The page is rendered on the server: [`Shell`] gathers folders and cars
//! through a [`CatalogSource`](crate::traits::CatalogSource), and
//! [`render_shell`] turns the resulting [`ShellState`] into markup. The
//! "Add Sample" buttons are plain form posts handled in `http::pages`.

pub mod cards;
mod escape;
pub mod page;
pub mod samples;
mod shell;

pub use cards::{render_card_grid, EMPTY_CARS};
pub use escape::escape_html;
pub use page::{page_head, render_shell, SpiralView, EMPTY_FOLDERS};
pub use samples::{random_choice, sample_car, sample_folder, SAMPLE_CARS};
pub use shell::{Section, Shell, ShellState, CARS_ERROR, FOLDERS_ERROR};
