/*
 * The console shell around the core: `GrocerTracker` runs the build phase and
 * `MenuSession` drives the interactive menu state machine defined in `menu`.
 * Session tests are in `session_tests.rs`.
 */
pub mod menu;
pub mod session;
pub mod ui_constants;


pub use session::{GrocerTracker, RunOutcome};
