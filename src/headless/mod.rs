//! Headless CPU-vs-CPU matches
//!
//! Both teams pick cards and buildings at random from the seeded RNG, the
//! clock steps at a fixed rate, and the combat log is written to disk when a
//! tower falls or the time limit runs out. `simulate_match` does the same
//! without an app, for tests and batch runs.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release -- --headless assets/config/sample_match.json
//! ```
//!
//! ## JSON Configuration
//!
//! ```json
//! {
//!   "random_seed": 42,
//!   "max_duration_secs": 300,
//!   "tower_health": 1000,
//!   "respawn_delay_secs": 0.5
//! }
//! ```

pub mod config;
pub mod runner;

pub use config::HeadlessMatchConfig;
pub use runner::{run_headless_match, simulate_match, MatchResult, TeamResult};
