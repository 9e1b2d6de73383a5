//! CLI command implementations.

mod info;
mod run;

pub use info::run_info;
pub use run::{RunCommandInput, run_benchmark};
