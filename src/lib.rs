pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;
pub use config::TomlConfig;

pub use crate::core::{decision::PunchDecisionService, desk::PunchDesk, desk::PunchForm};
pub use utils::error::{PunchError, Result};
