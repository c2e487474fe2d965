pub mod boundary;
pub mod cli;
pub mod config;
pub mod coordinator;
pub mod domain;
pub mod error;
pub mod git;
pub mod telemetry;
pub mod ui;
pub mod version;

pub use coordinator::{ComputedVersion, VersionCoordinator};
pub use error::{MkVersionError, Result};
pub use version::{pad_version, VersionTuple};
