pub mod client;
pub mod common;
pub mod jobs;
pub mod pending;
pub mod reconcile;

#[cfg(test)]
pub(crate) mod tests;

pub type Error = crate::common::error::SizerError;
pub type Result<T> = std::result::Result<T, Error>;

// Reexports
pub use common::{Map, Set};
pub use jobs::record::{JobState, PendingJob};

pub const SIZER_VERSION: &str = {
    match option_env!("SLURM_SIZER_BUILD_VERSION") {
        Some(version) => version,
        None => env!("CARGO_PKG_VERSION"),
    }
};
