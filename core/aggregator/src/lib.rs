//! Cross-backend aggregation on top of [`mediaserver`]
//!
//! [`MediaServerManager`] owns one adapter per configured backend and fans
//! calls out to all of them. [`LibraryStatsService`] keeps a short-lived
//! snapshot of per-library item counts for one backend.

mod manager;
mod stats;
#[cfg(test)]
mod testing;

pub use manager::MediaServerManager;
pub use stats::LibraryStatsService;
