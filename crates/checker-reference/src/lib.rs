//! Reference data sources for the config checker.
//!
//! This crate supplies the authoritative on-chain collections (markets, pools,
//! tokens, bridges, gas price denoms and perp pools) that config documents are
//! validated against.
//!
//! - `registry`: maps each network to the source answering for it
//! - `snapshot`: drains a source into an immutable [`ReferenceSnapshot`]
//! - `utils`: retry policy for transient request failures
//! - `implementations`: the Carbon REST client and an in-memory source
//!
//! [`ReferenceSnapshot`]: checker_types::ReferenceSnapshot

pub mod registry;
pub mod snapshot;
pub mod utils;

pub mod implementations;

pub use implementations::carbon::{CarbonRestSource, CarbonRestSourceBuilder};
pub use implementations::memory::{ReferenceDump, StaticSource};
pub use registry::SourceRegistry;
pub use snapshot::SnapshotBuilder;
pub use utils::RetryPolicy;
