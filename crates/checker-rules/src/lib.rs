//! Validation rules for per-network config documents.
//!
//! [`predicates`] holds the primitive checks (membership, uniqueness,
//! disjointness, format, time windows). [`sections`] builds one
//! [`SectionValidator`] per document section out of them, and
//! [`ValidatorRegistry`] runs the applicable validators in a fixed order.

pub mod context;
pub mod predicates;
pub mod registry;
pub mod sections;

pub use context::ValidationContext;
pub use registry::{RulesError, SectionValidator, ValidatorRegistry};
