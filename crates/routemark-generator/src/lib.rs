//! Routemark Generator Library
//!
//! Turns a route tree and a content tree into the set of files a site build
//! must emit.
//!
//! # Modules
//!
//! - [`flatten`] - Nested route tree to flat, pre-ordered route list
//! - [`resolve`] - Parameter expansion and output file naming
//! - [`bind`] - Attaching content leaves to resolved files
//! - [`loader`] - Loading a content tree from a markdown directory
//! - [`plan`] - Build planning against an output root

pub mod bind;
pub mod flatten;
pub mod loader;
pub mod plan;
pub mod resolve;

pub use bind::{bind, find_leaf};
pub use flatten::flatten;
pub use loader::{ContentLoader, LoaderError};
pub use plan::{BuildPlan, PlanError, PlanStats, PlannedFile, Planner};
pub use resolve::{Resolution, ResolveError, ResolveReport, Resolver, resolve};
