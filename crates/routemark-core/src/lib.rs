//! Routemark Core Library
//!
//! Route, content and configuration types shared by the routemark generator
//! and CLI.

pub mod config;
pub mod content;
pub mod error;
pub mod frontmatter;
pub mod route;

pub use config::Config;
pub use content::{ContentLeaf, ContentNode, ContentTree};
pub use error::{CoreError, Result};
pub use frontmatter::Frontmatter;
pub use route::{FlattenedRoute, NOT_FOUND_PATH, NOT_FOUND_TITLE, OutputFile, RouteNode};
