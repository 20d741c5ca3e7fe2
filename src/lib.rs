//! MCP server that summarizes GitHub users and repositories for LLMs.
//!
//! Provides tools for a user's profile with sampled activity statistics,
//! repository details, and renaming a repository.

pub mod error;
pub mod format;
pub mod github;
pub mod server;
pub mod stats;
