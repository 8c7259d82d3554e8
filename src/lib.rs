//! Local credential store for deployment API tokens.
//!
//! Keeps a small set of named secrets in a `0600` JSON file or merged into a
//! `KEY=VALUE` env file, shows them masked, and checks tokens against the
//! provider's identity endpoint. Also carries a thin text/image posting client.
//!
//! ## Modules
//! - `cli` — Command-line handlers and interactive menu
//! - `core` — Store logic (JSON file, env file, masking, verification)
//! - `models` — Data structures
//! - `posting` — Posting client and draft composition
//! - `util` — Filesystem helpers

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod posting;
pub mod util;
