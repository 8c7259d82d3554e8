//! Core business logic modules.

pub mod env_file;
pub mod environment;
pub mod error;
pub mod json_file;
pub mod mask;
pub mod paths;
pub mod settings;
pub mod store;
pub mod verifier;
