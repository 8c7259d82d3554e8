//! Data structures.

pub mod credential_set;
pub mod identity;
pub mod settings;
