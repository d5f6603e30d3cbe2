//! Core types for plantdex
//!
//! Wire model of the Perenual API, the immutable search-session record and
//! the pure projection from plant data to view-models. Nothing in this crate
//! performs I/O.

pub mod constants;
pub mod env_config;
mod plant;
mod session;
mod settings;
pub mod view;

pub use plant::*;
pub use session::*;
pub use settings::*;
