//! Perenual API client
//!
//! Thin reqwest wrapper over the species-list and species-details endpoints,
//! plus the outbound image/wiki search links.

pub mod client;
pub mod error;
pub mod links;
pub mod traits;

pub use client::PerenualClient;
pub use error::ApiError;
pub use links::ExternalSearch;
pub use traits::PlantApi;

#[cfg(test)]
mod client_tests;
