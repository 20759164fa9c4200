//! CDE Registry Client
//!
//! Async client for fetching CDE sets from the RadElement registry by
//! identifier and validating the response against the set schema.
//!
//! # Example
//!
//! ```rust,no_run
//! use radcde_registry_client::RegistryClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RegistryClient::new()?;
//! let set = client.get_set("RDES195").await?;
//! println!("{} has {} elements", set.name, set.elements.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;

pub use client::RegistryClient;
pub use error::{Error, Result};
