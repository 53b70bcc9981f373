// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # Secondary zone lifecycle bindings for cloud private DNS
//!
//! This library manages *secondary DNS zones* — zones whose records are
//! transferred from an external primary nameserver rather than authored
//! locally — hosted under a cloud private-DNS service's custom resolver.
//! It is the mapping layer between a declarative resource model and the
//! service's secondary zone API.
//!
//! ## Overview
//!
//! - Create / Read / Update / Delete / Exists for one secondary zone, keyed
//!   across process restarts by the persisted composite identifier
//!   `instanceID/resolverID/secondaryZoneID`
//! - A read-only lister (data source) over one resolver's secondary zones
//! - Per-resolver serialization of mutating calls via a named lock registry
//!
//! ## Modules
//!
//! - [`manager`] - Lifecycle operations for a single secondary zone
//! - [`lister`] - Read-only enumeration of a resolver's secondary zones
//! - [`client`] - Typed HTTP client and the service trait both depend on
//! - [`resource`] - Declared spec, observed status and the field schema
//! - [`ident`] - The three-part composite identifier
//! - [`locks`] - Injected named lock registry for mutation serialization
//! - [`errors`] - Error surface returned to the declarative engine
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pdns_secondary_zones::client::DnsSvcsClient;
//! use pdns_secondary_zones::locks::LockRegistry;
//! use pdns_secondary_zones::manager::SecondaryZoneManager;
//! use pdns_secondary_zones::resource::SecondaryZoneSpec;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = DnsSvcsClient::new("https://api.dns-svcs.example.com/v1".parse()?)
//!     .with_token("...");
//! let manager = SecondaryZoneManager::new(Arc::new(client), Arc::new(LockRegistry::new()));
//!
//! let spec = SecondaryZoneSpec {
//!     instance_id: "instance-1".to_string(),
//!     resolver_id: "resolver-1".to_string(),
//!     zone: "example.com".to_string(),
//!     transfer_from: vec!["10.0.0.7".to_string()],
//!     enabled: true,
//!     description: Some("mirrored from on-prem".to_string()),
//! };
//! let zone = manager.create(&spec).await?;
//! println!("created {}", zone.id);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod errors;
pub mod ident;
pub mod lister;
pub mod locks;
pub mod manager;
pub mod resource;

#[cfg(test)]
pub(crate) mod test_support;
