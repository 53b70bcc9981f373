// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Composite identifier for secondary zones.
//!
//! A secondary zone is re-identified across process restarts by a single
//! persisted string of the form `instanceID/resolverID/secondaryZoneID`.
//! The declarative state store hands this string back on every Read, Update,
//! Delete and Exists call; this module owns parsing it back into its three
//! parts and rendering it for storage.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::SecondaryZoneError;

/// The three-part key locating a secondary zone on the DNS service.
///
/// Rendered as `instanceID/resolverID/secondaryZoneID` via [`fmt::Display`]
/// and parsed back with [`FromStr`]. Parsing requires at least three
/// `/`-separated segments; any segments beyond the third are ignored.
///
/// # Examples
///
/// ```rust
/// use pdns_secondary_zones::ident::SecondaryZoneId;
///
/// let id: SecondaryZoneId = "inst-1/res-1/sz-1".parse().unwrap();
/// assert_eq!(id.instance_id, "inst-1");
/// assert_eq!(id.to_string(), "inst-1/res-1/sz-1");
///
/// assert!("inst-1/res-1".parse::<SecondaryZoneId>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SecondaryZoneId {
    /// The unique identifier of the DNS service instance
    pub instance_id: String,
    /// The unique identifier of the custom resolver
    pub resolver_id: String,
    /// The service-assigned identifier of the secondary zone
    pub secondary_zone_id: String,
}

impl SecondaryZoneId {
    /// Compose an identifier from its three parts.
    #[must_use]
    pub fn new(instance_id: &str, resolver_id: &str, secondary_zone_id: &str) -> Self {
        Self {
            instance_id: instance_id.to_string(),
            resolver_id: resolver_id.to_string(),
            secondary_zone_id: secondary_zone_id.to_string(),
        }
    }
}

impl fmt::Display for SecondaryZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.instance_id, self.resolver_id, self.secondary_zone_id
        )
    }
}

impl FromStr for SecondaryZoneId {
    type Err = SecondaryZoneError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = raw.split('/').collect();
        if segments.len() < 3 {
            return Err(SecondaryZoneError::MalformedId {
                id: raw.to_string(),
            });
        }
        Ok(Self {
            instance_id: segments[0].to_string(),
            resolver_id: segments[1].to_string(),
            secondary_zone_id: segments[2].to_string(),
        })
    }
}

impl Serialize for SecondaryZoneId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SecondaryZoneId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}
