// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Declared and observed models for secondary zones.
//!
//! The declarative engine hands the lifecycle manager a [`SecondaryZoneSpec`]
//! (what the operator declared) and receives back a [`SecondaryZone`] (the
//! composite identifier plus the observed [`SecondaryZoneStatus`] refreshed
//! from the service). The split mirrors the spec/status convention: declared
//! fields are owned by the operator, observed fields are owned by the
//! service.
//!
//! The field schema in this module is the single canonical definition of the
//! exposed resource surface; [`FieldMode`] distinguishes the full resource
//! from the legacy read-only variant that exposed computed fields only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::SecondaryZoneInfo;
use crate::errors::SecondaryZoneError;
use crate::ident::SecondaryZoneId;

/// Declared configuration of a secondary zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryZoneSpec {
    /// The unique identifier of the DNS service instance
    pub instance_id: String,
    /// The unique identifier of the parent custom resolver
    pub resolver_id: String,
    /// The DNS zone name to mirror; immutable after creation
    pub zone: String,
    /// Origin nameserver addresses to pull zone data from; mutable
    pub transfer_from: Vec<String>,
    /// Whether zone transfer is active; mutable
    pub enabled: bool,
    /// Free-text annotation; optional, mutable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Observed state of a secondary zone, refreshed from the service on every
/// Read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecondaryZoneStatus {
    /// Service-assigned secondary zone identifier
    pub secondary_zone_id: String,
    /// The DNS zone name as stored by the service
    pub zone: String,
    /// Transfer sources as returned by the service, with any `:port` suffix
    /// stripped per entry
    pub transfer_from: Vec<String>,
    /// Whether zone transfer is active
    pub enabled: bool,
    /// Free-text annotation
    pub description: Option<String>,
    /// Server-assigned creation timestamp
    pub created_on: Option<DateTime<Utc>>,
    /// Server-assigned last-modification timestamp
    pub modified_on: Option<DateTime<Utc>>,
}

/// A secondary zone as seen by the declarative engine after a refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryZone {
    /// Composite identifier persisted by the declarative state store
    pub id: SecondaryZoneId,
    /// Observed state
    pub status: SecondaryZoneStatus,
}

impl SecondaryZoneStatus {
    /// Build the observed state from a wire response, stripping any `:port`
    /// suffix from each transfer source.
    #[must_use]
    pub fn from_info(info: SecondaryZoneInfo) -> Self {
        Self {
            secondary_zone_id: info.id,
            zone: info.zone,
            transfer_from: info
                .transfer_from
                .iter()
                .map(|addr| strip_transfer_port(addr))
                .collect(),
            enabled: info.enabled,
            description: info.description,
            created_on: info.created_on,
            modified_on: info.modified_on,
        }
    }
}

/// Drop an optional `:port` suffix from a transfer source address.
///
/// The service may echo transfer sources as `address:port`; only the address
/// is retained locally.
#[must_use]
pub fn strip_transfer_port(addr: &str) -> String {
    match addr.split_once(':') {
        Some((host, _port)) => host.to_string(),
        None => addr.to_string(),
    }
}

/// Which field set a resource definition exposes.
///
/// The service historically shipped two near-identical resource definitions:
/// the full read-write resource and a legacy variant exposing only the
/// computed fields. Both are served by the one schema below, distinguished
/// by this flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMode {
    /// Full read-write resource: declared fields required, computed fields
    /// read-only
    Full,
    /// Legacy variant: only computed fields are exposed; declared fields are
    /// accepted but not validated beyond the parent identifiers
    ComputedOnly,
}

/// How a schema field is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAccess {
    /// Must be declared by the operator
    Required,
    /// May be declared by the operator
    Optional,
    /// Assigned by the service, read-only
    Computed,
}

/// One field of the exposed resource surface.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    /// Field name as exposed to the declarative engine
    pub name: &'static str,
    /// How the field is populated
    pub access: FieldAccess,
    /// Human-readable description
    pub description: &'static str,
}

/// The canonical field schema for the secondary zone resource.
#[must_use]
pub fn secondary_zone_schema(mode: FieldMode) -> Vec<FieldSchema> {
    let computed = vec![
        FieldSchema {
            name: "secondary_zone_id",
            access: FieldAccess::Computed,
            description: "Secondary zone ID",
        },
        FieldSchema {
            name: "created_on",
            access: FieldAccess::Computed,
            description: "Secondary zone creation date",
        },
        FieldSchema {
            name: "modified_on",
            access: FieldAccess::Computed,
            description: "Secondary zone modification date",
        },
    ];

    if mode == FieldMode::ComputedOnly {
        return computed;
    }

    let mut fields = vec![
        FieldSchema {
            name: "instance_id",
            access: FieldAccess::Required,
            description: "The unique identifier of a service instance",
        },
        FieldSchema {
            name: "resolver_id",
            access: FieldAccess::Required,
            description: "The unique identifier of a custom resolver",
        },
        FieldSchema {
            name: "zone",
            access: FieldAccess::Required,
            description: "The DNS zone name to mirror",
        },
        FieldSchema {
            name: "transfer_from",
            access: FieldAccess::Required,
            description: "Origin nameserver addresses for zone transfer",
        },
        FieldSchema {
            name: "enabled",
            access: FieldAccess::Required,
            description: "Whether zone transfer is active",
        },
        FieldSchema {
            name: "description",
            access: FieldAccess::Optional,
            description: "Free-text annotation",
        },
    ];
    fields.extend(computed);
    fields
}

/// Validate a declared spec against the required fields of the given mode.
///
/// # Errors
///
/// Returns [`SecondaryZoneError::InvalidSpec`] naming the first missing
/// required field.
pub fn validate_spec(spec: &SecondaryZoneSpec, mode: FieldMode) -> Result<(), SecondaryZoneError> {
    if spec.instance_id.is_empty() {
        return Err(SecondaryZoneError::InvalidSpec {
            reason: "instance_id is required".to_string(),
        });
    }
    if spec.resolver_id.is_empty() {
        return Err(SecondaryZoneError::InvalidSpec {
            reason: "resolver_id is required".to_string(),
        });
    }
    if spec.zone.is_empty() {
        return Err(SecondaryZoneError::InvalidSpec {
            reason: "zone is required".to_string(),
        });
    }
    if mode == FieldMode::Full && spec.transfer_from.is_empty() {
        return Err(SecondaryZoneError::InvalidSpec {
            reason: "transfer_from must name at least one origin nameserver".to_string(),
        });
    }
    Ok(())
}
