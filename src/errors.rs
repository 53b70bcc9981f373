// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for secondary zone lifecycle operations.
//!
//! This module provides the error surface returned to the declarative engine:
//! - Malformed composite identifiers (detected locally, before any network call)
//! - Wrapped DNS Services API failures, one variant per lifecycle operation,
//!   each carrying the raw response detail from the service
//! - Validation failures for declared configuration
//!
//! None of these errors are retried at this layer; they are propagated
//! immediately to the caller.

use thiserror::Error;

use crate::client::ApiError;

/// Errors returned by the secondary zone lifecycle manager and lister.
#[derive(Error, Debug)]
pub enum SecondaryZoneError {
    /// Composite identifier has fewer than three `/`-separated segments.
    ///
    /// Raised locally before any network call is issued. The identifier must
    /// have the shape `instanceID/resolverID/secondaryZoneID`.
    #[error("incorrect id '{id}': id should be a combination of instanceID/resolverID/secondaryZoneID")]
    MalformedId {
        /// The identifier string that failed to parse
        id: String,
    },

    /// Declared configuration failed validation before any remote call.
    #[error("invalid secondary zone configuration: {reason}")]
    InvalidSpec {
        /// Explanation of what is invalid
        reason: String,
    },

    /// The remote create call failed.
    #[error("error creating secondary zone '{zone}': {source}")]
    CreateFailed {
        /// The DNS zone name being created
        zone: String,
        /// The underlying API failure, including response detail
        source: ApiError,
    },

    /// The remote fetch failed for a reason other than the zone being absent.
    #[error("error reading secondary zone '{id}': {source}")]
    ReadFailed {
        /// The composite identifier of the zone
        id: String,
        /// The underlying API failure, including response detail
        source: ApiError,
    },

    /// The remote update call failed.
    #[error("error updating secondary zone '{id}': {source}")]
    UpdateFailed {
        /// The composite identifier of the zone
        id: String,
        /// The underlying API failure, including response detail
        source: ApiError,
    },

    /// The remote delete call failed.
    #[error("error deleting secondary zone '{id}': {source}")]
    DeleteFailed {
        /// The composite identifier of the zone
        id: String,
        /// The underlying API failure, including response detail
        source: ApiError,
    },

    /// The remote list call failed.
    #[error("error listing secondary zones for resolver '{resolver_id}': {source}")]
    ListFailed {
        /// The custom resolver whose zones were being listed
        resolver_id: String,
        /// The underlying API failure, including response detail
        source: ApiError,
    },

    /// The remote object no longer exists where the operation requires it to.
    ///
    /// Returned by update's fail-fast pre-read when the zone was deleted
    /// out of band, and by create when the freshly created zone cannot be
    /// read back.
    #[error("secondary zone '{id}' no longer exists on the service")]
    NotFound {
        /// The composite identifier of the missing zone
        id: String,
    },
}
