// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Read-only enumeration of a resolver's secondary zones.
//!
//! Backs the data-source side of the resource surface: one list call scoped
//! to `(instance, resolver)`, translated into the read model with the same
//! `:port` stripping as Read. Order is whatever the service returned; no
//! sort is imposed locally.

use std::sync::Arc;

use tracing::debug;

use crate::client::SecondaryZoneService;
use crate::errors::SecondaryZoneError;
use crate::ident::SecondaryZoneId;
use crate::resource::{SecondaryZone, SecondaryZoneStatus};

/// Lister over the secondary zones of one custom resolver.
pub struct SecondaryZoneLister {
    service: Arc<dyn SecondaryZoneService>,
}

impl SecondaryZoneLister {
    /// Create a lister over an authenticated service handle.
    #[must_use]
    pub fn new(service: Arc<dyn SecondaryZoneService>) -> Self {
        Self { service }
    }

    /// List the secondary zones under a custom resolver, in service order.
    ///
    /// Each summary is translated into the full read model, including a
    /// composite identifier usable with the lifecycle manager.
    ///
    /// # Errors
    ///
    /// Returns [`SecondaryZoneError::ListFailed`] if the remote list call
    /// fails; the error carries the raw response detail.
    pub async fn list(
        &self,
        instance_id: &str,
        resolver_id: &str,
    ) -> Result<Vec<SecondaryZone>, SecondaryZoneError> {
        let response = self
            .service
            .list_secondary_zones(instance_id, resolver_id)
            .await
            .map_err(|source| SecondaryZoneError::ListFailed {
                resolver_id: resolver_id.to_string(),
                source,
            })?;

        debug!(
            instance_id = %instance_id,
            resolver_id = %resolver_id,
            count = response.secondary_zones.len(),
            "listed secondary zones"
        );

        Ok(response
            .secondary_zones
            .into_iter()
            .map(|info| SecondaryZone {
                id: SecondaryZoneId::new(instance_id, resolver_id, &info.id),
                status: SecondaryZoneStatus::from_info(info),
            })
            .collect())
    }
}
