// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Secondary zone lifecycle manager.
//!
//! Exposes Create, Read, Update, Delete and Exists for a single secondary
//! zone, keyed by the persisted composite identifier. Each operation runs to
//! completion with one or more blocking network calls and no background
//! work; no state survives between calls beyond what the service and the
//! declarative state store hold.
//!
//! Mutating operations serialize per parent resolver through an injected
//! [`LockRegistry`]; Read and Exists take no lock. There is no retry logic
//! here, every transport or application error is surfaced immediately.

use std::sync::Arc;

use tracing::{debug, info};

use crate::client::{
    CreateSecondaryZoneRequest, SecondaryZoneService, UpdateSecondaryZoneRequest,
};
use crate::errors::SecondaryZoneError;
use crate::ident::SecondaryZoneId;
use crate::locks::LockRegistry;
use crate::resource::{
    validate_spec, FieldMode, SecondaryZone, SecondaryZoneSpec, SecondaryZoneStatus,
};

/// Outcome of a Read against the service.
///
/// Absence is a tagged, recoverable result rather than an error so the
/// declarative engine can drop the identifier and schedule recreation
/// instead of failing the refresh.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    /// The zone exists; every field was refreshed from the service.
    Found(SecondaryZone),
    /// The service reported the zone as absent (HTTP 404).
    Gone,
}

/// Lifecycle manager for secondary zones under a custom resolver.
pub struct SecondaryZoneManager {
    service: Arc<dyn SecondaryZoneService>,
    locks: Arc<LockRegistry>,
    mode: FieldMode,
}

/// Lock key guarding mutations of one resolver's secondary zone set.
fn mutation_lock_key(instance_id: &str, resolver_id: &str) -> String {
    format!("private_dns_secondary_zone_{instance_id}{resolver_id}")
}

impl SecondaryZoneManager {
    /// Create a manager over an authenticated service handle and a shared
    /// lock registry, using the full read-write field set.
    #[must_use]
    pub fn new(service: Arc<dyn SecondaryZoneService>, locks: Arc<LockRegistry>) -> Self {
        Self {
            service,
            locks,
            mode: FieldMode::Full,
        }
    }

    /// Select which field set declared configuration is validated against.
    #[must_use]
    pub fn with_field_mode(mut self, mode: FieldMode) -> Self {
        self.mode = mode;
        self
    }

    /// Create a secondary zone and read it back.
    ///
    /// Acquires the per-resolver lock for the duration of the call, issues
    /// the remote create, composes the `instance/resolver/zone` identifier
    /// from the service-assigned id and immediately performs a Read to
    /// populate the computed fields. No identifier is produced on failure.
    ///
    /// # Errors
    ///
    /// Returns [`SecondaryZoneError::InvalidSpec`] if required fields are
    /// missing, [`SecondaryZoneError::CreateFailed`] if the remote create
    /// fails, and [`SecondaryZoneError::NotFound`] if the freshly created
    /// zone cannot be read back.
    pub async fn create(
        &self,
        spec: &SecondaryZoneSpec,
    ) -> Result<SecondaryZone, SecondaryZoneError> {
        validate_spec(spec, self.mode)?;

        let request = CreateSecondaryZoneRequest {
            zone: spec.zone.clone(),
            transfer_from: spec.transfer_from.clone(),
            enabled: spec.enabled,
            description: spec.description.clone(),
        };

        let _guard = self
            .locks
            .acquire(&mutation_lock_key(&spec.instance_id, &spec.resolver_id))
            .await;

        let created = self
            .service
            .create_secondary_zone(&spec.instance_id, &spec.resolver_id, &request)
            .await
            .map_err(|source| SecondaryZoneError::CreateFailed {
                zone: spec.zone.clone(),
                source,
            })?;

        let id = SecondaryZoneId::new(&spec.instance_id, &spec.resolver_id, &created.id);
        info!(id = %id, zone = %spec.zone, "created secondary zone");

        match self.read_by_id(&id).await? {
            ReadOutcome::Found(zone) => Ok(zone),
            ReadOutcome::Gone => Err(SecondaryZoneError::NotFound { id: id.to_string() }),
        }
    }

    /// Refresh a secondary zone from the service.
    ///
    /// Parses the identifier, fetches by the three-part key and overwrites
    /// every observed field with the service's current values, stripping any
    /// `:port` suffix from each transfer source. An absent zone yields
    /// [`ReadOutcome::Gone`].
    ///
    /// # Errors
    ///
    /// Returns [`SecondaryZoneError::MalformedId`] before any network call
    /// if the identifier has fewer than three segments, and
    /// [`SecondaryZoneError::ReadFailed`] for any non-404 API failure.
    pub async fn read(&self, identifier: &str) -> Result<ReadOutcome, SecondaryZoneError> {
        let id: SecondaryZoneId = identifier.parse()?;
        self.read_by_id(&id).await
    }

    async fn read_by_id(&self, id: &SecondaryZoneId) -> Result<ReadOutcome, SecondaryZoneError> {
        match self
            .service
            .get_secondary_zone(&id.instance_id, &id.resolver_id, &id.secondary_zone_id)
            .await
        {
            Ok(info) => {
                debug!(id = %id, zone = %info.zone, "refreshed secondary zone");
                Ok(ReadOutcome::Found(SecondaryZone {
                    id: id.clone(),
                    status: SecondaryZoneStatus::from_info(info),
                }))
            }
            Err(source) if source.is_not_found() => {
                debug!(id = %id, "secondary zone gone from service");
                Ok(ReadOutcome::Gone)
            }
            Err(source) => Err(SecondaryZoneError::ReadFailed {
                id: id.to_string(),
                source,
            }),
        }
    }

    /// Push changed mutable fields and read the zone back.
    ///
    /// Re-reads first to confirm the zone still exists remotely, then
    /// compares the declared `transfer_from`, `description` and `enabled`
    /// against `last_observed`. If none changed, no remote mutation is
    /// issued and the fresh read is returned. If any changed, one remote
    /// update carries the current declared values of all three fields, under
    /// the per-resolver lock, followed by a concluding Read.
    ///
    /// # Errors
    ///
    /// Returns [`SecondaryZoneError::MalformedId`] before any network call
    /// for a short identifier, [`SecondaryZoneError::NotFound`] if the zone
    /// was deleted out of band, and [`SecondaryZoneError::UpdateFailed`] if
    /// the remote update fails.
    pub async fn update(
        &self,
        identifier: &str,
        desired: &SecondaryZoneSpec,
        last_observed: &SecondaryZoneStatus,
    ) -> Result<SecondaryZone, SecondaryZoneError> {
        let id: SecondaryZoneId = identifier.parse()?;

        // Fail fast if the zone no longer exists remotely.
        let current = match self.read_by_id(&id).await? {
            ReadOutcome::Found(zone) => zone,
            ReadOutcome::Gone => {
                return Err(SecondaryZoneError::NotFound { id: id.to_string() })
            }
        };

        let changed = desired.transfer_from != last_observed.transfer_from
            || desired.description != last_observed.description
            || desired.enabled != last_observed.enabled;
        if !changed {
            debug!(id = %id, "no mutable field changed, skipping remote update");
            return Ok(current);
        }

        let request = UpdateSecondaryZoneRequest {
            transfer_from: desired.transfer_from.clone(),
            enabled: desired.enabled,
            description: desired.description.clone(),
        };

        let _guard = self
            .locks
            .acquire(&mutation_lock_key(&id.instance_id, &id.resolver_id))
            .await;

        self.service
            .update_secondary_zone(
                &id.instance_id,
                &id.resolver_id,
                &id.secondary_zone_id,
                &request,
            )
            .await
            .map_err(|source| SecondaryZoneError::UpdateFailed {
                id: id.to_string(),
                source,
            })?;
        info!(id = %id, "updated secondary zone");

        match self.read_by_id(&id).await? {
            ReadOutcome::Found(zone) => Ok(zone),
            ReadOutcome::Gone => Err(SecondaryZoneError::NotFound { id: id.to_string() }),
        }
    }

    /// Delete a secondary zone.
    ///
    /// Issues the remote delete under the per-resolver lock. On success the
    /// caller drops the persisted identifier, making the zone eligible for
    /// recreation.
    ///
    /// # Errors
    ///
    /// Returns [`SecondaryZoneError::MalformedId`] before any network call
    /// for a short identifier and [`SecondaryZoneError::DeleteFailed`] if the
    /// remote delete fails.
    pub async fn delete(&self, identifier: &str) -> Result<(), SecondaryZoneError> {
        let id: SecondaryZoneId = identifier.parse()?;

        let _guard = self
            .locks
            .acquire(&mutation_lock_key(&id.instance_id, &id.resolver_id))
            .await;

        self.service
            .delete_secondary_zone(&id.instance_id, &id.resolver_id, &id.secondary_zone_id)
            .await
            .map_err(|source| SecondaryZoneError::DeleteFailed {
                id: id.to_string(),
                source,
            })?;

        info!(id = %id, "deleted secondary zone");
        Ok(())
    }

    /// Check whether the zone behind an identifier still exists remotely.
    ///
    /// A 404 from the service maps to `Ok(false)`; any other failure is an
    /// error. Takes no lock.
    ///
    /// # Errors
    ///
    /// Returns [`SecondaryZoneError::MalformedId`] before any network call
    /// for a short identifier and [`SecondaryZoneError::ReadFailed`] for any
    /// non-404 API failure.
    pub async fn exists(&self, identifier: &str) -> Result<bool, SecondaryZoneError> {
        let id: SecondaryZoneId = identifier.parse()?;

        match self
            .service
            .get_secondary_zone(&id.instance_id, &id.resolver_id, &id.secondary_zone_id)
            .await
        {
            Ok(_) => Ok(true),
            Err(source) if source.is_not_found() => Ok(false),
            Err(source) => Err(SecondaryZoneError::ReadFailed {
                id: id.to_string(),
                source,
            }),
        }
    }
}
