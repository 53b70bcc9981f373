// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Scripted in-process implementation of [`SecondaryZoneService`] for unit
//! tests.
//!
//! The mock keeps zones in insertion order, counts every call per operation,
//! and tracks how many mutating calls are active per lock key so tests can
//! assert that mutations against the same resolver never overlap. Failures
//! are scripted per operation as `(status, detail)` pairs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Barrier;

use crate::client::{
    ApiError, CreateSecondaryZoneRequest, ListSecondaryZonesResponse, SecondaryZoneInfo,
    SecondaryZoneService, UpdateSecondaryZoneRequest,
};

#[derive(Default)]
pub(crate) struct MockService {
    zones: Mutex<Vec<SecondaryZoneInfo>>,
    next_id: AtomicUsize,

    pub create_calls: AtomicUsize,
    pub get_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    pub list_calls: AtomicUsize,

    fail_next_create: Mutex<Option<(u16, String)>>,
    fail_next_get: Mutex<Option<(u16, String)>>,
    fail_next_update: Mutex<Option<(u16, String)>>,
    fail_next_delete: Mutex<Option<(u16, String)>>,
    fail_next_list: Mutex<Option<(u16, String)>>,

    // Concurrency observation for mutating calls, keyed by instance+resolver.
    mutation_delay: Mutex<Option<Duration>>,
    mutation_barrier: Mutex<Option<Arc<Barrier>>>,
    active_mutations: Mutex<HashMap<String, usize>>,
    max_active_mutations: Mutex<HashMap<String, usize>>,
}

impl MockService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_next_create(&self, status: u16, detail: &str) {
        *self.fail_next_create.lock().unwrap() = Some((status, detail.to_string()));
    }

    pub fn fail_next_get(&self, status: u16, detail: &str) {
        *self.fail_next_get.lock().unwrap() = Some((status, detail.to_string()));
    }

    pub fn fail_next_update(&self, status: u16, detail: &str) {
        *self.fail_next_update.lock().unwrap() = Some((status, detail.to_string()));
    }

    pub fn fail_next_delete(&self, status: u16, detail: &str) {
        *self.fail_next_delete.lock().unwrap() = Some((status, detail.to_string()));
    }

    pub fn fail_next_list(&self, status: u16, detail: &str) {
        *self.fail_next_list.lock().unwrap() = Some((status, detail.to_string()));
    }

    /// Hold every mutating call open for `delay` so overlap would be observed.
    pub fn set_mutation_delay(&self, delay: Duration) {
        *self.mutation_delay.lock().unwrap() = Some(delay);
    }

    /// Make every mutating call wait on `barrier` before returning.
    ///
    /// With a barrier sized to N, a test only completes if N mutations can
    /// be in flight at once.
    pub fn set_mutation_barrier(&self, barrier: Arc<Barrier>) {
        *self.mutation_barrier.lock().unwrap() = Some(barrier);
    }

    /// Highest number of simultaneously active mutating calls seen for a key.
    pub fn max_active_mutations(&self, key: &str) -> usize {
        self.max_active_mutations
            .lock()
            .unwrap()
            .get(key)
            .copied()
            .unwrap_or(0)
    }

    /// Seed a zone directly, bypassing the create path.
    pub fn seed_zone(&self, info: SecondaryZoneInfo) {
        self.zones.lock().unwrap().push(info);
    }

    pub fn zone(&self, secondary_zone_id: &str) -> Option<SecondaryZoneInfo> {
        self.zones
            .lock()
            .unwrap()
            .iter()
            .find(|z| z.id == secondary_zone_id)
            .cloned()
    }

    fn take_failure(slot: &Mutex<Option<(u16, String)>>) -> Option<ApiError> {
        slot.lock()
            .unwrap()
            .take()
            .map(|(status, detail)| ApiError::Api { status, detail })
    }

    fn not_found(secondary_zone_id: &str) -> ApiError {
        ApiError::Api {
            status: 404,
            detail: format!("secondary zone '{secondary_zone_id}' not found"),
        }
    }

    async fn enter_mutation(&self, instance_id: &str, resolver_id: &str) -> String {
        let key = format!("{instance_id}{resolver_id}");
        {
            let mut active = self.active_mutations.lock().unwrap();
            let count = active.entry(key.clone()).or_insert(0);
            *count += 1;
            let mut max = self.max_active_mutations.lock().unwrap();
            let peak = max.entry(key.clone()).or_insert(0);
            if *count > *peak {
                *peak = *count;
            }
        }
        let delay = *self.mutation_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let barrier = self.mutation_barrier.lock().unwrap().clone();
        if let Some(barrier) = barrier {
            barrier.wait().await;
        }
        key
    }

    fn exit_mutation(&self, key: &str) {
        let mut active = self.active_mutations.lock().unwrap();
        if let Some(count) = active.get_mut(key) {
            *count -= 1;
        }
    }
}

#[async_trait]
impl SecondaryZoneService for MockService {
    async fn create_secondary_zone(
        &self,
        instance_id: &str,
        resolver_id: &str,
        request: &CreateSecondaryZoneRequest,
    ) -> Result<SecondaryZoneInfo, ApiError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let key = self.enter_mutation(instance_id, resolver_id).await;
        let result = if let Some(err) = Self::take_failure(&self.fail_next_create) {
            Err(err)
        } else {
            let n = self.next_id.fetch_add(1, Ordering::SeqCst);
            let info = SecondaryZoneInfo {
                id: format!("sz-{n}"),
                zone: request.zone.clone(),
                transfer_from: request.transfer_from.clone(),
                enabled: request.enabled,
                description: request.description.clone(),
                created_on: Some(Utc::now()),
                modified_on: Some(Utc::now()),
            };
            self.zones.lock().unwrap().push(info.clone());
            Ok(info)
        };
        self.exit_mutation(&key);
        result
    }

    async fn get_secondary_zone(
        &self,
        _instance_id: &str,
        _resolver_id: &str,
        secondary_zone_id: &str,
    ) -> Result<SecondaryZoneInfo, ApiError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = Self::take_failure(&self.fail_next_get) {
            return Err(err);
        }
        self.zone(secondary_zone_id)
            .ok_or_else(|| Self::not_found(secondary_zone_id))
    }

    async fn update_secondary_zone(
        &self,
        instance_id: &str,
        resolver_id: &str,
        secondary_zone_id: &str,
        request: &UpdateSecondaryZoneRequest,
    ) -> Result<SecondaryZoneInfo, ApiError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let key = self.enter_mutation(instance_id, resolver_id).await;
        let result = if let Some(err) = Self::take_failure(&self.fail_next_update) {
            Err(err)
        } else {
            let mut zones = self.zones.lock().unwrap();
            match zones.iter_mut().find(|z| z.id == secondary_zone_id) {
                Some(zone) => {
                    zone.transfer_from = request.transfer_from.clone();
                    zone.enabled = request.enabled;
                    zone.description = request.description.clone();
                    zone.modified_on = Some(Utc::now());
                    Ok(zone.clone())
                }
                None => Err(Self::not_found(secondary_zone_id)),
            }
        };
        self.exit_mutation(&key);
        result
    }

    async fn delete_secondary_zone(
        &self,
        instance_id: &str,
        resolver_id: &str,
        secondary_zone_id: &str,
    ) -> Result<(), ApiError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        let key = self.enter_mutation(instance_id, resolver_id).await;
        let result = if let Some(err) = Self::take_failure(&self.fail_next_delete) {
            Err(err)
        } else {
            let mut zones = self.zones.lock().unwrap();
            let before = zones.len();
            zones.retain(|z| z.id != secondary_zone_id);
            if zones.len() == before {
                Err(Self::not_found(secondary_zone_id))
            } else {
                Ok(())
            }
        };
        self.exit_mutation(&key);
        result
    }

    async fn list_secondary_zones(
        &self,
        _instance_id: &str,
        _resolver_id: &str,
    ) -> Result<ListSecondaryZonesResponse, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = Self::take_failure(&self.fail_next_list) {
            return Err(err);
        }
        let zones = self.zones.lock().unwrap().clone();
        let count = i64::try_from(zones.len()).unwrap_or(i64::MAX);
        Ok(ListSecondaryZonesResponse {
            secondary_zones: zones,
            count: Some(count),
            total_count: Some(count),
        })
    }
}
