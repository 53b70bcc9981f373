// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Typed HTTP client for the DNS Services secondary zone API.
//!
//! This module contains the thin request/response layer over the service's
//! REST endpoints. Secondary zones live under a custom resolver:
//!
//! - `POST   /instances/{i}/custom_resolvers/{r}/secondary_zones`
//! - `GET    /instances/{i}/custom_resolvers/{r}/secondary_zones/{z}`
//! - `PATCH  /instances/{i}/custom_resolvers/{r}/secondary_zones/{z}`
//! - `DELETE /instances/{i}/custom_resolvers/{r}/secondary_zones/{z}`
//! - `GET    /instances/{i}/custom_resolvers/{r}/secondary_zones`
//!
//! There is no retry logic at this layer; every transport or application
//! error is surfaced immediately with the raw response body preserved so the
//! lifecycle manager can include it in its own error context.
//!
//! The [`SecondaryZoneService`] trait is the seam the lifecycle manager and
//! lister depend on; [`DnsSvcsClient`] is the production implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client as HttpClient, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};
use url::Url;

/// Errors produced by the DNS Services HTTP client.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The HTTP request could not be sent or the connection failed.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status code.
    ///
    /// `detail` carries the raw response body so callers can surface the
    /// service's own diagnostic text.
    #[error("API returned HTTP {status}: {detail}")]
    Api {
        /// HTTP status code of the response
        status: u16,
        /// Raw response body
        detail: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("failed to decode API response: {reason}")]
    Decode {
        /// Explanation of the decode failure
        reason: String,
    },
}

impl ApiError {
    /// Returns true if the service reported the resource as absent (HTTP 404).
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}

/// A secondary zone as represented on the wire by the DNS Services API.
///
/// `transfer_from` entries are returned by the service as addresses with an
/// optional `:port` suffix; port stripping is the read model's concern, not
/// the client's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryZoneInfo {
    /// Service-assigned identifier, immutable after creation
    pub id: String,
    /// The DNS zone name being mirrored
    pub zone: String,
    /// Origin nameserver addresses zone data is transferred from
    pub transfer_from: Vec<String>,
    /// Whether zone transfer is active
    pub enabled: bool,
    /// Free-text annotation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Server-assigned creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    /// Server-assigned last-modification timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<DateTime<Utc>>,
}

/// Request body for creating a secondary zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateSecondaryZoneRequest {
    /// The DNS zone name to mirror
    pub zone: String,
    /// Origin nameserver addresses to transfer zone data from
    pub transfer_from: Vec<String>,
    /// Whether zone transfer starts active
    pub enabled: bool,
    /// Optional free-text annotation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request body for updating the mutable fields of a secondary zone.
///
/// The service replaces all three mutable fields on every update, so the
/// request always carries the full current declared values rather than a
/// diff.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateSecondaryZoneRequest {
    /// Current declared transfer sources
    pub transfer_from: Vec<String>,
    /// Current declared enabled flag
    pub enabled: bool,
    /// Current declared annotation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Response body of the list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ListSecondaryZonesResponse {
    /// Secondary zones in service order
    pub secondary_zones: Vec<SecondaryZoneInfo>,
    /// Number of zones in this page, when reported
    #[serde(default)]
    pub count: Option<i64>,
    /// Total number of zones under the resolver, when reported
    #[serde(default)]
    pub total_count: Option<i64>,
}

/// The secondary zone operations the lifecycle manager and lister consume.
///
/// Implemented by [`DnsSvcsClient`] for production use; tests substitute a
/// scripted implementation.
#[async_trait]
pub trait SecondaryZoneService: Send + Sync {
    /// Create a secondary zone under the given custom resolver.
    async fn create_secondary_zone(
        &self,
        instance_id: &str,
        resolver_id: &str,
        request: &CreateSecondaryZoneRequest,
    ) -> Result<SecondaryZoneInfo, ApiError>;

    /// Fetch a secondary zone by its three-part key.
    async fn get_secondary_zone(
        &self,
        instance_id: &str,
        resolver_id: &str,
        secondary_zone_id: &str,
    ) -> Result<SecondaryZoneInfo, ApiError>;

    /// Replace the mutable fields of a secondary zone.
    async fn update_secondary_zone(
        &self,
        instance_id: &str,
        resolver_id: &str,
        secondary_zone_id: &str,
        request: &UpdateSecondaryZoneRequest,
    ) -> Result<SecondaryZoneInfo, ApiError>;

    /// Delete a secondary zone.
    async fn delete_secondary_zone(
        &self,
        instance_id: &str,
        resolver_id: &str,
        secondary_zone_id: &str,
    ) -> Result<(), ApiError>;

    /// List the secondary zones under a custom resolver, in service order.
    async fn list_secondary_zones(
        &self,
        instance_id: &str,
        resolver_id: &str,
    ) -> Result<ListSecondaryZonesResponse, ApiError>;
}

/// Authenticated HTTP client for the DNS Services API.
#[derive(Debug, Clone)]
pub struct DnsSvcsClient {
    http: HttpClient,
    base_url: Url,
    token: Option<String>,
}

impl DnsSvcsClient {
    /// Create a client for the given API base URL, without authentication.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            http: HttpClient::new(),
            base_url,
            token: None,
        }
    }

    /// Attach a bearer token used on every request.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn collection_url(&self, instance_id: &str, resolver_id: &str) -> String {
        format!(
            "{}/instances/{instance_id}/custom_resolvers/{resolver_id}/secondary_zones",
            self.base_url.as_str().trim_end_matches('/')
        )
    }

    fn zone_url(&self, instance_id: &str, resolver_id: &str, secondary_zone_id: &str) -> String {
        format!(
            "{}/{secondary_zone_id}",
            self.collection_url(instance_id, resolver_id)
        )
    }

    /// Attach authentication, send the request and map non-success statuses
    /// into [`ApiError::Api`] with the raw body preserved.
    async fn send(&self, method: &str, url: &str, request: RequestBuilder) -> Result<Response, ApiError> {
        let mut request = request;
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        debug!(method = %method, url = %url, "DNS Services API request");

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            error!(
                method = %method,
                url = %url,
                status = %status,
                detail = %detail,
                "DNS Services API request failed"
            );
            return Err(ApiError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        debug!(method = %method, url = %url, status = %status, "DNS Services API request successful");
        Ok(response)
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response.json::<T>().await.map_err(|e| ApiError::Decode {
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl SecondaryZoneService for DnsSvcsClient {
    async fn create_secondary_zone(
        &self,
        instance_id: &str,
        resolver_id: &str,
        request: &CreateSecondaryZoneRequest,
    ) -> Result<SecondaryZoneInfo, ApiError> {
        let url = self.collection_url(instance_id, resolver_id);
        let response = self
            .send("POST", &url, self.http.post(&url).json(request))
            .await?;
        Self::decode(response).await
    }

    async fn get_secondary_zone(
        &self,
        instance_id: &str,
        resolver_id: &str,
        secondary_zone_id: &str,
    ) -> Result<SecondaryZoneInfo, ApiError> {
        let url = self.zone_url(instance_id, resolver_id, secondary_zone_id);
        let response = self.send("GET", &url, self.http.get(&url)).await?;
        Self::decode(response).await
    }

    async fn update_secondary_zone(
        &self,
        instance_id: &str,
        resolver_id: &str,
        secondary_zone_id: &str,
        request: &UpdateSecondaryZoneRequest,
    ) -> Result<SecondaryZoneInfo, ApiError> {
        let url = self.zone_url(instance_id, resolver_id, secondary_zone_id);
        let response = self
            .send("PATCH", &url, self.http.patch(&url).json(request))
            .await?;
        Self::decode(response).await
    }

    async fn delete_secondary_zone(
        &self,
        instance_id: &str,
        resolver_id: &str,
        secondary_zone_id: &str,
    ) -> Result<(), ApiError> {
        let url = self.zone_url(instance_id, resolver_id, secondary_zone_id);
        let response = self.send("DELETE", &url, self.http.delete(&url)).await?;
        // 204 No Content on success; drain the body either way
        let status: StatusCode = response.status();
        debug!(status = %status, "secondary zone deleted");
        Ok(())
    }

    async fn list_secondary_zones(
        &self,
        instance_id: &str,
        resolver_id: &str,
    ) -> Result<ListSecondaryZonesResponse, ApiError> {
        let url = self.collection_url(instance_id, resolver_id);
        let response = self.send("GET", &url, self.http.get(&url)).await?;
        Self::decode(response).await
    }
}
