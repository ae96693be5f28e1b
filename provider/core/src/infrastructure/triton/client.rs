// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Triton CloudAPI Client
//!
//! Thin, signed HTTP access to the two machine endpoints the provider uses.
//! Pagination is exposed page by page; exhausting it is the directory's job.
//!
//! # API Endpoints
//!
//! - `GET /{account}/machines?limit=N&offset=M` - One page of machines
//! - `GET /{account}/machines/{id}` - One machine (`410 Gone` once deleted)

use chrono::Utc;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::auth::{http_date, RequestSigner};
use crate::domain::directory::DirectoryError;
use crate::domain::machine::{MachineRecord, MachineState};

/// CloudAPI version range requested on every call
const API_VERSION: &str = "~8";

pub struct CloudApiClient {
    /// HTTP client for communicating with CloudAPI
    client: Client,

    /// Endpoint base URL (e.g., "https://us-sw-1.api.joyent.com")
    endpoint: String,

    account: String,

    signer: Arc<dyn RequestSigner>,
}

impl CloudApiClient {
    pub fn new(
        endpoint: impl Into<String>,
        account: impl Into<String>,
        signer: Arc<dyn RequestSigner>,
        timeout: Duration,
    ) -> Result<Self, DirectoryError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DirectoryError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            account: account.into(),
            signer,
        })
    }

    /// Build full URL for an account-scoped path
    fn build_url(&self, path: &str) -> String {
        format!("{}/{}{}", self.endpoint, self.account, path)
    }

    /// One page of the account's machines
    pub async fn list_machines_page(&self, offset: u32, limit: u32) -> Result<Vec<MachineDto>, DirectoryError> {
        let url = self.build_url("/machines");
        debug!(offset, limit, "CloudAPI ListMachines");

        let request = self
            .client
            .get(&url)
            .query(&[("limit", limit.to_string()), ("offset", offset.to_string())]);
        let response = self.send(request).await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            status => Err(Self::api_error(status, response).await),
        }
    }

    pub async fn get_machine(&self, id: &str) -> Result<MachineDto, DirectoryError> {
        let url = self.build_url(&format!("/machines/{}", id));
        debug!(machine_id = id, "CloudAPI GetMachine");

        let response = self.send(self.client.get(&url)).await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            StatusCode::NOT_FOUND | StatusCode::GONE => Err(DirectoryError::NotFound(id.to_string())),
            status => Err(Self::api_error(status, response).await),
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, DirectoryError> {
        let date = http_date(Utc::now());
        let authorization = self
            .signer
            .authorization(&date)
            .map_err(|e| DirectoryError::Signing(e.to_string()))?;

        let response = request
            .header("Date", &date)
            .header("Authorization", authorization)
            .header("Accept", "application/json")
            .header("Accept-Version", API_VERSION)
            .send()
            .await?;
        Ok(response)
    }

    async fn api_error(status: StatusCode, response: Response) -> DirectoryError {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|e| format!("{}: {}", e.code, e.message))
            .unwrap_or_else(|_| if body.is_empty() { format!("HTTP {}", status) } else { body });

        DirectoryError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

// ============================================================================
// CloudAPI Response Types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct MachineDto {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    /// "smartmachine" or "virtualmachine"
    #[serde(rename = "type", default)]
    pub machine_type: Option<String>,

    #[serde(default)]
    pub brand: Option<String>,

    pub state: MachineState,

    #[serde(rename = "primaryIp", default)]
    pub primary_ip: Option<String>,

    #[serde(default)]
    pub ips: Vec<String>,

    #[serde(default)]
    pub package: Option<String>,
}

impl From<MachineDto> for MachineRecord {
    fn from(dto: MachineDto) -> Self {
        let instance_class = dto
            .brand
            .or(dto.machine_type)
            .unwrap_or_default();

        MachineRecord {
            host_name: dto.name.unwrap_or_default(),
            primary_ip: dto.primary_ip.unwrap_or_default(),
            id: dto.id,
            state: dto.state,
            instance_class,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
    message: String,
}
