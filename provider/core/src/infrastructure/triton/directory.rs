// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// CloudAPI-backed MachineDirectory
//
// Walks ListMachines with limit/offset until a short page comes back, so the
// caller always sees the complete machine set or an error, never a prefix.

use async_trait::async_trait;
use tracing::debug;

use super::client::CloudApiClient;
use crate::domain::directory::{DirectoryError, MachineDirectory};
use crate::domain::machine::MachineRecord;
use crate::domain::provider_config::MAX_PAGE_SIZE;

pub struct TritonMachineDirectory {
    client: CloudApiClient,
    page_size: u32,
}

impl TritonMachineDirectory {
    pub fn new(client: CloudApiClient) -> Self {
        Self::with_page_size(client, MAX_PAGE_SIZE)
    }

    pub fn with_page_size(client: CloudApiClient, page_size: u32) -> Self {
        Self {
            client,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }
}

#[async_trait]
impl MachineDirectory for TritonMachineDirectory {
    async fn list_machines(&self) -> Result<Vec<MachineRecord>, DirectoryError> {
        let mut machines = Vec::new();
        let mut offset = 0u32;

        loop {
            let page = self.client.list_machines_page(offset, self.page_size).await?;
            let fetched = page.len() as u32;
            machines.extend(page.into_iter().map(MachineRecord::from));

            if fetched < self.page_size {
                break;
            }
            offset += fetched;
        }

        debug!(count = machines.len(), "Listed all machines");
        Ok(machines)
    }

    async fn get_machine(&self, id: &str) -> Result<MachineRecord, DirectoryError> {
        self.client.get_machine(id).await.map(MachineRecord::from)
    }
}
