// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! In-memory doubles for the directory and metadata contracts, with call
//! counters so tests can assert which resolution path ran.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domain::directory::{DirectoryError, MachineDirectory};
use crate::domain::machine::MachineRecord;
use crate::domain::metadata::{MetadataError, MetadataSource};

pub struct MockMachineDirectory {
    pub machines: Arc<Mutex<Vec<MachineRecord>>>,
    /// When set, every call fails with a 503
    pub unavailable: Arc<Mutex<bool>>,
    list_calls: AtomicUsize,
    get_calls: AtomicUsize,
}

impl MockMachineDirectory {
    pub fn new(machines: Vec<MachineRecord>) -> Self {
        Self {
            machines: Arc::new(Mutex::new(machines)),
            unavailable: Arc::new(Mutex::new(false)),
            list_calls: AtomicUsize::new(0),
            get_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }

    pub fn remove(&self, id: &str) {
        self.machines.lock().unwrap().retain(|m| m.id != id);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), DirectoryError> {
        if *self.unavailable.lock().unwrap() {
            return Err(DirectoryError::Api {
                status: 503,
                message: "ServiceUnavailable: mock directory offline".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl MachineDirectory for MockMachineDirectory {
    async fn list_machines(&self) -> Result<Vec<MachineRecord>, DirectoryError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.machines.lock().unwrap().clone())
    }

    async fn get_machine(&self, id: &str) -> Result<MachineRecord, DirectoryError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        self.machines
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))
    }
}

/// Canned metadata answers; keys absent from the map fail the query
pub struct MockMetadataSource {
    pub values: HashMap<String, String>,
    /// Simulated latency before answering
    pub delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockMetadataSource {
    pub fn new(values: impl IntoIterator<Item = (&'static str, &'static str)>) -> Self {
        Self {
            values: values
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataSource for MockMetadataSource {
    async fn get(&self, key: &str) -> Result<String, MetadataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| MetadataError::CommandFailed {
                key: key.to_string(),
                reason: "No metadata for key".to_string(),
            })
    }
}
