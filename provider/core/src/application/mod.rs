// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Application
//!
//! Use cases built over the domain contracts: identity discovery, identifier
//! resolution and the provider surface handed to the orchestrator.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Orchestrates directory and metadata lookups per request

pub mod metadata_probe;
pub mod identity_resolver;
pub mod instances;
pub mod provider;

pub use identity_resolver::IdentityResolver;
pub use instances::TritonInstances;
pub use metadata_probe::{MetadataProbe, DEFAULT_PROBE_TIMEOUT};
pub use provider::TritonCloudProvider;
