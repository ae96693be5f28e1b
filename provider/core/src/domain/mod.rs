// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain
//!
//! Node and machine value types plus the contracts the resolver depends on.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Owns the identifier namespaces and the error taxonomy

pub mod node;
pub mod machine;
pub mod identity;
pub mod directory;
pub mod metadata;
pub mod cloud_provider;
pub mod provider_config;
