// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # `triton-provider-core`: Instance Resolution for the Triton Cloud Provider
//!
//! Maps the orchestrator's node identifiers (host name, primary IP or machine
//! UUID) onto Triton CloudAPI machine records and derives node facts from them.
//!
//! ## Crate Layout
//!
//! | Module | Layer | Contents |
//! |--------|-------|----------|
//! | [`domain`] | Domain | `NodeIdentifier`, `MachineRecord`, `LocalIdentity`, directory and metadata traits |
//! | [`application`] | Application | `MetadataProbe`, `IdentityResolver`, `TritonInstances`, `TritonCloudProvider` |
//! | [`infrastructure`] | Infrastructure | CloudAPI client and signer, `mdata-get` source, in-memory mocks |

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;
