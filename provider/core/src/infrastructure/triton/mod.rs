// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Triton CloudAPI Infrastructure
//!
//! Concrete implementation of the MachineDirectory trait over CloudAPI,
//! plus the HTTP Signature authentication it requires.

pub mod auth;
pub mod client;
pub mod directory;

pub use auth::{AuthError, PrivateKeySigner, RequestSigner};
pub use client::{CloudApiClient, MachineDto};
pub use directory::TritonMachineDirectory;
