// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod mdata;
pub mod triton;
pub mod mock;

pub use mdata::MdataGetSource;
pub use mock::{MockMachineDirectory, MockMetadataSource};
pub use triton::{CloudApiClient, PrivateKeySigner, RequestSigner, TritonMachineDirectory};
