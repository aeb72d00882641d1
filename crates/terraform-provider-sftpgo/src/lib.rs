// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Terraform provider for SFTPGo.
//!
//! Resources and data sources map Terraform attribute models onto the SFTPGo
//! REST API through [`convert`]. [`SftpgoProvider`] is served over the
//! Terraform plugin protocol by the `terraform-provider-sftpgo` binary.

pub mod convert;
pub mod data_sources;
pub mod diag;
pub mod models;
pub mod provider;
pub mod resources;
pub mod schema;

pub use provider::SftpgoProvider;
