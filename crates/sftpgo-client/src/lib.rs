// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Client for the SFTPGo REST API (`/api/v2`).
//!
//! ```ignore
//! use sftpgo_client::{Credentials, SftpgoClient};
//!
//! let client = SftpgoClient::builder()
//!     .base_url("https://sftpgo.example.com")
//!     .credentials(Credentials::ApiKey("key".into()))
//!     .build()?;
//! let user = client.get_user("alice").await?;
//! ```

mod auth;
mod client;
mod endpoints;
pub mod error;
pub mod types;

pub use auth::{Credentials, API_KEY_HEADER};
pub use client::{ClientConfig, SftpgoClient, SftpgoClientBuilder};
pub use error::{ClientError, Result};
pub use sftpgo_kms::{KmsSecret, SecretStatus};
