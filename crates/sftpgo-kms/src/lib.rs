// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! SFTPGo KMS secrets.
//!
//! SFTPGo stores credentials (filesystem access keys, passphrases, HTTP
//! passwords...) as a small structure: a status telling how the payload is
//! protected, the payload itself, and optional key material. This crate holds
//! that structure as it travels over the REST API ([`KmsSecret`]) and the
//! single-string form used in Terraform configuration ([`encode`]/[`decode`]).
//!
//! # String form
//!
//! ```text
//! Plain                         -> payload
//! anything else                 -> $<status>$<key>$<len(additional_data)>$<additional_data><payload>
//! ```
//!
//! Decoding is permissive: a string that does not match the structured form is
//! a plain payload, never an error.

mod codec;
mod secret;
mod status;

pub use codec::{decode, encode};
pub use secret::KmsSecret;
pub use status::{SecretStatus, UnknownStatus};
