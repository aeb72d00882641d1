// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client builder with consistent User-Agent header.

use reqwest::{Client, ClientBuilder};

const PRODUCT: &str = "terraform-provider-sftpgo";

/// Creates a new HTTP client builder with the provider User-Agent header.
///
/// # Example
/// ```ignore
/// let client = sftpgo_common_http::builder()
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// `terraform-provider-sftpgo/{version} ({os}-{arch})`, so SFTPGo's access
/// log tells provider traffic apart from the web admin.
pub fn user_agent() -> String {
	format!(
		"{PRODUCT}/{} ({}-{})",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::OS,
		std::env::consts::ARCH
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn user_agent_names_product_and_platform() {
		let ua = user_agent();
		assert!(ua.starts_with("terraform-provider-sftpgo/"));
		assert!(ua.contains(std::env::consts::OS));
		assert!(ua.ends_with(')'));
	}

	#[test]
	fn builder_produces_a_client() {
		assert!(builder().build().is_ok());
	}
}
