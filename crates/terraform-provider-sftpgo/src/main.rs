// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Plugin binary started by Terraform.

use clap::Parser;
use terraform_provider_sftpgo::SftpgoProvider;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// SFTPGo Terraform provider plugin.
#[derive(Parser, Debug)]
#[command(name = "terraform-provider-sftpgo", version)]
struct Args {
	/// Tracing filter directives, written to stderr.
	#[arg(long, env = "SFTPGO_PROVIDER_LOG", default_value = "info")]
	log_filter: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	// stdout carries the plugin handshake, so logs go to stderr.
	tracing_subscriber::registry()
		.with(tracing_subscriber::EnvFilter::try_new(&args.log_filter)?)
		.with(
			tracing_subscriber::fmt::layer()
				.with_writer(std::io::stderr)
				.with_ansi(false),
		)
		.init();

	tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting terraform-provider-sftpgo");

	tf_provider::serve("sftpgo", SftpgoProvider::new())
		.await
		.map_err(|e| anyhow::anyhow!("{e}"))
}
