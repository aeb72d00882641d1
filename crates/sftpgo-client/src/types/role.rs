// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

use super::is_zero;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Role {
	#[serde(skip_serializing_if = "is_zero")]
	pub id: i64,
	pub name: String,
	pub description: String,
	pub created_at: i64,
	pub updated_at: i64,
}
