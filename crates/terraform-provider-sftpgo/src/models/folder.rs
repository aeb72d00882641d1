// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Virtual folders: the standalone `sftpgo_folder` resource and the
//! `virtual_folders` mapping blocks of users and groups.

use serde::{Deserialize, Serialize};
use sftpgo_client::types::{Folder, VirtualFolder};
use tf_provider::{Block, Value};

use super::filesystem::{self, FilesystemModel};
use super::{replace_if_changed, ResourceModel};
use crate::convert::value::{
	computed, int, known, non_zero, non_zero_object, object, string, with_nested, IntValue,
	StringValue,
};
use crate::convert::{ApiModel, AttrPath, ConvertError, Result};
use crate::schema::BlockBuilder;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderModel {
	pub id: StringValue,
	pub numeric_id: IntValue,
	pub name: StringValue,
	pub mapped_path: StringValue,
	pub description: StringValue,
	pub used_quota_size: IntValue,
	pub used_quota_files: IntValue,
	pub last_quota_update: IntValue,
	pub filesystem: Value<FilesystemModel>,
}

impl ApiModel for FolderModel {
	type Api = Folder;

	fn to_api(&self, path: &AttrPath) -> Result<Folder> {
		Ok(Folder {
			id: computed(&self.numeric_id),
			name: string(&self.name, &path.attr("name"))?,
			mapped_path: string(&self.mapped_path, &path.attr("mapped_path"))?,
			description: string(&self.description, &path.attr("description"))?,
			used_quota_size: computed(&self.used_quota_size),
			used_quota_files: computed(&self.used_quota_files),
			last_quota_update: computed(&self.last_quota_update),
			filesystem: object(&self.filesystem, &path.attr("filesystem"))?,
		})
	}

	fn from_api(api: &Folder) -> Self {
		Self {
			id: known(&api.name),
			numeric_id: known(&api.id),
			name: known(&api.name),
			mapped_path: non_zero(&api.mapped_path),
			description: non_zero(&api.description),
			used_quota_size: known(&api.used_quota_size),
			used_quota_files: known(&api.used_quota_files),
			last_quota_update: known(&api.last_quota_update),
			filesystem: non_zero_object(&api.filesystem),
		}
	}
}

impl ResourceModel for FolderModel {
	fn id(&self) -> &StringValue {
		&self.id
	}

	fn computed_unknown(&mut self) {
		self.id = self.name.clone();
		self.numeric_id = Value::Unknown;
		self.used_quota_size = Value::Unknown;
		self.used_quota_files = Value::Unknown;
		self.last_quota_update = Value::Unknown;
	}

	fn merge_computed(&mut self, server: &Self) {
		self.id = server.id.clone();
		self.numeric_id = server.numeric_id.clone();
		self.used_quota_size = server.used_quota_size.clone();
		self.used_quota_files = server.used_quota_files.clone();
		self.last_quota_update = server.last_quota_update.clone();
	}

	fn merge_secrets(&mut self, desired: &Self) {
		with_nested(&mut self.filesystem, &desired.filesystem, |t, s| t.merge_secrets(s));
	}

	fn requires_replace(&self, prior: &Self) -> Vec<AttrPath> {
		let mut paths = Vec::new();
		replace_if_changed(&mut paths, "name", &self.name, &prior.name);
		paths
	}

	fn validate(&self) -> Vec<ConvertError> {
		let mut errors = Vec::new();
		if let Value::Value(fs) = &self.filesystem {
			fs.validate(&AttrPath::root().attr("filesystem"), &mut errors);
		}
		errors
	}
}

pub fn block() -> Block {
	BlockBuilder::new("A virtual folder that can be mapped into users and groups.")
		.computed_string("id", "Same as `name`.")
		.computed_int("numeric_id", "Numeric id assigned by SFTPGo.")
		.required_string("name", "Unique folder name.")
		.optional_string("mapped_path", "Absolute local path, for local and encrypted backends.")
		.optional_string("description", "Free form description.")
		.computed_int("used_quota_size", "Bytes used.")
		.computed_int("used_quota_files", "Files stored.")
		.computed_int("last_quota_update", "Last quota scan, Unix milliseconds.")
		.single("filesystem", filesystem::block())
		.build()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualFolderModel {
	pub name: StringValue,
	pub virtual_path: StringValue,
	pub quota_size: IntValue,
	pub quota_files: IntValue,
}

impl ApiModel for VirtualFolderModel {
	type Api = VirtualFolder;

	fn to_api(&self, path: &AttrPath) -> Result<VirtualFolder> {
		Ok(VirtualFolder {
			name: string(&self.name, &path.attr("name"))?,
			virtual_path: string(&self.virtual_path, &path.attr("virtual_path"))?,
			quota_size: int(&self.quota_size, &path.attr("quota_size"))?,
			quota_files: int(&self.quota_files, &path.attr("quota_files"))?,
		})
	}

	fn from_api(api: &VirtualFolder) -> Self {
		Self {
			name: non_zero(&api.name),
			virtual_path: non_zero(&api.virtual_path),
			quota_size: non_zero(&api.quota_size),
			quota_files: non_zero(&api.quota_files),
		}
	}
}

pub fn virtual_folder_block() -> Block {
	BlockBuilder::new("Maps an existing folder into the virtual filesystem.")
		.required_string("name", "Name of the `sftpgo_folder`.")
		.required_string("virtual_path", "Absolute path the folder is exposed at.")
		.optional_int("quota_size", "-1 includes the folder in the user quota, 0 is unlimited.")
		.optional_int("quota_files", "-1 includes the folder in the user quota, 0 is unlimited.")
		.build()
}

#[cfg(test)]
mod tests {
	use super::*;
	use sftpgo_client::types::{CryptConfig, Filesystem, OsConfig};
	use sftpgo_kms::KmsSecret;

	#[test]
	fn local_folder_without_tuning_has_no_filesystem_block() {
		let model = FolderModel::from_api(&Folder {
			id: 4,
			name: "shared".to_string(),
			mapped_path: "/srv/shared".to_string(),
			filesystem: Filesystem::Local(OsConfig::default()),
			..Default::default()
		});
		assert_eq!(model.filesystem, Value::Null);
		assert_eq!(
			model.to_api(&AttrPath::root()).unwrap().filesystem,
			Filesystem::Local(OsConfig::default())
		);
	}

	#[test]
	fn validate_reports_bad_provider() {
		let mut model = FolderModel::from_api(&Folder {
			name: "f".to_string(),
			filesystem: Filesystem::Crypt(CryptConfig {
				passphrase: Some(KmsSecret::plain("p")),
				..Default::default()
			}),
			..Default::default()
		});
		assert!(model.validate().is_empty());

		if let Value::Value(fs) = &mut model.filesystem {
			fs.provider = Value::Value(9);
		}
		let errors = model.validate();
		assert_eq!(errors.len(), 1);
		assert_eq!(errors[0].path.to_string(), "filesystem.provider");
	}

	#[test]
	fn negative_virtual_folder_quota_round_trips() {
		let api = VirtualFolder {
			name: "shared".to_string(),
			virtual_path: "/shared".to_string(),
			quota_size: -1,
			quota_files: -1,
		};
		let model = VirtualFolderModel::from_api(&api);
		assert_eq!(model.quota_size, Value::Value(-1));
		assert_eq!(model.to_api(&AttrPath::root()).unwrap(), api);
	}
}
