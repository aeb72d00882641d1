// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! CRUD and list operations per SFTPGo resource.
//!
//! Create and update return nothing: callers read the object back to see the
//! server-assigned fields. Reads ask for confidential data where SFTPGo
//! supports it so encrypted secrets come back in their KMS form.

use reqwest::Method;
use tracing::{debug, instrument};

use crate::client::SftpgoClient;
use crate::error::Result;
use crate::types::{Admin, EventAction, EventRule, Folder, Group, IpListEntry, IpListType, Role, User};

const USERS: &str = "users";
const ADMINS: &str = "admins";
const FOLDERS: &str = "folders";
const GROUPS: &str = "groups";
const ROLES: &str = "roles";
const EVENT_ACTIONS: &str = "eventactions";
const EVENT_RULES: &str = "eventrules";
const IP_LISTS: &str = "iplists";

fn confidential() -> [(&'static str, String); 1] {
	[("confidential_data", "1".to_string())]
}

impl SftpgoClient {
	#[instrument(skip(self, user), fields(username = %user.username))]
	pub async fn create_user(&self, user: &User) -> Result<()> {
		self.write(Method::POST, &[USERS], &[], user).await
	}

	#[instrument(skip(self))]
	pub async fn get_user(&self, username: &str) -> Result<User> {
		self.fetch(&[USERS, username], &confidential()).await
	}

	/// Updates without disconnecting the user's active sessions.
	#[instrument(skip(self, user))]
	pub async fn update_user(&self, username: &str, user: &User) -> Result<()> {
		self
			.write(
				Method::PUT,
				&[USERS, username],
				&[("disconnect", "0".to_string())],
				user,
			)
			.await
	}

	#[instrument(skip(self))]
	pub async fn delete_user(&self, username: &str) -> Result<()> {
		self.remove(&[USERS, username]).await
	}

	#[instrument(skip(self))]
	pub async fn list_users(&self) -> Result<Vec<User>> {
		self.fetch_all(&[USERS]).await
	}

	#[instrument(skip(self, admin), fields(username = %admin.username))]
	pub async fn create_admin(&self, admin: &Admin) -> Result<()> {
		self.write(Method::POST, &[ADMINS], &[], admin).await
	}

	#[instrument(skip(self))]
	pub async fn get_admin(&self, username: &str) -> Result<Admin> {
		self.fetch(&[ADMINS, username], &[]).await
	}

	#[instrument(skip(self, admin))]
	pub async fn update_admin(&self, username: &str, admin: &Admin) -> Result<()> {
		self.write(Method::PUT, &[ADMINS, username], &[], admin).await
	}

	#[instrument(skip(self))]
	pub async fn delete_admin(&self, username: &str) -> Result<()> {
		self.remove(&[ADMINS, username]).await
	}

	#[instrument(skip(self))]
	pub async fn list_admins(&self) -> Result<Vec<Admin>> {
		self.fetch_all(&[ADMINS]).await
	}

	#[instrument(skip(self, folder), fields(name = %folder.name))]
	pub async fn create_folder(&self, folder: &Folder) -> Result<()> {
		self.write(Method::POST, &[FOLDERS], &[], folder).await
	}

	#[instrument(skip(self))]
	pub async fn get_folder(&self, name: &str) -> Result<Folder> {
		self.fetch(&[FOLDERS, name], &confidential()).await
	}

	#[instrument(skip(self, folder))]
	pub async fn update_folder(&self, name: &str, folder: &Folder) -> Result<()> {
		self.write(Method::PUT, &[FOLDERS, name], &[], folder).await
	}

	#[instrument(skip(self))]
	pub async fn delete_folder(&self, name: &str) -> Result<()> {
		self.remove(&[FOLDERS, name]).await
	}

	#[instrument(skip(self))]
	pub async fn list_folders(&self) -> Result<Vec<Folder>> {
		self.fetch_all(&[FOLDERS]).await
	}

	#[instrument(skip(self, group), fields(name = %group.name))]
	pub async fn create_group(&self, group: &Group) -> Result<()> {
		self.write(Method::POST, &[GROUPS], &[], group).await
	}

	#[instrument(skip(self))]
	pub async fn get_group(&self, name: &str) -> Result<Group> {
		self.fetch(&[GROUPS, name], &confidential()).await
	}

	#[instrument(skip(self, group))]
	pub async fn update_group(&self, name: &str, group: &Group) -> Result<()> {
		self.write(Method::PUT, &[GROUPS, name], &[], group).await
	}

	#[instrument(skip(self))]
	pub async fn delete_group(&self, name: &str) -> Result<()> {
		self.remove(&[GROUPS, name]).await
	}

	#[instrument(skip(self))]
	pub async fn list_groups(&self) -> Result<Vec<Group>> {
		self.fetch_all(&[GROUPS]).await
	}

	#[instrument(skip(self, role), fields(name = %role.name))]
	pub async fn create_role(&self, role: &Role) -> Result<()> {
		self.write(Method::POST, &[ROLES], &[], role).await
	}

	#[instrument(skip(self))]
	pub async fn get_role(&self, name: &str) -> Result<Role> {
		self.fetch(&[ROLES, name], &[]).await
	}

	#[instrument(skip(self, role))]
	pub async fn update_role(&self, name: &str, role: &Role) -> Result<()> {
		self.write(Method::PUT, &[ROLES, name], &[], role).await
	}

	#[instrument(skip(self))]
	pub async fn delete_role(&self, name: &str) -> Result<()> {
		self.remove(&[ROLES, name]).await
	}

	#[instrument(skip(self))]
	pub async fn list_roles(&self) -> Result<Vec<Role>> {
		self.fetch_all(&[ROLES]).await
	}

	#[instrument(skip(self, action), fields(name = %action.name))]
	pub async fn create_event_action(&self, action: &EventAction) -> Result<()> {
		self.write(Method::POST, &[EVENT_ACTIONS], &[], action).await
	}

	#[instrument(skip(self))]
	pub async fn get_event_action(&self, name: &str) -> Result<EventAction> {
		self.fetch(&[EVENT_ACTIONS, name], &confidential()).await
	}

	#[instrument(skip(self, action))]
	pub async fn update_event_action(&self, name: &str, action: &EventAction) -> Result<()> {
		self.write(Method::PUT, &[EVENT_ACTIONS, name], &[], action).await
	}

	#[instrument(skip(self))]
	pub async fn delete_event_action(&self, name: &str) -> Result<()> {
		self.remove(&[EVENT_ACTIONS, name]).await
	}

	#[instrument(skip(self))]
	pub async fn list_event_actions(&self) -> Result<Vec<EventAction>> {
		self.fetch_all(&[EVENT_ACTIONS]).await
	}

	#[instrument(skip(self, rule), fields(name = %rule.name))]
	pub async fn create_event_rule(&self, rule: &EventRule) -> Result<()> {
		self.write(Method::POST, &[EVENT_RULES], &[], rule).await
	}

	#[instrument(skip(self))]
	pub async fn get_event_rule(&self, name: &str) -> Result<EventRule> {
		self.fetch(&[EVENT_RULES, name], &[]).await
	}

	#[instrument(skip(self, rule))]
	pub async fn update_event_rule(&self, name: &str, rule: &EventRule) -> Result<()> {
		self.write(Method::PUT, &[EVENT_RULES, name], &[], rule).await
	}

	#[instrument(skip(self))]
	pub async fn delete_event_rule(&self, name: &str) -> Result<()> {
		self.remove(&[EVENT_RULES, name]).await
	}

	#[instrument(skip(self))]
	pub async fn list_event_rules(&self) -> Result<Vec<EventRule>> {
		self.fetch_all(&[EVENT_RULES]).await
	}

	#[instrument(skip(self, entry), fields(list_type = %entry.list_type, ipornet = %entry.ipornet))]
	pub async fn create_ip_list_entry(&self, entry: &IpListEntry) -> Result<()> {
		let list_type = entry.list_type.to_string();
		self.write(Method::POST, &[IP_LISTS, list_type.as_str()], &[], entry).await
	}

	#[instrument(skip(self))]
	pub async fn get_ip_list_entry(&self, list_type: IpListType, ipornet: &str) -> Result<IpListEntry> {
		let list_type = list_type.to_string();
		self.fetch(&[IP_LISTS, list_type.as_str(), ipornet], &[]).await
	}

	#[instrument(skip(self, entry), fields(list_type = %entry.list_type, ipornet = %entry.ipornet))]
	pub async fn update_ip_list_entry(&self, entry: &IpListEntry) -> Result<()> {
		let list_type = entry.list_type.to_string();
		self
			.write(Method::PUT, &[IP_LISTS, list_type.as_str(), entry.ipornet.as_str()], &[], entry)
			.await
	}

	#[instrument(skip(self))]
	pub async fn delete_ip_list_entry(&self, list_type: IpListType, ipornet: &str) -> Result<()> {
		let list_type = list_type.to_string();
		self.remove(&[IP_LISTS, list_type.as_str(), ipornet]).await
	}

	/// IP lists page with a `from` cursor (the last `ipornet` seen) rather than
	/// an offset.
	#[instrument(skip(self))]
	pub async fn list_ip_list_entries(&self, list_type: IpListType) -> Result<Vec<IpListEntry>> {
		let list_type = list_type.to_string();
		let limit = self.page_size();
		let mut entries: Vec<IpListEntry> = Vec::new();
		loop {
			let mut query = vec![("limit", limit.to_string()), ("order", "ASC".to_string())];
			if let Some(last) = entries.last() {
				query.push(("from", last.ipornet.clone()));
			}
			let page: Vec<IpListEntry> = self.fetch(&[IP_LISTS, list_type.as_str()], &query).await?;
			let received = page.len();
			entries.extend(page);
			if received < limit {
				break;
			}
		}
		debug!(count = entries.len(), "listed IP list entries");
		Ok(entries)
	}
}
