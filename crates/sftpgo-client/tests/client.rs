// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::time::Duration;

use serde_json::json;
use sftpgo_client::types::{IpListEntry, IpListMode, IpListType, User};
use sftpgo_client::{ClientConfig, ClientError, Credentials, SftpgoClient};
use sftpgo_common_http::RetryConfig;
use sftpgo_common_secret::SecretString;
use wiremock::matchers::{basic_auth, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_config(page_size: usize) -> ClientConfig {
	ClientConfig {
		request_timeout: Duration::from_secs(5),
		retry_config: RetryConfig {
			max_attempts: 3,
			base_delay: Duration::from_millis(1),
			max_delay: Duration::from_millis(5),
			backoff_factor: 2.0,
			jitter: false,
		},
		page_size,
	}
}

fn api_key_client(server: &MockServer) -> SftpgoClient {
	SftpgoClient::builder()
		.base_url(server.uri())
		.credentials(Credentials::ApiKey(SecretString::from("test-key")))
		.header("X-Tenant", "acme")
		.config(fast_config(100))
		.build()
		.unwrap()
}

#[tokio::test]
async fn api_key_and_custom_headers_are_sent() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/api/v2/users/alice"))
		.and(query_param("confidential_data", "1"))
		.and(header("X-SFTPGO-API-KEY", "test-key"))
		.and(header("X-Tenant", "acme"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({
			"id": 1,
			"status": 1,
			"username": "alice",
			"home_dir": "/srv/alice",
			"permissions": {"/": ["*"]}
		})))
		.expect(1)
		.mount(&server)
		.await;

	let user = api_key_client(&server).get_user("alice").await.unwrap();
	assert_eq!(user.username, "alice");
	assert_eq!(user.permissions["/"], vec!["*"]);
}

#[tokio::test]
async fn basic_credentials_fetch_and_reuse_a_token() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/api/v2/token"))
		.and(basic_auth("admin", "password"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({
			"access_token": "jwt-token",
			"expires_at": "2099-01-01T00:00:00Z"
		})))
		.expect(1)
		.mount(&server)
		.await;
	Mock::given(method("GET"))
		.and(path("/api/v2/roles/auditors"))
		.and(header("Authorization", "Bearer jwt-token"))
		.respond_with(
			ResponseTemplate::new(200).set_body_json(json!({"id": 4, "name": "auditors"})),
		)
		.expect(2)
		.mount(&server)
		.await;

	let client = SftpgoClient::builder()
		.base_url(server.uri())
		.credentials(Credentials::Basic {
			username: "admin".to_string(),
			password: SecretString::from("password"),
		})
		.config(fast_config(100))
		.build()
		.unwrap();

	assert_eq!(client.get_role("auditors").await.unwrap().name, "auditors");
	assert_eq!(client.get_role("auditors").await.unwrap().id, 4);
}

#[tokio::test]
async fn rejected_login_is_an_auth_error() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/api/v2/token"))
		.respond_with(ResponseTemplate::new(401).set_body_string("invalid credentials"))
		.mount(&server)
		.await;

	let client = SftpgoClient::builder()
		.base_url(server.uri())
		.credentials(Credentials::Basic {
			username: "admin".to_string(),
			password: SecretString::from("wrong"),
		})
		.config(fast_config(100))
		.build()
		.unwrap();

	let err = client.get_role("auditors").await.unwrap_err();
	assert!(matches!(err, ClientError::Auth(_)), "unexpected error {err:?}");
}

#[tokio::test]
async fn api_errors_carry_status_and_message() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/api/v2/folders/missing"))
		.respond_with(ResponseTemplate::new(404).set_body_json(json!({
			"error": "folder \"missing\" does not exist",
			"message": ""
		})))
		.mount(&server)
		.await;

	let err = api_key_client(&server).get_folder("missing").await.unwrap_err();
	assert!(err.is_not_found());
	match err {
		ClientError::Api { status, message } => {
			assert_eq!(status, 404);
			assert_eq!(message, "folder \"missing\" does not exist");
		}
		other => panic!("unexpected error {other:?}"),
	}
}

#[tokio::test]
async fn reads_are_retried_on_server_errors() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/api/v2/roles/ops"))
		.respond_with(ResponseTemplate::new(503))
		.up_to_n_times(2)
		.expect(2)
		.mount(&server)
		.await;
	Mock::given(method("GET"))
		.and(path("/api/v2/roles/ops"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "ops"})))
		.expect(1)
		.mount(&server)
		.await;

	let role = api_key_client(&server).get_role("ops").await.unwrap();
	assert_eq!(role.name, "ops");
}

#[tokio::test]
async fn writes_are_not_retried() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path("/api/v2/users"))
		.respond_with(ResponseTemplate::new(503))
		.expect(1)
		.mount(&server)
		.await;

	let user = User {
		username: "bob".to_string(),
		status: 1,
		..Default::default()
	};
	let err = api_key_client(&server).create_user(&user).await.unwrap_err();
	assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn user_update_keeps_sessions_connected() {
	let server = MockServer::start().await;
	Mock::given(method("PUT"))
		.and(path("/api/v2/users/bob"))
		.and(query_param("disconnect", "0"))
		.and(body_partial_json(json!({"username": "bob", "home_dir": "/srv/bob"})))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "User updated"})))
		.expect(1)
		.mount(&server)
		.await;

	let user = User {
		username: "bob".to_string(),
		home_dir: "/srv/bob".to_string(),
		..Default::default()
	};
	api_key_client(&server)
		.update_user("bob", &user)
		.await
		.unwrap();
}

#[tokio::test]
async fn ip_list_paths_are_escaped() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/api/v2/iplists/1/10.0.0.0%2F8"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({
			"ipornet": "10.0.0.0/8",
			"type": 1,
			"mode": 1,
			"protocols": 3
		})))
		.expect(1)
		.mount(&server)
		.await;
	Mock::given(method("DELETE"))
		.and(path("/api/v2/iplists/1/10.0.0.0%2F8"))
		.respond_with(ResponseTemplate::new(200))
		.expect(1)
		.mount(&server)
		.await;

	let client = api_key_client(&server);
	let entry = client
		.get_ip_list_entry(IpListType::AllowList, "10.0.0.0/8")
		.await
		.unwrap();
	assert_eq!(
		entry,
		IpListEntry {
			ipornet: "10.0.0.0/8".to_string(),
			list_type: IpListType::AllowList,
			mode: IpListMode::Allow,
			protocols: 3,
			..Default::default()
		}
	);
	client
		.delete_ip_list_entry(IpListType::AllowList, "10.0.0.0/8")
		.await
		.unwrap();
}

#[tokio::test]
async fn listing_pages_until_a_short_page() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/api/v2/users"))
		.and(query_param("offset", "0"))
		.and(query_param("limit", "2"))
		.and(query_param("order", "ASC"))
		.respond_with(
			ResponseTemplate::new(200)
				.set_body_json(json!([{"username": "a"}, {"username": "b"}])),
		)
		.expect(1)
		.mount(&server)
		.await;
	Mock::given(method("GET"))
		.and(path("/api/v2/users"))
		.and(query_param("offset", "2"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!([{"username": "c"}])))
		.expect(1)
		.mount(&server)
		.await;

	let client = SftpgoClient::builder()
		.base_url(server.uri())
		.credentials(Credentials::ApiKey(SecretString::from("test-key")))
		.config(fast_config(2))
		.build()
		.unwrap();

	let users = client.list_users().await.unwrap();
	let names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
	assert_eq!(names, ["a", "b", "c"]);
}

#[tokio::test]
async fn ip_list_listing_uses_a_cursor() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/api/v2/iplists/2"))
		.and(query_param("from", "192.168.1.1/32"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
		.expect(1)
		.mount(&server)
		.await;
	Mock::given(method("GET"))
		.and(path("/api/v2/iplists/2"))
		.and(query_param("limit", "2"))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!([
			{"ipornet": "10.0.0.1/32", "type": 2, "mode": 2},
			{"ipornet": "192.168.1.1/32", "type": 2, "mode": 2}
		])))
		.expect(1)
		.mount(&server)
		.await;

	let client = SftpgoClient::builder()
		.base_url(server.uri())
		.credentials(Credentials::ApiKey(SecretString::from("test-key")))
		.config(fast_config(2))
		.build()
		.unwrap();

	let entries = client
		.list_ip_list_entries(IpListType::Defender)
		.await
		.unwrap();
	assert_eq!(entries.len(), 2);
	assert!(entries.iter().all(|e| e.mode == IpListMode::Deny));
}
