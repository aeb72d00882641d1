// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use crate::secret::KmsSecret;
use crate::status::SecretStatus;

const SEPARATOR: char = '$';

/// Renders a secret as a single string.
///
/// An empty secret encodes to `""` and a plain one to its bare payload.
pub fn encode(secret: &KmsSecret) -> String {
	match secret.status {
		None => String::new(),
		Some(SecretStatus::Plain) => secret.payload.clone(),
		Some(status) => format!(
			"{SEPARATOR}{status}{SEPARATOR}{key}{SEPARATOR}{len}{SEPARATOR}{additional_data}{payload}",
			key = secret.key,
			len = secret.additional_data.len(),
			additional_data = secret.additional_data,
			payload = secret.payload,
		),
	}
}

/// Parses the string form produced by [`encode`].
///
/// Anything that is not a well-formed structured secret is a plain payload.
pub fn decode(input: &str) -> KmsSecret {
	parse_structured(input).unwrap_or_else(|| KmsSecret::plain(input))
}

fn parse_structured(input: &str) -> Option<KmsSecret> {
	let mut parts = input.splitn(5, SEPARATOR);
	let leading = parts.next()?;
	let status = parts.next()?;
	let key = parts.next()?;
	let len = parts.next()?;
	let rest = parts.next()?;

	if !leading.is_empty() {
		return None;
	}
	let status: SecretStatus = status.parse().ok()?;
	if status.is_plain() {
		return None;
	}
	// An optional `+` is accepted, a `-` never parses as `usize`.
	let len: usize = len.parse().ok()?;
	if rest.len() <= len || !rest.is_char_boundary(len) {
		return None;
	}
	let (additional_data, payload) = rest.split_at(len);

	Some(KmsSecret::new(status, key, additional_data, payload))
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn encodes_structured_form() {
		let secret = KmsSecret::new(SecretStatus::Aes256Gcm, "k1", "ad", "pay");
		assert_eq!(encode(&secret), "$AES-256-GCM$k1$2$adpay");
		assert_eq!(decode("$AES-256-GCM$k1$2$adpay"), secret);
	}

	#[test]
	fn legacy_label_round_trips_byte_for_byte() {
		let secret = KmsSecret::new(SecretStatus::Aes256GcmLegacy, "k1", "ad", "pay");
		assert_eq!(encode(&secret), "$AES256-GCM$k1$2$adpay");
		assert_eq!(decode("$AES256-GCM$k1$2$adpay"), secret);
		assert_eq!(encode(&decode("$AES256-GCM$k1$2$adpay")), "$AES256-GCM$k1$2$adpay");
	}

	#[test]
	fn plain_and_empty_encode_verbatim() {
		assert_eq!(encode(&KmsSecret::plain("$not$parsed")), "$not$parsed");
		assert_eq!(encode(&KmsSecret::default()), "");
	}

	#[test]
	fn malformed_inputs_are_plain() {
		for input in [
			"",
			"password",
			"x$AES-256-GCM$k$0$p",
			"$Unknown$k$0$payload",
			"$Plain$k$0$payload",
			"$AES-256-GCM$k$two$payload",
			"$AES-256-GCM$k$-1$payload",
			"$AES-256-GCM$k$5$short",
			"$AES-256-GCM$k$0$",
			"$AES-256-GCM$k",
		] {
			assert_eq!(decode(input), KmsSecret::plain(input), "input {input:?}");
		}
	}

	#[test]
	fn length_may_carry_a_plus_sign() {
		let secret = decode("$AES-256-GCM$k$+1$apay");
		assert_eq!(secret, KmsSecret::new(SecretStatus::Aes256Gcm, "k", "a", "pay"));
	}

	#[test]
	fn payload_may_contain_separator() {
		let secret = decode("$Secretbox$$3$abcpay$load");
		assert_eq!(secret.additional_data, "abc");
		assert_eq!(secret.payload, "pay$load");
		assert_eq!(secret.key, "");
	}

	#[test]
	fn length_counts_bytes() {
		let secret = KmsSecret::new(SecretStatus::Gcp, "", "é", "x");
		let encoded = encode(&secret);
		assert_eq!(encoded, "$GCP$$2$éx");
		assert_eq!(decode(&encoded), secret);
		// a length that lands inside a multi-byte character is malformed
		assert_eq!(decode("$GCP$$1$éx"), KmsSecret::plain("$GCP$$1$éx"));
	}

	fn structured_status() -> impl Strategy<Value = SecretStatus> {
		prop::sample::select(
			SecretStatus::ALL
				.iter()
				.copied()
				.filter(|s| !s.is_plain())
				.collect::<Vec<_>>(),
		)
	}

	proptest! {
		#[test]
		fn structured_secrets_round_trip(
			status in structured_status(),
			key in "[^$]{0,12}",
			additional_data in ".{0,16}",
			payload in ".{1,32}",
		) {
			let secret = KmsSecret::new(status, key, additional_data, payload);
			prop_assert_eq!(decode(&encode(&secret)), secret);
		}

		#[test]
		fn strings_without_leading_separator_are_plain(input in "[^$].*") {
			prop_assert_eq!(decode(&input), KmsSecret::plain(input.clone()));
		}

		#[test]
		fn unknown_statuses_are_plain(status in "[A-Za-z0-9-]{0,12}", rest in "[a-z0-9$]{0,20}") {
			prop_assume!(status.parse::<SecretStatus>().is_err());
			let input = format!("${status}${rest}");
			prop_assert_eq!(decode(&input), KmsSecret::plain(input.clone()));
		}

		#[test]
		fn non_numeric_lengths_are_plain(
			status in structured_status(),
			len in "[a-z-][a-z0-9]{0,4}",
			rest in "[a-z]{1,20}",
		) {
			let input = format!("${status}$k${len}${rest}");
			prop_assert_eq!(decode(&input), KmsSecret::plain(input.clone()));
		}

		#[test]
		fn lengths_reaching_past_the_last_part_are_plain(
			status in structured_status(),
			rest in "[a-z]{0,20}",
			extra in 0usize..5,
		) {
			let input = format!("${status}$k${}${rest}", rest.len() + extra);
			prop_assert_eq!(decode(&input), KmsSecret::plain(input.clone()));
		}
	}
}
