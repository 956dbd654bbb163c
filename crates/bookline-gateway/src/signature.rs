// SPDX-FileCopyrightText: 2026 Bookline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook delivery signature validation.
//!
//! The provider signs every POST body with HMAC-SHA256 of the raw bytes
//! under the app secret and sends it as `X-Hub-Signature-256: sha256=<hex>`.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Validates a delivery signature against the raw request body.
///
/// Returns `false` for a missing prefix, malformed hex, or a digest
/// mismatch. The comparison is constant-time via `verify_slice`.
pub fn verify_signature(app_secret: &str, body: &[u8], signature_header: &str) -> bool {
    let Some(hex_digest) = signature_header.strip_prefix("sha256=") else {
        return false;
    };
    let Ok(expected) = hex::decode(hex_digest) else {
        return false;
    };

    let mut mac = HmacSha256::new_from_slice(app_secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

/// Computes the `sha256=<hex>` header value for a body. Test helper and
/// reference for what the provider sends.
pub fn sign(app_secret: &str, body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(app_secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(body);
    format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_signature_passes() {
        let body = br#"{"entry": []}"#;
        let header = sign("secret", body);
        assert!(verify_signature("secret", body, &header));
    }

    #[test]
    fn wrong_secret_fails() {
        let body = br#"{"entry": []}"#;
        let header = sign("secret", body);
        assert!(!verify_signature("other", body, &header));
    }

    #[test]
    fn tampered_body_fails() {
        let header = sign("secret", br#"{"entry": []}"#);
        assert!(!verify_signature("secret", br#"{"entry": [1]}"#, &header));
    }

    #[test]
    fn malformed_header_fails() {
        let body = b"x";
        assert!(!verify_signature("secret", body, "sha1=abcd"));
        assert!(!verify_signature("secret", body, "sha256=not-hex"));
        assert!(!verify_signature("secret", body, ""));
    }
}
