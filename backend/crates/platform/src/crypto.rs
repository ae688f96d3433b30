//! Signed Token Utilities
//!
//! HMAC-SHA256 signing for opaque tokens carried in cookies. The token is
//! `<payload>.<signature>` with the signature base64url-encoded (no pad).
//! Verification is constant time via the MAC's own comparison.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Sign a payload, producing a `payload.signature` token
pub fn sign_token(secret: &[u8; 32], payload: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    let signature = mac.finalize().into_bytes();

    format!("{}.{}", payload, URL_SAFE_NO_PAD.encode(signature))
}

/// Verify a `payload.signature` token and return the payload
///
/// Returns `None` for malformed tokens, undecodable signatures, and
/// signature mismatches alike - the caller cannot tell which, on purpose.
pub fn verify_token(secret: &[u8; 32], token: &str) -> Option<String> {
    let (payload, signature_b64) = token.rsplit_once('.')?;

    let signature = URL_SAFE_NO_PAD.decode(signature_b64).ok()?;

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    mac.verify_slice(&signature).ok()?;

    Some(payload.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [7u8; 32];

    #[test]
    fn test_sign_verify_roundtrip() {
        let token = sign_token(&SECRET, "some-session-id");
        assert_eq!(
            verify_token(&SECRET, &token),
            Some("some-session-id".to_string())
        );
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let token = sign_token(&SECRET, "some-session-id");
        let tampered = token.replacen("some", "evil", 1);
        assert_eq!(verify_token(&SECRET, &tampered), None);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = sign_token(&SECRET, "some-session-id");
        let other_secret = [8u8; 32];
        assert_eq!(verify_token(&other_secret, &token), None);
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        assert_eq!(verify_token(&SECRET, ""), None);
        assert_eq!(verify_token(&SECRET, "no-separator"), None);
        assert_eq!(verify_token(&SECRET, "payload.!!!not-base64!!!"), None);
    }

    #[test]
    fn test_payload_may_contain_dots() {
        // rsplit means only the last segment is treated as the signature
        let token = sign_token(&SECRET, "a.b.c");
        assert_eq!(verify_token(&SECRET, &token), Some("a.b.c".to_string()));
    }
}
