use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Hex-encoded HMAC-SHA256 of `payload` under `secret`
pub fn sign(payload: &[u8], secret: &[u8]) -> String {
    let mut mac = <HmacSha256 as KeyInit>::new_from_slice(secret)
        .expect("HMAC accepts keys of any length");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Check a hex signature against the HMAC-SHA256 of `payload` under `secret`.
///
/// The digest comparison is constant-time. Malformed input of any kind
/// (bad hex, wrong length, empty) is a failed verification, not an error.
pub fn verify_signature(payload: &[u8], signature_hex: &str, secret: &[u8]) -> bool {
    let Ok(claimed) = hex::decode(signature_hex.trim()) else {
        return false;
    };
    let Ok(mut mac) = <HmacSha256 as KeyInit>::new_from_slice(secret) else {
        return false;
    };
    mac.update(payload);
    mac.verify_slice(&claimed).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"whsec_test_secret";
    const PAYLOAD: &[u8] = br#"{"type":"invoice.incoming.settled","payment_hash":"ab12"}"#;

    #[test]
    fn test_own_signature_verifies() {
        let signature = sign(PAYLOAD, SECRET);
        assert_eq!(signature.len(), 64);
        assert!(verify_signature(PAYLOAD, &signature, SECRET));
    }

    #[test]
    fn test_known_vector() {
        // RFC 4231 test case 2
        let signature = sign(b"what do ya want for nothing?", b"Jefe");
        assert_eq!(
            signature,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_uppercase_hex_is_accepted() {
        let signature = sign(PAYLOAD, SECRET).to_uppercase();
        assert!(verify_signature(PAYLOAD, &signature, SECRET));
    }

    #[test]
    fn test_other_signatures_fail() {
        let other = sign(b"another payload", SECRET);
        assert!(!verify_signature(PAYLOAD, &other, SECRET));
        assert!(!verify_signature(PAYLOAD, &"0".repeat(64), SECRET));
    }

    #[test]
    fn test_wrong_secret_fails() {
        let signature = sign(PAYLOAD, b"someone else");
        assert!(!verify_signature(PAYLOAD, &signature, SECRET));
    }

    #[test]
    fn test_single_byte_mutation_fails() {
        let signature = sign(PAYLOAD, SECRET);

        for i in 0..PAYLOAD.len() {
            let mut mutated = PAYLOAD.to_vec();
            mutated[i] ^= 0x01;
            assert!(
                !verify_signature(&mutated, &signature, SECRET),
                "mutation at byte {i} still verified"
            );
        }
    }

    #[test]
    fn test_malformed_signatures_fail_without_panicking() {
        let signature = sign(PAYLOAD, SECRET);

        assert!(!verify_signature(PAYLOAD, "", SECRET));
        assert!(!verify_signature(PAYLOAD, "zz", SECRET));
        assert!(!verify_signature(PAYLOAD, "abc", SECRET));
        assert!(!verify_signature(PAYLOAD, &signature[..62], SECRET));
        assert!(!verify_signature(PAYLOAD, &format!("{signature}00"), SECRET));
        assert!(!verify_signature(PAYLOAD, "not hex at all ✓", SECRET));
    }

    #[test]
    fn test_key_longer_than_block_size() {
        // RFC 4231 test case 6
        let key = [0xaa_u8; 131];
        let signature = sign(
            b"Test Using Larger Than Block-Size Key - Hash Key First",
            &key,
        );
        assert_eq!(
            signature,
            "60e431591ee0b67f0d8a26aacbf5b77f8e0bc6213728c5140546040f0ee37f54"
        );
    }

    #[test]
    fn test_empty_secret_still_signs() {
        let signature = sign(PAYLOAD, b"");
        assert!(verify_signature(PAYLOAD, &signature, b""));
        assert!(!verify_signature(PAYLOAD, &signature, SECRET));
    }
}
