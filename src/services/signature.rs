use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Hex HMAC-SHA256 over `amount_in_cents ‖ currency ‖ reference`, keyed by
/// the payment integrity secret.
pub fn integrity_signature(
    secret: &str,
    amount_in_cents: &str,
    currency: &str,
    reference: &str,
) -> anyhow::Result<String> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .map_err(|e| anyhow::anyhow!("invalid HMAC key: {e}"))?;
    mac.update(amount_in_cents.as_bytes());
    mac.update(currency.as_bytes());
    mac.update(reference.as_bytes());

    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vector() {
        // RFC 4231 test case 2: key "Jefe", data "what do ya want for nothing?"
        let sig = integrity_signature("Jefe", "what do ya ", "want ", "for nothing?").unwrap();
        assert_eq!(
            sig,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_field_order_matters() {
        let a = integrity_signature("secret", "4500000", "COP", "CB-1").unwrap();
        let b = integrity_signature("secret", "CB-1", "COP", "4500000").unwrap();
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
