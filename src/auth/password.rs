use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::{error, warn};

/// Hashes a password with argon2id and a fresh random salt.
///
/// The salt and parameters are embedded in the PHC output string, so repeated
/// calls on the same input produce different hashes. Unlike bcrypt there is no
/// 72-byte input cap; the full plaintext is hashed.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Checks a plaintext against a stored PHC hash.
///
/// A malformed stored hash counts as a failed verification rather than an
/// error, so callers see exactly one outcome for every bad credential.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "stored password hash is malformed");
            return false;
        }
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(verify_password(password, &hash));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn repeated_hashes_differ_but_both_verify() {
        let password = "same-input-twice";
        let first = hash_password(password).expect("hash");
        let second = hash_password(password).expect("hash");
        assert_ne!(first, second);
        assert!(verify_password(password, &first));
        assert!(verify_password(password, &second));
    }

    #[test]
    fn verify_returns_false_on_malformed_hash() {
        assert!(!verify_password("anything", "not-a-valid-hash"));
        assert!(!verify_password("anything", ""));
    }

    #[test]
    fn long_passphrases_are_not_truncated() {
        // Two 100-byte passphrases that agree on the first 72 bytes.
        let prefix = "x".repeat(72);
        let a = format!("{prefix}{}", "a".repeat(28));
        let b = format!("{prefix}{}", "b".repeat(28));
        let hash = hash_password(&a).expect("hash");
        assert!(verify_password(&a, &hash));
        assert!(!verify_password(&b, &hash));
    }
}
