use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::{error, warn};

/// Argon2 digest of a plaintext password. The salt and parameters are
/// embedded in the PHC string, so two hashes of the same password differ.
pub fn hash_password_sync(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Fails closed: an unparseable or corrupt digest verifies as false, so the
/// caller's response shape never reveals which part failed.
pub fn verify_password_sync(plain: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "unparseable password digest");
            return false;
        }
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

/// Argon2 is CPU-bound; both entry points run it on the blocking pool so the
/// request task only suspends while awaiting the join handle.
pub async fn hash_password(plain: &str) -> anyhow::Result<String> {
    let plain = plain.to_owned();
    tokio::task::spawn_blocking(move || hash_password_sync(&plain)).await?
}

pub async fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let plain = plain.to_owned();
    let hash = hash.to_owned();
    Ok(tokio::task::spawn_blocking(move || verify_password_sync(&plain, &hash)).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password_sync(password).expect("hashing should succeed");
        assert!(verify_password_sync(password, &hash));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password_sync(password).expect("hashing should succeed");
        assert!(!verify_password_sync("wrong-password", &hash));
    }

    #[test]
    fn rehashing_differs_but_both_verify() {
        let password = "same-password";
        let first = hash_password_sync(password).expect("hashing should succeed");
        let second = hash_password_sync(password).expect("hashing should succeed");
        assert_ne!(first, second);
        assert!(verify_password_sync(password, &first));
        assert!(verify_password_sync(password, &second));
    }

    #[test]
    fn malformed_digest_fails_closed() {
        assert!(!verify_password_sync("anything", "not-a-valid-hash"));
        assert!(!verify_password_sync("anything", ""));
    }

    #[tokio::test]
    async fn async_wrappers_agree_with_sync() {
        let hash = hash_password("pw").await.expect("hash");
        assert!(verify_password("pw", &hash).await.expect("verify"));
        assert!(!verify_password("other", &hash).await.expect("verify"));
    }
}
