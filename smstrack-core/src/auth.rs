//! Credential verification seam. The loader and filters never see credentials;
//! front ends plug in whatever verifier they need.

use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

pub trait CredentialVerifier {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// SHA-256 hex digest of a password
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Fixed user table of `username -> sha256 hex`
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    users: BTreeMap<String, String>,
}

impl StaticCredentials {
    pub fn new(users: BTreeMap<String, String>) -> Self {
        Self { users }
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        match self.users.get(username) {
            Some(expected) => expected.eq_ignore_ascii_case(&hash_password(password)),
            None => {
                tracing::debug!(username, "unknown user");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> StaticCredentials {
        let mut users = BTreeMap::new();
        users.insert("admin".to_string(), hash_password("1234"));
        StaticCredentials::new(users)
    }

    #[test]
    fn test_hash_is_sha256_hex() {
        assert_eq!(
            hash_password("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_verify() {
        let c = creds();
        assert!(c.verify("admin", "1234"));
        assert!(!c.verify("admin", "12345"));
        assert!(!c.verify("nobody", "1234"));
        assert!(!c.is_empty());
    }
}
