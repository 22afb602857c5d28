use anyhow::{Context, Result, bail};

use smstrack_core::{CredentialVerifier, hash_password};

use crate::config::Config;

/// Gate a command behind the configured user table. No users, no gate.
pub fn require_login(cfg: &Config, user: Option<&str>) -> Result<()> {
    let creds = cfg.auth.credentials();
    if creds.is_empty() {
        return Ok(());
    }

    let Some(user) = user else {
        bail!("login required: pass --user <name>");
    };

    let password = match std::env::var("SMSTRACK_PASSWORD") {
        Ok(p) => p,
        Err(_) => rpassword::prompt_password("Password: ").context("reading password")?,
    };

    check_login(&creds, user, &password)
}

pub fn check_login(verifier: &impl CredentialVerifier, user: &str, password: &str) -> Result<()> {
    if !verifier.verify(user, password) {
        bail!("Invalid credentials");
    }
    tracing::info!(user, "logged in");
    Ok(())
}

/// Prompt for a password and print the line to paste under `[auth.users]`.
pub fn hash_password_cmd(user: &str) -> Result<()> {
    let password = rpassword::prompt_password("Password: ").context("reading password")?;
    let confirm = rpassword::prompt_password("Repeat password: ").context("reading password")?;
    if password != confirm {
        bail!("passwords do not match");
    }
    println!("{user} = \"{}\"", hash_password(&password));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use smstrack_core::StaticCredentials;
    use std::collections::BTreeMap;

    #[test]
    fn test_check_login() {
        let mut users = BTreeMap::new();
        users.insert("user".to_string(), hash_password("pass"));
        let creds = StaticCredentials::new(users);

        assert!(check_login(&creds, "user", "pass").is_ok());
        let err = check_login(&creds, "user", "nope").unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_no_users_means_no_gate() {
        assert!(require_login(&Config::default(), None).is_ok());
    }
}
