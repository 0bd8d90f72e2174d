//! Password transform applied before credentials reach the auth provider
//!
//! The earlier console sent `hex(sha256(password))` as the password. Accounts
//! it created can only sign in when the same transform is applied, so the
//! digest stays available behind a flag. New deployments keep it off and let
//! the provider hash the raw password.

use sha2::{Digest, Sha256};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Password is required")]
    EmptyPassword,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordTransform {
    #[default]
    Plain,
    LegacySha256,
}

impl PasswordTransform {
    pub fn from_flag(legacy_digest: bool) -> Self {
        if legacy_digest {
            PasswordTransform::LegacySha256
        } else {
            PasswordTransform::Plain
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, PasswordTransform::LegacySha256)
    }

    /// Value to send as the provider's `password` field
    pub fn prepare(&self, raw: &str) -> Result<String, CredentialError> {
        if raw.is_empty() {
            return Err(CredentialError::EmptyPassword);
        }
        Ok(match self {
            PasswordTransform::Plain => raw.to_string(),
            PasswordTransform::LegacySha256 => hex::encode(Sha256::digest(raw.as_bytes())),
        })
    }
}
