//! Administrator credential and dashboard read models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

/// Aggregate counts shown on the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpStats {
    pub total_rsvps: u64,
    pub with_goodwill_message: u64,
    pub latest_rsvp_at: Option<DateTime<Utc>>,
}

/// Errors raised when constructing an [`AdminCredential`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdminCredentialError {
    #[error("admin password must not be empty")]
    EmptyPassword,
}

/// The configured admin password, held only as a SHA-256 digest.
///
/// Comparing digests keeps the comparison length-independent; the byte
/// comparison itself does not short-circuit.
#[derive(Clone)]
pub struct AdminCredential {
    digest: [u8; 32],
}

impl std::fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredential").finish_non_exhaustive()
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

impl AdminCredential {
    /// Build a credential from the plaintext password, wiping the input.
    ///
    /// # Examples
    /// ```
    /// use wedding_backend::domain::AdminCredential;
    ///
    /// let credential = AdminCredential::from_password("hunter2".to_owned()).expect("non-empty");
    /// assert!(credential.verify("hunter2"));
    /// assert!(!credential.verify("hunter3"));
    /// ```
    pub fn from_password(mut password: String) -> Result<Self, AdminCredentialError> {
        if password.is_empty() {
            return Err(AdminCredentialError::EmptyPassword);
        }
        let credential = Self {
            digest: digest(&password),
        };
        password.zeroize();
        Ok(credential)
    }

    /// Check a candidate password.
    pub fn verify(&self, candidate: &str) -> bool {
        let mut candidate_digest = digest(candidate);
        let difference = self
            .digest
            .iter()
            .zip(candidate_digest.iter())
            .fold(0_u8, |acc, (left, right)| acc | (left ^ right));
        candidate_digest.zeroize();
        difference == 0
    }
}

impl Drop for AdminCredential {
    fn drop(&mut self) {
        self.digest.zeroize();
    }
}
