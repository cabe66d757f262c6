//! Passcode type and the verifiers that compare against it

use std::fmt;
use std::str::FromStr;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{LaunchpadError, Result};
use crate::store::{keys, KeyValueStore};

/// Number of digits in a passcode
pub const CREDENTIAL_LENGTH: usize = 4;

/// Built-in passcode
pub const DEFAULT_SECRET: &str = "1997";

/// Exactly four ASCII digits
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Credential(String);

impl Credential {
    /// Parse a passcode, rejecting anything that is not four digits
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.len() != CREDENTIAL_LENGTH {
            return Err(LaunchpadError::InvalidCredential(format!(
                "expected {} digits, got {}",
                CREDENTIAL_LENGTH,
                raw.chars().count()
            )));
        }
        if !raw.chars().all(|c| c.is_ascii_digit()) {
            return Err(LaunchpadError::InvalidCredential(
                "passcode must contain only digits".to_string(),
            ));
        }
        Ok(Self(raw.to_string()))
    }

    /// The built-in passcode
    pub fn builtin() -> Self {
        Self(DEFAULT_SECRET.to_string())
    }

    /// Digits as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Credential {
    type Err = LaunchpadError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(****)")
    }
}

/// Decides whether an entered passcode opens the gate
pub trait CredentialVerifier {
    fn verify(&self, candidate: &Credential) -> bool;
}

impl<V: CredentialVerifier + ?Sized> CredentialVerifier for Box<V> {
    fn verify(&self, candidate: &Credential) -> bool {
        (**self).verify(candidate)
    }
}

/// Exact string equality against a single secret
#[derive(Debug, Clone)]
pub struct PlainVerifier {
    secret: Credential,
}

impl PlainVerifier {
    pub fn new(secret: Credential) -> Self {
        Self { secret }
    }
}

impl Default for PlainVerifier {
    fn default() -> Self {
        Self::new(Credential::builtin())
    }
}

impl CredentialVerifier for PlainVerifier {
    fn verify(&self, candidate: &Credential) -> bool {
        self.secret == *candidate
    }
}

/// Plain comparison against the passcode saved in the store
///
/// Reads [`keys::PASSCODE`] on every check so a change made from the settings
/// screen applies to the next attempt. A missing or malformed override falls
/// back to the built-in secret.
#[derive(Debug, Clone)]
pub struct StoredSecretVerifier<S> {
    store: S,
}

impl<S: KeyValueStore> StoredSecretVerifier<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The passcode currently in effect
    pub fn current_secret(&self) -> Credential {
        self.store
            .get(keys::PASSCODE)
            .and_then(|raw| Credential::parse(&raw).ok())
            .unwrap_or_else(Credential::builtin)
    }

    /// Whether an override is stored
    pub fn has_override(&self) -> bool {
        self.store
            .get(keys::PASSCODE)
            .is_some_and(|raw| Credential::parse(&raw).is_ok())
    }
}

impl<S: KeyValueStore> CredentialVerifier for StoredSecretVerifier<S> {
    fn verify(&self, candidate: &Credential) -> bool {
        self.current_secret() == *candidate
    }
}

/// Save a passcode override
pub fn store_secret<S: KeyValueStore + ?Sized>(store: &mut S, secret: &Credential) -> Result<()> {
    store.set(keys::PASSCODE, secret.as_str())?;
    tracing::info!("Passcode override updated");
    Ok(())
}

/// Drop the passcode override, restoring the built-in secret
pub fn clear_secret<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<()> {
    store.remove(keys::PASSCODE)
}

/// Argon2id hash comparison
///
/// Holds only the PHC string, never the passcode itself.
#[derive(Debug, Clone)]
pub struct HashedVerifier {
    hash: String,
}

impl HashedVerifier {
    /// Hash a passcode with a fresh random salt
    pub fn from_secret(secret: &Credential) -> Result<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(secret.as_str().as_bytes(), &salt)
            .map_err(|e| LaunchpadError::Hash(e.to_string()))?
            .to_string();
        Ok(Self { hash })
    }

    /// Use an existing PHC hash string
    pub fn from_phc(hash: impl Into<String>) -> Result<Self> {
        let hash = hash.into();
        PasswordHash::new(&hash).map_err(|e| LaunchpadError::Hash(e.to_string()))?;
        Ok(Self { hash })
    }

    /// The PHC hash string
    pub fn phc(&self) -> &str {
        &self.hash
    }
}

impl CredentialVerifier for HashedVerifier {
    fn verify(&self, candidate: &Credential) -> bool {
        match PasswordHash::new(&self.hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(candidate.as_str().as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}
