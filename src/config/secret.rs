//! Secure credential handling using the secrecy crate
//!
//! The PostgreSQL connection string embeds a password, so it is held in a
//! `Secret` that zeroes memory on drop and redacts itself in Debug output.
//!
//! # Example
//!
//! ```rust
//! use eligo::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let conn = secret_string("postgresql://u:p@localhost/eligo".to_string());
//! assert!(conn.expose_secret().starts_with("postgresql://"));
//! assert!(!format!("{conn:?}").contains("u:p"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Newtype wrapper for String that implements the required traits for Secret
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl SecretValue {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    /// Host/port/database part of a connection URL, credentials dropped
    pub fn redacted_location(&self) -> String {
        self.0
            .rsplit('@')
            .next()
            .filter(|_| self.0.contains('@'))
            .map(|location| format!("***@{location}"))
            .unwrap_or_else(|| "***".to_string())
    }

    /// Parse the secret value into another type
    pub fn parse<F: std::str::FromStr>(&self) -> Result<F, F::Err> {
        self.0.parse()
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Secret string: zeroed on drop, redacted in Debug, explicit `expose_secret()`
pub type SecretString = Secret<SecretValue>;

/// Wraps a String as a SecretString
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_secret_debug_redacted() {
        let secret = secret_string("postgresql://admin:hunter2@db:5432/eligo".to_string());
        let debug_output = format!("{secret:?}");
        assert!(!debug_output.contains("hunter2"));
    }

    #[test]
    fn test_redacted_location() {
        let secret = secret_string("postgresql://admin:hunter2@db:5432/eligo".to_string());
        assert_eq!(secret.expose_secret().redacted_location(), "***@db:5432/eligo");

        let no_credentials = secret_string("postgresql-local".to_string());
        assert_eq!(no_credentials.expose_secret().redacted_location(), "***");
    }

    #[test]
    fn test_secret_serde() {
        #[derive(Serialize, Deserialize)]
        struct TestConfig {
            connection_string: SecretString,
        }

        let parsed: TestConfig =
            toml::from_str("connection_string = \"postgres://localhost/eligo\"").unwrap();
        assert!(parsed.connection_string.expose_secret().starts_with("postgres://"));
    }
}
