//! Request-time lookup of the upstream API key.
//!
//! The key is not part of startup configuration: each request reads it
//! afresh, and its absence fails only that request.

use secrecy::{Secret, SecretString};
use std::env;

pub trait CredentialSource: Send + Sync {
    /// The current API key, or `None` when unset or empty.
    fn api_key(&self) -> Option<SecretString>;
}

/// Reads the key from a process environment variable on every call.
#[derive(Debug, Clone)]
pub struct EnvCredential {
    var: String,
}

impl EnvCredential {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialSource for EnvCredential {
    fn api_key(&self) -> Option<SecretString> {
        env::var(&self.var)
            .ok()
            .filter(|value| !value.is_empty())
            .map(Secret::new)
    }
}

/// A fixed key, or a fixed absence of one.
#[derive(Debug, Clone)]
pub struct StaticCredential(Option<String>);

impl StaticCredential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(Some(key.into()))
    }

    pub fn missing() -> Self {
        Self(None)
    }
}

impl CredentialSource for StaticCredential {
    fn api_key(&self) -> Option<SecretString> {
        self.0.clone().map(Secret::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn env_credential_reads_at_call_time() {
        let var = "GENAI_PROXY_TEST_CREDENTIAL_READS_AT_CALL_TIME";
        let source = EnvCredential::new(var);

        env::remove_var(var);
        assert!(source.api_key().is_none());

        env::set_var(var, "k-123");
        assert_eq!(source.api_key().unwrap().expose_secret(), "k-123");

        env::set_var(var, "");
        assert!(source.api_key().is_none());

        env::remove_var(var);
    }

    #[test]
    fn static_credential() {
        assert_eq!(
            StaticCredential::new("abc").api_key().unwrap().expose_secret(),
            "abc"
        );
        assert!(StaticCredential::missing().api_key().is_none());
    }
}
