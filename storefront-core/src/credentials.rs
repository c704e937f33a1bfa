use std::fmt;

/// A bearer token for the cart service. Never empty.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Returns `None` for an empty or all-whitespace token, which counts as logged out.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// tokens end up in request logs, so keep them out of Debug output
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(..)")
    }
}

/// Read-only lookup of the current user's token.
///
/// Operations never call this themselves; front ends look the token up and pass it in.
pub trait CredentialSource {
    fn auth_token(&self) -> Option<AuthToken>;
}

impl CredentialSource for Option<AuthToken> {
    fn auth_token(&self) -> Option<AuthToken> {
        self.clone()
    }
}

/// Reads the token from an environment variable each time it is asked.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    var: String,
}

impl EnvCredentials {
    pub const DEFAULT_VAR: &'static str = "STOREFRONT_TOKEN";

    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new(Self::DEFAULT_VAR)
    }
}

impl CredentialSource for EnvCredentials {
    fn auth_token(&self) -> Option<AuthToken> {
        std::env::var(&self.var).ok().and_then(AuthToken::new)
    }
}
