use serde::{Deserialize, Serialize};

/// State path names, shared with clients that derive keys themselves.
pub const TOKEN_ID_TO_TOKEN_ID_ID: &str = "TokenRegistry.tokenIdToTokenIdId";
pub const TOKEN_ID_ID_TO_TOKEN_ID: &str = "TokenRegistry.tokenIdIdToTokenId";
pub const LAST_TOKEN_ID_ID: &str = "TokenRegistry.lastTokenIdId";

/// What `add_token_id` does with a token that is already registered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationPolicy {
    /// Assign a fresh id anyway. The forward mapping moves to the new id and
    /// the old reverse entry is left in place.
    #[default]
    Unchecked,
    /// Return the existing id without writing.
    Idempotent,
    /// Fail with `RegistryError::AlreadyRegistered`.
    Reject,
}

/// Token registry configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub policy: RegistrationPolicy,
    /// Highest id the counter may reach. `None` means unbounded.
    pub max_tokens: Option<u64>,
}
