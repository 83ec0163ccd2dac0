use super::{
    RegistrationPolicy, RegistryConfig, RegistryError, LAST_TOKEN_ID_ID, TOKEN_ID_ID_TO_TOKEN_ID,
    TOKEN_ID_TO_TOKEN_ID_ID,
};
use dp_01_state_store::{StateAccess, StateMap, StateSlot};
use shared_types::{TokenId, TokenIdId};

/// Incremental registry of every token id in circulation.
///
/// Writes go through [`StateAccess`]. Run `add_token_id` inside a
/// `StateTransaction` when the three writes must land together.
pub struct TokenRegistry {
    config: RegistryConfig,
    token_id_to_token_id_id: StateMap<TokenId, TokenIdId>,
    token_id_id_to_token_id: StateMap<TokenIdId, TokenId>,
    last_token_id_id: StateSlot<TokenIdId>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            token_id_to_token_id_id: StateMap::new(TOKEN_ID_TO_TOKEN_ID_ID),
            token_id_id_to_token_id: StateMap::new(TOKEN_ID_ID_TO_TOKEN_ID),
            last_token_id_id: StateSlot::new(LAST_TOKEN_ID_ID),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Register `token_id` under the next counter value.
    ///
    /// Writes the counter, then the forward and reverse mappings. Returns the
    /// id now mapped to `token_id`.
    pub fn add_token_id<S: StateAccess + ?Sized>(
        &self,
        state: &mut S,
        token_id: TokenId,
    ) -> Result<TokenIdId, RegistryError> {
        if let Some(existing) = self.token_id_to_token_id_id.get(state, &token_id)? {
            match self.config.policy {
                RegistrationPolicy::Unchecked => {
                    tracing::warn!(
                        "[dp-03] Token {} re-registered (was {})",
                        token_id,
                        existing
                    );
                }
                RegistrationPolicy::Idempotent => return Ok(existing),
                RegistrationPolicy::Reject => {
                    return Err(RegistryError::AlreadyRegistered { token_id, existing })
                }
            }
        }

        let last = self.last_token_id_id(state)?;
        let max = self.config.max_tokens.unwrap_or(u64::MAX);
        let next = last
            .next()
            .filter(|next| next.value() <= max)
            .ok_or(RegistryError::RegistryFull { max })?;

        self.last_token_id_id.set(state, &next)?;
        self.token_id_to_token_id_id.set(state, &token_id, &next)?;
        self.token_id_id_to_token_id.set(state, &next, &token_id)?;

        tracing::debug!("[dp-03] Registered token {} as {}", token_id, next);
        Ok(next)
    }

    /// Current counter value; 0 before any registration.
    pub fn last_token_id_id<S: StateAccess + ?Sized>(
        &self,
        state: &S,
    ) -> Result<TokenIdId, RegistryError> {
        Ok(self.last_token_id_id.get(state)?.unwrap_or_default())
    }

    pub fn token_id_id_of<S: StateAccess + ?Sized>(
        &self,
        state: &S,
        token_id: &TokenId,
    ) -> Result<Option<TokenIdId>, RegistryError> {
        Ok(self.token_id_to_token_id_id.get(state, token_id)?)
    }

    pub fn token_id_of<S: StateAccess + ?Sized>(
        &self,
        state: &S,
        token_id_id: &TokenIdId,
    ) -> Result<Option<TokenId>, RegistryError> {
        Ok(self.token_id_id_to_token_id.get(state, token_id_id)?)
    }
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::new()
    }
}
