//! Application state shared across handlers

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::guard::{AbilityChecker, TokenAbilities};
use crate::middleware::TokenAuth;
use crate::store::MemoryStore;

#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    store: Arc<MemoryStore>,
    abilities: Arc<dyn AbilityChecker>,
    auth: Option<TokenAuth>,
}

impl AppState {
    /// State over an empty store, without bearer verification
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            store: MemoryStore::new(),
            abilities: Arc::new(TokenAbilities),
            auth: None,
        }
    }

    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::new()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }

    pub fn abilities(&self) -> &dyn AbilityChecker {
        self.abilities.as_ref()
    }

    /// Bearer verification; `None` leaves every caller anonymous
    pub fn auth(&self) -> Option<&TokenAuth> {
        self.auth.as_ref()
    }
}

/// Builder for [`AppState`]
pub struct AppStateBuilder {
    config: Option<Config>,
    store: Option<Arc<MemoryStore>>,
    abilities: Option<Arc<dyn AbilityChecker>>,
    auth: Option<TokenAuth>,
    enable_tracing: bool,
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AppStateBuilder {
    /// By default config is `Config::default()`, the store is empty and
    /// tracing is initialized from the config.
    pub fn new() -> Self {
        Self {
            config: None,
            store: None,
            abilities: None,
            auth: None,
            enable_tracing: true,
        }
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Share an existing store instead of creating one
    pub fn store(mut self, store: Arc<MemoryStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn abilities(mut self, checker: impl AbilityChecker + 'static) -> Self {
        self.abilities = Some(Arc::new(checker));
        self
    }

    /// Verify bearer tokens with `auth` instead of the configured key
    pub fn token_auth(mut self, auth: TokenAuth) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn without_tracing(mut self) -> Self {
        self.enable_tracing = false;
        self
    }

    /// Build the state.
    ///
    /// Loads the configured verification key unless one was supplied and
    /// seeds demo data into a fresh store when `storage.seed_demo` is set.
    pub async fn build(self) -> Result<AppState> {
        let config = self.config.unwrap_or_default();

        if self.enable_tracing {
            if let Err(e) = crate::observability::init_tracing(&config) {
                tracing::debug!(error = %e, "Tracing already initialized");
            }
        }

        let auth = match (self.auth, &config.auth) {
            (Some(auth), _) => Some(auth),
            (None, Some(auth_config)) => Some(TokenAuth::from_config(auth_config)?),
            (None, None) => {
                tracing::warn!("No auth configured; mutating endpoints will reject every caller");
                None
            }
        };

        let store = match self.store {
            Some(store) => store,
            None => {
                let store = MemoryStore::new();
                if config.storage.seed_demo {
                    store
                        .seed_demo()
                        .await
                        .map_err(|e| crate::error::Error::Internal(e.to_string()))?;
                }
                store
            }
        };

        Ok(AppState {
            config: Arc::new(config),
            store,
            abilities: self.abilities.unwrap_or_else(|| Arc::new(TokenAbilities)),
            auth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;
    use crate::middleware::Claims;
    use crate::repository::{FetchPlan, Pagination, Repository};

    #[tokio::test]
    async fn test_state_builder_defaults() {
        let state = AppState::builder().without_tracing().build().await.unwrap();
        assert_eq!(state.config().service.name, "status-api");
        assert!(state.auth().is_none());
        assert_eq!(state.store().query_count(), 0);
    }

    #[tokio::test]
    async fn test_state_builder_seeds_demo_data() {
        let config = Config {
            storage: StorageConfig { seed_demo: true },
            ..Config::default()
        };
        let state = AppState::builder()
            .config(config)
            .without_tracing()
            .build()
            .await
            .unwrap();

        let groups = state
            .store()
            .component_groups()
            .find_all(&[], &[], Pagination::new(0, 10), &FetchPlan::none())
            .await
            .unwrap();
        assert!(!groups.is_empty());
    }

    #[tokio::test]
    async fn test_state_builder_custom_abilities() {
        struct AllowAll;
        impl AbilityChecker for AllowAll {
            fn check(&self, _claims: &Claims, _ability: &str) -> bool {
                true
            }
        }

        let state = AppState::builder()
            .abilities(AllowAll)
            .token_auth(TokenAuth::hs256(b"secret"))
            .without_tracing()
            .build()
            .await
            .unwrap();
        let claims = Claims::new("user:1", Vec::<String>::new());
        assert!(state.abilities().check(&claims, "schedules.delete"));
        assert!(state.auth().is_some());
    }
}
