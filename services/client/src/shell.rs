//! services/client/src/shell.rs
//!
//! Wires configuration, the HTTP adapter, and the core stores into the
//! object a hosting UI holds for the lifetime of the page.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use praktika_core::domain::{NavigationItem, Role};
use praktika_core::guard::AccessDecision;
use praktika_core::navigation;
use praktika_core::notifications::NotificationFeed;
use praktika_core::ports::MarketplaceApi;
use praktika_core::session::SessionStore;

use crate::adapters::http::HttpMarketplaceAdapter;
use crate::config::Config;
use crate::error::ClientError;

/// The composition root handed to the rendering layer.
///
/// Everything stateful hangs off the session store; pages derive their
/// navigation, guards, and notification feeds from here.
pub struct AppShell {
    pub config: Arc<Config>,
    pub api: Arc<dyn MarketplaceApi>,
    pub session: SessionStore,
}

impl AppShell {
    pub fn new(config: Config, api: Arc<dyn MarketplaceApi>) -> Self {
        Self {
            config: Arc::new(config),
            session: SessionStore::new(Arc::clone(&api)),
            api,
        }
    }

    /// Builds the shell from environment configuration with the real HTTP
    /// adapter.
    pub fn from_env() -> Result<Self, ClientError> {
        let config = Config::from_env()?;
        let adapter = HttpMarketplaceAdapter::from_config(&config)?;
        info!(base_url = %config.api_base_url, "marketplace client configured");
        Ok(Self::new(config, Arc::new(adapter)))
    }

    /// A notification feed scoped to whoever is signed in.
    pub fn notifications(&self) -> NotificationFeed {
        NotificationFeed::new(&self.session)
    }

    /// The menu for the current identity, highlighted against `active_route`.
    pub fn navigation(&self, active_route: &str) -> Vec<NavigationItem> {
        navigation::resolve(self.session.current().map(|user| user.role), active_route)
    }

    /// Access check for a page restricted to `allowed` roles. Run before
    /// fetching that page's data.
    pub fn authorize(&self, allowed: &[Role]) -> AccessDecision {
        self.session.authorize(allowed)
    }
}

/// Installs the global tracing subscriber from the loaded configuration.
pub fn init_tracing(config: &Config) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            config.log_level.to_string(),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
