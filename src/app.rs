//! Application wiring: one session, one navigator, one API client

use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::routes::{NavigationDecision, Navigator, RouteTable, View};
use crate::session::{CredentialStore, FileStore, SessionState};

/// Top-level object owning the session and everything that depends on it
#[derive(Debug)]
pub struct App {
    pub config: Config,
    pub session: Arc<SessionState>,
    pub navigator: Arc<Navigator>,
    pub api: ApiClient,
}

impl App {
    /// Start against the configured on-disk credential store
    pub fn bootstrap(config: Config) -> Result<Self> {
        let store = FileStore::new(&config.session.store_path);
        Self::with_store(config, store)
    }

    /// Start against any credential store.
    ///
    /// The logout action (jump to the login screen) is installed here, once.
    pub fn with_store(config: Config, store: impl CredentialStore + 'static) -> Result<Self> {
        let session = Arc::new(SessionState::initialize(store));
        let navigator = Arc::new(Navigator::new(
            RouteTable::from_config(&config.routes),
            Arc::clone(&session),
        ));

        // Weak so the session does not keep its own navigator alive
        let nav = Arc::downgrade(&navigator);
        session.set_logout_callback(Some(Arc::new(move || {
            if let Some(nav) = nav.upgrade() {
                nav.redirect_to_login();
            }
        })));

        let api = ApiClient::new(&config.api, Arc::clone(&session))?;

        Ok(Self {
            config,
            session,
            navigator,
            api,
        })
    }

    /// Navigate to `path` and require that it renders `view`
    pub fn enter(&self, path: &str, view: View) -> Result<()> {
        match self.navigator.navigate(path) {
            NavigationDecision::Render(v) if v == view => Ok(()),
            NavigationDecision::RedirectLogin => Err(Error::NotAuthenticated(path.to_string())),
            other => Err(Error::Other(format!(
                "{} no muestra {} ({:?})",
                path, view, other
            ))),
        }
    }

    /// Navigate to the path a view is declared under
    pub fn enter_view(&self, view: View) -> Result<()> {
        let path = self
            .navigator
            .table()
            .path_of(view)
            .map(str::to_string)
            .ok_or_else(|| Error::Config(format!("No route declared for {}", view)))?;
        self.enter(&path, view)
    }
}
