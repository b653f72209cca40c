//! Current location tracking with guard-driven redirects

use std::sync::{Arc, Mutex, MutexGuard};

use super::guard::{decide, NavigationDecision, RouteTable, View};
use crate::session::SessionState;

/// Where a navigation ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    /// Rendered view; `None` only if even the redirect target is not renderable
    pub view: Option<View>,
}

/// Holds the current location and applies the route guard on every move
#[derive(Debug)]
pub struct Navigator {
    table: RouteTable,
    session: Arc<SessionState>,
    location: Mutex<Location>,
}

impl Navigator {
    pub fn new(table: RouteTable, session: Arc<SessionState>) -> Self {
        let location = Location {
            path: table.home_path().to_string(),
            view: Some(View::Home),
        };
        Self {
            table,
            session,
            location: Mutex::new(location),
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Guard decision for `path` against the live session, without moving
    pub fn decide(&self, path: &str) -> NavigationDecision {
        decide(&self.table, path, &self.session.current())
    }

    /// Move to `path`, following at most one redirect.
    ///
    /// Returns the decision for the requested path; the resulting location
    /// is available from [`Navigator::location`].
    pub fn navigate(&self, path: &str) -> NavigationDecision {
        let decision = self.decide(path);
        let target = match decision {
            NavigationDecision::Render(view) => Location {
                path: path.to_string(),
                view: Some(view),
            },
            NavigationDecision::RedirectLogin => self.settle(self.table.login_path()),
            NavigationDecision::RedirectHome => self.settle(self.table.home_path()),
        };

        tracing::debug!(
            requested = path,
            landed = %target.path,
            ?decision,
            "Navigated"
        );
        *self.lock() = target;
        decision
    }

    /// Jump to the login screen. Installed as the session's logout action.
    pub fn redirect_to_login(&self) {
        let target = self.settle(self.table.login_path());
        *self.lock() = target;
    }

    pub fn location(&self) -> Location {
        self.lock().clone()
    }

    fn settle(&self, path: &str) -> Location {
        let view = match self.decide(path) {
            NavigationDecision::Render(view) => Some(view),
            _ => None,
        };
        Location {
            path: path.to_string(),
            view,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Location> {
        self.location.lock().unwrap_or_else(|e| e.into_inner())
    }
}
