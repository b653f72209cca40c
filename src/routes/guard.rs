//! Route table and the navigation decision function

use std::fmt;

use crate::config::RoutesConfig;
use crate::session::Session;

/// Screens the client can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Login,
    /// Public product showcase
    Home,
    Inventario,
    Contabilidad,
    Transacciones,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Login => write!(f, "login"),
            View::Home => write!(f, "home"),
            View::Inventario => write!(f, "inventario"),
            View::Contabilidad => write!(f, "contabilidad"),
            View::Transacciones => write!(f, "transacciones"),
        }
    }
}

/// A declared path and whether it needs a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub view: View,
    pub requires_auth: bool,
}

/// Outcome of navigating to a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Render(View),
    RedirectLogin,
    RedirectHome,
}

/// Ordered routes plus the two special paths.
///
/// Matching is exact and first-match in declaration order. Anything that
/// matches no declared route falls through to the catch-all, which renders
/// nothing and sends the user to the landing page.
#[derive(Debug, Clone)]
pub struct RouteTable {
    login_path: String,
    home_path: String,
    routes: Vec<Route>,
}

impl RouteTable {
    /// Table with only the special paths and no declared routes
    pub fn new(login_path: impl Into<String>, home_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
            home_path: home_path.into(),
            routes: Vec::new(),
        }
    }

    /// The shop's screens
    pub fn from_config(config: &RoutesConfig) -> Self {
        let home = config.home.clone();
        Self::new(config.login.clone(), home.clone())
            .route(home, View::Home, false)
            .route("/inventario", View::Inventario, true)
            .route("/contabilidad", View::Contabilidad, true)
            .route("/transacciones", View::Transacciones, true)
    }

    /// Declare a route. Later declarations never shadow earlier ones.
    pub fn route(mut self, path: impl Into<String>, view: View, requires_auth: bool) -> Self {
        self.routes.push(Route {
            path: path.into(),
            view,
            requires_auth,
        });
        self
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn home_path(&self) -> &str {
        &self.home_path
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// First declared route whose path equals `path`
    pub fn find(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.path == path)
    }

    /// Path a view is declared under
    pub fn path_of(&self, view: View) -> Option<&str> {
        if view == View::Login {
            return Some(self.login_path.as_str());
        }
        self.routes
            .iter()
            .find(|r| r.view == view)
            .map(|r| r.path.as_str())
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::from_config(&RoutesConfig::default())
    }
}

/// Decide what navigating to `path` does for the given session
pub fn decide(table: &RouteTable, path: &str, session: &Session) -> NavigationDecision {
    if path == table.login_path {
        return NavigationDecision::Render(View::Login);
    }

    match table.find(path) {
        Some(route) if route.requires_auth && !session.is_authenticated() => {
            NavigationDecision::RedirectLogin
        }
        Some(route) => NavigationDecision::Render(route.view),
        None => NavigationDecision::RedirectHome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authed() -> Session {
        Session {
            token: Some("abc".into()),
            user: Some("alice".into()),
        }
    }

    #[test]
    fn test_login_always_renders() {
        let table = RouteTable::default();
        for session in [Session::default(), authed()] {
            assert_eq!(
                decide(&table, "/login", &session),
                NavigationDecision::Render(View::Login)
            );
        }
    }

    #[test]
    fn test_gated_without_token_redirects() {
        let table = RouteTable::default();
        for path in ["/inventario", "/contabilidad", "/transacciones"] {
            assert_eq!(
                decide(&table, path, &Session::default()),
                NavigationDecision::RedirectLogin,
                "{path}"
            );
        }
    }

    #[test]
    fn test_empty_token_counts_as_logged_out() {
        let session = Session {
            token: Some(String::new()),
            user: Some("alice".into()),
        };
        assert_eq!(
            decide(&RouteTable::default(), "/contabilidad", &session),
            NavigationDecision::RedirectLogin
        );
    }

    #[test]
    fn test_public_home_renders_for_everyone() {
        let table = RouteTable::default();
        assert_eq!(
            decide(&table, "/home", &Session::default()),
            NavigationDecision::Render(View::Home)
        );
    }

    #[test]
    fn test_unmatched_falls_through_to_catch_all() {
        let table = RouteTable::default();
        for path in ["/", "/nope", "/contabilidad/", "/INVENTARIO"] {
            assert_eq!(
                decide(&table, path, &authed()),
                NavigationDecision::RedirectHome,
                "{path}"
            );
        }
    }

    #[test]
    fn test_first_declaration_wins() {
        let table = RouteTable::new("/login", "/home")
            .route("/panel", View::Contabilidad, false)
            .route("/panel", View::Inventario, true);
        assert_eq!(
            decide(&table, "/panel", &Session::default()),
            NavigationDecision::Render(View::Contabilidad)
        );
    }

    #[test]
    fn test_path_of() {
        let table = RouteTable::default();
        assert_eq!(table.path_of(View::Login), Some("/login"));
        assert_eq!(table.path_of(View::Transacciones), Some("/transacciones"));
    }
}
