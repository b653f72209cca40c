//! Route guarding and navigation

mod guard;
mod navigator;

pub use guard::{decide, NavigationDecision, Route, RouteTable, View};
pub use navigator::{Location, Navigator};
