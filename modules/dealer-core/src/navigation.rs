//! Route table and the top-level screen guard.

use std::fmt;

use crate::session::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Main,
    Management,
    System,
}

impl Section {
    pub fn heading(&self) -> Option<&'static str> {
        match self {
            Section::Main => None,
            Section::Management => Some("Management"),
            Section::System => Some("System"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Dashboard,
    Inventory,
    Sales,
    Leads,
    Service,
    Calendar,
    Customers,
    Financials,
    Team,
    Activity,
}

impl Route {
    /// Display order of the sidebar.
    pub const ALL: [Route; 10] = [
        Route::Dashboard,
        Route::Inventory,
        Route::Sales,
        Route::Leads,
        Route::Service,
        Route::Calendar,
        Route::Customers,
        Route::Financials,
        Route::Team,
        Route::Activity,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::Inventory => "/inventory",
            Route::Sales => "/sales",
            Route::Leads => "/leads",
            Route::Service => "/service",
            Route::Calendar => "/calendar",
            Route::Customers => "/customers",
            Route::Financials => "/financials",
            Route::Team => "/team",
            Route::Activity => "/activity",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Inventory => "Inventory",
            Route::Sales => "Sales & Desking",
            Route::Leads => "Leads",
            Route::Service => "Service Lane",
            Route::Calendar => "Schedule",
            Route::Customers => "Customers",
            Route::Financials => "Financials",
            Route::Team => "Team",
            Route::Activity => "Activity Log",
        }
    }

    pub fn section(&self) -> Section {
        match self {
            Route::Financials | Route::Team => Section::Management,
            Route::Activity => Section::System,
            _ => Section::Main,
        }
    }

    pub fn manager_only(&self) -> bool {
        self.section() == Section::Management
    }

    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        let wanted = if trimmed.is_empty() { "/" } else { trimmed };
        Route::ALL.into_iter().find(|r| r.path() == wanted)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sidebar entries visible for the given role flag.
pub fn visible_routes(is_manager: bool) -> Vec<Route> {
    Route::ALL
        .into_iter()
        .filter(|r| is_manager || !r.manager_only())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavShell {
    pub username: Option<String>,
    pub is_manager: bool,
    pub routes: Vec<Route>,
}

impl NavShell {
    pub fn contains(&self, route: Route) -> bool {
        self.routes.contains(&route)
    }

    /// Routes grouped under their section headings, in display order.
    pub fn sections(&self) -> Vec<(Section, Vec<Route>)> {
        let mut grouped: Vec<(Section, Vec<Route>)> = Vec::new();
        for route in &self.routes {
            match grouped.last_mut() {
                Some((section, routes)) if *section == route.section() => routes.push(*route),
                _ => grouped.push((route.section(), vec![*route])),
            }
        }
        grouped
    }

    /// Open a route from the shell.
    pub fn open(&self, route: Route) -> RouteAccess {
        if route.manager_only() && !self.is_manager {
            RouteAccess::Denied(route)
        } else {
            RouteAccess::Granted(route)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Granted(Route),
    Denied(Route),
}

/// The top-level screen for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Login,
    Loading,
    Shell(NavShell),
}

impl Screen {
    pub fn resolve(session: &SessionState) -> Screen {
        if !session.is_authenticated() {
            return Screen::Login;
        }
        if session.loading {
            return Screen::Loading;
        }

        let is_manager = session.is_manager();
        Screen::Shell(NavShell {
            username: session.username.clone(),
            is_manager,
            routes: visible_routes(is_manager),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::RoleState;

    fn signed_in(role: RoleState) -> SessionState {
        SessionState {
            token: Some("t".into()),
            username: Some("casey".into()),
            role,
            loading: false,
        }
    }

    #[test]
    fn no_token_shows_login() {
        assert_eq!(Screen::resolve(&SessionState::default()), Screen::Login);
    }

    #[test]
    fn restoring_shows_loading() {
        let mut state = signed_in(RoleState::Unknown);
        state.loading = true;
        assert_eq!(Screen::resolve(&state), Screen::Loading);
    }

    #[test]
    fn token_shows_shell() {
        match Screen::resolve(&signed_in(RoleState::Staff)) {
            Screen::Shell(nav) => assert_eq!(nav.username.as_deref(), Some("casey")),
            other => panic!("expected shell, got {other:?}"),
        }
    }

    #[test]
    fn management_links_hidden_without_flag() {
        let Screen::Shell(nav) = Screen::resolve(&signed_in(RoleState::Staff)) else {
            panic!("expected shell");
        };
        assert!(!nav.contains(Route::Financials));
        assert!(!nav.contains(Route::Team));
        assert!(nav.contains(Route::Activity));
        assert_eq!(nav.routes.len(), 8);
        assert_eq!(nav.open(Route::Team), RouteAccess::Denied(Route::Team));
    }

    #[test]
    fn management_links_present_with_flag() {
        let Screen::Shell(nav) = Screen::resolve(&signed_in(RoleState::Manager)) else {
            panic!("expected shell");
        };
        assert!(nav.contains(Route::Financials));
        assert!(nav.contains(Route::Team));
        assert_eq!(nav.open(Route::Team), RouteAccess::Granted(Route::Team));

        let headings: Vec<_> = nav.sections().iter().map(|(s, _)| s.heading()).collect();
        assert_eq!(headings, vec![None, Some("Management"), Some("System")]);
    }

    #[test]
    fn unknown_role_is_treated_as_staff() {
        let Screen::Shell(nav) = Screen::resolve(&signed_in(RoleState::Unknown)) else {
            panic!("expected shell");
        };
        assert!(!nav.is_manager);
        assert!(!nav.contains(Route::Financials));
    }

    #[test]
    fn routes_resolve_from_paths() {
        assert_eq!(Route::from_path("/"), Some(Route::Dashboard));
        assert_eq!(Route::from_path("/team/"), Some(Route::Team));
        assert_eq!(Route::from_path("/nowhere"), None);
    }
}
