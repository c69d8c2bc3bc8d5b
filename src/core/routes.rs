//! Route table and navigation.
//!
//! Paths match the hash routes of the web client so links stay stable.

/// A page the application can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// Login page
    #[default]
    Login,
    /// Employee bills list
    Bills,
    /// New bill form
    NewBill,
    /// Admin dashboard
    Dashboard,
}

impl Route {
    /// All routes, in declaration order
    pub const ALL: [Self; 4] = [Self::Login, Self::Bills, Self::NewBill, Self::Dashboard];

    /// Path of the route
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Bills => "#employee/bills",
            Self::NewBill => "#employee/bill/new",
            Self::Dashboard => "#admin/dashboard",
        }
    }

    /// Looks a route up by its path.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|route| route.path() == path)
    }
}

/// Something that can switch the displayed page
pub trait Navigate {
    /// Shows the page for `route`.
    fn navigate(&mut self, route: Route);
}

/// Records the active route and the navigation history.
#[derive(Debug, Default)]
pub struct Router {
    active: Route,
    history: Vec<Route>,
}

impl Router {
    /// Currently displayed route
    #[must_use]
    pub const fn active(&self) -> Route {
        self.active
    }

    /// Every route navigated to, oldest first
    #[must_use]
    pub fn history(&self) -> &[Route] {
        &self.history
    }
}

impl Navigate for Router {
    fn navigate(&mut self, route: Route) {
        tracing::debug!("Navigating to {}", route.path());
        self.active = route;
        self.history.push(route);
    }
}
