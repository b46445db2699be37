// ── Session/auth gate ──
//
// Explicit state machine deciding which top-level view renders. The
// machine is pure: callers feed it events (route changes, resolved
// session checks, sign-in/out) and read the derived view. Keeping it
// decoupled from rendering removes the race between "route changed"
// and "session resolved" — an admin route observed while the session
// check is still in flight renders the loading view, never a stale
// login or admin screen.

use soundcheck_api::AuthUser;

/// Authentication state of the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// The initial session check has not resolved yet.
    Checking,
    Anonymous,
    Authenticated { user: AuthUser },
}

/// Route parsed from a URL fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Admin,
    AdminSignup,
}

impl Route {
    /// Parse a location fragment (without the leading `#`).
    pub fn from_fragment(fragment: &str) -> Self {
        match fragment {
            "admin" => Self::Admin,
            "admin-signup" => Self::AdminSignup,
            _ => Self::Home,
        }
    }
}

/// External triggers the gate reacts to.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The async session check resolved (possibly to no user).
    SessionResolved(Option<AuthUser>),
    RouteChanged(Route),
    SignedIn(AuthUser),
    SignedOut,
}

/// The top-level view derived from (state, route).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Session check still pending.
    Loading,
    Public,
    Login,
    Signup,
    Admin,
}

/// The session gate: one writer feeds events, anyone may read the view.
#[derive(Debug, Clone)]
pub struct SessionGate {
    state: SessionState,
    route: Route,
}

impl SessionGate {
    pub fn new() -> Self {
        Self {
            state: SessionState::Checking,
            route: Route::Home,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    /// Apply an event, producing the next (state, route).
    pub fn handle(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::SessionResolved(Some(user)) | SessionEvent::SignedIn(user) => {
                self.state = SessionState::Authenticated { user };
            }
            SessionEvent::SessionResolved(None) => {
                self.state = SessionState::Anonymous;
            }
            SessionEvent::RouteChanged(route) => {
                self.route = route;
            }
            SessionEvent::SignedOut => {
                // Logout clears the route fragment as well.
                self.state = SessionState::Anonymous;
                self.route = Route::Home;
            }
        }
    }

    /// The view to render for the current (state, route).
    pub fn view(&self) -> View {
        match (&self.state, self.route) {
            // Route events may land before the session check resolves;
            // hold the loading view until it does.
            (SessionState::Checking, _) => View::Loading,
            (_, Route::AdminSignup) => View::Signup,
            (SessionState::Authenticated { .. }, Route::Admin) => View::Admin,
            (SessionState::Anonymous, Route::Admin) => View::Login,
            (_, Route::Home) => View::Public,
        }
    }
}

impl Default for SessionGate {
    fn default() -> Self {
        Self::new()
    }
}
