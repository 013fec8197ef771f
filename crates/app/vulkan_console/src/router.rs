//! Path routing with the authentication guard.
//!
//! `/login` is open. `/domains` and `/domains/{id}` need a session and
//! redirect to `/login` without one. Any other path redirects to `/domains`.

use std::fmt;

pub const LOGIN_PATH: &str = "/login";
pub const DOMAINS_PATH: &str = "/domains";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Domains,
    DomainDetail { domain_id: String },
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => LOGIN_PATH.to_string(),
            Route::Domains => DOMAINS_PATH.to_string(),
            Route::DomainDetail { domain_id } => format!("{DOMAINS_PATH}/{domain_id}"),
        }
    }

    fn is_guarded(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Where a path ends up, and the redirects taken on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub route: Route,
    pub redirects: Vec<String>,
}

/// Resolve `path` for a user who is or is not `authenticated`.
pub fn resolve(path: &str, authenticated: bool) -> Resolution {
    let mut redirects = Vec::new();
    let route = match match_path(&normalize(path)) {
        Some(route) => route,
        None => {
            redirects.push(DOMAINS_PATH.to_string());
            Route::Domains
        }
    };
    let route = if route.is_guarded() && !authenticated {
        redirects.push(LOGIN_PATH.to_string());
        Route::Login
    } else {
        route
    };
    Resolution { route, redirects }
}

/// Strip query, fragment and trailing slashes; ensure a leading slash.
fn normalize(path: &str) -> String {
    let path = path.trim();
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

fn match_path(path: &str) -> Option<Route> {
    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
    match segments.as_slice() {
        ["login"] => Some(Route::Login),
        ["domains"] => Some(Route::Domains),
        ["domains", id] if !id.is_empty() => Some(Route::DomainDetail {
            domain_id: (*id).to_string(),
        }),
        _ => None,
    }
}

/// Current route plus the history used by `back`.
#[derive(Debug)]
pub struct Navigator {
    current: Route,
    history: Vec<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            current: Route::Login,
            history: Vec::new(),
        }
    }
}

impl Navigator {
    pub fn current(&self) -> &Route {
        &self.current
    }

    /// Resolve `path` and make the result current.
    pub fn go(&mut self, path: &str, authenticated: bool) -> Resolution {
        let resolution = resolve(path, authenticated);
        if resolution.route != self.current {
            let previous = std::mem::replace(&mut self.current, resolution.route.clone());
            if previous != Route::Login {
                self.history.push(previous);
            }
        }
        resolution
    }

    /// Return to the previous route, or to the domain list when there is none.
    pub fn back(&mut self, authenticated: bool) -> Resolution {
        let target = self
            .history
            .pop()
            .map(|route| route.path())
            .unwrap_or_else(|| DOMAINS_PATH.to_string());
        let resolution = resolve(&target, authenticated);
        self.current = resolution.route.clone();
        resolution
    }

    /// Forget history; used on logout.
    pub fn reset(&mut self) {
        self.history.clear();
    }
}
