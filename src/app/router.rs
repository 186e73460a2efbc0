//! # Router
//!
//! Route table `/`, `/admin`, `/user`, and the `Navigator` the form
//! redirects through.

use std::sync::RwLock;

use serde::Serialize;

use crate::form::Navigator;
use crate::observability::{log_event_with_fields, Event};

/// Page bound to a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Landing page hosting the registration form
    Home,
    Admin,
    User,
    NotFound,
}

impl Route {
    pub fn resolve(path: &str) -> Self {
        match path {
            "/" => Route::Home,
            "/admin" => Route::Admin,
            "/user" => Route::User,
            _ => Route::NotFound,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Admin => "admin",
            Route::User => "user",
            Route::NotFound => "not_found",
        }
    }
}

#[derive(Debug)]
struct RouterState {
    current: String,
    history: Vec<String>,
}

/// In-process router, starts at `/`
#[derive(Debug)]
pub struct Router {
    state: RwLock<RouterState>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(RouterState {
                current: "/".to_string(),
                history: Vec::new(),
            }),
        }
    }

    pub fn current_path(&self) -> String {
        self.state
            .read()
            .map(|s| s.current.clone())
            .unwrap_or_else(|_| "/".to_string())
    }

    pub fn current_route(&self) -> Route {
        Route::resolve(&self.current_path())
    }

    /// Paths navigated to since startup, oldest first
    pub fn history(&self) -> Vec<String> {
        self.state
            .read()
            .map(|s| s.history.clone())
            .unwrap_or_default()
    }
}

impl Navigator for Router {
    fn redirect(&self, path: &str) {
        let route = Route::resolve(path);
        if let Ok(mut state) = self.state.write() {
            state.current = path.to_string();
            state.history.push(path.to_string());
        }
        log_event_with_fields(
            Event::RouteChanged,
            &[("path", path), ("route", route.as_str())],
        );
    }
}
