//! # Theme
//!
//! Light/dark theme. The OS color-scheme preference is an injected source:
//! read once at startup, then followed through change notifications. A
//! manual toggle holds until the next OS change.

use std::fmt;

use serde::Serialize;
use tokio::sync::watch;

use crate::observability::{log_event_with_fields, Event};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// OS-level "prefers dark color scheme" preference
#[derive(Debug)]
pub struct SystemColorScheme {
    tx: watch::Sender<bool>,
}

impl SystemColorScheme {
    pub fn new(prefers_dark: bool) -> Self {
        let (tx, _) = watch::channel(prefers_dark);
        Self { tx }
    }

    pub fn prefers_dark(&self) -> bool {
        *self.tx.borrow()
    }

    /// Publish a preference change to every subscriber
    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        self.tx.send_if_modified(|current| {
            let changed = *current != prefers_dark;
            *current = prefers_dark;
            changed
        });
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

/// Current theme plus the subscription to OS changes
#[derive(Debug)]
pub struct ThemeController {
    theme: Theme,
    system: watch::Receiver<bool>,
}

impl ThemeController {
    /// Seed from the OS preference and subscribe to its changes
    pub fn new(source: &SystemColorScheme) -> Self {
        let system = source.subscribe();
        let theme = Theme::from_prefers_dark(*system.borrow());
        Self { theme, system }
    }

    pub fn current(&self) -> Theme {
        self.theme
    }

    /// Manual light/dark switch
    pub fn toggle(&mut self) -> Theme {
        self.set(self.theme.toggled(), "toggle");
        self.theme
    }

    /// Apply an OS preference change published since the last sync
    ///
    /// Returns the new theme when a change was pending.
    pub fn sync_with_system(&mut self) -> Option<Theme> {
        if !self.system.has_changed().unwrap_or(false) {
            return None;
        }
        let prefers_dark = *self.system.borrow_and_update();
        self.set(Theme::from_prefers_dark(prefers_dark), "system");
        Some(self.theme)
    }

    /// Wait for the next OS preference change and apply it
    ///
    /// Returns `None` once the source is gone.
    pub async fn follow_system(&mut self) -> Option<Theme> {
        self.system.changed().await.ok()?;
        let prefers_dark = *self.system.borrow_and_update();
        self.set(Theme::from_prefers_dark(prefers_dark), "system");
        Some(self.theme)
    }

    fn set(&mut self, theme: Theme, source: &str) {
        self.theme = theme;
        log_event_with_fields(
            Event::ThemeChanged,
            &[("source", source), ("theme", theme.as_str())],
        );
    }
}
