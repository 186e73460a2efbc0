//! # Application Shell
//!
//! Collaborators around the form core: the route table the form redirects
//! into, and the light/dark theme seeded from the OS preference.

pub mod router;
pub mod theme;

pub use router::{Route, Router};
pub use theme::{SystemColorScheme, Theme, ThemeController};
