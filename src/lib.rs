//! regform - registration form core
//!
//! Field validation, touched/error bookkeeping, submit gating, simulated
//! submission latency and role-based redirect, plus the small application
//! shell (router, theme) the form runs in.

pub mod app;
pub mod cli;
pub mod config;
pub mod form;
pub mod observability;
