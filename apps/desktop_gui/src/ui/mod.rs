//! UI layer for the claim checker: app shell, panels, and severity theming.

pub mod app;
pub mod panels;
pub mod theme;

pub use app::ClaimCheckerApp;
