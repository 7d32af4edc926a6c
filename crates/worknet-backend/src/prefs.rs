//! Local preference store
//!
//! A single boolean-shaped preference: the light/dark theme choice.

use async_trait::async_trait;

use crate::error::BackendError;

/// UI theme choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Light theme (default).
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

/// Local key-value preference store handle.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// The stored theme choice.
    async fn theme(&self) -> Result<Theme, BackendError>;

    /// Persist a theme choice.
    async fn set_theme(&self, theme: Theme) -> Result<(), BackendError>;
}
