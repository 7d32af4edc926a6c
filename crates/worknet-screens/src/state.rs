//! Observable per-screen state

/// State record a screen renders from.
///
/// `Loading -> {Ready, Failed}`; mutations re-enter `Loading`. `Idle` is
/// the pre-first-load state so subscribers can distinguish "never loaded"
/// from "reloading".
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    /// No load has been requested yet.
    Idle,
    /// A load or mutation is in flight.
    Loading,
    /// The last load completed; the record is current as of that load.
    Ready(T),
    /// The last load failed; the string is shown with a retry affordance.
    Failed(String),
}

impl<T> ViewState<T> {
    /// Whether a load or mutation is in flight.
    #[inline]
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The ready record, if any.
    #[inline]
    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    /// The failure message, if any.
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self::Idle
    }
}
