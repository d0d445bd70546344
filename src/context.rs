use crate::session::{SessionConfig, SessionResult};

/// Screens the app can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Route {
    Setup,
    Room,
    Results,
}

/// Session-scoped holder for the configuration and result records.
///
/// Owned by the app and lent to whichever screen is active. Slots are replaced
/// wholesale; an unset slot reads as `None` and the caller redirects.
#[derive(Debug, Default)]
pub struct SessionContext {
    config: Option<SessionConfig>,
    result: Option<SessionResult>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_config(&mut self, config: SessionConfig) {
        self.config = Some(config);
    }

    pub fn config(&self) -> Option<&SessionConfig> {
        self.config.as_ref()
    }

    pub fn set_result(&mut self, result: SessionResult) {
        self.result = Some(result);
    }

    pub fn result(&self) -> Option<&SessionResult> {
        self.result.as_ref()
    }

    /// Clear both slots before a new practice round.
    pub fn reset(&mut self) {
        self.config = None;
        self.result = None;
    }
}
