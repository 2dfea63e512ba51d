//! Placeholder login gate.
//!
//! Credentials come from configuration and are compared as plain text.
//! There are no users, roles or sessions.

use tracing::{info, warn};

use crate::config::LoginSettings;
use crate::error::{EngineError, EngineResult};

/// Checks a username and password against the configured pair.
#[derive(Debug, Clone)]
pub struct LoginGate {
    settings: LoginSettings,
}

impl LoginGate {
    /// Creates a gate from login settings.
    pub fn new(settings: LoginSettings) -> Self {
        Self { settings }
    }

    /// Returns true when the gate is switched on.
    pub fn is_enabled(&self) -> bool {
        self.settings.enabled
    }

    /// Lets the caller through, or fails with
    /// [`EngineError::AuthenticationFailed`].
    ///
    /// The username is trimmed before comparison; the password is not.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::app::LoginGate;
    /// use attendance_engine::config::LoginSettings;
    ///
    /// let gate = LoginGate::new(LoginSettings::default());
    /// assert!(gate.verify("Admin", "admin123").is_ok());
    /// assert!(gate.verify("Admin", "wrong").is_err());
    /// ```
    pub fn verify(&self, username: &str, password: &str) -> EngineResult<()> {
        if !self.settings.enabled {
            return Ok(());
        }

        let username = username.trim();
        if username == self.settings.username && password == self.settings.password {
            info!(username, "Login accepted");
            Ok(())
        } else {
            warn!(username, "Login rejected");
            Err(EngineError::AuthenticationFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_credentials_accepted() {
        let gate = LoginGate::new(LoginSettings::default());
        assert!(gate.is_enabled());
        assert!(gate.verify(" Admin ", "admin123").is_ok());
    }

    #[test]
    fn test_wrong_credentials_rejected() {
        let gate = LoginGate::new(LoginSettings::default());
        assert!(matches!(
            gate.verify("admin", "admin123"),
            Err(EngineError::AuthenticationFailed)
        ));
        assert!(gate.verify("Admin", "admin123 ").is_err());
        assert!(gate.verify("", "").is_err());
    }

    #[test]
    fn test_disabled_gate_lets_anyone_in() {
        let gate = LoginGate::new(LoginSettings {
            enabled: false,
            ..LoginSettings::default()
        });
        assert!(gate.verify("", "").is_ok());
    }

    #[test]
    fn test_custom_credentials() {
        let gate = LoginGate::new(LoginSettings {
            enabled: true,
            username: "hr".to_string(),
            password: "s3cret".to_string(),
        });
        assert!(gate.verify("hr", "s3cret").is_ok());
        assert!(gate.verify("Admin", "admin123").is_err());
    }
}
