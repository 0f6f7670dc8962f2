//! Login state derived from the held session.

use std::fmt;

/// Whether a session is currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    /// No session is held.
    #[default]
    LoggedOut,
    /// A session is held. The service may not have confirmed it yet.
    LoggedIn,
}

impl AuthState {
    /// Derive the state from an optional session.
    pub fn of<T>(session: Option<&T>) -> Self {
        if session.is_some() {
            AuthState::LoggedIn
        } else {
            AuthState::LoggedOut
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, AuthState::LoggedIn)
    }
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthState::LoggedOut => f.write_str("logged out"),
            AuthState::LoggedIn => f.write_str("logged in"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_of() {
        assert_eq!(AuthState::of::<u8>(None), AuthState::LoggedOut);
        assert_eq!(AuthState::of(Some(&1u8)), AuthState::LoggedIn);
    }

    #[test]
    fn test_is_logged_in() {
        assert!(!AuthState::LoggedOut.is_logged_in());
        assert!(AuthState::LoggedIn.is_logged_in());
    }

    #[test]
    fn test_default() {
        assert_eq!(AuthState::default(), AuthState::LoggedOut);
    }

    #[test]
    fn test_display() {
        assert_eq!(AuthState::LoggedIn.to_string(), "logged in");
        assert_eq!(AuthState::LoggedOut.to_string(), "logged out");
    }
}
