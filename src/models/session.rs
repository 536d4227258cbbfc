use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// An authenticated session issued by the auth service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    pub user: AuthUser,
}

impl Session {
    /// True once `now` is within `margin` of the expiry time.
    pub fn expires_within(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        self.expires_at.is_some_and(|at| at - margin <= now)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_within(now, Duration::zero())
    }
}

/// Session change notification delivered to subscribers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

/// In-memory mirror of the auth service's session.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Loading,
    SignedOut,
    SignedIn(Rc<Session>),
}

impl SessionState {
    pub fn from_session(session: Option<Session>) -> Self {
        session.map_or(Self::SignedOut, |s| Self::SignedIn(Rc::new(s)))
    }

    pub const fn session(&self) -> Option<&Rc<Session>> {
        match self {
            Self::SignedIn(session) => Some(session),
            _ => None,
        }
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::SignedIn(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn session(expires_at: Option<DateTime<Utc>>) -> Session {
        Session {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            expires_at,
            user: AuthUser {
                id: "u-1".into(),
                email: Some("a@b.c".into()),
            },
        }
    }

    #[test]
    fn expiry_with_margin() {
        let at = Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap();
        let s = session(Some(at));

        assert!(!s.is_expired(at - Duration::seconds(1)));
        assert!(s.is_expired(at));
        assert!(s.expires_within(at - Duration::seconds(30), Duration::seconds(60)));
        assert!(!session(None).is_expired(at));
    }

    #[test]
    fn state_from_optional_session() {
        assert_eq!(SessionState::from_session(None), SessionState::SignedOut);

        let state = SessionState::from_session(Some(session(None)));
        assert!(state.is_authenticated());
        assert_eq!(state.session().unwrap().user.id, "u-1");
        assert!(SessionState::default().is_loading());
    }
}
