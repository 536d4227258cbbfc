use crate::config::Config;
use crate::models::{
    credentials::{Credentials, Profile},
    error::AppError,
    session::{AuthEvent, Session, SessionState},
};
use crate::services::backend::AuthBackend;
use chrono::{Duration, Utc};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener = Rc<dyn Fn(AuthEvent, &SessionState)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Handle for a session-change registration.
///
/// The listener stays registered until [`Subscription::unsubscribe`] is called
/// or the handle is dropped.
#[must_use = "dropping the subscription unregisters the listener"]
pub struct Subscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().entries.retain(|(id, _)| *id != self.id);
        }
    }
}

/// Owned mirror of the auth service's session plus its change notifications.
pub struct SessionContext<A> {
    auth: Rc<A>,
    state: RefCell<SessionState>,
    listeners: Rc<RefCell<Listeners>>,
}

impl<A: AuthBackend> SessionContext<A> {
    pub fn new(auth: Rc<A>) -> Self {
        Self {
            auth,
            state: RefCell::new(SessionState::Loading),
            listeners: Rc::new(RefCell::new(Listeners::default())),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Registers `listener` for every later session change.
    pub fn subscribe(&self, listener: impl Fn(AuthEvent, &SessionState) + 'static) -> Subscription {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Rc::new(listener)));

        Subscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }

    fn publish(&self, event: AuthEvent, state: SessionState) {
        log::debug!(
            "Session event {event:?} ({})",
            if state.is_authenticated() { "signed in" } else { "signed out" }
        );
        *self.state.borrow_mut() = state.clone();

        // Snapshot so listeners may unsubscribe while being notified.
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, l)| l.clone())
            .collect();
        for listener in listeners {
            listener(event, &state);
        }
    }

    /// Loads the current session snapshot. An expired session is refreshed
    /// once; any failure leaves the user signed out.
    pub async fn initialize(&self) -> SessionState {
        let session = match self.auth.get_session().await {
            Ok(Some(session)) if session.is_expired(Utc::now()) => {
                match self.auth.refresh_session(&session).await {
                    Ok(fresh) => Some(fresh),
                    Err(e) => {
                        log::warn!("Stored session could not be refreshed: {e}");
                        None
                    }
                }
            }
            Ok(session) => session,
            Err(e) => {
                log::warn!("Failed to load session: {e}");
                None
            }
        };

        let state = SessionState::from_session(session);
        self.publish(AuthEvent::InitialSession, state.clone());
        state
    }

    /// When the current session should be refreshed, if it expires at all.
    pub fn refresh_due_in(&self) -> Option<Duration> {
        let state = self.state.borrow();
        let expires_at = state.session()?.expires_at?;
        let margin = Duration::seconds(Config::SESSION_REFRESH_MARGIN_SECS);
        Some((expires_at - margin - Utc::now()).max(Duration::zero()))
    }

    /// Refreshes the current session. Failure signs the mirror out.
    pub async fn refresh(&self) -> Result<(), AppError> {
        let Some(current) = self.state.borrow().session().cloned() else {
            return Ok(());
        };

        match self.auth.refresh_session(&current).await {
            Ok(fresh) => {
                self.publish(AuthEvent::TokenRefreshed, SessionState::from_session(Some(fresh)));
                Ok(())
            }
            Err(e) => {
                log::warn!("Session refresh failed: {e}");
                self.publish(AuthEvent::SignedOut, SessionState::SignedOut);
                Err(e)
            }
        }
    }

    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Rc<Session>, AppError> {
        let session = Rc::new(self.auth.sign_in(credentials).await?);
        log::info!("Signed in as {}", credentials.email);
        self.publish(AuthEvent::SignedIn, SessionState::SignedIn(session.clone()));
        Ok(session)
    }

    /// Creates an account; signs in too when the service issues a session.
    pub async fn sign_up(
        &self,
        credentials: &Credentials,
        metadata: &Profile,
    ) -> Result<Option<Rc<Session>>, AppError> {
        let session = self.auth.sign_up(credentials, metadata).await?.map(Rc::new);
        log::info!("Created account for {}", credentials.email);
        if let Some(session) = &session {
            self.publish(AuthEvent::SignedIn, SessionState::SignedIn(session.clone()));
        }
        Ok(session)
    }

    /// Signs out. On failure the session is left untouched.
    pub async fn sign_out(&self) -> Result<(), AppError> {
        self.auth.sign_out().await?;
        log::info!("Signed out");
        self.publish(AuthEvent::SignedOut, SessionState::SignedOut);
        Ok(())
    }
}
