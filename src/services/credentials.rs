use crate::models::{
    credentials::{CredentialForm, CredentialMode},
    error::AppError,
    notice::Notice,
};
use crate::services::backend::{AuthBackend, StoreBackend};
use crate::services::session::SessionContext;
use crate::utils::in_flight::InFlight;

/// What a successful credential submission did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CredentialOutcome {
    SignedIn { email: String },
    AccountCreated { confirmed: bool, profile_saved: bool },
}

impl CredentialOutcome {
    pub fn notice(&self) -> Notice {
        match self {
            Self::SignedIn { email } => {
                Notice::success("Login Successful!", format!("Welcome back, {email}!"))
            }
            Self::AccountCreated {
                confirmed: true, ..
            } => Notice::success("Account Created", "Your account is ready and you are signed in."),
            Self::AccountCreated {
                confirmed: false, ..
            } => Notice::success(
                "Account Created",
                "Check your e-mail to confirm your account, then sign in.",
            ),
        }
    }
}

/// Drives the sign-in / sign-up form against the auth service.
pub struct CredentialFlow {
    in_flight: InFlight,
}

impl Default for CredentialFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialFlow {
    pub fn new() -> Self {
        Self {
            in_flight: InFlight::new(),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_busy()
    }

    /// Signs in or up. After sign-up the profile row is written best-effort:
    /// its failure is logged and never fails the submission.
    pub async fn submit<A, S>(
        &self,
        session: &SessionContext<A>,
        store: &S,
        mode: CredentialMode,
        form: &CredentialForm,
    ) -> Result<CredentialOutcome, AppError>
    where
        A: AuthBackend,
        S: StoreBackend,
    {
        let credentials = form.credentials(mode)?;
        let _guard = self.in_flight.begin()?;

        match mode {
            CredentialMode::SignIn => {
                session.sign_in(&credentials).await?;
                Ok(CredentialOutcome::SignedIn {
                    email: credentials.email,
                })
            }
            CredentialMode::SignUp => {
                let profile = form.profile();
                let created = session.sign_up(&credentials, &profile).await?;

                let profile_saved = match store.insert_profile(&profile).await {
                    Ok(()) => true,
                    Err(e) => {
                        log::warn!("Failed to save profile for {}: {e}", profile.email);
                        false
                    }
                };

                Ok(CredentialOutcome::AccountCreated {
                    confirmed: created.is_some(),
                    profile_saved,
                })
            }
        }
    }
}
