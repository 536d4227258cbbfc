use serde::Serialize;

use super::error::ValidationError;

/// Whether the credential form signs an existing user in or creates one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CredentialMode {
    #[default]
    SignIn,
    SignUp,
}

impl CredentialMode {
    pub const fn toggled(self) -> Self {
        match self {
            Self::SignIn => Self::SignUp,
            Self::SignUp => Self::SignIn,
        }
    }

    pub const fn submit_label(self) -> &'static str {
        match self {
            Self::SignIn => "Sign In",
            Self::SignUp => "Create Account",
        }
    }

    pub const fn pending_label(self) -> &'static str {
        match self {
            Self::SignIn => "Signing In...",
            Self::SignUp => "Creating Account...",
        }
    }
}

/// Market sectors offered on sign-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Market {
    Technology,
    Healthcare,
    Finance,
    RealEstate,
    Education,
    Retail,
    Manufacturing,
    Energy,
    Transportation,
    Entertainment,
}

impl Market {
    pub fn all() -> &'static [Market] {
        &[
            Market::Technology,
            Market::Healthcare,
            Market::Finance,
            Market::RealEstate,
            Market::Education,
            Market::Retail,
            Market::Manufacturing,
            Market::Energy,
            Market::Transportation,
            Market::Entertainment,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Market::Technology => "Technology",
            Market::Healthcare => "Healthcare",
            Market::Finance => "Finance",
            Market::RealEstate => "Real Estate",
            Market::Education => "Education",
            Market::Retail => "Retail",
            Market::Manufacturing => "Manufacturing",
            Market::Energy => "Energy",
            Market::Transportation => "Transportation",
            Market::Entertainment => "Entertainment",
        }
    }

    /// Stored form of the sector: its label lowercased.
    pub fn value(self) -> String {
        self.label().to_lowercase()
    }
}

impl std::str::FromStr for Market {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Market::all()
            .iter()
            .copied()
            .find(|m| m.label().eq_ignore_ascii_case(s.trim()))
            .ok_or(ValidationError::InvalidSelection)
    }
}

/// Raw credential form input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CredentialForm {
    pub id: String,
    pub name: String,
    pub email: String,
    pub market: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Profile row written to the `users` table after sign-up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub market: String,
}

impl CredentialForm {
    /// Required fields for `mode`, all of which must be non-blank.
    fn required(&self, mode: CredentialMode) -> Vec<&str> {
        match mode {
            CredentialMode::SignIn => vec![self.email.as_str(), self.password.as_str()],
            CredentialMode::SignUp => vec![
                self.id.as_str(),
                self.name.as_str(),
                self.email.as_str(),
                self.market.as_str(),
                self.password.as_str(),
            ],
        }
    }

    /// Sign-up also requires the market to be one of the offered sectors.
    pub fn credentials(&self, mode: CredentialMode) -> Result<Credentials, ValidationError> {
        if self.required(mode).iter().any(|f| f.trim().is_empty()) {
            return Err(ValidationError::MissingInformation);
        }
        if mode == CredentialMode::SignUp {
            self.market.parse::<Market>()?;
        }
        Ok(Credentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }

    pub fn profile(&self) -> Profile {
        Profile {
            id: self.id.trim().to_string(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            market: self.market.trim().to_lowercase(),
        }
    }
}
