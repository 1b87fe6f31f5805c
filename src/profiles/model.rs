//! The workspace user profile.
//!
//! Identity fields are only mutable through password-gated setters. Each of
//! them runs [`Profile::authorize`] first and touches the field only once the
//! check has passed, so a rejected call leaves the profile untouched.

use crate::error::{ProfileError, Result, PASSWORD_CHECK_FAILED};

use super::digest::PasswordDigest;
use super::parameters::Parameters;
use super::record::ProfileRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    user_name: String,
    first_name: String,
    last_name: String,
    email: String,
    description: String,
    parameters: Parameters,
    digest: PasswordDigest,
}

impl Profile {
    /// Builds a new profile, hashing `password` straight away.
    ///
    /// Fails with [`ProfileError::Rejected`] when the user name is absent or
    /// blank, or when no password is supplied.
    pub fn create(
        user_name: Option<&str>,
        password: Option<&str>,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<Self> {
        let user_name = match user_name {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err(ProfileError::rejected("user name is required")),
        };
        let password = password.ok_or_else(|| ProfileError::rejected("password is required"))?;
        Ok(Self {
            user_name: user_name.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            description: String::new(),
            parameters: Parameters::new(),
            digest: PasswordDigest::of(password),
        })
    }

    pub(crate) fn from_parts(
        record: ProfileRecord,
        parameters: Parameters,
        digest: PasswordDigest,
    ) -> Self {
        Self {
            user_name: record.user_name,
            first_name: record.first_name,
            last_name: record.last_name,
            email: record.email,
            description: record.description,
            parameters,
            digest,
        }
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut Parameters {
        &mut self.parameters
    }

    pub fn digest(&self) -> &PasswordDigest {
        &self.digest
    }

    pub fn check_password(&self, candidate: &str) -> bool {
        self.digest.matches(candidate)
    }

    /// Capability check shared by every gated mutation.
    pub fn authorize(&self, password: &str) -> Result<()> {
        if self.check_password(password) {
            Ok(())
        } else {
            Err(ProfileError::rejected(PASSWORD_CHECK_FAILED))
        }
    }

    pub fn set_email(&mut self, password: &str, email: &str) -> Result<()> {
        self.authorize(password)?;
        self.email = email.to_string();
        Ok(())
    }

    pub fn set_first_name(&mut self, password: &str, first_name: &str) -> Result<()> {
        self.authorize(password)?;
        self.first_name = first_name.to_string();
        Ok(())
    }

    pub fn set_last_name(&mut self, password: &str, last_name: &str) -> Result<()> {
        self.authorize(password)?;
        self.last_name = last_name.to_string();
        Ok(())
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
    }

    /// Replaces the password after verifying the old one and the confirmation.
    pub fn set_password(&mut self, old: &str, new: &str, confirm: &str) -> Result<()> {
        self.authorize(old)?;
        if new != confirm {
            return Err(ProfileError::rejected("password confirmation does not match"));
        }
        self.digest = PasswordDigest::of(new);
        Ok(())
    }

    /// Renames in memory only; the directory move is owned by the store.
    pub(crate) fn rename_to(&mut self, user_name: &str) {
        self.user_name = user_name.to_string();
    }

    pub fn record(&self) -> ProfileRecord {
        ProfileRecord {
            user_name: self.user_name.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            description: self.description.clone(),
        }
    }
}
