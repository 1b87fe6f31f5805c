//! User profile engine: the login session on top of [`ProfileStore`].
//!
//! At most one profile is logged in at a time. Edits made through the engine
//! stay in memory until [`UserProfileEngine::save_current`] or
//! [`UserProfileEngine::logout`] writes them back. A rename moves the user
//! directory and updates only the stored name.

pub mod events;

pub use events::{SessionEvent, SessionEventType, SessionLog, EVENTS_LOG};

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::{self, AppConfig, WorkspacePaths};
use crate::error::ProfileError;
use crate::profiles::{Parameters, Profile, ProfileStore};

pub struct UserProfileEngine {
    pub config: AppConfig,
    pub paths: WorkspacePaths,
    store: ProfileStore,
    log: SessionLog,
    current: Option<Profile>,
}

impl UserProfileEngine {
    /// Opens the engine on the configured workspace root.
    pub fn open() -> Result<Self> {
        let (config, paths) = config::ensure_workspace_structure()?;
        Ok(Self::new(config, paths))
    }

    pub fn new(config: AppConfig, paths: WorkspacePaths) -> Self {
        let store = ProfileStore::new(&paths.users_dir)
            .with_parameters_header(config.profiles.parameters_header.clone());
        let log = SessionLog::for_config_dir(&paths.config_dir);
        Self {
            config,
            paths,
            store,
            log,
            current: None,
        }
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    pub fn session_log(&self) -> &SessionLog {
        &self.log
    }

    /// Creates a bare profile on disk with only a name and a password.
    pub fn add_profile(&mut self, name: &str, password: &str) -> Result<()> {
        if self.store.exists(name) {
            return Err(ProfileError::rejected(format!("user {name:?} already exists")).into());
        }
        let profile = Profile::create(Some(name), Some(password), "", "", "")?;
        self.store.save(&profile)?;
        log::info!("added profile {name}");
        self.record(name, SessionEventType::ProfileAdded, serde_json::Value::Null)
    }

    pub fn remove_profile(&mut self, name: &str, password: &str) -> Result<()> {
        let profile = self.store.load(name)?;
        profile.authorize(password)?;
        if self.current_name() == Some(name) {
            self.current = None;
            self.store.deactivate();
        }
        self.store.remove(name)?;
        if self.config.last_user.as_deref() == Some(name) {
            self.config.last_user = None;
            config::save(&self.paths, &self.config)?;
        }
        self.record(name, SessionEventType::ProfileRemoved, serde_json::Value::Null)
    }

    /// Loads `name` from disk and makes it the current profile.
    ///
    /// A user who is already logged in is logged out first.
    pub fn login(&mut self, name: &str, password: &str) -> Result<()> {
        if !self.store.exists(name) {
            return Err(ProfileError::rejected(format!("unknown user {name:?}")).into());
        }
        self.store.load(name)?.authorize(password)?;
        self.logout()?;
        // Reload so edits saved by the logout above are picked up.
        let profile = self.store.load(name)?;
        self.store.activate(name)?;
        self.current = Some(profile);
        self.config.last_user = Some(name.to_string());
        config::save(&self.paths, &self.config)?;
        log::info!("user {name} logged in");
        self.record(name, SessionEventType::LoggedIn, serde_json::Value::Null)
    }

    /// Saves and closes the current session. Does nothing when nobody is logged in.
    pub fn logout(&mut self) -> Result<()> {
        let Some(profile) = self.current.take() else {
            return Ok(());
        };
        self.store.save(&profile)?;
        self.store.deactivate();
        log::info!("user {} logged out", profile.user_name());
        self.record(
            profile.user_name(),
            SessionEventType::LoggedOut,
            serde_json::Value::Null,
        )
    }

    pub fn user_logged(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&Profile> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Result<&mut Profile> {
        self.current
            .as_mut()
            .ok_or_else(|| ProfileError::rejected("no user is logged in").into())
    }

    fn current_name(&self) -> Option<&str> {
        self.current.as_ref().map(Profile::user_name)
    }

    pub fn save_current(&self) -> Result<()> {
        if let Some(profile) = &self.current {
            self.store.save(profile)?;
        }
        Ok(())
    }

    pub fn users_list(&self) -> Result<Vec<String>> {
        Ok(self.store.list_users()?)
    }

    /// Home directory of the logged-in user.
    pub fn path(&self) -> Option<&Path> {
        self.store.home()
    }

    pub fn path_of(&self, name: &str) -> Result<PathBuf> {
        Ok(self.store.layout(name)?.dir)
    }

    pub fn user_name(&self) -> Option<&str> {
        self.current_name()
    }

    pub fn parameters(&self) -> Option<&Parameters> {
        self.current.as_ref().map(Profile::parameters)
    }

    pub fn parameters_mut(&mut self) -> Result<&mut Parameters> {
        Ok(self.current_mut()?.parameters_mut())
    }

    pub fn check_password(&self, password: &str) -> Result<bool> {
        match &self.current {
            Some(profile) => Ok(profile.check_password(password)),
            None => Err(ProfileError::rejected("no user is logged in").into()),
        }
    }

    pub fn set_email(&mut self, password: &str, email: &str) -> Result<()> {
        Ok(self.current_mut()?.set_email(password, email)?)
    }

    pub fn set_first_name(&mut self, password: &str, first_name: &str) -> Result<()> {
        Ok(self.current_mut()?.set_first_name(password, first_name)?)
    }

    pub fn set_last_name(&mut self, password: &str, last_name: &str) -> Result<()> {
        Ok(self.current_mut()?.set_last_name(password, last_name)?)
    }

    pub fn set_description(&mut self, description: &str) -> Result<()> {
        self.current_mut()?.set_description(description);
        Ok(())
    }

    pub fn set_password(&mut self, old: &str, new: &str, confirm: &str) -> Result<()> {
        let profile = self.current_mut()?;
        profile.set_password(old, new, confirm)?;
        let name = profile.user_name().to_string();
        self.save_current()?;
        self.record(&name, SessionEventType::PasswordChanged, serde_json::Value::Null)
    }

    /// Renames the logged-in user together with their directory.
    pub fn set_user_name(&mut self, password: &str, new_name: &str) -> Result<bool> {
        let Some(profile) = self.current.as_mut() else {
            return Err(ProfileError::rejected("no user is logged in").into());
        };
        let old_name = profile.user_name().to_string();
        if !self.store.rename(profile, password, new_name)? {
            return Ok(false);
        }
        if old_name == new_name {
            return Ok(true);
        }
        self.config.last_user = Some(new_name.to_string());
        config::save(&self.paths, &self.config)?;
        self.record(
            new_name,
            SessionEventType::Renamed,
            serde_json::json!({ "from": old_name, "to": new_name }),
        )?;
        Ok(true)
    }

    fn record(
        &self,
        user_name: &str,
        event_type: SessionEventType,
        details: serde_json::Value,
    ) -> Result<()> {
        self.log
            .append_event(&SessionEvent::new(user_name, event_type, details))
    }
}
