//! Filesystem persistence for profiles.
//!
//! A saved profile is three co-located files in its user directory: the
//! structured record, the `var.cfg` parameters and the raw password digest.
//! The store also tracks the active home directory, which follows renames of
//! the logged-in user.

use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::error::{ProfileError, Result};

use super::digest::PasswordDigest;
use super::layout::ProfileLayout;
use super::model::Profile;
use super::parameters::Parameters;
use super::record::ProfileRecord;

/// Header comment written at the top of every `var.cfg`.
pub const DEFAULT_PARAMETERS_HEADER: &str = "USER VARIABLES";

/// Result returned after writing a profile.
#[derive(Debug, Clone)]
pub struct ProfileWriteOutcome {
    pub dir: PathBuf,
    pub record_path: PathBuf,
    /// Lowercase hex SHA-256 of the encoded record.
    pub hash: String,
}

#[derive(Debug, Clone)]
pub struct ProfileStore {
    users_dir: PathBuf,
    parameters_header: String,
    home: Option<PathBuf>,
}

impl ProfileStore {
    pub fn new(users_dir: impl Into<PathBuf>) -> Self {
        Self {
            users_dir: users_dir.into(),
            parameters_header: DEFAULT_PARAMETERS_HEADER.to_string(),
            home: None,
        }
    }

    pub fn with_parameters_header(mut self, header: impl Into<String>) -> Self {
        self.parameters_header = header.into();
        self
    }

    pub fn users_dir(&self) -> &Path {
        &self.users_dir
    }

    /// Directory of the active user, if any.
    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Points the active home at `user_name`'s directory.
    pub fn activate(&mut self, user_name: &str) -> Result<PathBuf> {
        let dir = self.layout(user_name)?.dir;
        log::info!("Changing user home path to {}", dir.display());
        self.home = Some(dir.clone());
        Ok(dir)
    }

    pub fn deactivate(&mut self) {
        self.home = None;
    }

    /// Resolves the artifact paths for `user_name`.
    ///
    /// Names that would escape the users directory are rejected.
    pub fn layout(&self, user_name: &str) -> Result<ProfileLayout> {
        validate_user_name(user_name)?;
        Ok(ProfileLayout::new(&self.users_dir, user_name))
    }

    pub fn exists(&self, user_name: &str) -> bool {
        self.layout(user_name)
            .map(|layout| layout.password.is_file())
            .unwrap_or(false)
    }

    /// Sorted names of every user directory holding a password digest.
    pub fn list_users(&self) -> Result<Vec<String>> {
        let mut users = Vec::new();
        if !self.users_dir.is_dir() {
            return Ok(users);
        }
        for entry in fs::read_dir(&self.users_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if self.exists(&name) {
                users.push(name);
            }
        }
        users.sort();
        Ok(users)
    }

    pub fn save(&self, profile: &Profile) -> Result<ProfileWriteOutcome> {
        let layout = self.layout(profile.user_name())?;
        fs::create_dir_all(&layout.dir)?;

        let params = BufWriter::new(File::create(&layout.parameters)?);
        profile
            .parameters()
            .write_to(params, &self.parameters_header)?;

        let record = profile.record().to_bytes()?;
        let hash = compute_hash(&record);
        fs::write(&layout.record, &record)?;

        fs::write(&layout.password, profile.digest().as_bytes())?;

        log::debug!("saved profile {} to {}", profile.user_name(), layout.dir.display());
        Ok(ProfileWriteOutcome {
            dir: layout.dir,
            record_path: layout.record,
            hash,
        })
    }

    pub fn load(&self, user_name: &str) -> Result<Profile> {
        let layout = self.layout(user_name)?;

        let mut record = ProfileRecord::read_from(BufReader::new(File::open(&layout.record)?))?;
        if record.user_name != user_name {
            log::warn!(
                "profile record names {:?} but lives in {}; using the directory name",
                record.user_name,
                layout.dir.display()
            );
            record.user_name = user_name.to_string();
        }

        let parameters = Parameters::read_from(BufReader::new(File::open(&layout.parameters)?))?;
        let digest = PasswordDigest::from_bytes(&fs::read(&layout.password)?)?;

        Ok(Profile::from_parts(record, parameters, digest))
    }

    /// Deletes the user's directory and everything in it.
    pub fn remove(&mut self, user_name: &str) -> Result<()> {
        let layout = self.layout(user_name)?;
        fs::remove_dir_all(&layout.dir)?;
        if self.home.as_deref() == Some(layout.dir.as_path()) {
            self.home = None;
        }
        log::info!("removed profile directory {}", layout.dir.display());
        Ok(())
    }

    /// Renames `profile` and its directory to `new_name`.
    ///
    /// Returns `Ok(false)` with nothing changed when the target directory
    /// already exists or the move fails. Renaming to the current name
    /// succeeds without touching the filesystem.
    pub fn rename(&mut self, profile: &mut Profile, password: &str, new_name: &str) -> Result<bool> {
        profile.authorize(password)?;
        if profile.user_name() == new_name {
            return Ok(true);
        }
        let old = self.layout(profile.user_name())?;
        let new = self.layout(new_name)?;
        if new.dir.exists() {
            log::warn!("cannot rename to {}: directory exists", new.dir.display());
            return Ok(false);
        }
        if let Err(e) = fs::rename(&old.dir, &new.dir) {
            log::warn!(
                "cannot rename {} to {}: {e}",
                old.dir.display(),
                new.dir.display()
            );
            return Ok(false);
        }

        profile.rename_to(new_name);
        log::info!("Changing user home path to {}", new.dir.display());
        self.home = Some(new.dir.clone());

        // Only the stored name follows the move; other unsaved edits wait for
        // the next save. `load` trusts the directory name, so a stale record
        // is not fatal.
        if new.record.is_file() {
            if let Err(e) = rewrite_stored_name(&new.record, new_name) {
                log::warn!(
                    "renamed to {} but could not update {}: {e}",
                    new_name,
                    new.record.display()
                );
            }
        }
        Ok(true)
    }
}

fn rewrite_stored_name(path: &Path, user_name: &str) -> Result<()> {
    let mut record = ProfileRecord::read_from(BufReader::new(File::open(path)?))?;
    record.user_name = user_name.to_string();
    fs::write(path, record.to_bytes()?)?;
    Ok(())
}

fn validate_user_name(user_name: &str) -> Result<()> {
    let invalid = user_name.trim().is_empty()
        || user_name == "."
        || user_name == ".."
        || user_name.contains(['/', '\\'])
        || user_name.contains('\0');
    if invalid {
        return Err(ProfileError::rejected(format!(
            "{user_name:?} is not a valid user name"
        )));
    }
    Ok(())
}

/// Computes a lowercase hex SHA-256 hash of the provided bytes.
pub fn compute_hash(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{:x}", digest)
}
