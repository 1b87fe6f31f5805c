//! Shared filesystem layout helpers for profile storage.
//!
//! Every profile lives in its own directory under `<root>/users/<name>/`.
//! Centralizing the file names here keeps the store, the engine and the CLI
//! in agreement about where each artifact sits.

use std::path::{Path, PathBuf};

/// Default name of the directory holding one subdirectory per user.
pub const USERS_SUBDIR: &str = "users";
/// Key/value parameters of a user.
pub const VAR_CFG: &str = "var.cfg";
/// Raw password digest bytes.
pub const PWD_DAT: &str = "pwd.dat";
/// Length-prefixed structured profile fields.
pub const PROFILE_DAT: &str = "profile.dat";

/// Paths of every artifact belonging to one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileLayout {
    pub dir: PathBuf,
    pub parameters: PathBuf,
    pub password: PathBuf,
    pub record: PathBuf,
}

impl ProfileLayout {
    /// Layout for `user_name` under the given users directory.
    pub fn new(users_dir: &Path, user_name: &str) -> Self {
        let dir = users_dir.join(user_name);
        Self {
            parameters: dir.join(VAR_CFG),
            password: dir.join(PWD_DAT),
            record: dir.join(PROFILE_DAT),
            dir,
        }
    }
}

/// Returns the users directory inside a workspace root, using the default name.
pub fn users_dir(root: &Path) -> PathBuf {
    root.join(USERS_SUBDIR)
}
