use jworkspace_users::config::{self, WorkspacePaths};
use jworkspace_users::{AppConfig, ProfileStore, UserProfileEngine};
use std::path::Path;
use tempfile::TempDir;

pub struct IntegrationHarness {
    workspace: TempDir,
}

impl IntegrationHarness {
    pub fn new() -> Self {
        let workspace = TempDir::new().expect("failed to create temp workspace");
        Self { workspace }
    }

    pub fn workspace_path(&self) -> &Path {
        self.workspace.path()
    }

    pub fn workspace(&self) -> (AppConfig, WorkspacePaths) {
        config::ensure_workspace_structure_at(self.workspace.path())
            .expect("failed to prepare workspace for tests")
    }

    pub fn engine(&self) -> UserProfileEngine {
        let (config, paths) = self.workspace();
        UserProfileEngine::new(config, paths)
    }

    pub fn store(&self) -> ProfileStore {
        let (_, paths) = self.workspace();
        ProfileStore::new(paths.users_dir)
    }
}

mod login_flow;
mod profile_properties;
mod workspace_open;
pub mod support;
