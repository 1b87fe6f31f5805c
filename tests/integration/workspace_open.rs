use std::env;

use anyhow::Result;
use jworkspace_users::config::HOME_ENV;
use jworkspace_users::UserProfileEngine;

use crate::IntegrationHarness;

// The only test that resolves the workspace root from the environment.
#[test]
fn open_uses_workspace_home_override() -> Result<()> {
    let harness = IntegrationHarness::new();
    env::set_var(HOME_ENV, harness.workspace_path());

    let mut engine = UserProfileEngine::open()?;
    assert_eq!(engine.paths.root, harness.workspace_path());
    assert!(harness.workspace_path().join("users").is_dir());

    engine.add_profile("env-user", "pw")?;
    assert!(harness.workspace_path().join("users/env-user/pwd.dat").is_file());
    Ok(())
}
