use anyhow::Result;
use jworkspace_users::ProfileError;

use crate::support::profiles::{complete_profile, PASSWORD};
use crate::IntegrationHarness;

#[test]
fn bare_profile_then_complete_profile_login() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut engine = harness.engine();
    let profile = complete_profile("test");

    // A bare profile goes to disk and is selected back from it.
    engine.add_profile(profile.user_name(), PASSWORD)?;
    engine.login(profile.user_name(), PASSWORD)?;
    let current = engine.current().expect("logged in");
    assert_eq!(current.user_name(), profile.user_name());
    assert_ne!(current.email(), profile.email());
    assert_ne!(current.first_name(), profile.first_name());
    assert_ne!(current.last_name(), profile.last_name());
    engine.logout()?;

    // Overwrite with the complete profile and log in again.
    harness.store().save(&profile)?;
    engine.login(profile.user_name(), PASSWORD)?;
    let current = engine.current().expect("logged in");
    assert_eq!(current.user_name(), profile.user_name());
    assert_eq!(current.first_name(), profile.first_name());
    assert_eq!(current.last_name(), profile.last_name());
    assert_eq!(current.email(), profile.email());
    assert_eq!(current.description(), profile.description());
    assert_eq!(current.parameters(), profile.parameters());
    assert_eq!(
        engine.path(),
        Some(harness.workspace_path().join("users").join("test").as_path())
    );

    engine.logout()?;
    assert!(!engine.user_logged());

    engine.remove_profile(profile.user_name(), PASSWORD)?;
    assert!(engine.users_list()?.is_empty());
    Ok(())
}

#[test]
fn switching_users_saves_the_previous_session() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut engine = harness.engine();
    engine.add_profile("alice", "a-pass")?;
    engine.add_profile("bob", "b-pass")?;

    engine.login("alice", "a-pass")?;
    engine.set_first_name("a-pass", "Alice")?;
    engine.login("bob", "b-pass")?;
    assert_eq!(engine.user_name(), Some("bob"));

    let alice = harness.store().load("alice")?;
    assert_eq!(alice.first_name(), "Alice");
    assert_eq!(engine.users_list()?, vec!["alice", "bob"]);
    Ok(())
}

#[test]
fn failed_login_keeps_the_current_session() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut engine = harness.engine();
    engine.add_profile("alice", "a-pass")?;
    engine.add_profile("bob", "b-pass")?;
    engine.login("alice", "a-pass")?;

    let err = engine.login("bob", "a-pass").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ProfileError>(),
        Some(ProfileError::Rejected(_))
    ));
    assert_eq!(engine.user_name(), Some("alice"));
    Ok(())
}

#[test]
fn last_user_survives_reopening_the_workspace() -> Result<()> {
    let harness = IntegrationHarness::new();
    {
        let mut engine = harness.engine();
        engine.add_profile("anton", PASSWORD)?;
        engine.login("anton", PASSWORD)?;
        assert!(engine.set_user_name(PASSWORD, "troshin")?);
        engine.logout()?;
    }
    let engine = harness.engine();
    assert_eq!(engine.config.last_user.as_deref(), Some("troshin"));
    assert!(engine.store().load("troshin")?.check_password(PASSWORD));
    Ok(())
}
