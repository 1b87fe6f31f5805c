use std::fs;

use anyhow::Result;
use jworkspace_users::{Profile, ProfileError};

use crate::support::profiles::{complete_profile, PASSWORD};
use crate::IntegrationHarness;

#[test]
fn password_checks_hold_for_many_passwords() {
    let long = "x".repeat(256);
    let passwords = ["", "password", "pässwörd", "p a s s", "🔑", long.as_str()];
    for password in passwords {
        let profile = Profile::create(Some("user"), Some(password), "", "", "").unwrap();
        assert!(profile.check_password(password), "{password:?}");
        for other in passwords.iter().filter(|other| **other != password) {
            assert!(!profile.check_password(other), "{password:?} vs {other:?}");
        }
    }
}

#[test]
fn saved_profile_loads_identically() -> Result<()> {
    let harness = IntegrationHarness::new();
    let store = harness.store();
    let profile = complete_profile("roundtrip");
    store.save(&profile)?;

    let loaded = store.load("roundtrip")?;
    assert_eq!(loaded.user_name(), profile.user_name());
    assert_eq!(loaded.first_name(), profile.first_name());
    assert_eq!(loaded.last_name(), profile.last_name());
    assert_eq!(loaded.email(), profile.email());
    assert_eq!(loaded.description(), profile.description());
    assert_eq!(loaded.parameters(), profile.parameters());
    assert!(loaded.check_password(PASSWORD));
    Ok(())
}

#[test]
fn digest_file_holds_no_plaintext() -> Result<()> {
    let harness = IntegrationHarness::new();
    let store = harness.store();
    let profile = complete_profile("secret");
    store.save(&profile)?;

    let layout = store.layout("secret")?;
    let stored = fs::read(&layout.password)?;
    assert_eq!(stored, profile.digest().as_bytes());
    assert_ne!(stored, PASSWORD.as_bytes());
    for path in [&layout.parameters, &layout.record] {
        let contents = fs::read(path)?;
        assert!(!contents
            .windows(PASSWORD.len())
            .any(|window| window == PASSWORD.as_bytes()));
    }
    Ok(())
}

#[test]
fn rename_to_same_name_leaves_disk_untouched() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut store = harness.store();
    let mut profile = complete_profile("same");
    let outcome = store.save(&profile)?;
    let before = fs::read(&outcome.record_path)?;

    assert!(store.rename(&mut profile, PASSWORD, "same")?);
    assert_eq!(fs::read(&outcome.record_path)?, before);
    assert_eq!(store.home(), None);
    assert_eq!(store.list_users()?, vec!["same"]);
    Ok(())
}

#[test]
fn wrong_password_never_mutates() -> Result<()> {
    let mut profile = complete_profile("gated");
    let before = profile.clone();

    let attempts: Vec<jworkspace_users::Result<()>> = vec![
        profile.set_email("guess", "evil@example.com"),
        profile.set_first_name("guess", "Evil"),
        profile.set_last_name("guess", "Doer"),
        profile.set_password("guess", "new", "new"),
    ];
    for attempt in attempts {
        assert!(matches!(attempt, Err(ProfileError::Rejected(_))));
    }
    assert_eq!(profile, before);
    Ok(())
}
