use jworkspace_users::Profile;

pub const PASSWORD: &str = "password";

/// A fully populated profile, as the details dialog would produce it.
pub fn complete_profile(name: &str) -> Profile {
    let mut profile = Profile::create(
        Some(name),
        Some(PASSWORD),
        "First Name",
        "Second Name",
        "test@test.com",
    )
    .expect("valid profile");
    profile.set_description("Regular workspace user");
    let params = profile.parameters_mut();
    params.set("look.and.feel", "metal");
    params.set("desktop.background", "C:\\images\\sky.png");
    params.set("greeting", "hello, world\nsecond line");
    profile
}
