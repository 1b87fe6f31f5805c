//! User profiles and their on-disk persistence.
//!
//! A [`Profile`] holds one workspace user's identity, free-form parameters
//! and password digest. [`ProfileStore`] reads and writes it under
//! `users/<name>/`.

pub mod digest;
pub mod layout;
pub mod model;
pub mod parameters;
pub mod record;
pub mod storage;

pub use digest::{PasswordDigest, DIGEST_LEN};
pub use layout::{users_dir, ProfileLayout, PROFILE_DAT, PWD_DAT, USERS_SUBDIR, VAR_CFG};
pub use model::Profile;
pub use parameters::Parameters;
pub use record::ProfileRecord;
pub use storage::{compute_hash, ProfileStore, ProfileWriteOutcome, DEFAULT_PARAMETERS_HEADER};
