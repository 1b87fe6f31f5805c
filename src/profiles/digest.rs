//! One-way password digests.
//!
//! Profiles never keep a plaintext password. The stored value is the 16-byte
//! MD5 digest of the UTF-8 password bytes, which is also the exact content of
//! `pwd.dat` on disk. Password attempts are verified by digesting the
//! candidate and comparing the two digests byte-for-byte.

use md5::{Digest, Md5};
use std::fmt;

use crate::error::{ProfileError, Result};

/// Length in bytes of every stored digest.
pub const DIGEST_LEN: usize = 16;

#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest([u8; DIGEST_LEN]);

impl PasswordDigest {
    /// Digests the UTF-8 bytes of `password`.
    pub fn of(password: &str) -> Self {
        let hash = Md5::digest(password.as_bytes());
        let mut bytes = [0u8; DIGEST_LEN];
        bytes.copy_from_slice(&hash);
        Self(bytes)
    }

    /// Restores a digest read back from storage.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != DIGEST_LEN {
            return Err(ProfileError::parse(format!(
                "password digest must be {DIGEST_LEN} bytes, found {}",
                bytes.len()
            )));
        }
        let mut digest = [0u8; DIGEST_LEN];
        digest.copy_from_slice(bytes);
        Ok(Self(digest))
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Digests `candidate` and compares it with the stored digest.
    pub fn matches(&self, candidate: &str) -> bool {
        Self::of(candidate) == *self
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}
