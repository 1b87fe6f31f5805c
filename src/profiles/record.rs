//! Binary stream holding the structured profile fields.
//!
//! Layout: five strings in fixed order (user name, first name, last name,
//! email, description), each a big-endian `u16` byte count followed by that
//! many UTF-8 bytes.

use std::io::{self, Read, Write};

use crate::error::{ProfileError, Result};

/// Structured fields of a profile as persisted in `profile.dat`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileRecord {
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub description: String,
}

impl ProfileRecord {
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        for field in self.fields() {
            write_string(&mut writer, field)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        Ok(Self {
            user_name: read_string(&mut reader, "user name")?,
            first_name: read_string(&mut reader, "first name")?,
            last_name: read_string(&mut reader, "last name")?,
            email: read_string(&mut reader, "email")?,
            description: read_string(&mut reader, "description")?,
        })
    }

    /// Encodes the record into an owned buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(buf)
    }

    fn fields(&self) -> [&str; 5] {
        [
            self.user_name.as_str(),
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.email.as_str(),
            self.description.as_str(),
        ]
    }
}

fn write_string<W: Write>(writer: &mut W, value: &str) -> Result<()> {
    let len = u16::try_from(value.len()).map_err(|_| {
        ProfileError::parse(format!(
            "field of {} bytes exceeds the {} byte limit",
            value.len(),
            u16::MAX
        ))
    })?;
    writer.write_all(&len.to_be_bytes())?;
    writer.write_all(value.as_bytes())?;
    Ok(())
}

fn read_string<R: Read>(reader: &mut R, field: &str) -> Result<String> {
    let mut len = [0u8; 2];
    read_exact(reader, &mut len, field)?;
    let mut buf = vec![0u8; u16::from_be_bytes(len) as usize];
    read_exact(reader, &mut buf, field)?;
    String::from_utf8(buf).map_err(|e| ProfileError::parse(format!("{field}: {e}")))
}

fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8], field: &str) -> Result<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => {
            ProfileError::parse(format!("profile record truncated while reading {field}"))
        }
        _ => ProfileError::Io(e),
    })
}
