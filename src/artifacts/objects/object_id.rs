//! Git object identifier (SHA-1 hash)
//!
//! Object IDs are kept in their 40-character lowercase hex form. Tree entries
//! carry the raw 20-byte form, so both encodings are supported here.
//!
//! Loose objects live at `objects/<first-2-chars>/<remaining-38-chars>`.

use crate::artifacts::objects::{OBJECT_ID_LENGTH, OBJECT_ID_RAW_LENGTH};
use anyhow::Context;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate a 40-character hex object ID.
    pub fn try_parse(id: impl Into<String>) -> anyhow::Result<Self> {
        let id = id.into();

        if id.len() != OBJECT_ID_LENGTH {
            anyhow::bail!("invalid object id length {} for {id:?}", id.len());
        }
        if !id.bytes().all(|b| b.is_ascii_hexdigit()) {
            anyhow::bail!("invalid object id characters in {id:?}");
        }

        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Build an object ID from a raw SHA-1 digest.
    pub fn from_digest(digest: &[u8]) -> anyhow::Result<Self> {
        if digest.len() != OBJECT_ID_RAW_LENGTH {
            anyhow::bail!("invalid digest length {}", digest.len());
        }

        Ok(Self(
            digest.iter().map(|byte| format!("{byte:02x}")).collect(),
        ))
    }

    /// Write the 20-byte binary form, as used inside tree objects.
    pub fn write_raw_to<W: io::Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        let raw = self
            .0
            .as_bytes()
            .chunks(2)
            .map(|pair| {
                let pair = std::str::from_utf8(pair)?;
                u8::from_str_radix(pair, 16).context("invalid hex digit in object id")
            })
            .collect::<anyhow::Result<Vec<u8>>>()?;

        writer.write_all(&raw)?;
        Ok(())
    }

    /// Read the 20-byte binary form.
    pub fn read_raw_from<R: io::Read + ?Sized>(reader: &mut R) -> anyhow::Result<Self> {
        let mut raw = [0u8; OBJECT_ID_RAW_LENGTH];
        reader.read_exact(&mut raw)?;

        Self::from_digest(&raw)
    }

    /// Relative path of the loose object, e.g. `ab/c123...`
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    pub fn to_short_oid(&self) -> &str {
        &self.0[..7]
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
