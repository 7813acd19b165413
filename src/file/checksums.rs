use std::{ops::Deref, str::FromStr};

use serde::Serialize;

use crate::{error::OatError, oat_err, Result};

use super::DexHeader;

/// Replacement dex checksums, index-aligned with the dex files of the odex
/// and vdex files they are applied to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChecksumSet(Vec<u32>);

impl ChecksumSet {
    pub fn new(checksums: Vec<u32>) -> Self {
        Self(checksums)
    }

    /// Parses one hexadecimal checksum per line.
    ///
    /// A leading `0x` is optional, surrounding whitespace and blank lines
    /// are ignored.
    pub fn parse(text: &str) -> Result<ChecksumSet> {
        let mut checksums = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let value = line.trim();
            if value.is_empty() {
                continue;
            }

            let digits = value
                .strip_prefix("0x")
                .or_else(|| value.strip_prefix("0X"))
                .unwrap_or(value);
            match u32::from_str_radix(digits, 16) {
                Ok(checksum) if !digits.starts_with('+') => checksums.push(checksum),
                _ => {
                    return oat_err!(BadChecksumEntry {
                        line: idx + 1,
                        value: value.to_string(),
                    })
                }
            }
        }
        Ok(Self(checksums))
    }

    /// Collects the checksum stored in each dex header, in order.
    pub fn from_dex_headers<'a, I>(headers: I) -> ChecksumSet
    where
        I: IntoIterator<Item = &'a DexHeader>,
    {
        Self(headers.into_iter().map(|header| header.checksum).collect())
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<u32> {
        self.0
    }
}

impl Deref for ChecksumSet {
    type Target = [u32];

    fn deref(&self) -> &[u32] {
        &self.0
    }
}

impl FromStr for ChecksumSet {
    type Err = OatError;

    fn from_str(s: &str) -> Result<ChecksumSet> {
        ChecksumSet::parse(s)
    }
}

impl From<Vec<u32>> for ChecksumSet {
    fn from(value: Vec<u32>) -> Self {
        Self(value)
    }
}
