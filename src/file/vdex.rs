use std::io::SeekFrom;

use log::{debug, trace, warn};
use serde::{ser::SerializeStruct, Serialize, Serializer};

use crate::{error::OatError, oat_err, Result};

use super::{dump, ArtContainer, ArtContainerMut, ByteCursor};

pub const VDEX_MAGIC: [u8; 4] = *b"vdex";
pub const VDEX_VERSION_006: [u8; 4] = *b"006\0";

/// Size of [`VdexHeader`], the checksum array starts right after it.
pub const VDEX_HEADER_SIZE: usize = std::mem::size_of::<VdexHeader>();

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VdexHeader {
    #[serde(serialize_with = "dump::lossy_str")]
    magic: [u8; 4],
    #[serde(serialize_with = "dump::lossy_str")]
    version: [u8; 4],
    /// number of dex files, one checksum per dex file follows the header
    pub dex_file_count: u32,
    pub dex_size: u32,
    pub verifier_deps_size: u32,
    pub quickening_info_size: u32,
}

unsafe impl plain::Plain for VdexHeader {}

impl VdexHeader {
    pub fn parse(data: &[u8]) -> Result<VdexHeader> {
        let mut cursor = ByteCursor::new(data);
        let magic = cursor.read_array::<4>()?;
        if magic != VDEX_MAGIC {
            return oat_err!(BadMagic {
                format: "vdex",
                offset: 0,
                found: magic,
            });
        }

        cursor.seek(SeekFrom::Current(-4))?;
        let mut header = cursor.read_plain::<VdexHeader>()?;
        header.dex_file_count = u32::from_le(header.dex_file_count);
        header.dex_size = u32::from_le(header.dex_size);
        header.verifier_deps_size = u32::from_le(header.verifier_deps_size);
        header.quickening_info_size = u32::from_le(header.quickening_info_size);

        if !header.is_version_supported() {
            warn!(
                "Unsupported vdex version {:?}, expected {:?}",
                String::from_utf8_lossy(&header.version),
                String::from_utf8_lossy(&VDEX_VERSION_006)
            );
        }
        Ok(header)
    }

    pub fn get_magic(&self) -> &[u8; 4] {
        &self.magic
    }

    pub fn get_version(&self) -> &[u8; 4] {
        &self.version
    }

    pub fn is_version_supported(&self) -> bool {
        self.version == VDEX_VERSION_006
    }
}

/// A vdex file: header, dex checksum array and the buffer both came from.
pub struct VdexFile<C: ArtContainer = Vec<u8>> {
    data: C,
    header: VdexHeader,
    checksums: Vec<u32>,
}

impl<C: ArtContainer> VdexFile<C> {
    pub fn parse(data: C) -> Result<VdexFile<C>> {
        let (header, checksums) = Self::parse_parts(data.as_ref())?;
        Ok(Self::from_parts(data, header, checksums))
    }

    pub(crate) fn from_parts(data: C, header: VdexHeader, checksums: Vec<u32>) -> Self {
        Self {
            data,
            header,
            checksums,
        }
    }

    pub(crate) fn parse_parts(data: &[u8]) -> Result<(VdexHeader, Vec<u32>)> {
        let header = VdexHeader::parse(data)?;
        let count = header.dex_file_count as usize;

        // check the whole array up front, the count is untrusted
        let mut cursor = ByteCursor::at(data, VDEX_HEADER_SIZE);
        let needed = count.saturating_mul(4);
        if cursor.remaining() < needed {
            return oat_err!(UnexpectedEof {
                offset: VDEX_HEADER_SIZE,
                needed,
                available: cursor.remaining(),
            });
        }

        let checksums = (0..count)
            .map(|_| cursor.read_u32())
            .collect::<Result<Vec<u32>>>()?;
        debug!(
            "Decoded vdex header: dex_file_count={}, dex_size={}, verifier_deps_size={}",
            header.dex_file_count, header.dex_size, header.verifier_deps_size
        );
        Ok((header, checksums))
    }

    #[inline(always)]
    pub fn header(&self) -> &VdexHeader {
        &self.header
    }

    #[inline(always)]
    pub fn dex_file_count(&self) -> u32 {
        self.header.dex_file_count
    }

    /// The dex checksums, index-aligned with the dex files in the container.
    #[inline(always)]
    pub fn checksums(&self) -> &[u32] {
        &self.checksums
    }

    #[inline(always)]
    pub fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    #[inline(always)]
    pub fn file_size(&self) -> usize {
        self.data.file_size()
    }

    /// Snapshot of the backing buffer, including all applied patches.
    pub fn serialize(&self) -> Vec<u8> {
        self.data().to_vec()
    }

    pub fn write_to<W: std::io::Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(self.data())?;
        Ok(())
    }

    pub fn into_inner(self) -> C {
        self.data
    }
}

impl<C: ArtContainerMut> VdexFile<C> {
    /// Overwrites the dex checksum array in place.
    ///
    /// Only the first `dex_file_count` values are used; surplus values are
    /// ignored. Nothing is written if fewer values are supplied.
    pub fn patch_checksums(&mut self, new_checksums: &[u32]) -> Result<()> {
        let count = self.header.dex_file_count;
        if new_checksums.len() < count as usize {
            return oat_err!(ChecksumCountMismatch {
                format: "vdex",
                expected: count,
                actual: new_checksums.len(),
            });
        }
        if new_checksums.len() > count as usize {
            warn!(
                "Ignoring {} surplus checksums for vdex file with {} dex files",
                new_checksums.len() - count as usize,
                count
            );
        }

        let new_checksums = &new_checksums[..count as usize];
        // the array was bounds checked while decoding
        let mut writer = ByteCursor::at(self.data.as_mut(), VDEX_HEADER_SIZE);
        for (idx, checksum) in new_checksums.iter().enumerate() {
            trace!(
                "vdex checksum {idx} at {:#x}: {:#010x} -> {:#010x}",
                writer.position(),
                self.checksums[idx],
                checksum
            );
            writer.write_u32(*checksum)?;
        }
        self.checksums.copy_from_slice(new_checksums);
        Ok(())
    }
}

impl<C: ArtContainer> Serialize for VdexFile<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("VdexFile", 3)?;
        state.serialize_field("file_size", &self.file_size())?;
        state.serialize_field("header", &self.header)?;
        state.serialize_field("checksums", &self.checksums)?;
        state.end()
    }
}

#[inline]
pub fn decode_vdex<C: ArtContainer>(data: C) -> Result<VdexFile<C>> {
    VdexFile::parse(data)
}
