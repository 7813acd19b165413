use log::debug;
use serde::Serialize;

use crate::{error::OatError, oat_err, Result};

use super::{dump, ByteCursor};

pub const DEX_MAGIC: [u8; 4] = *b"dex\n";
pub const DEX_MAGIC_VERSIONS: &[&[u8; 4]] = &[
    b"035\0",
    b"037\0",
    b"038\0", // Android "O" and beyond
    b"039\0", // Android "P" and beyond
    b"040\0", // Android "Q" (10) and beyond
    b"041\0", // Android "V" (15) and beyond
];

pub const DEX_ENDIAN_CONSTANT: u32 = 0x12345678;

/// Size of [`DexHeader`] on disk, always `0x70`.
pub const DEX_HEADER_SIZE: usize = std::mem::size_of::<DexHeader>();

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DexHeader {
    /// magic value
    #[serde(serialize_with = "dump::lossy_str")]
    magic: [u8; 4],

    /// Format version, three ASCII digits followed by a NUL byte.
    #[serde(serialize_with = "dump::lossy_str")]
    version: [u8; 4],

    /// Taken from Android docs:
    ///
    /// Adler32 checksum of the rest of the file (everything but `magic` and this
    /// field); used to detect file corruption.
    pub checksum: u32,

    /// Android docs:
    ///
    /// SHA-1 signature (hash) of the rest of the file (everything but `magic`,
    /// `checksum`, and this field); used to uniquely identify files.
    #[serde(serialize_with = "dump::hex")]
    signature: [u8; 20],

    /// Size of the entire file including the header.
    pub file_size: u32,

    /// Size of the header (this struct), in bytes. It is always 0x70.
    pub header_size: u32,

    /// Endian contant - ART source code only supports one byte order
    pub endian_tag: u32,

    // unused {
    /// size of the link section, or 0 if this file isn't statically linked
    pub link_size: u32,

    /// offset from the start of the file to the link section, or `0` if
    /// `link_size == 0`.
    pub link_off: u32,
    // } unused
    /// offset from the start of the file to the map item.
    pub map_off: u32,

    /// count of strings in the string identifiers list
    pub string_ids_size: u32,
    pub string_ids_off: u32,

    /// count of elements in the type identifiers list, at most `65535`
    pub type_ids_size: u32,
    pub type_ids_off: u32,

    /// count of elements in the proto identifiers list, at most `65535`
    pub proto_ids_size: u32,
    pub proto_ids_off: u32,

    pub field_ids_size: u32,
    pub field_ids_off: u32,

    pub method_ids_size: u32,
    pub method_ids_off: u32,

    pub class_defs_size: u32,
    pub class_defs_off: u32,

    /// size of the data section (in bytes)
    pub data_size: u32,

    /// offset from the start of the file to the data section
    pub data_off: u32,
}

unsafe impl plain::Plain for DexHeader {}

impl DexHeader {
    /// Decodes the fixed header at the start of `data`.
    ///
    /// Only the magic is validated, everything else is taken as is.
    pub fn parse(data: &[u8]) -> Result<DexHeader> {
        let mut cursor = ByteCursor::new(data);
        let magic = cursor.read_array::<4>()?;
        if magic != DEX_MAGIC {
            return oat_err!(BadMagic {
                format: "dex",
                offset: 0,
                found: magic,
            });
        }

        cursor.seek(std::io::SeekFrom::Start(0))?;
        let header = cursor.read_plain::<DexHeader>()?.from_le();
        debug!(
            "Decoded dex header: version={:?}, checksum={:#010x}, file_size={}",
            String::from_utf8_lossy(&header.version),
            header.checksum,
            header.file_size
        );
        Ok(header)
    }

    pub fn get_magic(&self) -> &[u8; 4] {
        &self.magic
    }

    pub fn get_version_raw(&self) -> &[u8; 4] {
        &self.version
    }

    pub fn get_signature(&self) -> &[u8; 20] {
        &self.signature
    }

    /// Numeric dex version, `0` if the version bytes are not digits.
    pub fn get_version(&self) -> u32 {
        let version_raw = &self.version[..3];
        String::from_utf8_lossy(version_raw)
            .parse()
            .unwrap_or_default()
    }

    pub fn is_version_known(&self) -> bool {
        DEX_MAGIC_VERSIONS.contains(&&self.version)
    }

    pub fn is_endian_tag_valid(&self) -> bool {
        self.endian_tag == DEX_ENDIAN_CONSTANT
    }

    fn from_le(mut self) -> Self {
        for field in [
            &mut self.checksum,
            &mut self.file_size,
            &mut self.header_size,
            &mut self.endian_tag,
            &mut self.link_size,
            &mut self.link_off,
            &mut self.map_off,
            &mut self.string_ids_size,
            &mut self.string_ids_off,
            &mut self.type_ids_size,
            &mut self.type_ids_off,
            &mut self.proto_ids_size,
            &mut self.proto_ids_off,
            &mut self.field_ids_size,
            &mut self.field_ids_off,
            &mut self.method_ids_size,
            &mut self.method_ids_off,
            &mut self.class_defs_size,
            &mut self.class_defs_off,
            &mut self.data_size,
            &mut self.data_off,
        ] {
            *field = u32::from_le(*field);
        }
        self
    }
}

#[inline]
pub fn decode_dex(data: &[u8]) -> Result<DexHeader> {
    DexHeader::parse(data)
}
