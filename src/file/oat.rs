use std::{borrow::Cow, fmt, io::SeekFrom};

use log::{debug, trace, warn};
use serde::{ser::SerializeStruct, Serialize, Serializer};

use crate::{error::OatError, oat_err, Result};

use super::{dump, ArtContainer, ArtContainerMut, ByteCursor};

pub const OAT_MAGIC: [u8; 4] = *b"oat\n";
pub const OAT_VERSION_124: [u8; 4] = *b"124\0";

/// Offset of the oat header inside an odex file. Everything in front of it
/// belongs to the ELF wrapper and is not interpreted.
pub const OAT_HEADER_OFFSET: usize = 4096;

/// Size of [`OatHeader`]: magic, version and sixteen u32 fields.
pub const OAT_HEADER_SIZE: usize = std::mem::size_of::<OatHeader>();

/// On-disk size of a descriptor with an empty location.
const MIN_DESCRIPTOR_SIZE: usize = 5 * std::mem::size_of::<u32>();

/// Bytes between a descriptor's checksum field and the next descriptor.
const DESCRIPTOR_TAIL_SIZE: usize = 3 * std::mem::size_of::<u32>();

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OatHeader {
    #[serde(serialize_with = "dump::lossy_str")]
    magic: [u8; 4],
    #[serde(serialize_with = "dump::lossy_str")]
    version: [u8; 4],
    pub adler_checksum: u32,
    pub instruction_set: u32,
    pub instruction_set_features_bitmap: u32,
    /// number of [`OatDexDescriptor`] entries following the key-value store
    pub dex_file_count: u32,
    pub executable_offset: u32,
    pub interpreter_to_interpreter_bridge_offset: u32,
    pub interpreter_to_compiled_code_bridge_offset: u32,
    pub jni_dlsym_lookup_offset: u32,
    pub quick_generic_jni_trampoline_offset: u32,
    pub quick_imt_conflict_trampoline_offset: u32,
    pub quick_resolution_trampoline_offset: u32,
    pub quick_to_interpreter_bridge_offset: u32,
    pub image_patch_delta: u32,
    pub image_file_location_oat_checksum: u32,
    pub image_file_location_oat_data_begin: u32,
    /// size of the key-value store directly after this header
    pub key_value_store_size: u32,
}

unsafe impl plain::Plain for OatHeader {}

impl OatHeader {
    /// Decodes the header at [`OAT_HEADER_OFFSET`].
    pub fn parse(data: &[u8]) -> Result<OatHeader> {
        let mut cursor = ByteCursor::new(data);
        cursor.seek(SeekFrom::Start(OAT_HEADER_OFFSET as u64))?;
        let magic = cursor.read_array::<4>()?;
        if magic != OAT_MAGIC {
            return oat_err!(BadMagic {
                format: "oat",
                offset: OAT_HEADER_OFFSET,
                found: magic,
            });
        }

        cursor.seek(SeekFrom::Current(-4))?;
        let header = cursor.read_plain::<OatHeader>()?.from_le();
        if !header.is_version_supported() {
            warn!(
                "Unsupported oat version {:?}, expected {:?}",
                String::from_utf8_lossy(&header.version),
                String::from_utf8_lossy(&OAT_VERSION_124)
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
        self.version == OAT_VERSION_124
    }

    pub fn get_instruction_set(&self) -> InstructionSet {
        InstructionSet::from(self.instruction_set)
    }

    /// Absolute offset of the key-value store.
    #[inline]
    pub fn key_value_store_offset(&self) -> usize {
        OAT_HEADER_OFFSET + OAT_HEADER_SIZE
    }

    /// Absolute offset of the first descriptor.
    #[inline]
    pub fn descriptors_offset(&self) -> usize {
        self.key_value_store_offset() + self.key_value_store_size as usize
    }

    fn from_le(mut self) -> Self {
        for field in [
            &mut self.adler_checksum,
            &mut self.instruction_set,
            &mut self.instruction_set_features_bitmap,
            &mut self.dex_file_count,
            &mut self.executable_offset,
            &mut self.interpreter_to_interpreter_bridge_offset,
            &mut self.interpreter_to_compiled_code_bridge_offset,
            &mut self.jni_dlsym_lookup_offset,
            &mut self.quick_generic_jni_trampoline_offset,
            &mut self.quick_imt_conflict_trampoline_offset,
            &mut self.quick_resolution_trampoline_offset,
            &mut self.quick_to_interpreter_bridge_offset,
            &mut self.image_patch_delta,
            &mut self.image_file_location_oat_checksum,
            &mut self.image_file_location_oat_data_begin,
            &mut self.key_value_store_size,
        ] {
            *field = u32::from_le(*field);
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InstructionSet {
    None,
    Arm,
    Arm64,
    Thumb2,
    X86,
    X86_64,
    Mips,
    Mips64,
    Unknown(u32),
}

impl From<u32> for InstructionSet {
    fn from(value: u32) -> Self {
        match value {
            0 => InstructionSet::None,
            1 => InstructionSet::Arm,
            2 => InstructionSet::Arm64,
            3 => InstructionSet::Thumb2,
            4 => InstructionSet::X86,
            5 => InstructionSet::X86_64,
            6 => InstructionSet::Mips,
            7 => InstructionSet::Mips64,
            other => InstructionSet::Unknown(other),
        }
    }
}

impl fmt::Display for InstructionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstructionSet::None => write!(f, "none"),
            InstructionSet::Arm => write!(f, "arm"),
            InstructionSet::Arm64 => write!(f, "arm64"),
            InstructionSet::Thumb2 => write!(f, "thumb2"),
            InstructionSet::X86 => write!(f, "x86"),
            InstructionSet::X86_64 => write!(f, "x86_64"),
            InstructionSet::Mips => write!(f, "mips"),
            InstructionSet::Mips64 => write!(f, "mips64"),
            InstructionSet::Unknown(raw) => write!(f, "unknown({raw})"),
        }
    }
}

/// Per-dex entry of the oat dex file table.
///
/// Layout on disk, without padding:
/// ```text
/// u32          location_size
/// u8[size]     location_data
/// u32          checksum
/// u32          file_offset
/// u32          class_offsets_offset
/// u32          lookup_table_offset
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OatDexDescriptor {
    offset: usize,
    pub location_size: u32,
    #[serde(rename = "location", serialize_with = "dump::lossy_str")]
    pub location_data: Vec<u8>,
    pub checksum: u32,
    pub file_offset: u32,
    pub class_offsets_offset: u32,
    pub lookup_table_offset: u32,
}

impl OatDexDescriptor {
    fn parse(cursor: &mut ByteCursor<&[u8]>) -> Result<OatDexDescriptor> {
        let offset = cursor.position();
        let location_size = cursor.read_u32()?;
        let location_data = cursor.read_fixed(location_size as usize)?.to_vec();
        Ok(Self {
            offset,
            location_size,
            location_data,
            checksum: cursor.read_u32()?,
            file_offset: cursor.read_u32()?,
            class_offsets_offset: cursor.read_u32()?,
            lookup_table_offset: cursor.read_u32()?,
        })
    }

    /// Absolute offset of this descriptor in the odex file.
    #[inline(always)]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Absolute offset of the checksum field.
    #[inline]
    pub fn checksum_offset(&self) -> usize {
        self.offset + 4 + self.location_size as usize
    }

    #[inline]
    pub fn byte_len(&self) -> usize {
        MIN_DESCRIPTOR_SIZE + self.location_size as usize
    }

    /// Absolute offset of the first byte after this descriptor.
    #[inline]
    pub fn end_offset(&self) -> usize {
        self.offset + self.byte_len()
    }

    pub fn location(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.location_data)
    }
}

pub struct OdexFile<C: ArtContainer = Vec<u8>> {
    data: C,
    header: OatHeader,
    descriptors: Vec<OatDexDescriptor>,
}

impl<C: ArtContainer> OdexFile<C> {
    pub fn parse(data: C) -> Result<OdexFile<C>> {
        let (header, descriptors) = Self::parse_parts(data.as_ref())?;
        Ok(Self::from_parts(data, header, descriptors))
    }

    pub(crate) fn from_parts(
        data: C,
        header: OatHeader,
        descriptors: Vec<OatDexDescriptor>,
    ) -> Self {
        Self {
            data,
            header,
            descriptors,
        }
    }

    pub(crate) fn parse_parts(data: &[u8]) -> Result<(OatHeader, Vec<OatDexDescriptor>)> {
        let header = OatHeader::parse(data)?;

        // the key-value store must be present even though only dumps read it
        let mut cursor = ByteCursor::at(data, header.key_value_store_offset());
        cursor.read_fixed(header.key_value_store_size as usize)?;

        let count = header.dex_file_count as usize;
        let needed = count.saturating_mul(MIN_DESCRIPTOR_SIZE);
        if cursor.remaining() < needed {
            return oat_err!(UnexpectedEof {
                offset: cursor.position(),
                needed,
                available: cursor.remaining(),
            });
        }

        // each descriptor starts where the previous one ended
        let mut descriptors = Vec::with_capacity(count);
        for idx in 0..count {
            let descriptor = OatDexDescriptor::parse(&mut cursor)?;
            trace!(
                "oat dex file {idx} at {:#x}: location={:?}, checksum={:#010x}",
                descriptor.offset,
                descriptor.location(),
                descriptor.checksum
            );
            descriptors.push(descriptor);
        }

        debug!(
            "Decoded oat header: version={:?}, isa={}, dex_file_count={}, key_value_store_size={}",
            String::from_utf8_lossy(&header.version),
            header.get_instruction_set(),
            header.dex_file_count,
            header.key_value_store_size
        );
        Ok((header, descriptors))
    }

    #[inline(always)]
    pub fn header(&self) -> &OatHeader {
        &self.header
    }

    #[inline(always)]
    pub fn dex_file_count(&self) -> u32 {
        self.header.dex_file_count
    }

    #[inline(always)]
    pub fn descriptors(&self) -> &[OatDexDescriptor] {
        &self.descriptors
    }

    pub fn get_descriptor(&self, idx: usize) -> Option<&OatDexDescriptor> {
        self.descriptors.get(idx)
    }

    /// Dex checksums in descriptor order.
    pub fn checksums(&self) -> Vec<u32> {
        self.descriptors.iter().map(|d| d.checksum).collect()
    }

    #[inline(always)]
    pub fn descriptors_offset(&self) -> usize {
        self.header.descriptors_offset()
    }

    pub fn key_value_store(&self) -> &[u8] {
        &self.data()[self.header.key_value_store_offset()..self.descriptors_offset()]
    }

    /// Entries of the key-value store, stored as consecutive pairs of
    /// NUL-terminated strings. Parsing stops at the first empty key.
    pub fn key_values(&self) -> Vec<(String, String)> {
        let mut parts = self.key_value_store().split(|b| *b == 0);
        let mut entries = Vec::new();
        while let (Some(key), Some(value)) = (parts.next(), parts.next()) {
            if key.is_empty() {
                break;
            }
            entries.push((
                String::from_utf8_lossy(key).into_owned(),
                String::from_utf8_lossy(value).into_owned(),
            ));
        }
        entries
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

impl<C: ArtContainerMut> OdexFile<C> {
    /// Overwrites the checksum of every descriptor in place.
    ///
    /// The descriptor table is walked front to back with the location sizes
    /// seen while decoding, so every write lands inside the table that was
    /// bounds checked then. Only the first `dex_file_count` values are used;
    /// nothing is written if fewer values are supplied.
    pub fn patch_checksums(&mut self, new_checksums: &[u32]) -> Result<()> {
        let count = self.header.dex_file_count;
        if new_checksums.len() < count as usize {
            return oat_err!(ChecksumCountMismatch {
                format: "odex",
                expected: count,
                actual: new_checksums.len(),
            });
        }
        if new_checksums.len() > count as usize {
            warn!(
                "Ignoring {} surplus checksums for odex file with {} dex files",
                new_checksums.len() - count as usize,
                count
            );
        }

        let descriptors_offset = self.header.descriptors_offset();
        let mut writer = ByteCursor::at(self.data.as_mut(), descriptors_offset);
        for (descriptor, checksum) in self.descriptors.iter_mut().zip(new_checksums) {
            writer.skip(4 + descriptor.location_size as usize)?;
            debug_assert_eq!(writer.position(), descriptor.checksum_offset());
            trace!(
                "odex checksum for {:?} at {:#x}: {:#010x} -> {:#010x}",
                descriptor.location(),
                writer.position(),
                descriptor.checksum,
                checksum
            );
            writer.write_u32(*checksum)?;
            writer.skip(DESCRIPTOR_TAIL_SIZE)?;
            descriptor.checksum = *checksum;
        }
        Ok(())
    }
}

impl<C: ArtContainer> Serialize for OdexFile<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("OdexFile", 5)?;
        state.serialize_field("file_size", &self.file_size())?;
        state.serialize_field("header", &self.header)?;
        state.serialize_field(
            "instruction_set",
            &self.header.get_instruction_set().to_string(),
        )?;
        state.serialize_field("key_values", &dump::KeyValues(&self.key_values()))?;
        state.serialize_field("dex_files", &self.descriptors)?;
        state.end()
    }
}

#[inline]
pub fn decode_odex<C: ArtContainer>(data: C) -> Result<OdexFile<C>> {
    OdexFile::parse(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::testing::{Descriptor, OatBuilder};

    fn u32_at(data: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(data[offset..offset + 4].try_into().unwrap())
    }

    fn sample() -> OatBuilder {
        OatBuilder::new()
            .key_value("classpath", "PCL[]")
            .key_value("compiler-filter", "speed")
            .descriptor(b"", 0x11111111)
            .descriptor(b"/data/app/base.apk", 0x22222222)
            .descriptor(&[b'x'; 300], 0x33333333)
            .descriptor(b"/data/app/base.apk!classes2.dex", 0x44444444)
    }

    #[test]
    fn test_header_size() {
        assert_eq!(OAT_HEADER_SIZE, 72);
    }

    #[test]
    fn test_decode_header() {
        let data = sample().build();
        let odex = decode_odex(&data[..]).unwrap();
        let header = odex.header();
        assert_eq!(header.get_magic(), b"oat\n");
        assert!(header.is_version_supported());
        assert_eq!(header.adler_checksum, u32_at(&data, 4104));
        assert_eq!(header.get_instruction_set(), InstructionSet::Arm64);
        assert_eq!(header.dex_file_count, 4);
        assert_eq!(header.executable_offset, 0x100);
        assert_eq!(header.quick_to_interpreter_bridge_offset, 0x800);
        assert_eq!(header.image_file_location_oat_checksum, 0x0BAD_F00D);
        assert_eq!(header.key_value_store_size, u32_at(&data, 4164));
    }

    #[test]
    fn test_variable_length_descriptors() {
        let builder = sample();
        let first = builder.descriptors_offset();
        let data = builder.build();
        let odex = decode_odex(data.clone()).unwrap();

        let locations: Vec<&[u8]> = odex
            .descriptors()
            .iter()
            .map(|d| d.location_data.as_slice())
            .collect();
        assert_eq!(
            locations,
            [
                &b""[..],
                &b"/data/app/base.apk"[..],
                &[b'x'; 300][..],
                &b"/data/app/base.apk!classes2.dex"[..]
            ]
        );
        assert_eq!(
            odex.checksums(),
            [0x11111111, 0x22222222, 0x33333333, 0x44444444]
        );

        let mut expected_offset = first;
        for descriptor in odex.descriptors() {
            assert_eq!(descriptor.offset(), expected_offset);
            assert_eq!(descriptor.location_size as usize, descriptor.location_data.len());
            assert_eq!(
                u32_at(&data, descriptor.checksum_offset()),
                descriptor.checksum
            );
            assert_eq!(
                descriptor.file_offset,
                0x1000 + descriptor.checksum % 0x100
            );
            expected_offset = descriptor.end_offset();
        }
        assert_eq!(expected_offset + 16, data.len());
    }

    #[test]
    fn test_second_descriptor_is_shifted_by_location() {
        let data = OatBuilder::new()
            .raw_descriptor(Descriptor {
                location: b"a.de".to_vec(),
                checksum: 0xAAAA0000,
                file_offset: 0x10,
                class_offsets_offset: 0x20,
                lookup_table_offset: 0x30,
            })
            .raw_descriptor(Descriptor {
                location: b"b".to_vec(),
                checksum: 0xBBBB0000,
                file_offset: 0x40,
                class_offsets_offset: 0x50,
                lookup_table_offset: 0x60,
            })
            .build();
        let odex = decode_odex(data).unwrap();

        assert_eq!(odex.descriptors_offset(), 4096 + 72);
        let second = odex.get_descriptor(1).unwrap();
        // 4-byte size, 4 location bytes, 16 bytes of fields
        assert_eq!(second.offset(), 4096 + 72 + 4 + 4 + 16);
        assert_eq!(second.location_data, b"b");
        assert_eq!(second.checksum, 0xBBBB0000);
        assert_eq!(second.file_offset, 0x40);
        assert_eq!(second.class_offsets_offset, 0x50);
        assert_eq!(second.lookup_table_offset, 0x60);
    }

    #[test]
    fn test_key_value_store() {
        let builder = sample();
        let first = builder.descriptors_offset();
        let odex = decode_odex(builder.build()).unwrap();
        assert_eq!(odex.descriptors_offset(), first);
        assert_eq!(
            odex.key_value_store(),
            b"classpath\0PCL[]\0compiler-filter\0speed\0"
        );
        assert_eq!(
            odex.key_values(),
            [
                ("classpath".to_string(), "PCL[]".to_string()),
                ("compiler-filter".to_string(), "speed".to_string())
            ]
        );

        let empty = decode_odex(OatBuilder::new().build()).unwrap();
        assert!(empty.key_values().is_empty());
        assert!(empty.descriptors().is_empty());
    }

    #[test]
    fn test_bad_magic() {
        let mut data = sample().build();
        data[4096 + 3] = 0;
        assert!(matches!(
            decode_odex(data),
            Err(OatError::BadMagic {
                format: "oat",
                offset: 4096,
                ..
            })
        ));

        // a dex or vdex magic at the start is not an oat file
        let mut data = sample().build();
        data[..4].copy_from_slice(b"oat\n");
        data[4096..4100].copy_from_slice(b"dex\n");
        assert!(matches!(decode_odex(data), Err(OatError::BadMagic { .. })));
    }

    #[test]
    fn test_truncated_inputs() {
        let data = sample().build();

        assert!(matches!(
            decode_odex(&data[..4096]),
            Err(OatError::UnexpectedEof { offset: 4096, .. })
        ));
        assert!(matches!(
            decode_odex(&data[..4096 + 40]),
            Err(OatError::UnexpectedEof { offset: 4096, needed: 72, .. })
        ));

        // cut inside the 300 byte location of the third descriptor
        let third = decode_odex(&data[..]).unwrap().descriptors()[2].offset();
        assert!(matches!(
            decode_odex(&data[..third + 100]),
            Err(OatError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_key_value_store_past_end() {
        let mut data = OatBuilder::new().trailer(0).build();
        data[4164..4168].copy_from_slice(&1000u32.to_le_bytes());
        assert!(matches!(
            decode_odex(data),
            Err(OatError::UnexpectedEof {
                offset: 4168,
                needed: 1000,
                available: 0
            })
        ));
    }

    #[test]
    fn test_huge_count_is_rejected() {
        let data = OatBuilder::new()
            .descriptor(b"a", 1)
            .dex_file_count(0x4000_0000)
            .build();
        assert!(matches!(
            decode_odex(data),
            Err(OatError::UnexpectedEof { offset: 4168, .. })
        ));
    }

    #[test]
    fn test_patch_checksums() {
        let original = sample().build();
        let supplied = [0xCAFEBABE, 0, 0x12345678, u32::MAX];
        let mut odex = decode_odex(original.clone()).unwrap();
        let before = odex.descriptors().to_vec();
        odex.patch_checksums(&supplied).unwrap();
        assert_eq!(odex.checksums(), supplied);

        let patched = odex.serialize();
        assert_eq!(patched.len(), original.len());

        let reparsed = decode_odex(patched.clone()).unwrap();
        for ((old, new), checksum) in before.iter().zip(reparsed.descriptors()).zip(supplied) {
            assert_eq!(new.checksum, checksum);
            assert_eq!(new.offset(), old.offset());
            assert_eq!(new.location_size, old.location_size);
            assert_eq!(new.location_data, old.location_data);
            assert_eq!(new.file_offset, old.file_offset);
            assert_eq!(new.class_offsets_offset, old.class_offsets_offset);
            assert_eq!(new.lookup_table_offset, old.lookup_table_offset);
        }

        // only the checksum fields differ
        let checksum_ranges: Vec<_> = before
            .iter()
            .map(|d| d.checksum_offset()..d.checksum_offset() + 4)
            .collect();
        for (idx, (a, b)) in original.iter().zip(&patched).enumerate() {
            if !checksum_ranges.iter().any(|r| r.contains(&idx)) {
                assert_eq!(a, b, "byte {idx:#x} changed");
            }
        }
    }

    #[test]
    fn test_patch_table_ending_at_buffer_end() {
        let original = OatBuilder::new()
            .descriptor(b"base.apk", 1)
            .descriptor(b"base.apk!classes2.dex", 2)
            .trailer(0)
            .build();
        let mut odex = decode_odex(original.clone()).unwrap();
        assert_eq!(odex.descriptors()[1].end_offset(), original.len());

        odex.patch_checksums(&[0x11, 0x22]).unwrap();
        let patched = odex.serialize();
        assert_eq!(patched.len(), original.len());
        assert_eq!(&patched[patched.len() - 16..patched.len() - 12], &[0x22, 0, 0, 0]);
        assert_eq!(&patched[patched.len() - 12..], &original[original.len() - 12..]);
    }

    #[test]
    fn test_noop_patch_is_identity() {
        let original = sample().build();
        let mut odex = decode_odex(original.clone()).unwrap();
        let existing = odex.checksums();
        odex.patch_checksums(&existing).unwrap();
        odex.patch_checksums(&existing).unwrap();
        assert_eq!(odex.serialize(), original);
    }

    #[test]
    fn test_patch_short_list_leaves_buffer_untouched() {
        let original = sample().build();
        let mut odex = decode_odex(original.clone()).unwrap();
        assert!(matches!(
            odex.patch_checksums(&[1, 2, 3]),
            Err(OatError::ChecksumCountMismatch {
                format: "odex",
                expected: 4,
                actual: 3
            })
        ));
        assert_eq!(odex.serialize(), original);
    }

    #[test]
    fn test_patch_surplus_checksums_are_ignored() {
        let original = OatBuilder::new().descriptor(b"only.dex", 7).build();
        let mut odex = decode_odex(original).unwrap();
        odex.patch_checksums(&[8, 9, 10]).unwrap();
        assert_eq!(odex.checksums(), [8]);
        let reparsed = decode_odex(odex.into_inner()).unwrap();
        assert_eq!(reparsed.checksums(), [8]);
    }

    #[test]
    fn test_unsupported_version_still_decodes() {
        let data = OatBuilder::new()
            .version(*b"183\0")
            .instruction_set(42)
            .descriptor(b"a.dex", 1)
            .build();
        let odex = decode_odex(data).unwrap();
        assert!(!odex.header().is_version_supported());
        assert_eq!(
            odex.header().get_instruction_set(),
            InstructionSet::Unknown(42)
        );
        assert_eq!(odex.checksums(), [1]);
    }

    #[test]
    fn test_instruction_set_names() {
        assert_eq!(InstructionSet::from(1).to_string(), "arm");
        assert_eq!(InstructionSet::from(5).to_string(), "x86_64");
        assert_eq!(InstructionSet::from(9).to_string(), "unknown(9)");
    }
}
