use std::fmt;

use comfy_table::{presets, CellAlignment, ContentArrangement, Table};
use serde::{Serialize, Serializer};

use super::{ArtContainer, ArtFile, DexHeader, OatHeader, OdexFile, VdexFile, VdexHeader};

/// Bytes as text, trailing NUL padding removed and control characters
/// escaped.
pub fn printable(bytes: &[u8]) -> String {
    let end = bytes.iter().rposition(|b| *b != 0).map_or(0, |pos| pos + 1);
    String::from_utf8_lossy(&bytes[..end])
        .escape_debug()
        .to_string()
}

pub fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

pub(crate) fn lossy_str<B, S>(bytes: &B, serializer: S) -> Result<S::Ok, S::Error>
where
    B: AsRef<[u8]>,
    S: Serializer,
{
    serializer.serialize_str(&printable(bytes.as_ref()))
}

pub(crate) fn hex<B, S>(bytes: &B, serializer: S) -> Result<S::Ok, S::Error>
where
    B: AsRef<[u8]>,
    S: Serializer,
{
    serializer.serialize_str(&hex_string(bytes.as_ref()))
}

/// Serializes key-value store entries as a map, keeping their file order.
pub(crate) struct KeyValues<'a>(pub &'a [(String, String)]);

impl Serialize for KeyValues<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

fn new_table(columns: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(columns.to_vec());
    table
}

fn field_table(rows: Vec<(&str, String)>) -> Table {
    let mut table = new_table(&["Field", "Value"]);
    for (name, value) in rows {
        table.add_row(vec![name.to_string(), value]);
    }
    table
}

fn size_at(size: u32, offset: u32) -> String {
    format!("{size} @ {offset:#x}")
}

impl DexHeader {
    pub fn dump_table(&self) -> Table {
        field_table(vec![
            ("magic", printable(self.get_magic())),
            ("version", printable(self.get_version_raw())),
            ("checksum", format!("{:#010x}", self.checksum)),
            ("signature", hex_string(self.get_signature())),
            ("file_size", self.file_size.to_string()),
            ("header_size", format!("{:#x}", self.header_size)),
            ("endian_tag", format!("{:#010x}", self.endian_tag)),
            ("link", size_at(self.link_size, self.link_off)),
            ("map_off", format!("{:#x}", self.map_off)),
            ("string_ids", size_at(self.string_ids_size, self.string_ids_off)),
            ("type_ids", size_at(self.type_ids_size, self.type_ids_off)),
            ("proto_ids", size_at(self.proto_ids_size, self.proto_ids_off)),
            ("field_ids", size_at(self.field_ids_size, self.field_ids_off)),
            ("method_ids", size_at(self.method_ids_size, self.method_ids_off)),
            ("class_defs", size_at(self.class_defs_size, self.class_defs_off)),
            ("data", size_at(self.data_size, self.data_off)),
        ])
    }
}

impl OatHeader {
    pub fn dump_table(&self) -> Table {
        field_table(vec![
            ("magic", printable(self.get_magic())),
            ("version", printable(self.get_version())),
            ("adler_checksum", format!("{:#010x}", self.adler_checksum)),
            ("instruction_set", self.get_instruction_set().to_string()),
            (
                "instruction_set_features",
                format!("{:#x}", self.instruction_set_features_bitmap),
            ),
            ("dex_file_count", self.dex_file_count.to_string()),
            ("executable_offset", format!("{:#x}", self.executable_offset)),
            (
                "interpreter_to_interpreter_bridge_offset",
                format!("{:#x}", self.interpreter_to_interpreter_bridge_offset),
            ),
            (
                "interpreter_to_compiled_code_bridge_offset",
                format!("{:#x}", self.interpreter_to_compiled_code_bridge_offset),
            ),
            (
                "jni_dlsym_lookup_offset",
                format!("{:#x}", self.jni_dlsym_lookup_offset),
            ),
            (
                "quick_generic_jni_trampoline_offset",
                format!("{:#x}", self.quick_generic_jni_trampoline_offset),
            ),
            (
                "quick_imt_conflict_trampoline_offset",
                format!("{:#x}", self.quick_imt_conflict_trampoline_offset),
            ),
            (
                "quick_resolution_trampoline_offset",
                format!("{:#x}", self.quick_resolution_trampoline_offset),
            ),
            (
                "quick_to_interpreter_bridge_offset",
                format!("{:#x}", self.quick_to_interpreter_bridge_offset),
            ),
            ("image_patch_delta", (self.image_patch_delta as i32).to_string()),
            (
                "image_file_location_oat_checksum",
                format!("{:#010x}", self.image_file_location_oat_checksum),
            ),
            (
                "image_file_location_oat_data_begin",
                format!("{:#x}", self.image_file_location_oat_data_begin),
            ),
            ("key_value_store_size", self.key_value_store_size.to_string()),
        ])
    }
}

impl VdexHeader {
    pub fn dump_table(&self) -> Table {
        field_table(vec![
            ("magic", printable(self.get_magic())),
            ("version", printable(self.get_version())),
            ("dex_file_count", self.dex_file_count.to_string()),
            ("dex_size", self.dex_size.to_string()),
            ("verifier_deps_size", self.verifier_deps_size.to_string()),
            ("quickening_info_size", self.quickening_info_size.to_string()),
        ])
    }
}

impl<C: ArtContainer> OdexFile<C> {
    pub fn key_values_table(&self) -> Table {
        let mut table = new_table(&["Key", "Value"]);
        for (key, value) in self.key_values() {
            table.add_row(vec![key, value]);
        }
        table
    }

    pub fn descriptors_table(&self) -> Table {
        let mut table = new_table(&[
            "#",
            "Offset",
            "Location",
            "Checksum",
            "File offset",
            "Class offsets",
            "Lookup table",
        ]);
        for (idx, descriptor) in self.descriptors().iter().enumerate() {
            table.add_row(vec![
                idx.to_string(),
                format!("{:#x}", descriptor.offset()),
                printable(&descriptor.location_data),
                format!("{:#010x}", descriptor.checksum),
                format!("{:#x}", descriptor.file_offset),
                format!("{:#x}", descriptor.class_offsets_offset),
                format!("{:#x}", descriptor.lookup_table_offset),
            ]);
        }
        if let Some(column) = table.column_mut(0) {
            column.set_cell_alignment(CellAlignment::Right);
        }
        table
    }
}

impl<C: ArtContainer> VdexFile<C> {
    pub fn checksums_table(&self) -> Table {
        let mut table = new_table(&["#", "Offset", "Checksum"]);
        for (idx, checksum) in self.checksums().iter().enumerate() {
            table.add_row(vec![
                idx.to_string(),
                format!("{:#x}", super::VDEX_HEADER_SIZE + idx * 4),
                format!("{checksum:#010x}"),
            ]);
        }
        table
    }
}

impl fmt::Display for DexHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DEX header")?;
        writeln!(f, "{}", self.dump_table())
    }
}

impl<C: ArtContainer> fmt::Display for OdexFile<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ODEX header (at {:#x})", super::OAT_HEADER_OFFSET)?;
        writeln!(f, "{}", self.header().dump_table())?;
        if !self.key_values().is_empty() {
            writeln!(f, "Key-value store")?;
            writeln!(f, "{}", self.key_values_table())?;
        }
        writeln!(f, "OatDex files (at {:#x})", self.descriptors_offset())?;
        writeln!(f, "{}", self.descriptors_table())
    }
}

impl<C: ArtContainer> fmt::Display for VdexFile<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "VDEX header")?;
        writeln!(f, "{}", self.header().dump_table())?;
        writeln!(f, "Dex checksums")?;
        writeln!(f, "{}", self.checksums_table())
    }
}

impl<C: ArtContainer> fmt::Display for ArtFile<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtFile::Dex(header) => fmt::Display::fmt(header, f),
            ArtFile::Odex(odex) => fmt::Display::fmt(odex, f),
            ArtFile::Vdex(vdex) => fmt::Display::fmt(vdex, f),
        }
    }
}

impl<C: ArtContainer> Serialize for ArtFile<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ArtFile::Dex(header) => {
                serializer.serialize_newtype_variant("ArtFile", 0, "dex", header)
            }
            ArtFile::Odex(odex) => serializer.serialize_newtype_variant("ArtFile", 1, "odex", odex),
            ArtFile::Vdex(vdex) => serializer.serialize_newtype_variant("ArtFile", 2, "vdex", vdex),
        }
    }
}
