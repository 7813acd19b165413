//! Builders for synthetic dex, oat and vdex images used by the unit tests.

use super::{DEX_ENDIAN_CONSTANT, DEX_MAGIC, OAT_HEADER_OFFSET, OAT_MAGIC, VDEX_MAGIC};

fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

pub(crate) struct DexBuilder {
    version: [u8; 4],
    checksum: u32,
    link: (u32, u32),
    map_off: Option<u32>,
    sections: [(u32, u32); 6],
    data: (u32, u32),
}

impl DexBuilder {
    pub fn new() -> Self {
        Self {
            version: *b"035\0",
            checksum: 0x01020304,
            link: (0, 0),
            map_off: None,
            sections: [(0, 0); 6],
            data: (0, 0),
        }
    }

    pub fn version(mut self, version: [u8; 4]) -> Self {
        self.version = version;
        self
    }

    pub fn checksum(mut self, checksum: u32) -> Self {
        self.checksum = checksum;
        self
    }

    pub fn string_ids(mut self, size: u32, off: u32) -> Self {
        self.sections[0] = (size, off);
        self
    }

    pub fn type_ids(mut self, size: u32, off: u32) -> Self {
        self.sections[1] = (size, off);
        self
    }

    pub fn proto_ids(mut self, size: u32, off: u32) -> Self {
        self.sections[2] = (size, off);
        self
    }

    pub fn field_ids(mut self, size: u32, off: u32) -> Self {
        self.sections[3] = (size, off);
        self
    }

    pub fn method_ids(mut self, size: u32, off: u32) -> Self {
        self.sections[4] = (size, off);
        self
    }

    pub fn class_defs(mut self, size: u32, off: u32) -> Self {
        self.sections[5] = (size, off);
        self
    }

    pub fn link(mut self, size: u32, off: u32) -> Self {
        self.link = (size, off);
        self
    }

    /// Defaults to the data offset.
    pub fn map_off(mut self, off: u32) -> Self {
        self.map_off = Some(off);
        self
    }

    pub fn data(mut self, size: u32, off: u32) -> Self {
        self.data = (size, off);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let file_size = 0x70u32.max(self.data.0 + self.data.1);
        let mut out = Vec::with_capacity(file_size as usize);
        out.extend_from_slice(&DEX_MAGIC);
        out.extend_from_slice(&self.version);
        put_u32(&mut out, self.checksum);
        out.extend((0..20u8).map(|i| i.wrapping_mul(13)));
        put_u32(&mut out, file_size);
        put_u32(&mut out, 0x70);
        put_u32(&mut out, DEX_ENDIAN_CONSTANT);
        put_u32(&mut out, self.link.0);
        put_u32(&mut out, self.link.1);
        put_u32(&mut out, self.map_off.unwrap_or(self.data.1));
        for (size, off) in self.sections {
            put_u32(&mut out, size);
            put_u32(&mut out, off);
        }
        put_u32(&mut out, self.data.0);
        put_u32(&mut out, self.data.1);
        out.resize(file_size as usize, 0);
        out
    }
}

pub(crate) struct Descriptor {
    pub location: Vec<u8>,
    pub checksum: u32,
    pub file_offset: u32,
    pub class_offsets_offset: u32,
    pub lookup_table_offset: u32,
}

impl Descriptor {
    pub fn new(location: &[u8], checksum: u32) -> Self {
        Self {
            location: location.to_vec(),
            checksum,
            file_offset: 0x1000 + checksum % 0x100,
            class_offsets_offset: 0x2000 + checksum % 0x100,
            lookup_table_offset: 0x3000 + checksum % 0x100,
        }
    }
}

pub(crate) struct OatBuilder {
    version: [u8; 4],
    instruction_set: u32,
    key_value_store: Vec<u8>,
    descriptors: Vec<Descriptor>,
    dex_file_count: Option<u32>,
    trailer: usize,
}

impl OatBuilder {
    pub fn new() -> Self {
        Self {
            version: *b"124\0",
            instruction_set: 2,
            key_value_store: Vec::new(),
            descriptors: Vec::new(),
            dex_file_count: None,
            trailer: 16,
        }
    }

    pub fn version(mut self, version: [u8; 4]) -> Self {
        self.version = version;
        self
    }

    pub fn instruction_set(mut self, isa: u32) -> Self {
        self.instruction_set = isa;
        self
    }

    pub fn key_value(mut self, key: &str, value: &str) -> Self {
        self.key_value_store.extend_from_slice(key.as_bytes());
        self.key_value_store.push(0);
        self.key_value_store.extend_from_slice(value.as_bytes());
        self.key_value_store.push(0);
        self
    }

    pub fn descriptor(mut self, location: &[u8], checksum: u32) -> Self {
        self.descriptors.push(Descriptor::new(location, checksum));
        self
    }

    pub fn raw_descriptor(mut self, descriptor: Descriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Overrides the header count instead of deriving it from the descriptors.
    pub fn dex_file_count(mut self, count: u32) -> Self {
        self.dex_file_count = Some(count);
        self
    }

    pub fn trailer(mut self, len: usize) -> Self {
        self.trailer = len;
        self
    }

    /// Offset of the first descriptor in the built image.
    pub fn descriptors_offset(&self) -> usize {
        OAT_HEADER_OFFSET + 72 + self.key_value_store.len()
    }

    pub fn build(self) -> Vec<u8> {
        // the area in front of the oat header is never interpreted
        let mut out = vec![0xCC; OAT_HEADER_OFFSET];
        out.extend_from_slice(&OAT_MAGIC);
        out.extend_from_slice(&self.version);
        put_u32(&mut out, 0xA5A5_0001); // adler checksum
        put_u32(&mut out, self.instruction_set);
        put_u32(&mut out, 0x1); // instruction set features
        put_u32(
            &mut out,
            self.dex_file_count
                .unwrap_or(self.descriptors.len() as u32),
        );
        for i in 0..8u32 {
            put_u32(&mut out, 0x100 * (i + 1));
        }
        put_u32(&mut out, 0); // image patch delta
        put_u32(&mut out, 0x0BAD_F00D);
        put_u32(&mut out, 0x7000_0000);
        put_u32(&mut out, self.key_value_store.len() as u32);
        out.extend_from_slice(&self.key_value_store);

        for descriptor in &self.descriptors {
            put_u32(&mut out, descriptor.location.len() as u32);
            out.extend_from_slice(&descriptor.location);
            put_u32(&mut out, descriptor.checksum);
            put_u32(&mut out, descriptor.file_offset);
            put_u32(&mut out, descriptor.class_offsets_offset);
            put_u32(&mut out, descriptor.lookup_table_offset);
        }
        out.extend(std::iter::repeat(0xEE).take(self.trailer));
        out
    }
}

pub(crate) struct VdexBuilder {
    version: [u8; 4],
    checksums: Vec<u32>,
    dex_file_count: Option<u32>,
    sizes: (u32, u32, u32),
    trailer: usize,
}

impl VdexBuilder {
    pub fn new() -> Self {
        Self {
            version: *b"006\0",
            checksums: Vec::new(),
            dex_file_count: None,
            sizes: (0, 0, 0),
            trailer: 0,
        }
    }

    pub fn version(mut self, version: [u8; 4]) -> Self {
        self.version = version;
        self
    }

    pub fn checksums(mut self, checksums: &[u32]) -> Self {
        self.checksums = checksums.to_vec();
        self
    }

    pub fn dex_file_count(mut self, count: u32) -> Self {
        self.dex_file_count = Some(count);
        self
    }

    pub fn sizes(mut self, dex_size: u32, verifier_deps_size: u32, quickening_size: u32) -> Self {
        self.sizes = (dex_size, verifier_deps_size, quickening_size);
        self
    }

    pub fn trailer(mut self, len: usize) -> Self {
        self.trailer = len;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&VDEX_MAGIC);
        out.extend_from_slice(&self.version);
        put_u32(
            &mut out,
            self.dex_file_count.unwrap_or(self.checksums.len() as u32),
        );
        put_u32(&mut out, self.sizes.0);
        put_u32(&mut out, self.sizes.1);
        put_u32(&mut out, self.sizes.2);
        for checksum in &self.checksums {
            put_u32(&mut out, *checksum);
        }
        out.extend((0..self.trailer).map(|i| i as u8));
        out
    }
}
