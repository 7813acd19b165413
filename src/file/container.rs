use std::path::Path;

use memmap2::{MmapMut, MmapOptions};

use crate::Result;

use super::{ArtFile, OdexFile, VdexFile};

/// Backing storage of a parsed file.
///
/// Anything that can be viewed as a byte slice works: owned vectors,
/// borrowed slices or memory maps.
pub trait ArtContainer: AsRef<[u8]> {
    fn data(&self) -> &[u8] {
        self.as_ref()
    }

    fn file_size(&self) -> usize {
        self.data().len()
    }
}

impl<T: AsRef<[u8]> + ?Sized> ArtContainer for T {}

/// Backing storage that can be patched in place.
pub trait ArtContainerMut: ArtContainer + AsMut<[u8]> {}

impl<T: AsRef<[u8]> + AsMut<[u8]> + ?Sized> ArtContainerMut for T {}

/// A file opened as a private, copy-on-write memory map.
///
/// Patches applied through the parsed file objects only modify the mapping,
/// never the file on disk. Persist them with `write_to` or `serialize`.
pub struct FileContainer {
    mmap: MmapMut,
    location: String,
}

impl FileContainer {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        // SAFETY: the mapping is private, modifications are never written back
        let mmap = unsafe { MmapOptions::new().map_copy(&file)? };
        log::debug!("Mapped {} ({} bytes)", path.display(), mmap.len());
        Ok(Self {
            mmap,
            location: path.display().to_string(),
        })
    }

    pub fn location(mut self, location: String) -> Self {
        self.location = location;
        self
    }

    pub fn get_location(&self) -> &str {
        &self.location
    }

    pub fn data(&self) -> &[u8] {
        &self.mmap
    }

    pub fn open_odex(self) -> Result<OdexFile<MmapMut>> {
        OdexFile::parse(self.mmap)
    }

    pub fn open_vdex(self) -> Result<VdexFile<MmapMut>> {
        VdexFile::parse(self.mmap)
    }

    pub fn identify(self) -> Result<ArtFile<MmapMut>> {
        super::identify(self.mmap)
    }
}
