use log::debug;

use crate::{error::OatError, oat_err, Result};

use super::{ArtContainer, DexHeader, OdexFile, VdexFile};

/// Result of probing an unknown buffer.
pub enum ArtFile<C: ArtContainer = Vec<u8>> {
    Dex(DexHeader),
    Odex(OdexFile<C>),
    Vdex(VdexFile<C>),
}

impl<C: ArtContainer> ArtFile<C> {
    pub fn format_name(&self) -> &'static str {
        match self {
            ArtFile::Dex(_) => "dex",
            ArtFile::Odex(_) => "odex",
            ArtFile::Vdex(_) => "vdex",
        }
    }
}

/// Tries the dex, odex and vdex decoders in that order and returns the first
/// success.
///
/// Individual decoder errors are dropped, use the format specific decoders
/// for diagnostics.
pub fn identify<C: ArtContainer>(data: C) -> Result<ArtFile<C>> {
    let bytes = data.as_ref();

    match DexHeader::parse(bytes) {
        Ok(header) => return Ok(ArtFile::Dex(header)),
        Err(err) => debug!("Not a dex file: {err}"),
    }

    match OdexFile::<C>::parse_parts(bytes) {
        Ok((header, descriptors)) => {
            return Ok(ArtFile::Odex(OdexFile::from_parts(data, header, descriptors)))
        }
        Err(err) => debug!("Not an odex file: {err}"),
    }

    match VdexFile::<C>::parse_parts(bytes) {
        Ok((header, checksums)) => {
            return Ok(ArtFile::Vdex(VdexFile::from_parts(data, header, checksums)))
        }
        Err(err) => debug!("Not a vdex file: {err}"),
    }

    oat_err!(UnrecognizedFormat)
}
