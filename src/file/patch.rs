use log::{info, warn};

use crate::{error::OatError, oat_err, Result};

use super::{ArtContainerMut, OdexFile, VdexFile};

/// Applies one checksum list to a matching odex/vdex pair.
///
/// Both files are checked before either is written, so a list that is too
/// short for one of them leaves both untouched.
pub fn patch_pair<A, B>(
    odex: &mut OdexFile<A>,
    vdex: &mut VdexFile<B>,
    checksums: &[u32],
) -> Result<()>
where
    A: ArtContainerMut,
    B: ArtContainerMut,
{
    if odex.dex_file_count() != vdex.dex_file_count() {
        warn!(
            "odex file has {} dex files but vdex file has {}",
            odex.dex_file_count(),
            vdex.dex_file_count()
        );
    }

    for (format, expected) in [
        ("odex", odex.dex_file_count()),
        ("vdex", vdex.dex_file_count()),
    ] {
        if checksums.len() < expected as usize {
            return oat_err!(ChecksumCountMismatch {
                format,
                expected,
                actual: checksums.len(),
            });
        }
    }

    odex.patch_checksums(checksums)?;
    vdex.patch_checksums(checksums)?;
    info!(
        "Patched {} odex and {} vdex checksums",
        odex.dex_file_count(),
        vdex.dex_file_count()
    );
    Ok(())
}
