use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use oatrs::file::{patch_pair, ChecksumSet, DexHeader, FileContainer};
use serde::Serialize;

use crate::{
    app::{GlobalOptions, PatchArgs},
    output::print_output,
};

#[derive(Debug, Serialize)]
struct PatchSummary {
    odex: PathBuf,
    vdex: PathBuf,
    checksums: Vec<String>,
}

impl fmt::Display for PatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "odex: {}", self.odex.display())?;
        writeln!(f, "vdex: {}", self.vdex.display())?;
        for (idx, checksum) in self.checksums.iter().enumerate() {
            writeln!(f, "  [{idx}] {checksum}")?;
        }
        Ok(())
    }
}

pub fn run(args: &PatchArgs, opts: &GlobalOptions) -> anyhow::Result<()> {
    let checksums = load_checksums(args)?;

    let mut odex = FileContainer::open(&args.odex)
        .and_then(FileContainer::open_odex)
        .with_context(|| format!("failed to open odex file: {}", args.odex.display()))?;
    let mut vdex = FileContainer::open(&args.vdex)
        .and_then(FileContainer::open_vdex)
        .with_context(|| format!("failed to open vdex file: {}", args.vdex.display()))?;

    patch_pair(&mut odex, &mut vdex, &checksums).context("failed to patch checksums")?;

    // copy out before writing, the output may replace a mapped input
    let odex_data = odex.serialize();
    let vdex_data = vdex.serialize();
    drop(odex);
    drop(vdex);

    fs::create_dir_all(&args.out)
        .with_context(|| format!("failed to create output directory: {}", args.out.display()))?;
    let summary = PatchSummary {
        odex: write_output(&args.out, &args.odex, &odex_data)?,
        vdex: write_output(&args.out, &args.vdex, &vdex_data)?,
        checksums: checksums.iter().map(|c| format!("{c:08x}")).collect(),
    };

    print_output(&summary, opts)
}

fn load_checksums(args: &PatchArgs) -> anyhow::Result<ChecksumSet> {
    if let Some(path) = &args.crc32 {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read checksum file: {}", path.display()))?;
        let checksums = ChecksumSet::parse(&text)
            .with_context(|| format!("invalid checksum file: {}", path.display()))?;
        log::debug!("Read {} checksums from {}", checksums.len(), path.display());
        return Ok(checksums);
    }

    let headers = args
        .dex
        .iter()
        .map(|path| {
            FileContainer::open(path)
                .and_then(|container| DexHeader::parse(container.data()))
                .with_context(|| format!("failed to read dex header: {}", path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(ChecksumSet::from_dex_headers(&headers))
}

fn write_output(dir: &Path, input: &Path, data: &[u8]) -> anyhow::Result<PathBuf> {
    let name = input
        .file_name()
        .with_context(|| format!("input path has no file name: {}", input.display()))?;
    let path = dir.join(name);
    fs::write(&path, data).with_context(|| format!("failed to write {}", path.display()))?;
    log::info!("Wrote {} ({} bytes)", path.display(), data.len());
    Ok(path)
}
