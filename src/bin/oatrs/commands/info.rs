use std::path::Path;

use anyhow::Context;
use oatrs::file::FileContainer;

use crate::{app::GlobalOptions, output::print_output};

pub fn run(path: &Path, opts: &GlobalOptions) -> anyhow::Result<()> {
    let container = FileContainer::open(path)
        .with_context(|| format!("could not read input file: {}", path.display()))?;
    let location = container.get_location().to_string();
    let file = container
        .identify()
        .with_context(|| format!("could not parse input file: {location}"))?;

    log::info!("{location}: {} file", file.format_name());
    print_output(&file, opts)
}
