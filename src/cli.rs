use std::io;
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use tracing::{debug, info};

use crate::doxygen;
use crate::emit::StubEmitter;
use crate::index::MetadataIndex;
use crate::reflect::ModuleSnapshot;
use crate::registry::NameRegistry;
use crate::translate::TypeTranslator;
use crate::utils::logger;
use crate::version::VERSION;

#[derive(Parser, Debug)]
#[command(name = "doxystub", version = VERSION, about = "Typed stub generator for native extension modules")]
pub struct StubCli {
    /// Reflection snapshot of the live extension module (JSON).
    pub snapshot: PathBuf,

    /// Structured metadata index produced by the documentation run (JSON).
    #[arg(long)]
    pub index: PathBuf,

    /// Directory holding the Doxyfile for the documentation run.
    /// Defaults to the directory containing the metadata index.
    #[arg(long)]
    pub doxygen_dir: Option<PathBuf>,

    /// Reuse the existing metadata index without invoking doxygen.
    #[arg(long)]
    pub skip_doxygen: bool,
}

pub fn run() -> Result<()> {
    logger::init_logging();
    let cli = StubCli::parse();
    generate(&cli)
}

fn generate(cli: &StubCli) -> Result<()> {
    if !cli.skip_doxygen {
        doxygen::ensure_installed()?;
        let dir = doxygen_dir(cli)?;
        doxygen::run(&dir)?;
    }

    let index = MetadataIndex::load(&cli.index)?;
    let snapshot = ModuleSnapshot::load(&cli.snapshot)?;
    debug!(module = %snapshot.module, classes = snapshot.registry.len(), "snapshot loaded");

    let registry = NameRegistry::build(&snapshot.module, &snapshot.registry);
    let translator = TypeTranslator::build(
        snapshot
            .registry
            .iter()
            .map(|(native, exposed)| (native.as_str(), exposed.as_str())),
    );

    let stdout = io::stdout().lock();
    let mut emitter = StubEmitter::new(stdout, &snapshot.module, &index, &registry, &translator);
    emitter.emit_module(&snapshot)?;

    info!(module = %snapshot.module, "stub emitted");
    Ok(())
}

fn doxygen_dir(cli: &StubCli) -> Result<PathBuf> {
    if let Some(dir) = &cli.doxygen_dir {
        return Ok(dir.clone());
    }
    let Some(parent) = cli.index.parent().filter(|p| !p.as_os_str().is_empty()) else {
        bail!(
            "cannot infer the doxygen directory from {}; pass --doxygen-dir",
            cli.index.display()
        );
    };
    Ok(parent.to_path_buf())
}
