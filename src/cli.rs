//! `linkdispatch-gen` command line interface.

use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, Subcommand};

use crate::compiler::{compile, print_diagnostics};
use crate::manifest::Manifest;

#[derive(Parser)]
#[command(name = "linkdispatch-gen")]
#[command(about = "Compile deep link manifests into an embeddable match index", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a manifest and write the embeddable index source
    Compile {
        /// Deep link manifest (YAML or JSON)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Output Rust source file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Compile a manifest and report diagnostics without writing output
    Check {
        #[arg(short, long)]
        manifest: PathBuf,
    },
}

pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Compile { manifest, output } => {
            let index = compile_manifest(manifest)?;
            crate::generator::write_index_source(&index, output)?;
            println!(
                "Compiled {} template(s) into {} block(s) at {}",
                index.template_count,
                index.blocks.len(),
                output.display()
            );
            Ok(())
        }
        Commands::Check { manifest } => {
            let index = compile_manifest(manifest)?;
            println!(
                "{} template(s) OK, {} configurable path key(s)",
                index.template_count,
                index.configurable_path_keys.len()
            );
            Ok(())
        }
    }
}

fn compile_manifest(manifest: &PathBuf) -> anyhow::Result<crate::compiler::CompiledIndex> {
    let manifest = Manifest::load(manifest)?;
    let entries = manifest.entries()?;
    let index = compile(&entries);
    if !index.is_clean() {
        print_diagnostics(&index.diagnostics);
        bail!("{} deep link template issue(s)", index.diagnostics.len());
    }
    Ok(index)
}
