//! `tsdoc-schema`: print the resolved schema of a TypeScript module as JSON.

mod logging;

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tsdoc_schema::{CatalogSource, DenoDoc, ResolveOptions, Schema, StaticCatalog, resolve};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Module to resolve: a local path or URL, or a module id under `--catalog-dir`
    module: String,

    /// Include non-exported declarations when expanding references
    #[arg(long)]
    private: bool,

    /// JSON file mapping interface name to field name to default value
    #[arg(long, value_name = "FILE")]
    defaults: Option<PathBuf>,

    /// Read pre-extracted `deno doc --json --private` dumps from this directory
    /// instead of running deno
    #[arg(long, value_name = "DIR", conflicts_with = "deno")]
    catalog_dir: Option<PathBuf>,

    /// Path to the deno executable (defaults to `$DENO`, then `deno`)
    #[arg(long, value_name = "PATH")]
    deno: Option<PathBuf>,

    /// Only resolve the named interface; may be repeated
    #[arg(long = "interface", value_name = "NAME")]
    interfaces: Vec<String>,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,

    /// Write the schema to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl Cli {
    fn options(&self) -> Result<ResolveOptions> {
        let mut options = ResolveOptions::new();
        options.include_private(self.private);
        if let Some(path) = &self.defaults {
            options.defaults_from_file(path)?;
        }
        for name in &self.interfaces {
            options.only_interface(name.as_str());
        }
        Ok(options)
    }

    fn source(&self) -> Result<Box<dyn CatalogSource>> {
        if let Some(dir) = &self.catalog_dir {
            let catalog = StaticCatalog::from_dir(dir)
                .with_context(|| format!("failed to load catalogs from {}", dir.display()))?;
            debug!(modules = catalog.len(), "loaded catalog dumps");
            return Ok(Box::new(catalog));
        }

        let executable = self
            .deno
            .clone()
            .or_else(|| env::var_os("DENO").map(PathBuf::from));
        let deno = match executable {
            Some(path) => DenoDoc::new().with_executable(path),
            None => DenoDoc::new(),
        };
        debug!(deno = %deno.executable().display(), "extracting catalogs with deno doc");
        Ok(Box::new(deno))
    }
}

fn write_schema(schema: &Schema, writer: impl Write, pretty: bool) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, schema)?;
    } else {
        serde_json::to_writer(&mut writer, schema)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    logging::init();

    let cli = Cli::parse();
    let options = cli.options()?;
    let source = cli.source()?;

    let schema = resolve(source.as_ref(), &cli.module, &options)
        .with_context(|| format!("failed to resolve {}", cli.module))?;

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_schema(&schema, file, cli.pretty)
        }
        None => write_schema(&schema, io::stdout().lock(), cli.pretty),
    }
}
