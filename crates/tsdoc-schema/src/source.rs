//! Catalog sources.
//!
//! - [`DenoDoc`] runs `deno doc --json` on a module, local path or URL.
//! - [`StaticCatalog`] serves catalogs that were extracted ahead of time,
//!   either registered in memory or loaded from a directory of JSON dumps.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;
use walkdir::WalkDir;

use crate::catalog::{Catalog, CatalogSource, Declaration};
use crate::error::CatalogError;

/// Extracts catalogs by invoking `deno doc --json`.
///
/// # Example
///
/// ```no_run
/// use tsdoc_schema::{DenoDoc, ResolveOptions, resolve};
///
/// let deno = DenoDoc::new();
/// let schema = resolve(&deno, "./types.ts", &ResolveOptions::new()).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct DenoDoc {
    executable: PathBuf,
    args: Vec<String>,
}

impl Default for DenoDoc {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("deno"),
            args: Vec::new(),
        }
    }
}

impl DenoDoc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific `deno` executable instead of the one on `PATH`.
    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = executable.into();
        self
    }

    /// Pass an extra argument to `deno doc` (e.g. `--config=deno.json`).
    pub fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    fn command(&self, module: &str, include_private: bool) -> Command {
        let mut command = Command::new(&self.executable);
        command.arg("doc").arg("--json");
        if include_private {
            command.arg("--private");
        }
        command.args(&self.args).arg(module);
        command
    }
}

impl CatalogSource for DenoDoc {
    fn fetch(&self, module: &str, include_private: bool) -> Result<Catalog, CatalogError> {
        let program = self.executable.display().to_string();
        debug!(program = %program, module, include_private, "running deno doc");

        let output = self
            .command(module, include_private)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| CatalogError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(CatalogError::Extractor {
                program,
                module: module.to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Catalog::from_slice(module, &output.stdout)
    }
}

/// Catalogs extracted ahead of time, keyed by module identifier.
///
/// Each module's declarations should be the complete (`--private`) listing;
/// non-exported declarations are filtered out when a fetch does not ask for
/// them.
///
/// `deno doc` reports imports by their resolved specifier
/// (`file:///work/people.ts`). A fetch for a URL that is not registered as is
/// falls back to the registered identifier that is the longest path suffix of
/// it, so `people.ts` or `work/people.ts` serves that specifier.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    modules: HashMap<String, Vec<Declaration>>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the declarations of a module, replacing any earlier entry.
    pub fn insert(
        &mut self,
        module: impl Into<String>,
        declarations: Vec<Declaration>,
    ) -> &mut Self {
        self.modules.insert(module.into(), declarations);
        self
    }

    /// Register a module from `deno doc --json --private` output.
    pub fn insert_json(
        &mut self,
        module: impl Into<String>,
        json: &str,
    ) -> Result<&mut Self, CatalogError> {
        let catalog = Catalog::from_json(module, json)?;
        let module = catalog.module().to_string();
        self.modules
            .insert(module, catalog.declarations().to_vec());
        Ok(self)
    }

    /// Recursively load every `*.json` dump under `dir`.
    ///
    /// A dump is registered under its path relative to `dir`, with `/`
    /// separators and the `.json` suffix removed: `lib/types.ts.json` serves
    /// the module `lib/types.ts`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let mut catalog = Self::new();
        for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().map(|e| e != "json").unwrap_or(true)
            {
                continue;
            }

            let Some(module) = module_id(dir, path) else {
                continue;
            };
            let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            debug!(module = %module, path = %path.display(), "loading catalog dump");
            catalog.insert_json(module, &json)?;
        }
        Ok(catalog)
    }

    /// Whether `fetch` would find `module`, directly or by specifier suffix.
    pub fn contains(&self, module: &str) -> bool {
        self.lookup(module).is_some()
    }

    fn lookup(&self, module: &str) -> Option<&Vec<Declaration>> {
        if let Some(declarations) = self.modules.get(module) {
            return Some(declarations);
        }

        let (_, path) = module.split_once("://")?;
        let path = path.split(['?', '#']).next().unwrap_or(path);
        self.modules
            .iter()
            .filter(|(id, _)| {
                path.strip_suffix(id.as_str())
                    .is_some_and(|rest| rest.is_empty() || rest.ends_with('/'))
            })
            .max_by_key(|(id, _)| id.len())
            .map(|(id, declarations)| {
                debug!(module, registered = %id, "matched module by specifier suffix");
                declarations
            })
    }

    /// Registered module identifiers, sorted.
    pub fn modules(&self) -> Vec<&str> {
        let mut modules: Vec<_> = self.modules.keys().map(String::as_str).collect();
        modules.sort_unstable();
        modules
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl CatalogSource for StaticCatalog {
    fn fetch(&self, module: &str, include_private: bool) -> Result<Catalog, CatalogError> {
        let declarations = self
            .lookup(module)
            .ok_or_else(|| CatalogError::UnknownModule(module.to_string()))?;
        let catalog = Catalog::new(module, declarations.clone());
        Ok(if include_private {
            catalog
        } else {
            catalog.without_private()
        })
    }
}

/// Module identifier for a dump file: relative path without `.json`.
fn module_id(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let joined = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?
        .join("/");
    joined.strip_suffix(".json").map(str::to_string)
}
