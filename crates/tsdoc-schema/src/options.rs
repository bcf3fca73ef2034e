//! Resolution options.

use std::fs;
use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

use crate::error::{Error, Result};

/// Per-field default values of one interface.
pub type Defaults = IndexMap<String, Value>;

/// Options for a resolution pass.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tsdoc_schema::ResolveOptions;
///
/// let mut options = ResolveOptions::new();
/// options
///     .include_private(true)
///     .add_default("Blog", "title", json!("Hello World"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Fetch non-exported declarations so nested and imported references to
    /// them can be expanded.
    pub(crate) include_private: bool,

    /// Interface name to field name to default value.
    pub(crate) defaults: IndexMap<String, Defaults>,

    /// When set, only these exported interfaces are resolved.
    pub(crate) interfaces: Option<IndexSet<String>>,
}

impl ResolveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_private(&mut self, enabled: bool) -> &mut Self {
        self.include_private = enabled;
        self
    }

    /// Replace the defaults of one interface.
    pub fn set_defaults(&mut self, interface: impl Into<String>, defaults: Defaults) -> &mut Self {
        self.defaults.insert(interface.into(), defaults);
        self
    }

    /// Set the default value of a single field.
    pub fn add_default(
        &mut self,
        interface: impl Into<String>,
        field: impl Into<String>,
        value: Value,
    ) -> &mut Self {
        self.defaults
            .entry(interface.into())
            .or_default()
            .insert(field.into(), value);
        self
    }

    /// Merge defaults from a JSON document of the form
    /// `{ "Interface": { "field": value } }`.
    ///
    /// Fields already present are overwritten.
    pub fn defaults_from_json(&mut self, json: &str) -> Result<&mut Self> {
        let parsed: IndexMap<String, Defaults> =
            serde_json::from_str(json).map_err(Error::Defaults)?;
        for (interface, fields) in parsed {
            self.defaults.entry(interface).or_default().extend(fields);
        }
        Ok(self)
    }

    /// Like [`defaults_from_json`](Self::defaults_from_json), reading the
    /// document from a file.
    pub fn defaults_from_file(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| Error::DefaultsIo {
            path: path.to_path_buf(),
            source,
        })?;
        self.defaults_from_json(&json)
    }

    /// Restrict the output to the named interface. May be called repeatedly.
    pub fn only_interface(&mut self, name: impl Into<String>) -> &mut Self {
        self.interfaces
            .get_or_insert_with(IndexSet::new)
            .insert(name.into());
        self
    }

    pub fn is_private_included(&self) -> bool {
        self.include_private
    }

    pub fn defaults(&self) -> &IndexMap<String, Defaults> {
        &self.defaults
    }

    pub(crate) fn defaults_for(&self, interface: &str) -> Option<&Defaults> {
        self.defaults.get(interface)
    }

    pub(crate) fn wants(&self, interface: &str) -> bool {
        self.interfaces
            .as_ref()
            .is_none_or(|names| names.contains(interface))
    }
}
