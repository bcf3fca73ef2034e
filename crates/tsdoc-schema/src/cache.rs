//! Per-pass memo of fetched catalogs.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug_span, trace};

use crate::catalog::{Catalog, CatalogSource};
use crate::error::CatalogError;

/// Catalogs fetched during one resolution pass, keyed by module identifier
/// and privacy flag.
///
/// Each distinct key is fetched from the source at most once; the resolver
/// only ever reads the shared catalogs.
#[derive(Debug, Default)]
pub struct CatalogCache {
    entries: HashMap<(String, bool), Rc<Catalog>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the catalog for `module`, fetching it from `source` on first use.
    pub fn get_or_fetch<S: CatalogSource + ?Sized>(
        &mut self,
        source: &S,
        module: &str,
        include_private: bool,
    ) -> Result<Rc<Catalog>, CatalogError> {
        let key = (module.to_string(), include_private);
        if let Some(catalog) = self.entries.get(&key) {
            trace!(module, include_private, "catalog cache hit");
            return Ok(Rc::clone(catalog));
        }

        let _span = debug_span!("fetch_catalog", module, include_private).entered();
        let catalog = Rc::new(source.fetch(module, include_private)?);
        trace!(
            module,
            declarations = catalog.declarations().len(),
            "catalog cache miss"
        );
        self.entries.insert(key, Rc::clone(&catalog));
        Ok(catalog)
    }

    pub fn contains(&self, module: &str, include_private: bool) -> bool {
        self.entries
            .contains_key(&(module.to_string(), include_private))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
