//! # tsdoc-schema
//!
//! Resolves the exported interfaces of a TypeScript module into a normalized,
//! serializable field schema. Declarations are read from `deno doc --json`
//! output; nothing here parses TypeScript source.
//!
//! ## Features
//!
//! - Inlines local interfaces, type aliases and object literal types
//! - Follows imports into the catalog of the imported module
//! - Keeps the name of a type alias as `subtype` next to its resolved shape
//! - Turns doc comments and tags (`@max 10`, `@draft`, `@label "Name"`) into
//!   node attributes
//! - Injects per-field default values
//! - Drops unsupported type expressions instead of failing, and terminates on
//!   recursive types
//!
//! ## Quick Start
//!
//! ### Running `deno doc`
//!
//! ```no_run
//! use tsdoc_schema::{DenoDoc, ResolveOptions, resolve};
//!
//! let mut options = ResolveOptions::new();
//! options
//!     .include_private(true)
//!     .add_default("Blog", "title", serde_json::json!("Hello World"));
//!
//! let schema = resolve(&DenoDoc::new(), "./types.ts", &options).unwrap();
//! println!("{}", serde_json::to_string_pretty(&schema).unwrap());
//! ```
//!
//! ### Using pre-extracted catalogs
//!
//! ```no_run
//! use tsdoc_schema::{ResolveOptions, StaticCatalog, resolve};
//!
//! // `dumps/types.ts.json` holds `deno doc --json --private types.ts`
//! let catalog = StaticCatalog::from_dir("dumps").unwrap();
//! let schema = resolve(&catalog, "types.ts", &ResolveOptions::new()).unwrap();
//! ```
//!
//! ## Type Mappings
//!
//! | TypeScript | Schema node |
//! |------------|-------------|
//! | `string`, `number`, `boolean`, ... | `{ "type": "string" }` |
//! | `T[]` | `{ "type": "array", "children": <T> }` |
//! | `{ a: T }` | `{ "type": "object", "children": { "a": <T> } }` |
//! | `interface I` (local or imported) | `{ "type": "object", "children": { ... } }` |
//! | `type Alias = T` | `<T>` with `"subtype": "Alias"` |
//! | `A \| B` | `{ "type": "union", "union": [<A>, <B>] }` |
//! | unknown name (`Date`) | `{ "type": "Date" }` |
//! | recursive reference | `{ "type": "object", "cyclic": true }` |
//! | literals, tuples, functions, generics, ... | omitted |

mod cache;
pub mod catalog;
mod error;
pub mod jsdoc;
pub mod node;
mod options;
mod resolver;
mod source;

pub use cache::CatalogCache;
pub use catalog::{
    Catalog, CatalogSource, Declaration, DeclarationDef, DeclarationKind, JsDoc, JsDocTag,
    PropertyDef, TsTypeDef, TsTypeKind,
};
pub use error::{CatalogError, Error, Result};
pub use node::{Attributes, Children, Fields, Schema, SchemaNode};
pub use options::{Defaults, ResolveOptions};
pub use resolver::{Resolver, resolve, resolve_interfaces};
pub use source::{DenoDoc, StaticCatalog};
