//! Schema resolution.
//!
//! Walks the exported interfaces of a module and turns every property's type
//! expression into a [`SchemaNode`], dereferencing named types against the
//! module's catalog (and, for imports, the catalog of the imported module).
//!
//! Type expressions outside the supported vocabulary resolve to `None` and
//! are dropped by whichever caller sees them: a property disappears, an array
//! of them disappears, a union loses that member.

use std::rc::Rc;

use serde_json::Value;
use tracing::{debug, info_span};

use crate::cache::CatalogCache;
use crate::catalog::{
    Catalog, CatalogSource, DeclarationDef, ImportDef, InterfaceDef, PropertyDef, TsTypeDef,
    TsTypeKind,
};
use crate::error::{Error, Result};
use crate::jsdoc::resolve_doc_meta;
use crate::node::{Attributes, Fields, Schema, SchemaNode};
use crate::options::{Defaults, ResolveOptions};

/// Resolve every exported interface of `module`.
///
/// # Example
///
/// ```
/// use tsdoc_schema::{
///     Declaration, PropertyDef, ResolveOptions, StaticCatalog, TsTypeDef, resolve,
/// };
///
/// let mut catalog = StaticCatalog::new();
/// catalog.insert("types.ts", vec![
///     Declaration::type_alias("Markdown", TsTypeDef::keyword("string")),
///     Declaration::interface("Blog", vec![
///         PropertyDef::new("content", TsTypeDef::type_ref("Markdown")),
///     ]).exported(),
/// ]);
///
/// let mut options = ResolveOptions::new();
/// options.include_private(true);
///
/// let schema = resolve(&catalog, "types.ts", &options).unwrap();
/// let content = &schema["Blog"]["content"];
/// assert_eq!(content.ty, "string");
/// assert_eq!(content.subtype.as_deref(), Some("Markdown"));
/// ```
pub fn resolve<S: CatalogSource + ?Sized>(
    source: &S,
    module: &str,
    options: &ResolveOptions,
) -> Result<Schema> {
    Resolver::new(source, options).resolve_module(module)
}

/// Resolve only the named exported interfaces of `module`.
///
/// Names that do not match an exported interface are ignored.
pub fn resolve_interfaces<S, I>(
    source: &S,
    module: &str,
    interfaces: I,
    options: &ResolveOptions,
) -> Result<Schema>
where
    S: CatalogSource + ?Sized,
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut options = options.clone();
    for name in interfaces {
        options.only_interface(name);
    }
    resolve(source, module, &options)
}

/// A single resolution pass.
///
/// Holds the catalogs fetched so far and the interfaces currently being
/// expanded. A resolver may resolve several modules; catalogs fetched for one
/// are reused by the next.
pub struct Resolver<'a, S: CatalogSource + ?Sized> {
    source: &'a S,
    options: &'a ResolveOptions,
    cache: CatalogCache,
    /// `(module, declaration)` pairs on the current expansion path.
    expanding: Vec<(String, String)>,
}

impl<'a, S: CatalogSource + ?Sized> Resolver<'a, S> {
    pub fn new(source: &'a S, options: &'a ResolveOptions) -> Self {
        Self {
            source,
            options,
            cache: CatalogCache::new(),
            expanding: Vec::new(),
        }
    }

    /// Catalogs fetched during this pass.
    pub fn cache(&self) -> &CatalogCache {
        &self.cache
    }

    pub fn resolve_module(&mut self, module: &str) -> Result<Schema> {
        let options = self.options;
        let catalog = self
            .cache
            .get_or_fetch(self.source, module, options.include_private)?;

        let mut schema = Schema::new();
        for (name, interface) in catalog.exported_interfaces() {
            if !options.wants(name) {
                continue;
            }

            let _span = info_span!("resolve_interface", module, interface = name).entered();
            self.expanding.clear();
            self.expanding
                .push((catalog.module().to_string(), name.to_string()));
            let fields = self
                .resolve_properties(
                    &catalog,
                    &interface.properties,
                    options.defaults_for(name),
                )
                .map_err(|err| err.in_interface(name))?;
            self.expanding.pop();

            schema.insert(name.to_string(), fields);
        }
        Ok(schema)
    }

    fn resolve_properties(
        &mut self,
        catalog: &Rc<Catalog>,
        properties: &[PropertyDef],
        defaults: Option<&Defaults>,
    ) -> Result<Fields> {
        let mut fields = Fields::new();
        for property in properties {
            if let Some(node) = self.resolve_property(catalog, property, defaults)? {
                fields.insert(property.name.clone(), node);
            }
        }
        Ok(fields)
    }

    fn resolve_property(
        &mut self,
        catalog: &Rc<Catalog>,
        property: &PropertyDef,
        defaults: Option<&Defaults>,
    ) -> Result<Option<SchemaNode>> {
        let mut attrs = resolve_doc_meta(property.js_doc.as_ref());
        if let Some(optional) = property.optional {
            attrs.required = Some(!optional);
        }
        if let Some(readonly) = property.readonly {
            attrs.readonly = Some(readonly);
        }
        if let Some(value) = defaults
            .and_then(|defaults| defaults.get(&property.name))
            .filter(|value| is_truthy(value))
        {
            attrs.default = Some(value.clone());
        }

        let ty = property
            .ts_type
            .as_ref()
            .ok_or_else(|| Error::MissingTypeExpression {
                property: property.name.clone(),
            })?;
        let node = self.resolve_type(catalog, ty, &attrs)?;
        if node.is_none() {
            debug!(property = %property.name, repr = %ty.repr, "dropping property");
        }
        Ok(node)
    }

    fn resolve_type(
        &mut self,
        catalog: &Rc<Catalog>,
        ty: &TsTypeDef,
        attrs: &Attributes,
    ) -> Result<Option<SchemaNode>> {
        match &ty.kind {
            TsTypeKind::Keyword => Ok(Some(SchemaNode::leaf(&ty.repr, attrs.clone()))),
            TsTypeKind::Array { array } => Ok(self
                .resolve_type(catalog, array, attrs)?
                .map(|element| SchemaNode::array(element, attrs.clone()))),
            TsTypeKind::TypeLiteral { type_literal } => {
                let fields = self.resolve_properties(catalog, &type_literal.properties, None)?;
                Ok(Some(SchemaNode::object(fields, attrs.clone())))
            }
            TsTypeKind::TypeRef { type_ref } => {
                self.resolve_reference(catalog, &type_ref.type_name, attrs)
            }
            TsTypeKind::Union { union } => {
                let mut members = Vec::with_capacity(union.len());
                for member in union {
                    if let Some(node) = self.resolve_type(catalog, member, attrs)? {
                        members.push(node);
                    }
                }
                Ok(Some(SchemaNode::union(members)))
            }
            TsTypeKind::Unhandled => {
                debug!(repr = %ty.repr, "unhandled type expression");
                Ok(None)
            }
        }
    }

    fn resolve_reference(
        &mut self,
        catalog: &Rc<Catalog>,
        name: &str,
        attrs: &Attributes,
    ) -> Result<Option<SchemaNode>> {
        let Some(declaration) = catalog.find(name) else {
            debug!(name, module = catalog.module(), "unknown type name kept opaque");
            return Ok(Some(SchemaNode::leaf(name, attrs.clone())));
        };

        match &declaration.def {
            DeclarationDef::TypeAlias(alias) => {
                let key = (catalog.module().to_string(), name.to_string());
                if self.expanding.contains(&key) {
                    debug!(name, "cyclic type alias");
                    return Ok(Some(SchemaNode::cyclic(name, attrs.clone())));
                }

                self.expanding.push(key);
                let node = self.resolve_type(catalog, &alias.ts_type, attrs);
                self.expanding.pop();

                Ok(Some(match node? {
                    Some(node) => node.with_subtype(name),
                    None => SchemaNode::leaf(name, attrs.clone()),
                }))
            }
            DeclarationDef::Interface(interface) => self
                .expand_interface(catalog, name, interface, attrs)
                .map(Some),
            DeclarationDef::Import(import) => self.resolve_import(import, attrs),
            DeclarationDef::Other(kind) => Err(Error::UnresolvedReferenceKind {
                name: name.to_string(),
                kind: kind.clone(),
            }),
        }
    }

    /// Inline an interface's properties as an `object` node.
    fn expand_interface(
        &mut self,
        catalog: &Rc<Catalog>,
        name: &str,
        interface: &InterfaceDef,
        attrs: &Attributes,
    ) -> Result<SchemaNode> {
        let key = (catalog.module().to_string(), name.to_string());
        if self.expanding.contains(&key) {
            debug!(name, module = catalog.module(), "cyclic interface reference");
            return Ok(SchemaNode::cyclic("object", attrs.clone()));
        }

        self.expanding.push(key);
        let fields = self.resolve_properties(catalog, &interface.properties, None);
        self.expanding.pop();

        Ok(SchemaNode::object(fields?, attrs.clone()))
    }

    /// Follow an import into the source module's catalog. Only interfaces are
    /// expanded; anything else is unhandled.
    fn resolve_import(
        &mut self,
        import: &ImportDef,
        attrs: &Attributes,
    ) -> Result<Option<SchemaNode>> {
        let Some(imported) = import.imported.as_deref() else {
            debug!(src = %import.src, "namespace import is unhandled");
            return Ok(None);
        };

        let target =
            self.cache
                .get_or_fetch(self.source, &import.src, self.options.include_private)?;
        match target.find(imported).map(|declaration| &declaration.def) {
            Some(DeclarationDef::Interface(interface)) => self
                .expand_interface(&target, imported, interface, attrs)
                .map(Some),
            other => {
                debug!(
                    src = %import.src,
                    imported,
                    kind = other.map(DeclarationDef::kind_name),
                    "imported declaration is not an interface"
                );
                Ok(None)
            }
        }
    }
}

/// Whether a default value counts as present.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Declaration, JsDoc, JsDocTag};
    use crate::error::CatalogError;
    use crate::source::StaticCatalog;
    use serde_json::json;
    use std::cell::RefCell;

    fn module(declarations: Vec<Declaration>) -> StaticCatalog {
        let mut catalog = StaticCatalog::new();
        catalog.insert("mod.ts", declarations);
        catalog
    }

    fn private() -> ResolveOptions {
        let mut options = ResolveOptions::new();
        options.include_private(true);
        options
    }

    fn resolve_json(source: &StaticCatalog, options: &ResolveOptions) -> Value {
        serde_json::to_value(resolve(source, "mod.ts", options).unwrap()).unwrap()
    }

    fn string(name: &str) -> PropertyDef {
        PropertyDef::new(name, TsTypeDef::keyword("string"))
    }

    #[test]
    fn test_leaf_and_array() {
        let catalog = module(vec![
            Declaration::interface(
                "Post",
                vec![
                    string("title"),
                    PropertyDef::new("tags", TsTypeDef::array(TsTypeDef::keyword("string")))
                        .optional(),
                ],
            )
            .exported(),
        ]);

        assert_eq!(
            resolve_json(&catalog, &ResolveOptions::new()),
            json!({
                "Post": {
                    "title": { "type": "string", "required": true, "readonly": false },
                    "tags": {
                        "type": "array",
                        "children": { "type": "string", "required": false, "readonly": false },
                        "required": false,
                        "readonly": false
                    }
                }
            })
        );
    }

    #[test]
    fn test_alias_keeps_subtype() {
        let catalog = module(vec![
            Declaration::type_alias("Markdown", TsTypeDef::keyword("string")),
            Declaration::interface(
                "Post",
                vec![PropertyDef::new("content", TsTypeDef::type_ref("Markdown"))],
            )
            .exported(),
        ]);

        let schema = resolve_json(&catalog, &private());
        assert_eq!(
            schema["Post"]["content"],
            json!({ "type": "string", "subtype": "Markdown", "required": true, "readonly": false })
        );

        // Without private declarations the alias is invisible and stays opaque.
        let schema = resolve_json(&catalog, &ResolveOptions::new());
        assert_eq!(
            schema["Post"]["content"],
            json!({ "type": "Markdown", "required": true, "readonly": false })
        );
    }

    #[test]
    fn test_alias_to_unhandled_type_is_opaque() {
        let catalog = module(vec![
            Declaration::type_alias("Status", TsTypeDef::unhandled("\"draft\"")),
            Declaration::interface(
                "Post",
                vec![PropertyDef::new("status", TsTypeDef::type_ref("Status"))],
            )
            .exported(),
        ]);

        assert_eq!(
            resolve_json(&catalog, &private())["Post"]["status"],
            json!({ "type": "Status", "required": true, "readonly": false })
        );
    }

    #[test]
    fn test_unknown_name_is_opaque() {
        let catalog = module(vec![
            Declaration::interface(
                "Post",
                vec![PropertyDef::new("date", TsTypeDef::type_ref("Date")).readonly()],
            )
            .exported(),
        ]);

        assert_eq!(
            resolve_json(&catalog, &ResolveOptions::new())["Post"]["date"],
            json!({ "type": "Date", "required": true, "readonly": true })
        );
    }

    #[test]
    fn test_interface_and_type_literal_inlining() {
        let catalog = module(vec![
            Declaration::interface("Person", vec![string("name"), string("email")]),
            Declaration::interface(
                "Post",
                vec![
                    PropertyDef::new("author", TsTypeDef::type_ref("Person")),
                    PropertyDef::new(
                        "meta",
                        TsTypeDef::type_literal(vec![PropertyDef::new(
                            "views",
                            TsTypeDef::keyword("number"),
                        )]),
                    )
                    .optional(),
                ],
            )
            .exported(),
        ]);

        let leaf = json!({ "type": "string", "required": true, "readonly": false });
        assert_eq!(
            resolve_json(&catalog, &private()),
            json!({
                "Post": {
                    "author": {
                        "type": "object",
                        "children": { "name": leaf, "email": leaf },
                        "required": true,
                        "readonly": false
                    },
                    "meta": {
                        "type": "object",
                        "children": {
                            "views": { "type": "number", "required": true, "readonly": false }
                        },
                        "required": false,
                        "readonly": false
                    }
                }
            })
        );
    }

    #[test]
    fn test_union_filters_unhandled_members() {
        let catalog = module(vec![
            Declaration::interface(
                "Post",
                vec![
                    PropertyDef::new(
                        "published",
                        TsTypeDef::union(vec![
                            TsTypeDef::keyword("string"),
                            TsTypeDef::unhandled("42"),
                            TsTypeDef::type_ref("Date"),
                        ]),
                    )
                    .with_doc(JsDoc::default().with_tag(JsDocTag::unsupported("@format date"))),
                    PropertyDef::new(
                        "nothing",
                        TsTypeDef::union(vec![TsTypeDef::unhandled("1"), TsTypeDef::unhandled("2")]),
                    ),
                ],
            )
            .exported(),
        ]);

        let schema = resolve_json(&catalog, &ResolveOptions::new());
        let member = |ty: &str| {
            json!({ "type": ty, "required": true, "readonly": false, "format": "date" })
        };
        assert_eq!(
            schema["Post"]["published"],
            json!({ "type": "union", "union": [member("string"), member("Date")] })
        );
        assert_eq!(
            schema["Post"]["nothing"],
            json!({ "type": "union", "union": [] })
        );
    }

    #[test]
    fn test_unhandled_properties_are_omitted() {
        let catalog = module(vec![
            Declaration::interface(
                "Post",
                vec![
                    string("title"),
                    PropertyDef::new("status", TsTypeDef::unhandled("\"draft\"")),
                    PropertyDef::new("flags", TsTypeDef::array(TsTypeDef::unhandled("[a, b]"))),
                ],
            )
            .exported(),
        ]);

        let schema = resolve(&catalog, "mod.ts", &ResolveOptions::new()).unwrap();
        assert_eq!(schema["Post"].keys().collect::<Vec<_>>(), vec!["title"]);
    }

    #[test]
    fn test_default_injection() {
        let catalog = module(vec![
            Declaration::interface(
                "Post",
                vec![
                    string("title"),
                    string("subtitle"),
                    PropertyDef::new("views", TsTypeDef::keyword("number")),
                    PropertyDef::new("tags", TsTypeDef::array(TsTypeDef::keyword("string"))),
                    string("summary").with_doc(
                        JsDoc::default().with_tag(JsDocTag::new("default", Some(json!("\"tag\"")))),
                    ),
                    string("note").with_doc(
                        JsDoc::default().with_tag(JsDocTag::new("default", Some(json!("\"tag\"")))),
                    ),
                ],
            )
            .exported(),
        ]);

        let mut options = ResolveOptions::new();
        options
            .add_default("Post", "summary", json!("Injected"))
            .add_default("Post", "note", json!(""))
            .add_default("Post", "title", json!("Hello World"))
            .add_default("Post", "subtitle", json!(""))
            .add_default("Post", "views", json!(0))
            .add_default("Post", "tags", json!([]))
            .add_default("Other", "title", json!("Ignored"));

        let schema = resolve_json(&catalog, &options);
        assert_eq!(schema["Post"]["title"]["default"], json!("Hello World"));
        assert!(schema["Post"]["subtitle"].get("default").is_none());
        assert!(schema["Post"]["views"].get("default").is_none());
        assert_eq!(schema["Post"]["tags"]["default"], json!([]));
        assert_eq!(schema["Post"]["tags"]["children"]["default"], json!([]));

        // An injected default replaces a `@default` tag; a falsy one leaves it.
        assert_eq!(schema["Post"]["summary"]["default"], json!("Injected"));
        assert_eq!(schema["Post"]["note"]["default"], json!("\"tag\""));
    }

    #[test]
    fn test_doc_tags_on_properties() {
        let doc = JsDoc::new("The title")
            .with_tag(JsDocTag::unsupported("@max 10"))
            .with_tag(JsDocTag::unsupported("@draft"))
            .with_tag(JsDocTag::unsupported("@label \"Full Name\""))
            .with_tag(JsDocTag::new("readonly", None));
        let catalog = module(vec![
            Declaration::interface("Post", vec![string("title").with_doc(doc.clone())]).exported(),
            Declaration::interface(
                "Draft",
                vec![PropertyDef {
                    readonly: None,
                    ..string("title").with_doc(doc)
                }],
            )
            .exported(),
        ]);

        let schema = resolve_json(&catalog, &ResolveOptions::new());
        assert_eq!(
            schema["Post"]["title"],
            json!({
                "type": "string",
                "description": "The title",
                "required": true,
                "readonly": false,
                "max": 10,
                "draft": true,
                "label": "Full Name"
            })
        );
        // With no flag from the catalog, the tag decides.
        assert_eq!(schema["Draft"]["title"]["readonly"], json!(true));
    }

    #[test]
    fn test_only_exported_interfaces_are_top_level() {
        let catalog = module(vec![
            Declaration::interface("Hidden", vec![string("secret")]),
            Declaration::type_alias("Id", TsTypeDef::keyword("string")).exported(),
            Declaration::other("helper", "function").exported(),
            Declaration::interface("Post", vec![string("title")]).exported(),
        ]);

        for options in [ResolveOptions::new(), private()] {
            let schema = resolve(&catalog, "mod.ts", &options).unwrap();
            assert_eq!(schema.keys().collect::<Vec<_>>(), vec!["Post"]);
        }
    }

    #[test]
    fn test_interface_filter() {
        let catalog = module(vec![
            Declaration::interface("Post", vec![string("title")]).exported(),
            Declaration::interface("Author", vec![string("name")]).exported(),
        ]);

        let schema =
            resolve_interfaces(&catalog, "mod.ts", ["Author", "Missing"], &ResolveOptions::new())
                .unwrap();
        assert_eq!(schema.keys().collect::<Vec<_>>(), vec!["Author"]);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let catalog = module(vec![
            Declaration::type_alias("Markdown", TsTypeDef::keyword("string")),
            Declaration::interface(
                "Post",
                vec![
                    PropertyDef::new("content", TsTypeDef::type_ref("Markdown")),
                    string("title"),
                ],
            )
            .exported(),
        ]);

        let options = private();
        assert_eq!(
            resolve(&catalog, "mod.ts", &options).unwrap(),
            resolve(&catalog, "mod.ts", &options).unwrap()
        );
    }

    #[test]
    fn test_self_reference_terminates() {
        let catalog = module(vec![
            Declaration::interface(
                "Category",
                vec![
                    string("name"),
                    PropertyDef::new("parent", TsTypeDef::type_ref("Category")).optional(),
                ],
            )
            .exported(),
        ]);

        assert_eq!(
            resolve_json(&catalog, &ResolveOptions::new())["Category"]["parent"],
            json!({ "type": "object", "cyclic": true, "required": false, "readonly": false })
        );
    }

    #[test]
    fn test_mutual_reference_terminates() {
        let catalog = module(vec![
            Declaration::interface(
                "Author",
                vec![
                    string("name"),
                    PropertyDef::new("posts", TsTypeDef::array(TsTypeDef::type_ref("Post"))),
                ],
            )
            .exported(),
            Declaration::interface(
                "Post",
                vec![PropertyDef::new("author", TsTypeDef::type_ref("Author"))],
            )
            .exported(),
        ]);

        let schema = resolve_json(&catalog, &ResolveOptions::new());
        let back = json!({ "type": "object", "cyclic": true, "required": true, "readonly": false });
        assert_eq!(schema["Post"]["author"]["children"]["posts"]["children"], back);
        assert_eq!(schema["Author"]["posts"]["children"]["children"]["author"], back);
    }

    #[test]
    fn test_recursive_alias_terminates() {
        let catalog = module(vec![
            Declaration::type_alias(
                "Json",
                TsTypeDef::union(vec![
                    TsTypeDef::keyword("string"),
                    TsTypeDef::array(TsTypeDef::type_ref("Json")),
                ]),
            ),
            Declaration::interface("Doc", vec![PropertyDef::new("body", TsTypeDef::type_ref("Json"))])
                .exported(),
        ]);

        let attrs = json!({ "required": true, "readonly": false });
        let with = |mut node: Value| {
            node.as_object_mut()
                .unwrap()
                .extend(attrs.as_object().unwrap().clone());
            node
        };
        assert_eq!(
            resolve_json(&catalog, &private())["Doc"]["body"],
            json!({
                "type": "union",
                "subtype": "Json",
                "union": [
                    with(json!({ "type": "string" })),
                    with(json!({
                        "type": "array",
                        "children": with(json!({ "type": "Json", "cyclic": true }))
                    }))
                ]
            })
        );
    }

    #[test]
    fn test_cross_module_reference() {
        let mut catalog = StaticCatalog::new();
        catalog
            .insert(
                "blog.ts",
                vec![
                    Declaration::import("Author", "people.ts", "Author"),
                    Declaration::import("Handle", "people.ts", "Handle"),
                    Declaration::interface(
                        "Post",
                        vec![
                            PropertyDef::new("author", TsTypeDef::type_ref("Author")),
                            PropertyDef::new("handle", TsTypeDef::type_ref("Handle")),
                        ],
                    )
                    .exported(),
                ],
            )
            .insert(
                "people.ts",
                vec![
                    Declaration::type_alias("Handle", TsTypeDef::keyword("string")).exported(),
                    Declaration::interface(
                        "Author",
                        vec![
                            string("name"),
                            PropertyDef::new("handle", TsTypeDef::type_ref("Handle")),
                        ],
                    )
                    .exported(),
                ],
            );

        let schema =
            serde_json::to_value(resolve(&catalog, "blog.ts", &private()).unwrap()).unwrap();
        assert_eq!(
            schema,
            json!({
                "Post": {
                    "author": {
                        "type": "object",
                        "children": {
                            "name": { "type": "string", "required": true, "readonly": false },
                            "handle": {
                                "type": "string",
                                "subtype": "Handle",
                                "required": true,
                                "readonly": false
                            }
                        },
                        "required": true,
                        "readonly": false
                    }
                }
            })
        );

        // Imports are private declarations of the importing module.
        let schema =
            serde_json::to_value(resolve(&catalog, "blog.ts", &ResolveOptions::new()).unwrap())
                .unwrap();
        assert_eq!(
            schema["Post"]["author"],
            json!({ "type": "Author", "required": true, "readonly": false })
        );
    }

    #[test]
    fn test_catalog_fetched_once_per_module() {
        struct Recording<'a> {
            inner: &'a StaticCatalog,
            fetched: RefCell<Vec<String>>,
        }

        impl CatalogSource for Recording<'_> {
            fn fetch(&self, module: &str, include_private: bool) -> Result<Catalog, CatalogError> {
                self.fetched.borrow_mut().push(module.to_string());
                self.inner.fetch(module, include_private)
            }
        }

        let mut catalog = StaticCatalog::new();
        catalog
            .insert(
                "blog.ts",
                vec![
                    Declaration::import("Author", "people.ts", "Author"),
                    Declaration::interface(
                        "Post",
                        vec![
                            PropertyDef::new("author", TsTypeDef::type_ref("Author")),
                            PropertyDef::new("editor", TsTypeDef::type_ref("Author")),
                        ],
                    )
                    .exported(),
                    Declaration::interface(
                        "Page",
                        vec![PropertyDef::new("owner", TsTypeDef::type_ref("Author"))],
                    )
                    .exported(),
                ],
            )
            .insert(
                "people.ts",
                vec![Declaration::interface("Author", vec![string("name")]).exported()],
            );

        let source = Recording {
            inner: &catalog,
            fetched: RefCell::new(Vec::new()),
        };
        let options = private();
        let mut resolver = Resolver::new(&source, &options);
        let schema = resolver.resolve_module("blog.ts").unwrap();

        assert_eq!(schema.len(), 2);
        assert_eq!(*source.fetched.borrow(), vec!["blog.ts", "people.ts"]);
        assert_eq!(resolver.cache().len(), 2);
    }

    #[test]
    fn test_import_of_non_interface_is_dropped() {
        let mut catalog = StaticCatalog::new();
        catalog
            .insert(
                "blog.ts",
                vec![
                    Declaration::import("Name", "people.ts", "Name"),
                    Declaration::import("Gone", "people.ts", "Gone"),
                    Declaration::interface(
                        "Post",
                        vec![
                            string("title"),
                            PropertyDef::new("name", TsTypeDef::type_ref("Name")),
                            PropertyDef::new("gone", TsTypeDef::type_ref("Gone")),
                        ],
                    )
                    .exported(),
                ],
            )
            .insert(
                "people.ts",
                vec![Declaration::type_alias("Name", TsTypeDef::keyword("string")).exported()],
            );

        let schema = resolve(&catalog, "blog.ts", &private()).unwrap();
        assert_eq!(schema["Post"].keys().collect::<Vec<_>>(), vec!["title"]);
    }

    #[test]
    fn test_missing_type_expression_is_fatal() {
        let catalog = module(vec![
            Declaration::interface(
                "Post",
                vec![
                    string("title"),
                    PropertyDef {
                        ts_type: None,
                        ..string("body")
                    },
                ],
            )
            .exported(),
        ]);

        let err = resolve(&catalog, "mod.ts", &ResolveOptions::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "in interface `Post`: property `body` has no type expression"
        );
    }

    #[test]
    fn test_reference_to_value_is_fatal() {
        let catalog = module(vec![
            Declaration::other("post", "variable").exported(),
            Declaration::interface(
                "Post",
                vec![PropertyDef::new("other", TsTypeDef::type_ref("post"))],
            )
            .exported(),
        ]);

        let err = resolve(&catalog, "mod.ts", &ResolveOptions::new()).unwrap_err();
        assert!(matches!(
            err.root(),
            Error::UnresolvedReferenceKind { name, kind } if name == "post" && kind == "variable"
        ));
    }

    #[test]
    fn test_catalog_failure_is_fatal() {
        let err = resolve(&StaticCatalog::new(), "mod.ts", &ResolveOptions::new()).unwrap_err();
        assert!(matches!(err, Error::Catalog(CatalogError::UnknownModule(_))));
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }
}
