//! Declaration catalog model.
//!
//! These types mirror the JSON emitted by `deno doc --json`. Only the parts the
//! resolver reads are modelled; every other field in the documents is ignored.
//!
//! A [`Catalog`] is the closed lookup table of one module's declarations,
//! addressed by name. Catalogs are produced by a [`CatalogSource`], the seam
//! between the resolver and whatever tool extracts declarations from source.

use serde::Deserialize;
use serde_json::Value;

use crate::error::CatalogError;

/// Supplies the declarations of a module.
///
/// Implementations must be consistent within a resolution pass: fetching the
/// same `(module, include_private)` pair twice yields the same declarations.
/// Non-exported declarations are included only when `include_private` is set.
pub trait CatalogSource {
    fn fetch(&self, module: &str, include_private: bool) -> Result<Catalog, CatalogError>;
}

impl<T: CatalogSource + ?Sized> CatalogSource for &T {
    fn fetch(&self, module: &str, include_private: bool) -> Result<Catalog, CatalogError> {
        (**self).fetch(module, include_private)
    }
}

/// The declarations of one module.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    module: String,
    declarations: Vec<Declaration>,
}

impl Catalog {
    pub fn new(module: impl Into<String>, declarations: Vec<Declaration>) -> Self {
        Self {
            module: module.into(),
            declarations,
        }
    }

    /// Parse `deno doc --json` output.
    ///
    /// Both the bare node array and the versioned `{ "version", "nodes" }`
    /// envelope are accepted.
    pub fn from_slice(module: impl Into<String>, json: &[u8]) -> Result<Self, CatalogError> {
        let module = module.into();
        let nodes = if json.trim_ascii_start().starts_with(b"[") {
            serde_json::from_slice::<Vec<Declaration>>(json)
        } else {
            serde_json::from_slice::<Envelope>(json).map(|envelope| envelope.nodes)
        };
        match nodes {
            Ok(nodes) => Ok(Self::new(module, nodes)),
            Err(source) => Err(CatalogError::Json { module, source }),
        }
    }

    pub fn from_json(module: impl Into<String>, json: &str) -> Result<Self, CatalogError> {
        Self::from_slice(module, json.as_bytes())
    }

    /// The module identifier this catalog was fetched for.
    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Find the first declaration with the given name.
    pub fn find(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.name == name)
    }

    /// Iterate the interfaces declared with `export`, in source order.
    pub fn exported_interfaces(&self) -> impl Iterator<Item = (&str, &InterfaceDef)> {
        self.declarations.iter().filter_map(|d| match &d.def {
            DeclarationDef::Interface(def) if d.declaration_kind == DeclarationKind::Export => {
                Some((d.name.as_str(), def))
            }
            _ => None,
        })
    }

    /// Drop declarations that are not visible from outside the module.
    pub(crate) fn without_private(mut self) -> Self {
        self.declarations
            .retain(|d| d.declaration_kind != DeclarationKind::Private);
        self
    }
}

#[derive(Deserialize)]
struct Envelope {
    nodes: Vec<Declaration>,
}

/// How a declaration is visible from its module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeclarationKind {
    Export,
    Declare,
    #[default]
    #[serde(other)]
    Private,
}

/// A top-level declaration of a module.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawDeclaration")]
pub struct Declaration {
    pub name: String,
    pub declaration_kind: DeclarationKind,
    pub js_doc: Option<JsDoc>,
    pub def: DeclarationDef,
}

/// The kind-specific part of a declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationDef {
    Interface(InterfaceDef),
    TypeAlias(TypeAliasDef),
    Import(ImportDef),
    /// Any other kind (`function`, `variable`, `class`, ...), by its name.
    Other(String),
}

impl DeclarationDef {
    pub fn kind_name(&self) -> &str {
        match self {
            DeclarationDef::Interface(_) => "interface",
            DeclarationDef::TypeAlias(_) => "typeAlias",
            DeclarationDef::Import(_) => "import",
            DeclarationDef::Other(kind) => kind,
        }
    }
}

impl Declaration {
    pub fn interface(name: impl Into<String>, properties: Vec<PropertyDef>) -> Self {
        Self::with_def(name, DeclarationDef::Interface(InterfaceDef { properties }))
    }

    pub fn type_alias(name: impl Into<String>, ts_type: TsTypeDef) -> Self {
        Self::with_def(name, DeclarationDef::TypeAlias(TypeAliasDef { ts_type }))
    }

    pub fn import(
        name: impl Into<String>,
        src: impl Into<String>,
        imported: impl Into<String>,
    ) -> Self {
        Self::with_def(
            name,
            DeclarationDef::Import(ImportDef {
                src: src.into(),
                imported: Some(imported.into()),
            }),
        )
    }

    pub fn other(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::with_def(name, DeclarationDef::Other(kind.into()))
    }

    fn with_def(name: impl Into<String>, def: DeclarationDef) -> Self {
        Self {
            name: name.into(),
            declaration_kind: DeclarationKind::Private,
            js_doc: None,
            def,
        }
    }

    /// Mark the declaration as exported.
    pub fn exported(mut self) -> Self {
        self.declaration_kind = DeclarationKind::Export;
        self
    }

    pub fn with_doc(mut self, doc: JsDoc) -> Self {
        self.js_doc = Some(doc);
        self
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDeclaration {
    name: String,
    kind: String,
    #[serde(default)]
    declaration_kind: DeclarationKind,
    #[serde(default)]
    js_doc: Option<JsDoc>,
    #[serde(default)]
    interface_def: Option<InterfaceDef>,
    #[serde(default)]
    type_alias_def: Option<TypeAliasDef>,
    #[serde(default)]
    import_def: Option<ImportDef>,
}

impl TryFrom<RawDeclaration> for Declaration {
    type Error = String;

    fn try_from(raw: RawDeclaration) -> Result<Self, Self::Error> {
        let missing =
            |field: &str| format!("`{}` declaration `{}` has no {field}", raw.kind, raw.name);
        let def = match raw.kind.as_str() {
            "interface" => DeclarationDef::Interface(
                raw.interface_def.ok_or_else(|| missing("interfaceDef"))?,
            ),
            "typeAlias" => DeclarationDef::TypeAlias(
                raw.type_alias_def.ok_or_else(|| missing("typeAliasDef"))?,
            ),
            "import" => {
                DeclarationDef::Import(raw.import_def.ok_or_else(|| missing("importDef"))?)
            }
            _ => DeclarationDef::Other(raw.kind.clone()),
        };
        Ok(Declaration {
            name: raw.name,
            declaration_kind: raw.declaration_kind,
            js_doc: raw.js_doc,
            def,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct InterfaceDef {
    #[serde(default)]
    pub properties: Vec<PropertyDef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeAliasDef {
    pub ts_type: TsTypeDef,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImportDef {
    /// Specifier of the module the binding is imported from.
    pub src: String,
    /// Exported name in the source module; absent for namespace imports.
    #[serde(default)]
    pub imported: Option<String>,
}

/// A property of an interface or object literal type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDef {
    pub name: String,
    #[serde(default)]
    pub js_doc: Option<JsDoc>,
    #[serde(default)]
    pub optional: Option<bool>,
    #[serde(default)]
    pub readonly: Option<bool>,
    #[serde(default)]
    pub ts_type: Option<TsTypeDef>,
}

impl PropertyDef {
    /// A required, mutable property.
    pub fn new(name: impl Into<String>, ts_type: TsTypeDef) -> Self {
        Self {
            name: name.into(),
            js_doc: None,
            optional: Some(false),
            readonly: Some(false),
            ts_type: Some(ts_type),
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = Some(true);
        self
    }

    pub fn readonly(mut self) -> Self {
        self.readonly = Some(true);
        self
    }

    pub fn with_doc(mut self, doc: JsDoc) -> Self {
        self.js_doc = Some(doc);
        self
    }
}

/// A type expression.
///
/// `repr` is the source text of the type as reported by the extractor; for
/// keywords it is the keyword itself.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TsTypeDef {
    #[serde(default)]
    pub repr: String,
    #[serde(flatten)]
    pub kind: TsTypeKind,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TsTypeKind {
    Keyword,
    Array {
        array: Box<TsTypeDef>,
    },
    TypeLiteral {
        #[serde(rename = "typeLiteral")]
        type_literal: TypeLiteralDef,
    },
    TypeRef {
        #[serde(rename = "typeRef")]
        type_ref: TypeRefDef,
    },
    Union {
        union: Vec<TsTypeDef>,
    },
    /// Literal types, tuples, functions, intersections, generics, ...
    #[serde(other)]
    Unhandled,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TypeLiteralDef {
    #[serde(default)]
    pub properties: Vec<PropertyDef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRefDef {
    pub type_name: String,
}

impl TsTypeDef {
    pub fn keyword(keyword: impl Into<String>) -> Self {
        Self {
            repr: keyword.into(),
            kind: TsTypeKind::Keyword,
        }
    }

    pub fn array(element: TsTypeDef) -> Self {
        Self {
            repr: String::new(),
            kind: TsTypeKind::Array {
                array: Box::new(element),
            },
        }
    }

    pub fn type_literal(properties: Vec<PropertyDef>) -> Self {
        Self {
            repr: String::new(),
            kind: TsTypeKind::TypeLiteral {
                type_literal: TypeLiteralDef { properties },
            },
        }
    }

    pub fn type_ref(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            repr: name.clone(),
            kind: TsTypeKind::TypeRef {
                type_ref: TypeRefDef { type_name: name },
            },
        }
    }

    pub fn union(members: Vec<TsTypeDef>) -> Self {
        Self {
            repr: String::new(),
            kind: TsTypeKind::Union { union: members },
        }
    }

    /// A type expression outside the supported vocabulary.
    pub fn unhandled(repr: impl Into<String>) -> Self {
        Self {
            repr: repr.into(),
            kind: TsTypeKind::Unhandled,
        }
    }
}

/// A documentation comment.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct JsDoc {
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub tags: Vec<JsDocTag>,
}

impl JsDoc {
    pub fn new(doc: impl Into<String>) -> Self {
        Self {
            doc: Some(doc.into()),
            tags: Vec::new(),
        }
    }

    pub fn with_tag(mut self, tag: JsDocTag) -> Self {
        self.tags.push(tag);
        self
    }
}

/// A documentation tag.
///
/// Tags the extractor understands carry their own `kind`; anything else is
/// reported with kind `unsupported` and the raw tag text as `value`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JsDocTag {
    pub kind: String,
    #[serde(default)]
    pub value: Option<Value>,
}

impl JsDocTag {
    pub fn new(kind: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            kind: kind.into(),
            value,
        }
    }

    pub fn unsupported(raw: impl Into<String>) -> Self {
        Self::new("unsupported", Some(Value::String(raw.into())))
    }
}
