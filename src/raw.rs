//! Raw introspection records as delivered by the external scanner.
//!
//! These types form the consumed boundary of the core: the scanner walks the
//! codebase, materializes one [`RawSnapshot`] per generation run and hands it
//! over. The core never mutates scanner state; decorated elements keep their
//! raw record for the lifetime of the run.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Stable identity of one raw record, assigned by the scanner. Keys the
/// identity cache: two records with the same id decorate to the same element.
pub type RecordId = u64;

/// Separator between namespace segments in fully-qualified names.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Last segment of a fully-qualified name.
pub fn short_name(fqn: &str) -> &str {
    fqn.rsplit(NAMESPACE_SEPARATOR).next().unwrap_or(fqn)
}

/// Everything before the last separator, or the empty string for global names.
pub fn namespace_of(fqn: &str) -> &str {
    match fqn.rfind(NAMESPACE_SEPARATOR) {
        Some(index) => &fqn[..index],
        None => "",
    }
}

/// The import/alias context in effect at an element's source location: the
/// same short-name-to-fully-qualified-name mapping the underlying language
/// itself would apply there.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolutionScope {
    /// Namespace the element is declared in, empty for the global namespace.
    #[serde(default)]
    pub namespace: String,

    /// Imported alias -> fully-qualified name.
    #[serde(default)]
    pub imports: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::Public
    }
}

/// Kind of scope a member record is declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    Class,
    Interface,
    Trait,
    Function,
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScopeKind::Class => "class",
            ScopeKind::Interface => "interface",
            ScopeKind::Trait => "trait",
            ScopeKind::Function => "function",
        };
        f.write_str(label)
    }
}

/// Names the scope a member record belongs to. The kind decides which
/// decorated variant the member transforms into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeRef {
    pub kind: ScopeKind,
    /// Fully-qualified name of the declaring type or function.
    pub name: String,
}

impl fmt::Display for ScopeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} \"{}\"", self.kind, self.name)
    }
}

/// Raw class record, with its immediate members inlined in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawClass {
    pub id: RecordId,

    /// Fully-qualified name.
    pub name: String,

    #[serde(default)]
    pub file: Option<PathBuf>,

    #[serde(default)]
    pub start_line: u32,

    #[serde(default)]
    pub end_line: u32,

    /// Raw documentation comment text, unparsed.
    #[serde(default)]
    pub doc_comment: Option<String>,

    #[serde(default)]
    pub scope: ResolutionScope,

    #[serde(default)]
    pub is_abstract: bool,

    #[serde(default)]
    pub is_final: bool,

    /// Fully-qualified parent class name, if any.
    #[serde(default)]
    pub parent_class: Option<String>,

    /// Directly implemented interfaces, declaration order.
    #[serde(default)]
    pub interfaces: Vec<String>,

    /// Full transitive interface set, as the scanner computes it.
    #[serde(default)]
    pub all_interfaces: Vec<String>,

    /// Used traits, use-declaration order.
    #[serde(default)]
    pub traits: Vec<String>,

    #[serde(default)]
    pub methods: Vec<RawMethod>,

    #[serde(default)]
    pub properties: Vec<RawProperty>,

    #[serde(default)]
    pub constants: Vec<RawConstant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawInterface {
    pub id: RecordId,

    /// Fully-qualified name.
    pub name: String,

    #[serde(default)]
    pub file: Option<PathBuf>,

    #[serde(default)]
    pub start_line: u32,

    #[serde(default)]
    pub end_line: u32,

    #[serde(default)]
    pub doc_comment: Option<String>,

    #[serde(default)]
    pub scope: ResolutionScope,

    /// Directly extended interfaces, declaration order.
    #[serde(default)]
    pub extends: Vec<String>,

    /// Full transitive extended-interface set.
    #[serde(default)]
    pub all_extended: Vec<String>,

    #[serde(default)]
    pub methods: Vec<RawMethod>,

    #[serde(default)]
    pub constants: Vec<RawConstant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTrait {
    pub id: RecordId,

    /// Fully-qualified name.
    pub name: String,

    #[serde(default)]
    pub file: Option<PathBuf>,

    #[serde(default)]
    pub start_line: u32,

    #[serde(default)]
    pub end_line: u32,

    #[serde(default)]
    pub doc_comment: Option<String>,

    #[serde(default)]
    pub scope: ResolutionScope,

    /// Traits used by this trait, use-declaration order.
    #[serde(default)]
    pub traits: Vec<String>,

    #[serde(default)]
    pub methods: Vec<RawMethod>,

    #[serde(default)]
    pub properties: Vec<RawProperty>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFunction {
    pub id: RecordId,

    /// Fully-qualified name.
    pub name: String,

    #[serde(default)]
    pub file: Option<PathBuf>,

    #[serde(default)]
    pub start_line: u32,

    #[serde(default)]
    pub end_line: u32,

    #[serde(default)]
    pub doc_comment: Option<String>,

    #[serde(default)]
    pub scope: ResolutionScope,

    #[serde(default)]
    pub parameters: Vec<RawParameter>,

    #[serde(default)]
    pub return_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMethod {
    pub id: RecordId,

    /// Short name.
    pub name: String,

    pub declared_in: ScopeRef,

    #[serde(default)]
    pub start_line: u32,

    #[serde(default)]
    pub end_line: u32,

    #[serde(default)]
    pub doc_comment: Option<String>,

    #[serde(default)]
    pub visibility: Visibility,

    #[serde(default)]
    pub is_static: bool,

    #[serde(default)]
    pub is_abstract: bool,

    #[serde(default)]
    pub is_final: bool,

    /// Declared through a documentation annotation rather than source code.
    #[serde(default)]
    pub is_synthetic: bool,

    #[serde(default)]
    pub parameters: Vec<RawParameter>,

    #[serde(default)]
    pub return_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawProperty {
    pub id: RecordId,

    /// Short name, without any sigil.
    pub name: String,

    pub declared_in: ScopeRef,

    #[serde(default)]
    pub start_line: u32,

    #[serde(default)]
    pub end_line: u32,

    #[serde(default)]
    pub doc_comment: Option<String>,

    #[serde(default)]
    pub visibility: Visibility,

    #[serde(default)]
    pub is_static: bool,

    #[serde(default)]
    pub is_synthetic: bool,

    #[serde(default)]
    pub type_decl: Option<String>,

    #[serde(default)]
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawConstant {
    pub id: RecordId,

    /// Short name.
    pub name: String,

    pub declared_in: ScopeRef,

    #[serde(default)]
    pub start_line: u32,

    #[serde(default)]
    pub end_line: u32,

    #[serde(default)]
    pub doc_comment: Option<String>,

    /// Literal value as written in source.
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawParameter {
    pub id: RecordId,

    pub name: String,

    #[serde(default)]
    pub type_decl: Option<String>,

    /// Default value as written in source; presence implies optionality.
    #[serde(default)]
    pub default_value: Option<String>,

    #[serde(default)]
    pub by_reference: bool,

    #[serde(default)]
    pub variadic: bool,
}

/// Everything the scanner saw in one pass over the codebase.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSnapshot {
    #[serde(default)]
    pub classes: Vec<RawClass>,

    #[serde(default)]
    pub interfaces: Vec<RawInterface>,

    #[serde(default)]
    pub traits: Vec<RawTrait>,

    #[serde(default)]
    pub functions: Vec<RawFunction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_strips_namespace() {
        assert_eq!(short_name("App\\Model\\User"), "User");
        assert_eq!(short_name("User"), "User");
    }

    #[test]
    fn namespace_of_keeps_everything_before_last_separator() {
        assert_eq!(namespace_of("App\\Model\\User"), "App\\Model");
        assert_eq!(namespace_of("User"), "");
    }

    #[test]
    fn snapshot_deserializes_with_defaults() {
        let json = r#"{
            "classes": [{"id": 1, "name": "App\\Foo", "parent_class": "App\\Bar"}]
        }"#;

        let snapshot: RawSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.classes.len(), 1);
        assert_eq!(snapshot.classes[0].parent_class.as_deref(), Some("App\\Bar"));
        assert!(snapshot.classes[0].methods.is_empty());
        assert!(snapshot.interfaces.is_empty());
    }
}
