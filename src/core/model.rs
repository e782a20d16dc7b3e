//! Declaration-level model of a parsed source file.
//!
//! A [`SourceUnit`] holds only what the conformance rules look at: the type
//! header, field declarations with their initializer text, and method
//! signatures. Method bodies and expressions are never modeled.

use std::collections::BTreeSet;

use serde::Serialize;

/// Types that are visible without an import.
const IMPLICIT_LANG_TYPES: &[&str] = &[
    "Object",
    "String",
    "Class",
    "Throwable",
    "Exception",
    "RuntimeException",
    "Error",
    "Integer",
    "Long",
    "Short",
    "Byte",
    "Character",
    "Boolean",
    "Double",
    "Float",
    "Number",
    "Void",
    "Override",
    "Deprecated",
    "SuppressWarnings",
    "FunctionalInterface",
    "Iterable",
    "CharSequence",
];

/// Kind of the top-level type declared by a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Interface,
    Class,
}

impl std::fmt::Display for UnitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitKind::Interface => write!(f, "interface"),
            UnitKind::Class => write!(f, "class"),
        }
    }
}

/// Declaration modifiers tracked by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Static,
    Final,
    Abstract,
    Default,
    Transient,
    Volatile,
    Synchronized,
    Native,
    Strictfp,
    Sealed,
    NonSealed,
}

impl Modifier {
    pub fn from_keyword(word: &str) -> Option<Self> {
        let modifier = match word {
            "public" => Modifier::Public,
            "protected" => Modifier::Protected,
            "private" => Modifier::Private,
            "static" => Modifier::Static,
            "final" => Modifier::Final,
            "abstract" => Modifier::Abstract,
            "default" => Modifier::Default,
            "transient" => Modifier::Transient,
            "volatile" => Modifier::Volatile,
            "synchronized" => Modifier::Synchronized,
            "native" => Modifier::Native,
            "strictfp" => Modifier::Strictfp,
            "sealed" => Modifier::Sealed,
            "non-sealed" => Modifier::NonSealed,
            _ => return None,
        };
        Some(modifier)
    }
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let word = match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Abstract => "abstract",
            Modifier::Default => "default",
            Modifier::Transient => "transient",
            Modifier::Volatile => "volatile",
            Modifier::Synchronized => "synchronized",
            Modifier::Native => "native",
            Modifier::Strictfp => "strictfp",
            Modifier::Sealed => "sealed",
            Modifier::NonSealed => "non-sealed",
        };
        write!(f, "{}", word)
    }
}

pub type Modifiers = BTreeSet<Modifier>;

/// A field declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDecl {
    pub name: String,
    pub type_name: String,
    pub modifiers: Modifiers,
    /// Verbatim source text of the initializer expression, if any.
    pub literal_initializer: Option<String>,
    pub line: usize,
}

impl FieldDecl {
    pub fn is_public(&self) -> bool {
        self.modifiers.contains(&Modifier::Public)
    }

    pub fn is_protected(&self) -> bool {
        self.modifiers.contains(&Modifier::Protected)
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(&Modifier::Static)
    }

    pub fn is_final(&self) -> bool {
        self.modifiers.contains(&Modifier::Final)
    }
}

/// A method or constructor declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDecl {
    pub name: String,
    /// Parameter types as written, generic arguments included.
    pub parameter_types: Vec<String>,
    pub modifiers: Modifiers,
    pub is_constructor: bool,
    pub is_static: bool,
    pub is_default: bool,
    pub has_override_marker: bool,
    pub line: usize,
}

impl MethodDecl {
    pub fn is_protected(&self) -> bool {
        self.modifiers.contains(&Modifier::Protected)
    }

    /// Visibility keyword, or `package-private` when none is declared.
    pub fn visibility(&self) -> &'static str {
        if self.modifiers.contains(&Modifier::Public) {
            "public"
        } else if self.modifiers.contains(&Modifier::Protected) {
            "protected"
        } else if self.modifiers.contains(&Modifier::Private) {
            "private"
        } else {
            "package-private"
        }
    }
}

/// The structural shape of one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceUnit {
    pub path: String,
    pub kind: UnitKind,
    pub name: String,
    pub package: Option<String>,
    pub imports: Vec<String>,
    /// Packages imported on demand (`import pkg.*;`).
    pub on_demand_imports: Vec<String>,
    /// Qualified name of the single extended type, if any.
    pub supertype: Option<String>,
    /// The extended type as written in the source.
    pub written_supertype: Option<String>,
    /// Qualified names of implemented (or, for interfaces, extended) types.
    pub interfaces: Vec<String>,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<MethodDecl>,
}

impl SourceUnit {
    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// First method declared with the given name.
    pub fn method(&self, name: &str) -> Option<&MethodDecl> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn constructors(&self) -> impl Iterator<Item = &MethodDecl> {
        self.methods.iter().filter(|m| m.is_constructor)
    }

    /// Names of methods that an implementation has to provide: no default,
    /// static or constructor declarations. Declaration order is kept.
    pub fn abstract_method_names(&self) -> Vec<&str> {
        self.methods
            .iter()
            .filter(|m| !m.is_default && !m.is_static && !m.is_constructor)
            .map(|m| m.name.as_str())
            .collect()
    }

    /// Resolve a type name as written in this unit to a qualified name.
    pub fn resolve_type(&self, written: &str) -> String {
        resolve_type_name(written, self.package.as_deref(), &self.imports)
    }

    /// Whether `written` can denote `qualified` in this unit.
    ///
    /// On-demand imports are considered too: a simple name that no
    /// single-type import claims may come from any `pkg.*` import, so it
    /// refers to `qualified` when that package is imported on demand.
    pub fn refers_to(&self, written: &str, qualified: &str) -> bool {
        if self.resolve_type(written) == qualified {
            return true;
        }
        let erased = erase_type(written);
        let suffix = format!(".{}", erased);
        if erased.contains('.') || self.imports.iter().any(|i| i.ends_with(&suffix)) {
            return false;
        }
        match qualified.rsplit_once('.') {
            Some((pkg, simple)) => {
                simple == erased && self.on_demand_imports.iter().any(|p| p == pkg)
            }
            None => false,
        }
    }

    /// Whether the single extended type can denote `qualified`.
    pub fn extends(&self, qualified: &str) -> bool {
        self.written_supertype
            .as_deref()
            .is_some_and(|written| self.refers_to(written, qualified))
    }
}

/// Resolve `written` against a package and its single-type imports.
///
/// Generic arguments and array suffixes are dropped first, so
/// `List<String>[]` resolves like `List`.
pub fn resolve_type_name(written: &str, package: Option<&str>, imports: &[String]) -> String {
    let erased = erase_type(written);

    if erased.contains('.') {
        return erased;
    }

    let suffix = format!(".{}", erased);
    if let Some(import) = imports.iter().find(|i| i.ends_with(&suffix)) {
        return import.clone();
    }

    if IMPLICIT_LANG_TYPES.contains(&erased.as_str()) {
        return format!("java.lang.{}", erased);
    }

    match package {
        Some(pkg) if !is_primitive(&erased) => format!("{}.{}", pkg, erased),
        _ => erased,
    }
}

fn erase_type(written: &str) -> String {
    let mut depth = 0usize;
    let mut erased = String::with_capacity(written.len());
    for c in written.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            _ if depth > 0 => {}
            '[' | ']' => {}
            c if c.is_whitespace() => {}
            c => erased.push(c),
        }
    }
    erased.trim_end_matches("...").to_string()
}

fn is_primitive(name: &str) -> bool {
    matches!(
        name,
        "boolean" | "byte" | "char" | "short" | "int" | "long" | "float" | "double" | "void"
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::core::model::*;

    fn imports(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_qualified_name_unchanged() {
        assert_eq!(
            resolve_type_name("org.jboss.logging.Logger", Some("org.acme"), &[]),
            "org.jboss.logging.Logger"
        );
    }

    #[test]
    fn test_resolve_through_import() {
        let imports = imports(&["java.util.Locale", "org.jboss.logging.Logger"]);
        assert_eq!(
            resolve_type_name("Logger", Some("org.acme"), &imports),
            "org.jboss.logging.Logger"
        );
    }

    #[test]
    fn test_resolve_java_lang() {
        assert_eq!(
            resolve_type_name("String", Some("org.acme"), &[]),
            "java.lang.String"
        );
    }

    #[test]
    fn test_resolve_same_package() {
        assert_eq!(
            resolve_type_name("DefaultLogger", Some("org.acme"), &[]),
            "org.acme.DefaultLogger"
        );
        assert_eq!(resolve_type_name("DefaultLogger", None, &[]), "DefaultLogger");
    }

    #[test]
    fn test_resolve_erases_generics_and_arrays() {
        let imports = imports(&["java.util.List"]);
        assert_eq!(
            resolve_type_name("List<Map<String, Object>>[]", None, &imports),
            "java.util.List"
        );
        assert_eq!(resolve_type_name("Object...", None, &[]), "java.lang.Object");
        assert_eq!(resolve_type_name("int", Some("org.acme"), &[]), "int");
    }

    #[test]
    fn test_refers_to_through_on_demand_import() {
        let unit = crate::core::parse_source(
            "DefaultLogger_$logger.java",
            "package org.acme;\nimport org.jboss.logging.*;\nimport java.util.Locale;\n\
             public class DefaultLogger_$logger extends DelegatingBasicLogger {}",
        )
        .unwrap();

        assert!(unit.refers_to("Logger", "org.jboss.logging.Logger"));
        assert!(unit.refers_to("Locale", "java.util.Locale"));
        assert!(!unit.refers_to("Locale", "org.jboss.logging.Locale"));
        assert!(!unit.refers_to("Logger", "org.acme.other.Logger"));
        assert!(unit.extends("org.jboss.logging.DelegatingBasicLogger"));
        assert_eq!(unit.on_demand_imports, vec!["org.jboss.logging"]);
    }
}
