//! Reference resolution: matching the textual symbol mentions found in
//! documentation tags and type hints against the element store. A miss is
//! not an error; unresolved text degrades to a literal the caller renders
//! as plain text.

use regex::Regex;

use crate::error::{CrossdocError, Result};
use crate::raw::{NAMESPACE_SEPARATOR, ResolutionScope, ScopeKind};

use super::elements::Element;
use super::Project;

/// Outcome of matching one textual reference.
#[derive(Debug, Clone)]
pub enum ResolvedReference {
    /// The mention named a known element.
    Element(Element),
    /// Nothing matched; the original text, to be rendered verbatim.
    Literal(String),
}

/// A resolved reference plus the trailing array marker, stripped before
/// resolution so `Foo[]` still finds `Foo`. The caller re-attaches it.
#[derive(Debug, Clone)]
pub struct ResolvedLink {
    pub target: ResolvedReference,
    pub array_suffix: bool,
}

pub struct ReferenceResolver<'a> {
    project: &'a Project,
    url: Regex,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(project: &'a Project) -> Result<Self> {
        let url = Regex::new(r"(?i)^[a-z][a-z0-9+.-]*://\S+$")
            .map_err(|e| CrossdocError::Pattern(e.to_string()))?;
        Ok(Self { project, url })
    }

    /// Resolve a textual reference against the store, using the scope
    /// element's import and namespace context for short names. URLs are
    /// never looked up; they pass through as literals.
    pub fn resolve(&self, text: &str, scope: Option<&Element>) -> Result<ResolvedLink> {
        let text = text.trim();

        if self.url.is_match(text) || text.to_ascii_lowercase().starts_with("mailto:") {
            return Ok(ResolvedLink {
                target: ResolvedReference::Literal(text.to_string()),
                array_suffix: false,
            });
        }

        let (base, array_suffix) = match text.strip_suffix("[]") {
            Some(stripped) => (stripped, true),
            None => (text, false),
        };

        let (type_name, member_name) = match base.split_once("::") {
            Some((left, right)) => (left, Some(right)),
            None => (base, None),
        };

        let context = scope.and_then(|element| self.scope_of(element));
        for candidate in self.candidates(type_name, context.as_ref()) {
            let Some(found) = self.project.store().type_or_function(&candidate) else {
                continue;
            };
            let target = match member_name {
                None => Some(found),
                Some(member) => self.member_of(&found, member)?,
            };
            if let Some(target) = target {
                return Ok(ResolvedLink {
                    target: ResolvedReference::Element(target),
                    array_suffix,
                });
            }
        }

        Ok(ResolvedLink {
            target: ResolvedReference::Literal(base.to_string()),
            array_suffix,
        })
    }

    /// Candidate fully-qualified names for a type mention, in trial order:
    /// absolute spelling, import alias expansion, current namespace, global.
    fn candidates(&self, name: &str, context: Option<&ResolutionScope>) -> Vec<String> {
        if let Some(absolute) = name.strip_prefix(NAMESPACE_SEPARATOR) {
            return vec![absolute.to_string()];
        }

        let mut candidates = Vec::new();
        if let Some(context) = context {
            let (head, rest) = match name.split_once(NAMESPACE_SEPARATOR) {
                Some((head, rest)) => (head, Some(rest)),
                None => (name, None),
            };
            if let Some(expanded) = context.imports.get(head) {
                candidates.push(match rest {
                    Some(rest) => format!("{expanded}{NAMESPACE_SEPARATOR}{rest}"),
                    None => expanded.clone(),
                });
            }
            if !context.namespace.is_empty() {
                candidates.push(format!("{}{NAMESPACE_SEPARATOR}{name}", context.namespace));
            }
        }
        candidates.push(name.to_string());
        candidates
    }

    /// Static-member lookup in the merged view: constants, then methods,
    /// then properties. First match wins.
    fn member_of(&self, owner: &Element, member: &str) -> Result<Option<Element>> {
        let project = self.project;
        match owner {
            Element::Class(class) => {
                if let Some(found) = class.constants(project)?.get(member) {
                    return Ok(Some(found.clone()));
                }
                if let Some(found) = class.methods(project)?.get(member) {
                    return Ok(Some(found.clone()));
                }
                Ok(class.properties(project)?.get(member).cloned())
            }
            Element::Interface(interface) => {
                if let Some(found) = interface.constants(project)?.get(member) {
                    return Ok(Some(found.clone()));
                }
                Ok(interface.methods(project)?.get(member).cloned())
            }
            Element::Trait(trait_element) => {
                if let Some(found) = trait_element.methods(project)?.get(member) {
                    return Ok(Some(found.clone()));
                }
                Ok(trait_element.properties(project)?.get(member).cloned())
            }
            _ => Ok(None),
        }
    }

    /// The import/namespace context in effect at an element's declaration.
    /// Members borrow the context of their declaring type.
    fn scope_of(&self, element: &Element) -> Option<ResolutionScope> {
        match element {
            Element::Class(class) => Some(class.raw().scope.clone()),
            Element::Interface(interface) => Some(interface.raw().scope.clone()),
            Element::Trait(trait_element) => Some(trait_element.raw().scope.clone()),
            Element::Function(function) => Some(function.raw().scope.clone()),
            Element::ClassMethod(m) | Element::InterfaceMethod(m) | Element::TraitMethod(m) => {
                self.declaring_scope(&m.declared_in().kind, &m.declared_in().name)
            }
            Element::ClassProperty(p) | Element::TraitProperty(p) => {
                self.declaring_scope(&p.declared_in().kind, &p.declared_in().name)
            }
            Element::ClassConstant(c) | Element::InterfaceConstant(c) => {
                self.declaring_scope(&c.declared_in().kind, &c.declared_in().name)
            }
            Element::Parameter(_) => None,
        }
    }

    fn declaring_scope(&self, kind: &ScopeKind, name: &str) -> Option<ResolutionScope> {
        let store = self.project.store();
        match kind {
            ScopeKind::Class => store.class(name).map(|c| c.raw().scope.clone()),
            ScopeKind::Interface => store.interface(name).map(|i| i.raw().scope.clone()),
            ScopeKind::Trait => store.trait_element(name).map(|t| t.raw().scope.clone()),
            ScopeKind::Function => store.function(name).map(|f| f.raw().scope.clone()),
        }
    }
}
