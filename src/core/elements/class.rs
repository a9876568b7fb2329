//! Decorated class element and its member aggregation: the merged "all"
//! views follow closest-declaration-wins precedence: own members first,
//! then used traits in use-declaration order, then the parent chain.

use std::collections::HashSet;
use std::path::Path;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::comment::{DEPRECATED_TAG, DocComment, INHERIT_DOC_TAG};
use crate::error::{CrossdocError, Result};
use crate::raw::{namespace_of, short_name, RawClass};

use super::super::transformer::RecordRef;
use super::super::tree::{ParentMemberResolver, SubclassResolver};
use super::super::Project;
use super::{Element, InterfaceElement, TraitElement};

#[derive(Debug)]
pub struct ClassElement {
    raw: RawClass,
    doc: DocComment,
}

impl ClassElement {
    pub(crate) fn new(raw: RawClass, doc: DocComment) -> Self {
        Self { raw, doc }
    }

    pub fn raw(&self) -> &RawClass {
        &self.raw
    }

    pub fn doc(&self) -> &DocComment {
        &self.doc
    }

    /// Fully-qualified name.
    pub fn name(&self) -> &str {
        &self.raw.name
    }

    pub fn short_name(&self) -> &str {
        short_name(&self.raw.name)
    }

    pub fn namespace_name(&self) -> &str {
        namespace_of(&self.raw.name)
    }

    pub fn file_name(&self) -> Option<&Path> {
        self.raw.file.as_deref()
    }

    pub fn start_line(&self) -> u32 {
        self.raw.start_line
    }

    pub fn end_line(&self) -> u32 {
        self.raw.end_line
    }

    pub fn is_abstract(&self) -> bool {
        self.raw.is_abstract
    }

    pub fn is_final(&self) -> bool {
        self.raw.is_final
    }

    // ---- ancestry ----------------------------------------------------

    pub fn parent_class_name(&self) -> Option<&str> {
        self.raw.parent_class.as_deref()
    }

    /// Direct parent, when the scanner saw it. A parent outside the scanned
    /// codebase terminates the chain silently.
    pub fn parent_class(&self, project: &Project) -> Option<Rc<ClassElement>> {
        let parent_name = self.raw.parent_class.as_deref()?;
        project.store().class(parent_name).cloned()
    }

    /// Ancestor chain, nearest first. Fails with `CycleDetected` on a
    /// malformed snapshot whose parent declarations loop.
    pub fn parent_classes(&self, project: &Project) -> Result<Vec<Rc<ClassElement>>> {
        let mut chain = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        visited.insert(self.name().to_string());

        let mut current = self.parent_class(project);
        while let Some(ancestor) = current {
            if !visited.insert(ancestor.name().to_string()) {
                return Err(CrossdocError::CycleDetected {
                    name: ancestor.name().to_string(),
                });
            }
            current = ancestor.parent_class(project);
            chain.push(ancestor);
        }
        Ok(chain)
    }

    pub fn subclasses(&self, project: &Project) -> Result<Vec<Rc<ClassElement>>> {
        SubclassResolver::new(project).subclasses(self)
    }

    /// Directly implemented interfaces known to the store, declaration order.
    pub fn own_interfaces(&self, project: &Project) -> Vec<Rc<InterfaceElement>> {
        self.raw
            .interfaces
            .iter()
            .filter_map(|name| project.store().interface(name).cloned())
            .collect()
    }

    /// Transitively implemented interfaces known to the store.
    pub fn interfaces(&self, project: &Project) -> Vec<Rc<InterfaceElement>> {
        self.raw
            .all_interfaces
            .iter()
            .filter_map(|name| project.store().interface(name).cloned())
            .collect()
    }

    /// Used traits known to the store, use-declaration order.
    pub fn traits(&self, project: &Project) -> Vec<Rc<TraitElement>> {
        self.raw
            .traits
            .iter()
            .filter_map(|name| project.store().trait_element(name).cloned())
            .collect()
    }

    // ---- methods -----------------------------------------------------

    /// Methods declared directly on this class, declaration order.
    pub fn own_methods(&self, project: &Project) -> Result<IndexMap<String, Element>> {
        project
            .transformer()
            .transform_group(self.raw.methods.iter().map(RecordRef::Method), &self.raw.scope)
    }

    /// Merged view: own methods, then trait methods in use-declaration
    /// order, then the parent chain. First writer wins.
    pub fn methods(&self, project: &Project) -> Result<IndexMap<String, Element>> {
        let mut all = self.own_methods(project)?;
        self.merge_trait_methods(project, &mut all)?;

        for ancestor in self.parent_classes(project)? {
            for (name, method) in ancestor.own_methods(project)? {
                all.entry(name).or_insert(method);
            }
            ancestor.merge_trait_methods(project, &mut all)?;
        }
        Ok(all)
    }

    fn merge_trait_methods(
        &self,
        project: &Project,
        all: &mut IndexMap<String, Element>,
    ) -> Result<()> {
        for trait_element in self.traits(project) {
            for (name, method) in trait_element.methods(project)? {
                all.entry(name).or_insert(method);
            }
        }
        Ok(())
    }

    /// Methods inherited from ancestor classes, nearest ancestor winning on
    /// name collision.
    pub fn inherited_methods(&self, project: &Project) -> Result<IndexMap<String, Element>> {
        ParentMemberResolver::new(project).inherited_methods(self)
    }

    pub fn method(&self, name: &str, project: &Project) -> Result<Element> {
        self.methods(project)?
            .get(name)
            .cloned()
            .ok_or_else(|| CrossdocError::NotFound {
                kind: "Method",
                name: name.to_string(),
                owner: self.name().to_string(),
            })
    }

    // ---- properties --------------------------------------------------

    pub fn own_properties(&self, project: &Project) -> Result<IndexMap<String, Element>> {
        project
            .transformer()
            .transform_group(
                self.raw.properties.iter().map(RecordRef::Property),
                &self.raw.scope,
            )
    }

    /// Merged view with the same precedence as [`ClassElement::methods`].
    pub fn properties(&self, project: &Project) -> Result<IndexMap<String, Element>> {
        let mut all = self.own_properties(project)?;
        self.merge_trait_properties(project, &mut all)?;

        for ancestor in self.parent_classes(project)? {
            for (name, property) in ancestor.own_properties(project)? {
                all.entry(name).or_insert(property);
            }
            ancestor.merge_trait_properties(project, &mut all)?;
        }
        Ok(all)
    }

    fn merge_trait_properties(
        &self,
        project: &Project,
        all: &mut IndexMap<String, Element>,
    ) -> Result<()> {
        for trait_element in self.traits(project) {
            for (name, property) in trait_element.properties(project)? {
                all.entry(name).or_insert(property);
            }
        }
        Ok(())
    }

    pub fn inherited_properties(&self, project: &Project) -> Result<IndexMap<String, Element>> {
        ParentMemberResolver::new(project).inherited_properties(self)
    }

    pub fn property(&self, name: &str, project: &Project) -> Result<Element> {
        self.properties(project)?
            .get(name)
            .cloned()
            .ok_or_else(|| CrossdocError::NotFound {
                kind: "Property",
                name: name.to_string(),
                owner: self.name().to_string(),
            })
    }

    // ---- constants ---------------------------------------------------

    pub fn own_constants(&self, project: &Project) -> Result<IndexMap<String, Element>> {
        project
            .transformer()
            .transform_group(
                self.raw.constants.iter().map(RecordRef::Constant),
                &self.raw.scope,
            )
    }

    /// Constants inherited from ancestor classes (nearest first), then from
    /// implemented interfaces. Associative union: first occurrence wins.
    pub fn inherited_constants(&self, project: &Project) -> Result<IndexMap<String, Element>> {
        let mut inherited = IndexMap::new();
        for ancestor in self.parent_classes(project)? {
            for (name, constant) in ancestor.own_constants(project)? {
                inherited.entry(name).or_insert(constant);
            }
        }
        for interface in self.interfaces(project) {
            for (name, constant) in interface.own_constants(project)? {
                inherited.entry(name).or_insert(constant);
            }
        }
        Ok(inherited)
    }

    /// Own constants united with inherited ones; own always wins.
    pub fn constants(&self, project: &Project) -> Result<IndexMap<String, Element>> {
        let mut all = self.own_constants(project)?;
        for (name, constant) in self.inherited_constants(project)? {
            all.entry(name).or_insert(constant);
        }
        Ok(all)
    }

    pub fn constant(&self, name: &str, project: &Project) -> Result<Element> {
        self.constants(project)?
            .get(name)
            .cloned()
            .ok_or_else(|| CrossdocError::NotFound {
                kind: "Constant",
                name: name.to_string(),
                owner: self.name().to_string(),
            })
    }

    pub fn own_constant(&self, name: &str, project: &Project) -> Result<Element> {
        self.own_constants(project)?
            .get(name)
            .cloned()
            .ok_or_else(|| CrossdocError::NotFound {
                kind: "Constant",
                name: name.to_string(),
                owner: self.name().to_string(),
            })
    }

    pub fn has_constant(&self, name: &str, project: &Project) -> Result<bool> {
        Ok(self.constants(project)?.contains_key(name))
    }

    // ---- description & deprecation ------------------------------------

    /// Description with `@inheritdoc` fallback: when the comment carries the
    /// marker and no own text, the first non-empty description along the
    /// parent chain, then the implemented interfaces, is used.
    pub fn description(&self, project: &Project) -> Result<String> {
        if let Some(inherited) = self.inherited_description(project)? {
            return Ok(inherited);
        }
        Ok(self.doc.text())
    }

    fn inherited_description(&self, project: &Project) -> Result<Option<String>> {
        if !self.doc.has_tag(INHERIT_DOC_TAG) || !self.doc.text().is_empty() {
            return Ok(None);
        }

        for ancestor in self.parent_classes(project)? {
            let description = ancestor.description(project)?;
            if !description.is_empty() {
                return Ok(Some(description));
            }
        }
        for interface in self.interfaces(project) {
            let description = interface.description(project)?;
            if !description.is_empty() {
                return Ok(Some(description));
            }
        }
        Ok(None)
    }

    /// Deprecated when carrying the tag itself or when any extended or
    /// implemented type is, recursively.
    pub fn is_deprecated(&self, project: &Project) -> Result<bool> {
        let mut stack = Vec::new();
        self.deprecated_guarded(project, &mut stack)
    }

    pub(crate) fn deprecated_guarded(
        &self,
        project: &Project,
        stack: &mut Vec<String>,
    ) -> Result<bool> {
        if stack.iter().any(|name| name == self.name()) {
            return Err(CrossdocError::CycleDetected {
                name: self.name().to_string(),
            });
        }
        if self.doc.has_tag(DEPRECATED_TAG) {
            return Ok(true);
        }

        stack.push(self.name().to_string());
        if let Some(parent) = self.parent_class(project) {
            if parent.deprecated_guarded(project, stack)? {
                return Ok(true);
            }
        }
        for interface in self.own_interfaces(project) {
            if interface.deprecated_guarded(project, stack)? {
                return Ok(true);
            }
        }
        stack.pop();
        Ok(false)
    }
}
