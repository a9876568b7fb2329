//! Decorated interface element. Inherited members come from extended
//! interfaces; on a diamond the first constant encountered in declaration
//! order wins.

use std::path::Path;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::comment::{DEPRECATED_TAG, DocComment, INHERIT_DOC_TAG};
use crate::error::{CrossdocError, Result};
use crate::raw::{namespace_of, short_name, RawInterface};

use super::super::transformer::RecordRef;
use super::super::tree::ImplementerResolver;
use super::super::Project;
use super::{ClassElement, Element};

#[derive(Debug)]
pub struct InterfaceElement {
    raw: RawInterface,
    doc: DocComment,
}

impl InterfaceElement {
    pub(crate) fn new(raw: RawInterface, doc: DocComment) -> Self {
        Self { raw, doc }
    }

    pub fn raw(&self) -> &RawInterface {
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

    /// Directly extended interfaces known to the store, declaration order.
    pub fn own_extended_interfaces(&self, project: &Project) -> Vec<Rc<InterfaceElement>> {
        self.raw
            .extends
            .iter()
            .filter_map(|name| project.store().interface(name).cloned())
            .collect()
    }

    /// Transitively extended interfaces known to the store.
    pub fn extended_interfaces(&self, project: &Project) -> Vec<Rc<InterfaceElement>> {
        self.raw
            .all_extended
            .iter()
            .filter_map(|name| project.store().interface(name).cloned())
            .collect()
    }

    /// Classes implementing this interface, directly or transitively.
    pub fn implementers(&self, project: &Project) -> Vec<Rc<ClassElement>> {
        ImplementerResolver::new(project).implementers(self)
    }

    // ---- methods -----------------------------------------------------

    pub fn own_methods(&self, project: &Project) -> Result<IndexMap<String, Element>> {
        project
            .transformer()
            .transform_group(self.raw.methods.iter().map(RecordRef::Method), &self.raw.scope)
    }

    /// Own methods plus those of every extended interface; first
    /// declaration encountered wins.
    pub fn methods(&self, project: &Project) -> Result<IndexMap<String, Element>> {
        let mut all = self.own_methods(project)?;
        for extended in self.extended_interfaces(project) {
            for (name, method) in extended.own_methods(project)? {
                all.entry(name).or_insert(method);
            }
        }
        Ok(all)
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

    // ---- constants ---------------------------------------------------

    pub fn own_constants(&self, project: &Project) -> Result<IndexMap<String, Element>> {
        project
            .transformer()
            .transform_group(
                self.raw.constants.iter().map(RecordRef::Constant),
                &self.raw.scope,
            )
    }

    pub fn inherited_constants(&self, project: &Project) -> Result<IndexMap<String, Element>> {
        let mut inherited = IndexMap::new();
        for extended in self.extended_interfaces(project) {
            for (name, constant) in extended.own_constants(project)? {
                inherited.entry(name).or_insert(constant);
            }
        }
        Ok(inherited)
    }

    pub fn constants(&self, project: &Project) -> Result<IndexMap<String, Element>> {
        let mut all = self.own_constants(project)?;
        for (name, constant) in self.inherited_constants(project)? {
            all.entry(name).or_insert(constant);
        }
        Ok(all)
    }

    pub fn has_constant(&self, name: &str, project: &Project) -> Result<bool> {
        Ok(self.constants(project)?.contains_key(name))
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

    // ---- description & deprecation ------------------------------------

    pub fn description(&self, project: &Project) -> Result<String> {
        let mut stack = Vec::new();
        self.description_guarded(project, &mut stack)
    }

    fn description_guarded(
        &self,
        project: &Project,
        stack: &mut Vec<String>,
    ) -> Result<String> {
        if stack.iter().any(|name| name == self.name()) {
            return Err(CrossdocError::CycleDetected {
                name: self.name().to_string(),
            });
        }

        if self.doc.has_tag(INHERIT_DOC_TAG) && self.doc.text().is_empty() {
            stack.push(self.name().to_string());
            for extended in self.own_extended_interfaces(project) {
                let description = extended.description_guarded(project, stack)?;
                if !description.is_empty() {
                    return Ok(description);
                }
            }
            stack.pop();
        }
        Ok(self.doc.text())
    }

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
        for extended in self.own_extended_interfaces(project) {
            if extended.deprecated_guarded(project, stack)? {
                return Ok(true);
            }
        }
        stack.pop();
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures;
    use crate::raw::{RawSnapshot, ScopeKind};

    fn diamond_snapshot() -> RawSnapshot {
        // Wide extends Left and Right (in that order); both extend Base and
        // both declare FLAG.
        let mut snapshot = RawSnapshot::default();

        let mut base = fixtures::interface(1, "App\\Base");
        base.methods
            .push(fixtures::method(10, "ping", ScopeKind::Interface, "App\\Base"));
        snapshot.interfaces.push(base);

        let mut left = fixtures::interface(2, "App\\Left");
        left.extends = vec!["App\\Base".to_string()];
        left.all_extended = vec!["App\\Base".to_string()];
        left.constants.push(fixtures::constant(
            11,
            "FLAG",
            ScopeKind::Interface,
            "App\\Left",
            "1",
        ));
        snapshot.interfaces.push(left);

        let mut right = fixtures::interface(3, "App\\Right");
        right.extends = vec!["App\\Base".to_string()];
        right.all_extended = vec!["App\\Base".to_string()];
        right.constants.push(fixtures::constant(
            12,
            "FLAG",
            ScopeKind::Interface,
            "App\\Right",
            "2",
        ));
        snapshot.interfaces.push(right);

        let mut wide = fixtures::interface(4, "App\\Wide");
        wide.extends = vec!["App\\Left".to_string(), "App\\Right".to_string()];
        wide.all_extended = vec![
            "App\\Left".to_string(),
            "App\\Right".to_string(),
            "App\\Base".to_string(),
        ];
        snapshot.interfaces.push(wide);

        snapshot
    }

    #[test]
    fn methods_merge_from_extended_interfaces() {
        let project = fixtures::project(diamond_snapshot());
        let wide = project.store().interface("App\\Wide").unwrap().clone();

        let methods = wide.methods(&project).unwrap();
        assert!(matches!(methods["ping"], Element::InterfaceMethod(_)));
        assert!(wide.own_methods(&project).unwrap().is_empty());
    }

    #[test]
    fn diamond_constant_tie_break_is_declaration_order() {
        let project = fixtures::project(diamond_snapshot());
        let wide = project.store().interface("App\\Wide").unwrap().clone();

        let constants = wide.constants(&project).unwrap();
        match &constants["FLAG"] {
            Element::InterfaceConstant(c) => {
                assert_eq!(c.declared_in().name, "App\\Left");
                assert_eq!(c.value(), "1");
            }
            other => panic!("expected interface constant, got {other:?}"),
        }
    }

    #[test]
    fn missing_constant_is_a_not_found_error() {
        let project = fixtures::project(diamond_snapshot());
        let wide = project.store().interface("App\\Wide").unwrap().clone();

        let error = wide.constant("MISSING", &project).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Constant \"MISSING\" does not exist in \"App\\Wide\""
        );
    }

    #[test]
    fn deprecation_propagates_through_extension() {
        let mut snapshot = diamond_snapshot();
        snapshot.interfaces[0].doc_comment = Some("/** @deprecated */".to_string());

        let project = fixtures::project(snapshot);
        let wide = project.store().interface("App\\Wide").unwrap().clone();
        assert!(wide.is_deprecated(&project).unwrap());
    }

    #[test]
    fn cyclic_extension_fails_fast() {
        let mut snapshot = RawSnapshot::default();
        let mut a = fixtures::interface(1, "App\\A");
        a.extends = vec!["App\\B".to_string()];
        a.doc_comment = Some("/** {@inheritdoc} */".to_string());
        snapshot.interfaces.push(a);
        let mut b = fixtures::interface(2, "App\\B");
        b.extends = vec!["App\\A".to_string()];
        b.doc_comment = Some("/** {@inheritdoc} */".to_string());
        snapshot.interfaces.push(b);

        let project = fixtures::project(snapshot);
        let b = project.store().interface("App\\B").unwrap().clone();

        assert!(matches!(
            b.description(&project),
            Err(CrossdocError::CycleDetected { .. })
        ));
        assert!(matches!(
            b.is_deprecated(&project),
            Err(CrossdocError::CycleDetected { .. })
        ));
    }
}
