//! Decorated trait element. A trait's merged view folds in the traits it
//! uses itself, so a class using it sees the whole composition; the classes
//! (and traits) using a trait are computed by the trait-user resolver.

use std::path::Path;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::comment::{DEPRECATED_TAG, DocComment};
use crate::error::{CrossdocError, Result};
use crate::raw::{namespace_of, short_name, RawTrait};

use super::super::transformer::RecordRef;
use super::super::tree::TraitUserResolver;
use super::super::Project;
use super::Element;

#[derive(Debug)]
pub struct TraitElement {
    raw: RawTrait,
    doc: DocComment,
}

impl TraitElement {
    pub(crate) fn new(raw: RawTrait, doc: DocComment) -> Self {
        Self { raw, doc }
    }

    pub fn raw(&self) -> &RawTrait {
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

    /// Traits this trait itself uses, known to the store.
    pub fn traits(&self, project: &Project) -> Vec<Rc<TraitElement>> {
        self.raw
            .traits
            .iter()
            .filter_map(|name| project.store().trait_element(name).cloned())
            .collect()
    }

    /// Classes and traits whose use list names this trait.
    pub fn users(&self, project: &Project) -> Vec<Element> {
        TraitUserResolver::new(project).users(self)
    }

    pub fn own_methods(&self, project: &Project) -> Result<IndexMap<String, Element>> {
        project
            .transformer()
            .transform_group(self.raw.methods.iter().map(RecordRef::Method), &self.raw.scope)
    }

    /// Merged view: own declarations, then used traits in use-declaration
    /// order, recursively. First writer wins.
    pub fn methods(&self, project: &Project) -> Result<IndexMap<String, Element>> {
        let mut stack = Vec::new();
        self.methods_guarded(project, &mut stack)
    }

    pub(crate) fn methods_guarded(
        &self,
        project: &Project,
        stack: &mut Vec<String>,
    ) -> Result<IndexMap<String, Element>> {
        if stack.iter().any(|name| name == self.name()) {
            return Err(CrossdocError::CycleDetected {
                name: self.name().to_string(),
            });
        }

        let mut all = self.own_methods(project)?;
        stack.push(self.name().to_string());
        for used in self.traits(project) {
            for (name, method) in used.methods_guarded(project, stack)? {
                all.entry(name).or_insert(method);
            }
        }
        stack.pop();
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

    pub fn own_properties(&self, project: &Project) -> Result<IndexMap<String, Element>> {
        project
            .transformer()
            .transform_group(
                self.raw.properties.iter().map(RecordRef::Property),
                &self.raw.scope,
            )
    }

    /// Merged view with the same precedence as [`TraitElement::methods`].
    pub fn properties(&self, project: &Project) -> Result<IndexMap<String, Element>> {
        let mut stack = Vec::new();
        self.properties_guarded(project, &mut stack)
    }

    pub(crate) fn properties_guarded(
        &self,
        project: &Project,
        stack: &mut Vec<String>,
    ) -> Result<IndexMap<String, Element>> {
        if stack.iter().any(|name| name == self.name()) {
            return Err(CrossdocError::CycleDetected {
                name: self.name().to_string(),
            });
        }

        let mut all = self.own_properties(project)?;
        stack.push(self.name().to_string());
        for used in self.traits(project) {
            for (name, property) in used.properties_guarded(project, stack)? {
                all.entry(name).or_insert(property);
            }
        }
        stack.pop();
        Ok(all)
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

    pub fn description(&self) -> String {
        self.doc.text()
    }

    pub fn is_deprecated(&self) -> bool {
        self.doc.has_tag(DEPRECATED_TAG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures;
    use crate::raw::{RawSnapshot, ScopeKind};

    #[test]
    fn trait_exposes_its_own_members() {
        let mut snapshot = RawSnapshot::default();
        let mut shout = fixtures::trait_(1, "App\\Shout");
        shout
            .methods
            .push(fixtures::method(10, "yell", ScopeKind::Trait, "App\\Shout"));
        shout
            .properties
            .push(fixtures::property(11, "volume", ScopeKind::Trait, "App\\Shout"));
        snapshot.traits.push(shout);

        let project = fixtures::project(snapshot);
        let shout = project.store().trait_element("App\\Shout").unwrap().clone();

        assert!(matches!(
            shout.method("yell", &project).unwrap(),
            Element::TraitMethod(_)
        ));
        assert!(matches!(
            shout.property("volume", &project).unwrap(),
            Element::TraitProperty(_)
        ));
        assert!(matches!(
            shout.method("whisper", &project),
            Err(CrossdocError::NotFound { .. })
        ));
    }

    #[test]
    fn nested_trait_use_reaches_the_class_merge() {
        // Speaker uses Loud; Loud uses Shout, which declares `yell` and
        // `$volume`.
        let mut snapshot = RawSnapshot::default();

        let mut shout = fixtures::trait_(1, "App\\Shout");
        shout
            .methods
            .push(fixtures::method(10, "yell", ScopeKind::Trait, "App\\Shout"));
        shout
            .properties
            .push(fixtures::property(11, "volume", ScopeKind::Trait, "App\\Shout"));
        snapshot.traits.push(shout);

        let mut loud = fixtures::trait_(2, "App\\Loud");
        loud.traits = vec!["App\\Shout".to_string()];
        snapshot.traits.push(loud);

        let mut speaker = fixtures::class(3, "App\\Speaker");
        speaker.traits = vec!["App\\Loud".to_string()];
        snapshot.classes.push(speaker);

        let project = fixtures::project(snapshot);

        let loud = project.store().trait_element("App\\Loud").unwrap().clone();
        let methods = loud.methods(&project).unwrap();
        match &methods["yell"] {
            Element::TraitMethod(m) => assert_eq!(m.declared_in().name, "App\\Shout"),
            other => panic!("expected a trait method, got {other:?}"),
        }
        assert!(loud.properties(&project).unwrap().contains_key("volume"));

        let speaker = project.store().class("App\\Speaker").unwrap().clone();
        assert!(speaker.methods(&project).unwrap().contains_key("yell"));
        assert!(speaker.properties(&project).unwrap().contains_key("volume"));
    }

    #[test]
    fn trait_declared_members_beat_used_trait_members() {
        let mut snapshot = RawSnapshot::default();

        let mut base = fixtures::trait_(1, "App\\Base");
        base.methods
            .push(fixtures::method(10, "m", ScopeKind::Trait, "App\\Base"));
        snapshot.traits.push(base);

        let mut wrapper = fixtures::trait_(2, "App\\Wrapper");
        wrapper.traits = vec!["App\\Base".to_string()];
        wrapper
            .methods
            .push(fixtures::method(11, "m", ScopeKind::Trait, "App\\Wrapper"));
        snapshot.traits.push(wrapper);

        let project = fixtures::project(snapshot);
        let wrapper = project.store().trait_element("App\\Wrapper").unwrap().clone();

        match &wrapper.methods(&project).unwrap()["m"] {
            Element::TraitMethod(m) => assert_eq!(m.declared_in().name, "App\\Wrapper"),
            other => panic!("expected a trait method, got {other:?}"),
        }
    }

    #[test]
    fn cyclic_trait_use_fails_fast() {
        let mut snapshot = RawSnapshot::default();
        let mut a = fixtures::trait_(1, "App\\A");
        a.traits = vec!["App\\B".to_string()];
        snapshot.traits.push(a);
        let mut b = fixtures::trait_(2, "App\\B");
        b.traits = vec!["App\\A".to_string()];
        snapshot.traits.push(b);

        let project = fixtures::project(snapshot);
        let a = project.store().trait_element("App\\A").unwrap().clone();

        assert!(matches!(
            a.methods(&project),
            Err(CrossdocError::CycleDetected { .. })
        ));
        assert!(matches!(
            a.properties(&project),
            Err(CrossdocError::CycleDetected { .. })
        ));
    }
}
