//! Element Store: the per-run, read-only snapshot of all top-level
//! decorated elements, one mapping per kind, keyed by fully-qualified name.

use std::rc::Rc;

use indexmap::IndexMap;
use tracing::info;

use crate::error::Result;
use crate::raw::RawSnapshot;

use super::elements::{ClassElement, Element, FunctionElement, InterfaceElement, TraitElement};
use super::transformer::{ElementTransformer, RecordRef};

#[derive(Default)]
pub struct ElementStore {
    classes: IndexMap<String, Rc<ClassElement>>,
    interfaces: IndexMap<String, Rc<InterfaceElement>>,
    traits: IndexMap<String, Rc<TraitElement>>,
    functions: IndexMap<String, Rc<FunctionElement>>,
}

impl ElementStore {
    /// Decorate every top-level record in the snapshot. Runs once per
    /// generation run, before any resolver; the result is read-only.
    pub fn build(transformer: &ElementTransformer, snapshot: &RawSnapshot) -> Result<Self> {
        let mut store = Self::default();

        for raw in &snapshot.classes {
            if let Element::Class(class) =
                transformer.transform(RecordRef::Class(raw), &raw.scope)?
            {
                store.classes.insert(raw.name.clone(), class);
            }
        }
        for raw in &snapshot.interfaces {
            if let Element::Interface(interface) =
                transformer.transform(RecordRef::Interface(raw), &raw.scope)?
            {
                store.interfaces.insert(raw.name.clone(), interface);
            }
        }
        for raw in &snapshot.traits {
            if let Element::Trait(trait_element) =
                transformer.transform(RecordRef::Trait(raw), &raw.scope)?
            {
                store.traits.insert(raw.name.clone(), trait_element);
            }
        }
        for raw in &snapshot.functions {
            if let Element::Function(function) =
                transformer.transform(RecordRef::Function(raw), &raw.scope)?
            {
                store.functions.insert(raw.name.clone(), function);
            }
        }

        info!(
            classes = store.classes.len(),
            interfaces = store.interfaces.len(),
            traits = store.traits.len(),
            functions = store.functions.len(),
            "element store built"
        );
        Ok(store)
    }

    pub fn classes(&self) -> &IndexMap<String, Rc<ClassElement>> {
        &self.classes
    }

    pub fn interfaces(&self) -> &IndexMap<String, Rc<InterfaceElement>> {
        &self.interfaces
    }

    pub fn traits(&self) -> &IndexMap<String, Rc<TraitElement>> {
        &self.traits
    }

    pub fn functions(&self) -> &IndexMap<String, Rc<FunctionElement>> {
        &self.functions
    }

    pub fn class(&self, fqn: &str) -> Option<&Rc<ClassElement>> {
        self.classes.get(fqn)
    }

    pub fn interface(&self, fqn: &str) -> Option<&Rc<InterfaceElement>> {
        self.interfaces.get(fqn)
    }

    pub fn trait_element(&self, fqn: &str) -> Option<&Rc<TraitElement>> {
        self.traits.get(fqn)
    }

    pub fn function(&self, fqn: &str) -> Option<&Rc<FunctionElement>> {
        self.functions.get(fqn)
    }

    /// Lookup across all four mappings in reference-resolution priority
    /// order: classes, interfaces, traits, functions.
    pub fn type_or_function(&self, fqn: &str) -> Option<Element> {
        if let Some(class) = self.classes.get(fqn) {
            return Some(Element::Class(class.clone()));
        }
        if let Some(interface) = self.interfaces.get(fqn) {
            return Some(Element::Interface(interface.clone()));
        }
        if let Some(trait_element) = self.traits.get(fqn) {
            return Some(Element::Trait(trait_element.clone()));
        }
        if let Some(function) = self.functions.get(fqn) {
            return Some(Element::Function(function.clone()));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::BasicCommentParser;
    use crate::core::fixtures;

    #[test]
    fn build_indexes_every_top_level_kind() {
        let mut snapshot = RawSnapshot::default();
        snapshot.classes.push(fixtures::class(1, "App\\Foo"));
        snapshot.interfaces.push(fixtures::interface(2, "App\\Greets"));
        snapshot.traits.push(fixtures::trait_(3, "App\\Shout"));
        snapshot.functions.push(fixtures::function(4, "App\\render"));

        let transformer = ElementTransformer::new(Box::new(BasicCommentParser));
        let store = ElementStore::build(&transformer, &snapshot).unwrap();

        assert_eq!(store.classes().len(), 1);
        assert_eq!(store.interfaces().len(), 1);
        assert_eq!(store.traits().len(), 1);
        assert_eq!(store.functions().len(), 1);
        assert!(store.type_or_function("App\\Foo").is_some());
        assert!(store.type_or_function("App\\Nope").is_none());
    }

    #[test]
    fn lookup_priority_prefers_classes() {
        // Same fully-qualified name registered as class and function.
        let mut snapshot = RawSnapshot::default();
        snapshot.classes.push(fixtures::class(1, "App\\Thing"));
        snapshot.functions.push(fixtures::function(2, "App\\Thing"));

        let transformer = ElementTransformer::new(Box::new(BasicCommentParser));
        let store = ElementStore::build(&transformer, &snapshot).unwrap();

        assert!(matches!(
            store.type_or_function("App\\Thing"),
            Some(Element::Class(_))
        ));
    }
}
