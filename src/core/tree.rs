//! Hierarchy resolvers compute the derived views that need the whole store:
//! inherited members, subclasses, implementers, trait users. Each is a
//! thin borrow of the project, recomputed on demand.

use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::Result;

use super::elements::{ClassElement, Element, InterfaceElement, TraitElement};
use super::Project;

/// Collects members a class receives from its ancestor chain, nearest
/// ancestor winning on name collision.
pub struct ParentMemberResolver<'a> {
    project: &'a Project,
}

impl<'a> ParentMemberResolver<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }

    pub fn inherited_methods(&self, class: &ClassElement) -> Result<IndexMap<String, Element>> {
        let mut inherited = IndexMap::new();
        for ancestor in class.parent_classes(self.project)? {
            for (name, method) in ancestor.own_methods(self.project)? {
                inherited.entry(name).or_insert(method);
            }
            for trait_element in ancestor.traits(self.project) {
                for (name, method) in trait_element.methods(self.project)? {
                    inherited.entry(name).or_insert(method);
                }
            }
        }
        Ok(inherited)
    }

    pub fn inherited_properties(&self, class: &ClassElement) -> Result<IndexMap<String, Element>> {
        let mut inherited = IndexMap::new();
        for ancestor in class.parent_classes(self.project)? {
            for (name, property) in ancestor.own_properties(self.project)? {
                inherited.entry(name).or_insert(property);
            }
            for trait_element in ancestor.traits(self.project) {
                for (name, property) in trait_element.properties(self.project)? {
                    inherited.entry(name).or_insert(property);
                }
            }
        }
        Ok(inherited)
    }
}

/// Finds every class whose ancestor chain contains a given class.
pub struct SubclassResolver<'a> {
    project: &'a Project,
}

impl<'a> SubclassResolver<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }

    /// Every class in the store whose ancestry chain contains `class`.
    /// The scan walks each candidate's full parent chain, so a cyclic
    /// chain anywhere in the store fails the whole query; a snapshot
    /// with cyclic inheritance is malformed input, not a partial result.
    pub fn subclasses(&self, class: &ClassElement) -> Result<Vec<Rc<ClassElement>>> {
        let mut found = Vec::new();
        for candidate in self.project.store().classes().values() {
            if candidate.name() == class.name() {
                continue;
            }
            let descends = candidate
                .parent_classes(self.project)?
                .iter()
                .any(|ancestor| ancestor.name() == class.name());
            if descends {
                found.push(candidate.clone());
            }
        }
        Ok(found)
    }
}

/// Finds every class that implements a given interface, directly or
/// through an ancestor or an extended interface.
pub struct ImplementerResolver<'a> {
    project: &'a Project,
}

impl<'a> ImplementerResolver<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }

    pub fn implementers(&self, interface: &InterfaceElement) -> Vec<Rc<ClassElement>> {
        self.project
            .store()
            .classes()
            .values()
            .filter(|class| {
                class
                    .raw()
                    .all_interfaces
                    .iter()
                    .any(|name| name == interface.name())
            })
            .cloned()
            .collect()
    }
}

/// Finds every class and trait that uses a given trait directly.
pub struct TraitUserResolver<'a> {
    project: &'a Project,
}

impl<'a> TraitUserResolver<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }

    pub fn users(&self, trait_element: &TraitElement) -> Vec<Element> {
        let store = self.project.store();
        let mut users = Vec::new();
        for class in store.classes().values() {
            if class.raw().traits.iter().any(|t| t == trait_element.name()) {
                users.push(Element::Class(class.clone()));
            }
        }
        for candidate in store.traits().values() {
            if candidate
                .raw()
                .traits
                .iter()
                .any(|t| t == trait_element.name())
            {
                users.push(Element::Trait(candidate.clone()));
            }
        }
        users
    }
}
