//! The resolution engine: transforms raw introspection records into
//! decorated elements, indexes them per run, computes the derived
//! hierarchy views, and turns textual references into link targets.

pub mod elements;
pub mod linker;
pub mod project;
pub mod resolver;
pub mod store;
pub mod transformer;
pub mod tree;

#[cfg(test)]
pub(crate) mod fixtures;

pub use elements::{
    ClassElement, ConstantElement, Element, FunctionElement, InterfaceElement, MethodElement,
    ParameterElement, PropertyElement, TraitElement,
};
pub use linker::LinkSynthesizer;
pub use project::Project;
pub use resolver::{ReferenceResolver, ResolvedLink, ResolvedReference};
pub use store::ElementStore;
pub use transformer::{ElementTransformer, RecordRef};
pub use tree::{ImplementerResolver, ParentMemberResolver, SubclassResolver, TraitUserResolver};
