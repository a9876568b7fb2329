//! Decorated elements: the core's own representation of program elements,
//! one closed variant per introspected kind. Each variant wraps exactly one
//! raw record and, where applicable, one parsed documentation comment; the
//! pairing is immutable after construction. Cross-element lookups take the
//! owning [`Project`](super::Project) explicitly instead of a hidden
//! back-reference.

mod class;
mod function;
mod interface;
mod members;
mod trait_;

use std::rc::Rc;

pub use class::ClassElement;
pub use function::FunctionElement;
pub use interface::InterfaceElement;
pub use members::{ConstantElement, MethodElement, ParameterElement, PropertyElement};
pub use trait_::TraitElement;

use crate::error::Result;
use crate::raw::ScopeKind;

use super::Project;

/// Any decorated element. Cloning is cheap (shared `Rc` payloads) and
/// preserves instance identity: clones of the same transformation result
/// compare equal under [`Element::same_instance`].
#[derive(Debug, Clone)]
pub enum Element {
    Class(Rc<ClassElement>),
    Interface(Rc<InterfaceElement>),
    Trait(Rc<TraitElement>),
    Function(Rc<FunctionElement>),
    ClassMethod(Rc<MethodElement>),
    InterfaceMethod(Rc<MethodElement>),
    TraitMethod(Rc<MethodElement>),
    ClassProperty(Rc<PropertyElement>),
    TraitProperty(Rc<PropertyElement>),
    ClassConstant(Rc<ConstantElement>),
    InterfaceConstant(Rc<ConstantElement>),
    Parameter(Rc<ParameterElement>),
}

impl Element {
    /// Raw name: fully-qualified for top-level elements, short for members.
    pub fn name(&self) -> &str {
        match self {
            Element::Class(e) => e.name(),
            Element::Interface(e) => e.name(),
            Element::Trait(e) => e.name(),
            Element::Function(e) => e.name(),
            Element::ClassMethod(e) | Element::InterfaceMethod(e) | Element::TraitMethod(e) => {
                e.name()
            }
            Element::ClassProperty(e) | Element::TraitProperty(e) => e.name(),
            Element::ClassConstant(e) | Element::InterfaceConstant(e) => e.name(),
            Element::Parameter(e) => e.name(),
        }
    }

    /// Reference identity: true when both sides are the same decorated
    /// instance, not merely equal-looking ones.
    pub fn same_instance(&self, other: &Element) -> bool {
        match (self, other) {
            (Element::Class(a), Element::Class(b)) => Rc::ptr_eq(a, b),
            (Element::Interface(a), Element::Interface(b)) => Rc::ptr_eq(a, b),
            (Element::Trait(a), Element::Trait(b)) => Rc::ptr_eq(a, b),
            (Element::Function(a), Element::Function(b)) => Rc::ptr_eq(a, b),
            (Element::ClassMethod(a), Element::ClassMethod(b)) => Rc::ptr_eq(a, b),
            (Element::InterfaceMethod(a), Element::InterfaceMethod(b)) => Rc::ptr_eq(a, b),
            (Element::TraitMethod(a), Element::TraitMethod(b)) => Rc::ptr_eq(a, b),
            (Element::ClassProperty(a), Element::ClassProperty(b)) => Rc::ptr_eq(a, b),
            (Element::TraitProperty(a), Element::TraitProperty(b)) => Rc::ptr_eq(a, b),
            (Element::ClassConstant(a), Element::ClassConstant(b)) => Rc::ptr_eq(a, b),
            (Element::InterfaceConstant(a), Element::InterfaceConstant(b)) => Rc::ptr_eq(a, b),
            (Element::Parameter(a), Element::Parameter(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Rendered description. Members use their own comment text; class-like
    /// elements apply the `@inheritdoc` fallback walk.
    pub fn description(&self, project: &Project) -> Result<String> {
        match self {
            Element::Class(e) => e.description(project),
            Element::Interface(e) => e.description(project),
            Element::Trait(e) => Ok(e.description()),
            Element::Function(e) => Ok(e.description()),
            Element::ClassMethod(e) | Element::InterfaceMethod(e) | Element::TraitMethod(e) => {
                Ok(e.description())
            }
            Element::ClassProperty(e) | Element::TraitProperty(e) => Ok(e.description()),
            Element::ClassConstant(e) | Element::InterfaceConstant(e) => Ok(e.description()),
            Element::Parameter(_) => Ok(String::new()),
        }
    }

    /// Deprecation state, including deprecation inherited from the declaring
    /// or extended type.
    pub fn is_deprecated(&self, project: &Project) -> Result<bool> {
        match self {
            Element::Class(e) => e.is_deprecated(project),
            Element::Interface(e) => e.is_deprecated(project),
            Element::Trait(e) => Ok(e.is_deprecated()),
            Element::Function(e) => Ok(e.is_deprecated()),
            Element::ClassMethod(e) | Element::InterfaceMethod(e) | Element::TraitMethod(e) => {
                e.is_deprecated(project)
            }
            Element::ClassProperty(e) | Element::TraitProperty(e) => e.is_deprecated(project),
            Element::ClassConstant(e) | Element::InterfaceConstant(e) => e.is_deprecated(project),
            Element::Parameter(_) => Ok(false),
        }
    }
}

/// Deprecation of a member follows its declaring type.
pub(crate) fn declaring_type_deprecated(
    project: &Project,
    kind: ScopeKind,
    name: &str,
) -> Result<bool> {
    match kind {
        ScopeKind::Class => match project.store().class(name) {
            Some(class) => class.is_deprecated(project),
            None => Ok(false),
        },
        ScopeKind::Interface => match project.store().interface(name) {
            Some(interface) => interface.is_deprecated(project),
            None => Ok(false),
        },
        ScopeKind::Trait => Ok(project
            .store()
            .trait_element(name)
            .is_some_and(|t| t.is_deprecated())),
        ScopeKind::Function => Ok(project
            .store()
            .function(name)
            .is_some_and(|f| f.is_deprecated())),
    }
}
