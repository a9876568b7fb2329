//! Converts raw introspection records into decorated elements, memoized by
//! record identity so that the cyclic element graph keeps reference equality
//! across traversal paths.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::debug;

use crate::comment::{CommentParser, DocComment};
use crate::error::{CrossdocError, Result};
use crate::raw::{
    short_name, RawClass, RawConstant, RawFunction, RawInterface, RawMethod, RawParameter,
    RawProperty, RawTrait, RecordId, ResolutionScope, ScopeKind,
};

use super::elements::{
    ClassElement, ConstantElement, Element, FunctionElement, InterfaceElement, MethodElement,
    ParameterElement, PropertyElement, TraitElement,
};

/// Borrowed view of one raw record of any kind, the input to [`ElementTransformer::transform`].
#[derive(Debug, Clone, Copy)]
pub enum RecordRef<'a> {
    Class(&'a RawClass),
    Interface(&'a RawInterface),
    Trait(&'a RawTrait),
    Function(&'a RawFunction),
    Method(&'a RawMethod),
    Property(&'a RawProperty),
    Constant(&'a RawConstant),
    Parameter(&'a RawParameter),
}

impl RecordRef<'_> {
    pub fn id(&self) -> RecordId {
        match self {
            RecordRef::Class(r) => r.id,
            RecordRef::Interface(r) => r.id,
            RecordRef::Trait(r) => r.id,
            RecordRef::Function(r) => r.id,
            RecordRef::Method(r) => r.id,
            RecordRef::Property(r) => r.id,
            RecordRef::Constant(r) => r.id,
            RecordRef::Parameter(r) => r.id,
        }
    }

    /// Short name, the key used by [`ElementTransformer::transform_group`].
    pub fn key(&self) -> &str {
        match self {
            RecordRef::Class(r) => short_name(&r.name),
            RecordRef::Interface(r) => short_name(&r.name),
            RecordRef::Trait(r) => short_name(&r.name),
            RecordRef::Function(r) => short_name(&r.name),
            RecordRef::Method(r) => &r.name,
            RecordRef::Property(r) => &r.name,
            RecordRef::Constant(r) => &r.name,
            RecordRef::Parameter(r) => &r.name,
        }
    }
}

/// Element Transformer plus Identity Cache: decorating the same raw record
/// twice returns the identical element instance.
pub struct ElementTransformer {
    parser: Box<dyn CommentParser>,
    cache: RefCell<HashMap<RecordId, Element>>,
}

impl ElementTransformer {
    pub fn new(parser: Box<dyn CommentParser>) -> Self {
        Self {
            parser,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Decorate one raw record, reusing the cached element when the record
    /// was seen before. Safe to call redundantly from any resolver. `scope`
    /// is the declaring type's resolution context, used to parse member
    /// comments; top-level records carry their own and ignore it.
    pub fn transform(&self, record: RecordRef<'_>, scope: &ResolutionScope) -> Result<Element> {
        if let Some(cached) = self.cache.borrow().get(&record.id()) {
            return Ok(cached.clone());
        }

        debug!(id = record.id(), "decorating raw record");
        let element = self.decorate(record, scope)?;
        self.cache
            .borrow_mut()
            .insert(record.id(), element.clone());
        Ok(element)
    }

    /// Decorate an ordered collection, preserving declaration order. Keys
    /// are short names.
    pub fn transform_group<'a, I>(
        &self,
        records: I,
        scope: &ResolutionScope,
    ) -> Result<IndexMap<String, Element>>
    where
        I: IntoIterator<Item = RecordRef<'a>>,
    {
        let mut group = IndexMap::new();
        for record in records {
            let key = record.key().to_string();
            group.insert(key, self.transform(record, scope)?);
        }
        Ok(group)
    }

    fn decorate(&self, record: RecordRef<'_>, scope: &ResolutionScope) -> Result<Element> {
        match record {
            RecordRef::Class(raw) => {
                let doc = self.parse_comment(raw.doc_comment.as_deref(), &raw.scope);
                Ok(Element::Class(Rc::new(ClassElement::new(raw.clone(), doc))))
            }
            RecordRef::Interface(raw) => {
                let doc = self.parse_comment(raw.doc_comment.as_deref(), &raw.scope);
                Ok(Element::Interface(Rc::new(InterfaceElement::new(
                    raw.clone(),
                    doc,
                ))))
            }
            RecordRef::Trait(raw) => {
                let doc = self.parse_comment(raw.doc_comment.as_deref(), &raw.scope);
                Ok(Element::Trait(Rc::new(TraitElement::new(raw.clone(), doc))))
            }
            RecordRef::Function(raw) => {
                let doc = self.parse_comment(raw.doc_comment.as_deref(), &raw.scope);
                Ok(Element::Function(Rc::new(FunctionElement::new(
                    raw.clone(),
                    doc,
                ))))
            }
            RecordRef::Method(raw) => {
                let doc = self.parse_comment(raw.doc_comment.as_deref(), scope);
                let method = Rc::new(MethodElement::new(raw.clone(), doc));
                match raw.declared_in.kind {
                    ScopeKind::Class => Ok(Element::ClassMethod(method)),
                    ScopeKind::Interface => Ok(Element::InterfaceMethod(method)),
                    ScopeKind::Trait => Ok(Element::TraitMethod(method)),
                    ScopeKind::Function => Err(CrossdocError::UnrecognizedRecord {
                        kind: "method",
                        scope: raw.declared_in.to_string(),
                    }),
                }
            }
            RecordRef::Property(raw) => {
                let doc = self.parse_comment(raw.doc_comment.as_deref(), scope);
                let property = Rc::new(PropertyElement::new(raw.clone(), doc));
                match raw.declared_in.kind {
                    ScopeKind::Class => Ok(Element::ClassProperty(property)),
                    ScopeKind::Trait => Ok(Element::TraitProperty(property)),
                    ScopeKind::Interface | ScopeKind::Function => {
                        Err(CrossdocError::UnrecognizedRecord {
                            kind: "property",
                            scope: raw.declared_in.to_string(),
                        })
                    }
                }
            }
            RecordRef::Constant(raw) => {
                let doc = self.parse_comment(raw.doc_comment.as_deref(), scope);
                let constant = Rc::new(ConstantElement::new(raw.clone(), doc));
                match raw.declared_in.kind {
                    ScopeKind::Class => Ok(Element::ClassConstant(constant)),
                    ScopeKind::Interface => Ok(Element::InterfaceConstant(constant)),
                    ScopeKind::Trait | ScopeKind::Function => {
                        Err(CrossdocError::UnrecognizedRecord {
                            kind: "constant",
                            scope: raw.declared_in.to_string(),
                        })
                    }
                }
            }
            RecordRef::Parameter(raw) => Ok(Element::Parameter(Rc::new(ParameterElement::new(
                raw.clone(),
            )))),
        }
    }

    fn parse_comment(&self, raw_text: Option<&str>, scope: &ResolutionScope) -> DocComment {
        match raw_text {
            Some(text) => self.parser.parse(text, scope),
            None => DocComment::default(),
        }
    }
}
