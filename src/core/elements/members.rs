//! Member elements: methods, properties, constants and parameters. Members
//! are owned by their declaring element and discovered lazily from it.

use indexmap::IndexMap;

use crate::comment::{DEPRECATED_TAG, DocComment};
use crate::error::Result;
use crate::raw::{
    RawConstant, RawMethod, RawParameter, RawProperty, ResolutionScope, ScopeRef, Visibility,
};

use super::super::transformer::RecordRef;
use super::super::Project;
use super::{declaring_type_deprecated, Element};

#[derive(Debug)]
pub struct MethodElement {
    raw: RawMethod,
    doc: DocComment,
}

impl MethodElement {
    pub(crate) fn new(raw: RawMethod, doc: DocComment) -> Self {
        Self { raw, doc }
    }

    pub fn raw(&self) -> &RawMethod {
        &self.raw
    }

    pub fn doc(&self) -> &DocComment {
        &self.doc
    }

    pub fn name(&self) -> &str {
        &self.raw.name
    }

    pub fn declared_in(&self) -> &ScopeRef {
        &self.raw.declared_in
    }

    pub fn visibility(&self) -> Visibility {
        self.raw.visibility
    }

    pub fn is_static(&self) -> bool {
        self.raw.is_static
    }

    pub fn is_abstract(&self) -> bool {
        self.raw.is_abstract
    }

    pub fn is_final(&self) -> bool {
        self.raw.is_final
    }

    pub fn is_synthetic(&self) -> bool {
        self.raw.is_synthetic
    }

    pub fn return_type(&self) -> Option<&str> {
        self.raw.return_type.as_deref()
    }

    /// Parameters in declaration order, keyed by name.
    pub fn parameters(&self, project: &Project) -> Result<IndexMap<String, Element>> {
        project
            .transformer()
            .transform_group(
                self.raw.parameters.iter().map(RecordRef::Parameter),
                &ResolutionScope::default(),
            )
    }

    pub fn description(&self) -> String {
        self.doc.text()
    }

    pub fn is_deprecated(&self, project: &Project) -> Result<bool> {
        if self.doc.has_tag(DEPRECATED_TAG) {
            return Ok(true);
        }
        declaring_type_deprecated(project, self.raw.declared_in.kind, &self.raw.declared_in.name)
    }
}

#[derive(Debug)]
pub struct PropertyElement {
    raw: RawProperty,
    doc: DocComment,
}

impl PropertyElement {
    pub(crate) fn new(raw: RawProperty, doc: DocComment) -> Self {
        Self { raw, doc }
    }

    pub fn raw(&self) -> &RawProperty {
        &self.raw
    }

    pub fn doc(&self) -> &DocComment {
        &self.doc
    }

    pub fn name(&self) -> &str {
        &self.raw.name
    }

    pub fn declared_in(&self) -> &ScopeRef {
        &self.raw.declared_in
    }

    pub fn visibility(&self) -> Visibility {
        self.raw.visibility
    }

    pub fn is_static(&self) -> bool {
        self.raw.is_static
    }

    pub fn is_synthetic(&self) -> bool {
        self.raw.is_synthetic
    }

    pub fn type_decl(&self) -> Option<&str> {
        self.raw.type_decl.as_deref()
    }

    pub fn default_value(&self) -> Option<&str> {
        self.raw.default_value.as_deref()
    }

    pub fn description(&self) -> String {
        self.doc.text()
    }

    pub fn is_deprecated(&self, project: &Project) -> Result<bool> {
        if self.doc.has_tag(DEPRECATED_TAG) {
            return Ok(true);
        }
        declaring_type_deprecated(project, self.raw.declared_in.kind, &self.raw.declared_in.name)
    }
}

#[derive(Debug)]
pub struct ConstantElement {
    raw: RawConstant,
    doc: DocComment,
}

impl ConstantElement {
    pub(crate) fn new(raw: RawConstant, doc: DocComment) -> Self {
        Self { raw, doc }
    }

    pub fn raw(&self) -> &RawConstant {
        &self.raw
    }

    pub fn doc(&self) -> &DocComment {
        &self.doc
    }

    pub fn name(&self) -> &str {
        &self.raw.name
    }

    pub fn declared_in(&self) -> &ScopeRef {
        &self.raw.declared_in
    }

    /// Literal value as written in source.
    pub fn value(&self) -> &str {
        &self.raw.value
    }

    pub fn description(&self) -> String {
        self.doc.text()
    }

    pub fn is_deprecated(&self, project: &Project) -> Result<bool> {
        if self.doc.has_tag(DEPRECATED_TAG) {
            return Ok(true);
        }
        declaring_type_deprecated(project, self.raw.declared_in.kind, &self.raw.declared_in.name)
    }
}

/// Parameters carry no documentation comment of their own; their docs come
/// from the declaring callable's tags, which the rendering layer owns.
#[derive(Debug)]
pub struct ParameterElement {
    raw: RawParameter,
}

impl ParameterElement {
    pub(crate) fn new(raw: RawParameter) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> &RawParameter {
        &self.raw
    }

    pub fn name(&self) -> &str {
        &self.raw.name
    }

    pub fn type_decl(&self) -> Option<&str> {
        self.raw.type_decl.as_deref()
    }

    pub fn has_default(&self) -> bool {
        self.raw.default_value.is_some()
    }

    pub fn default_value(&self) -> Option<&str> {
        self.raw.default_value.as_deref()
    }

    pub fn is_by_reference(&self) -> bool {
        self.raw.by_reference
    }

    pub fn is_variadic(&self) -> bool {
        self.raw.variadic
    }
}
