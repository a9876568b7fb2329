//! Decorated top-level function element.

use std::path::Path;

use indexmap::IndexMap;

use crate::comment::{DEPRECATED_TAG, DocComment};
use crate::error::Result;
use crate::raw::{namespace_of, short_name, RawFunction};

use super::super::transformer::RecordRef;
use super::super::Project;
use super::Element;

#[derive(Debug)]
pub struct FunctionElement {
    raw: RawFunction,
    doc: DocComment,
}

impl FunctionElement {
    pub(crate) fn new(raw: RawFunction, doc: DocComment) -> Self {
        Self { raw, doc }
    }

    pub fn raw(&self) -> &RawFunction {
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

    pub fn return_type(&self) -> Option<&str> {
        self.raw.return_type.as_deref()
    }

    /// Parameters in declaration order, keyed by name.
    pub fn parameters(&self, project: &Project) -> Result<IndexMap<String, Element>> {
        project
            .transformer()
            .transform_group(
                self.raw.parameters.iter().map(RecordRef::Parameter),
                &self.raw.scope,
            )
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
    use crate::raw::{RawParameter, RawSnapshot};

    #[test]
    fn parameters_keep_declaration_order() {
        let mut snapshot = RawSnapshot::default();
        let mut function = fixtures::function(1, "App\\render");
        function.parameters = vec![
            RawParameter {
                id: 10,
                name: "template".to_string(),
                type_decl: Some("string".to_string()),
                default_value: None,
                by_reference: false,
                variadic: false,
            },
            RawParameter {
                id: 11,
                name: "context".to_string(),
                type_decl: None,
                default_value: Some("[]".to_string()),
                by_reference: false,
                variadic: false,
            },
        ];
        snapshot.functions.push(function);

        let project = fixtures::project(snapshot);
        let function = project.store().function("App\\render").unwrap().clone();

        let parameters = function.parameters(&project).unwrap();
        let names: Vec<_> = parameters.keys().cloned().collect();
        assert_eq!(names, vec!["template", "context"]);

        match &parameters["context"] {
            Element::Parameter(p) => {
                assert!(p.has_default());
                assert_eq!(p.default_value(), Some("[]"));
            }
            other => panic!("expected parameter, got {other:?}"),
        }
    }
}
