//! Shared builders for raw-record test snapshots.

use std::collections::BTreeMap;

use crate::comment::BasicCommentParser;
use crate::raw::{
    RawClass, RawConstant, RawFunction, RawInterface, RawMethod, RawProperty, RawSnapshot,
    RawTrait, RecordId, ResolutionScope, ScopeKind, ScopeRef, Visibility,
};

use super::Project;

pub fn class(id: RecordId, name: &str) -> RawClass {
    RawClass {
        id,
        name: name.to_string(),
        file: None,
        start_line: 1,
        end_line: 1,
        doc_comment: None,
        scope: ResolutionScope {
            namespace: String::new(),
            imports: BTreeMap::new(),
        },
        is_abstract: false,
        is_final: false,
        parent_class: None,
        interfaces: Vec::new(),
        all_interfaces: Vec::new(),
        traits: Vec::new(),
        methods: Vec::new(),
        properties: Vec::new(),
        constants: Vec::new(),
    }
}

pub fn interface(id: RecordId, name: &str) -> RawInterface {
    RawInterface {
        id,
        name: name.to_string(),
        file: None,
        start_line: 1,
        end_line: 1,
        doc_comment: None,
        scope: ResolutionScope::default(),
        extends: Vec::new(),
        all_extended: Vec::new(),
        methods: Vec::new(),
        constants: Vec::new(),
    }
}

pub fn trait_(id: RecordId, name: &str) -> RawTrait {
    RawTrait {
        id,
        name: name.to_string(),
        file: None,
        start_line: 1,
        end_line: 1,
        doc_comment: None,
        scope: ResolutionScope::default(),
        traits: Vec::new(),
        methods: Vec::new(),
        properties: Vec::new(),
    }
}

pub fn function(id: RecordId, name: &str) -> RawFunction {
    RawFunction {
        id,
        name: name.to_string(),
        file: None,
        start_line: 1,
        end_line: 1,
        doc_comment: None,
        scope: ResolutionScope::default(),
        parameters: Vec::new(),
        return_type: None,
    }
}

pub fn method(id: RecordId, name: &str, kind: ScopeKind, scope_name: &str) -> RawMethod {
    RawMethod {
        id,
        name: name.to_string(),
        declared_in: ScopeRef {
            kind,
            name: scope_name.to_string(),
        },
        start_line: 1,
        end_line: 1,
        doc_comment: None,
        visibility: Visibility::Public,
        is_static: false,
        is_abstract: false,
        is_final: false,
        is_synthetic: false,
        parameters: Vec::new(),
        return_type: None,
    }
}

pub fn property(id: RecordId, name: &str, kind: ScopeKind, scope_name: &str) -> RawProperty {
    RawProperty {
        id,
        name: name.to_string(),
        declared_in: ScopeRef {
            kind,
            name: scope_name.to_string(),
        },
        start_line: 1,
        end_line: 1,
        doc_comment: None,
        visibility: Visibility::Public,
        is_static: false,
        is_synthetic: false,
        type_decl: None,
        default_value: None,
    }
}

pub fn constant(
    id: RecordId,
    name: &str,
    kind: ScopeKind,
    scope_name: &str,
    value: &str,
) -> RawConstant {
    RawConstant {
        id,
        name: name.to_string(),
        declared_in: ScopeRef {
            kind,
            name: scope_name.to_string(),
        },
        start_line: 1,
        end_line: 1,
        doc_comment: None,
        value: value.to_string(),
    }
}

pub fn single_class_snapshot(name: &str) -> RawSnapshot {
    let mut snapshot = RawSnapshot::default();
    snapshot.classes.push(class(1, name));
    snapshot
}

pub fn project(snapshot: RawSnapshot) -> Project {
    Project::new(snapshot, Box::new(BasicCommentParser)).unwrap()
}
