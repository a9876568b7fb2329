//! Crossdoc is the reflection-resolution and cross-reference core of an API
//! documentation generator. It turns raw introspection records into a
//! decorated element graph, derives the hierarchy views the raw data does
//! not carry (inherited members, subclasses, implementers, trait users),
//! and resolves the textual references found in documentation comments
//! into deterministic link targets.

pub mod comment;
pub mod config;
pub mod core;
pub mod error;
pub mod raw;

pub use comment::{BasicCommentParser, CommentParser, DocComment, DocTag, TagBody};
pub use config::{Config, LinkConfig};
pub use core::{
    Element, ElementStore, ElementTransformer, LinkSynthesizer, Project, RecordRef,
    ReferenceResolver, ResolvedLink, ResolvedReference,
};
pub use error::{CrossdocError, Result};
pub use raw::{NAMESPACE_SEPARATOR, RawSnapshot};
