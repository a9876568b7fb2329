//! Project: ties one transformer and one element store to a single
//! generation run. Resolvers and element methods borrow the project
//! to look sibling elements up by name.

use tracing::info;

use crate::comment::CommentParser;
use crate::error::Result;
use crate::raw::RawSnapshot;

use super::store::ElementStore;
use super::transformer::ElementTransformer;

pub struct Project {
    transformer: ElementTransformer,
    store: ElementStore,
}

impl Project {
    pub fn new(snapshot: RawSnapshot, parser: Box<dyn CommentParser>) -> Result<Self> {
        let transformer = ElementTransformer::new(parser);
        let store = ElementStore::build(&transformer, &snapshot)?;
        info!("project ready");
        Ok(Self { transformer, store })
    }

    /// Load a raw introspection snapshot serialized as JSON.
    pub fn from_json(json: &str, parser: Box<dyn CommentParser>) -> Result<Self> {
        let snapshot: RawSnapshot = serde_json::from_str(json)?;
        Self::new(snapshot, parser)
    }

    pub fn store(&self) -> &ElementStore {
        &self.store
    }

    pub fn transformer(&self) -> &ElementTransformer {
        &self.transformer
    }
}
