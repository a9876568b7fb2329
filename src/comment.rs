//! Parsed documentation comments and the parser boundary.
//!
//! The full documentation-comment parser is an external collaborator; the
//! core consumes its output through [`CommentParser`]. A small built-in
//! implementation ships so the crate works standalone: it splits summary
//! from long description and picks up `@tag` lines, which covers everything
//! the resolution engine itself needs (`@see`, `@deprecated`, `@inheritdoc`).

use serde::{Deserialize, Serialize};

use crate::raw::ResolutionScope;

/// Tag marking an element as deprecated.
pub const DEPRECATED_TAG: &str = "deprecated";

/// Tag requesting description inheritance from a parent type.
pub const INHERIT_DOC_TAG: &str = "inheritdoc";

/// Parsed documentation comment: a summary, a long description and an
/// ordered multi-map of tags (duplicate tag names preserved in source order).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocComment {
    pub summary: String,
    pub description: String,
    tags: Vec<DocTag>,
}

impl DocComment {
    pub fn new(summary: String, description: String, tags: Vec<DocTag>) -> Self {
        Self {
            summary,
            description,
            tags,
        }
    }

    /// All tags in source order.
    pub fn tags(&self) -> &[DocTag] {
        &self.tags
    }

    /// Tags with the given name, in source order.
    pub fn tags_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a DocTag> {
        self.tags.iter().filter(move |tag| tag.name == name)
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag.name == name)
    }

    /// Summary and long description joined by an empty line, trimmed.
    pub fn text(&self) -> String {
        let text = format!("{}\n\n{}", self.summary, self.description);
        text.trim().to_string()
    }
}

/// One tag occurrence inside a documentation comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocTag {
    /// Tag name without the leading `@`, lowercased.
    pub name: String,
    pub body: TagBody,
}

/// Parsed tag payload. Only tags the core itself interprets get structured
/// fields; everything else keeps its raw body for the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TagBody {
    /// `@see` reference: a symbol name or a URL, plus a trailing description.
    See {
        target: String,
        description: Option<String>,
    },
    Deprecated {
        note: Option<String>,
    },
    InheritDoc,
    Other {
        body: String,
    },
}

/// Boundary to the external documentation-comment parser.
pub trait CommentParser {
    fn parse(&self, raw: &str, scope: &ResolutionScope) -> DocComment;
}

/// Minimal built-in parser: strips docblock framing, splits the first
/// paragraph off as summary and reads `@tag` lines.
#[derive(Debug, Default)]
pub struct BasicCommentParser;

impl BasicCommentParser {
    fn parse_tag(name: &str, body: &str) -> DocTag {
        let name = name.to_ascii_lowercase();
        let body = body.trim();

        let parsed = match name.as_str() {
            "see" => {
                let mut parts = body.splitn(2, char::is_whitespace);
                let target = parts.next().unwrap_or_default().to_string();
                let description = parts
                    .next()
                    .map(str::trim)
                    .filter(|rest| !rest.is_empty())
                    .map(str::to_string);
                TagBody::See {
                    target,
                    description,
                }
            }
            DEPRECATED_TAG => TagBody::Deprecated {
                note: if body.is_empty() {
                    None
                } else {
                    Some(body.to_string())
                },
            },
            INHERIT_DOC_TAG => TagBody::InheritDoc,
            _ => TagBody::Other {
                body: body.to_string(),
            },
        };

        DocTag { name, body: parsed }
    }
}

/// Remove `/** ... */` framing and leading `*` gutters.
fn strip_docblock(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix("/**").unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix("*/").unwrap_or(trimmed);

    trimmed
        .lines()
        .map(|line| {
            let line = line.trim_start();
            let line = line.strip_prefix("* ").unwrap_or(line);
            line.strip_prefix('*').unwrap_or(line)
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

impl CommentParser for BasicCommentParser {
    fn parse(&self, raw: &str, _scope: &ResolutionScope) -> DocComment {
        let cleaned = strip_docblock(raw);

        let mut text_lines: Vec<&str> = Vec::new();
        let mut tags: Vec<DocTag> = Vec::new();
        let mut pending: Option<(String, String)> = None;

        for line in cleaned.lines() {
            let trimmed = line.trim();
            if let Some(rest) = trimmed.strip_prefix('@') {
                if let Some((name, body)) = pending.take() {
                    tags.push(Self::parse_tag(&name, &body));
                }
                let mut parts = rest.splitn(2, char::is_whitespace);
                let name = parts.next().unwrap_or_default().to_string();
                let body = parts.next().unwrap_or_default().to_string();
                pending = Some((name, body));
            } else if let Some((_, body)) = pending.as_mut() {
                // Continuation line of the previous tag.
                body.push('\n');
                body.push_str(trimmed);
            } else {
                text_lines.push(line);
            }
        }
        if let Some((name, body)) = pending.take() {
            tags.push(Self::parse_tag(&name, &body));
        }

        let mut text = text_lines.join("\n").trim().to_string();

        // The inline `{@inheritdoc}` marker counts as a tag occurrence.
        let lowered = text.to_ascii_lowercase();
        if let Some(position) = lowered.find("{@inheritdoc}") {
            text.replace_range(position..position + "{@inheritdoc}".len(), "");
            text = text.trim().to_string();
            tags.insert(
                0,
                DocTag {
                    name: INHERIT_DOC_TAG.to_string(),
                    body: TagBody::InheritDoc,
                },
            );
        }

        let (summary, description) = match text.split_once("\n\n") {
            Some((summary, description)) => {
                (summary.trim().to_string(), description.trim().to_string())
            }
            None => (text, String::new()),
        };

        DocComment {
            summary,
            description,
            tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> DocComment {
        BasicCommentParser.parse(raw, &ResolutionScope::default())
    }

    #[test]
    fn splits_summary_from_description() {
        let doc = parse("/**\n * Short summary.\n *\n * Longer text\n * on two lines.\n */");

        assert_eq!(doc.summary, "Short summary.");
        assert_eq!(doc.description, "Longer text\non two lines.");
        assert_eq!(doc.text(), "Short summary.\n\nLonger text\non two lines.");
    }

    #[test]
    fn keeps_duplicate_tags_in_source_order() {
        let doc = parse("Summary.\n\n@see First one\n@deprecated\n@see Second");

        let targets: Vec<_> = doc
            .tags_named("see")
            .map(|tag| match &tag.body {
                TagBody::See { target, .. } => target.as_str(),
                _ => panic!("expected see tag"),
            })
            .collect();
        assert_eq!(targets, vec!["First", "Second"]);
        assert!(doc.has_tag(DEPRECATED_TAG));
    }

    #[test]
    fn see_tag_separates_target_and_description() {
        let doc = parse("@see http://example.com/x \"a note\"");

        match &doc.tags()[0].body {
            TagBody::See {
                target,
                description,
            } => {
                assert_eq!(target, "http://example.com/x");
                assert_eq!(description.as_deref(), Some("\"a note\""));
            }
            other => panic!("unexpected tag body: {other:?}"),
        }
    }

    #[test]
    fn inline_inheritdoc_marker_becomes_a_tag() {
        let doc = parse("/** {@inheritDoc} */");

        assert!(doc.has_tag(INHERIT_DOC_TAG));
        assert!(doc.text().is_empty());
    }

    #[test]
    fn deprecated_note_is_optional() {
        let with_note = parse("@deprecated use the new API");
        let without = parse("@deprecated");

        assert_eq!(
            with_note.tags()[0].body,
            TagBody::Deprecated {
                note: Some("use the new API".to_string())
            }
        );
        assert_eq!(without.tags()[0].body, TagBody::Deprecated { note: None });
    }
}
