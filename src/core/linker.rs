//! Link synthesis: deterministic, filename-safe output identifiers for
//! resolved elements. Unresolved literals pass through untouched so the
//! rendering layer can print them as plain text.

use crate::config::LinkConfig;
use crate::raw::{NAMESPACE_SEPARATOR, ScopeKind};

use super::elements::Element;
use super::resolver::ResolvedReference;

pub struct LinkSynthesizer {
    config: LinkConfig,
}

impl LinkSynthesizer {
    pub fn new(config: &LinkConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Output identifier for one resolved reference. Types and functions get
    /// their own page; members get their owner's page plus an anchor.
    pub fn link_for(&self, reference: &ResolvedReference) -> String {
        let element = match reference {
            ResolvedReference::Literal(text) => return text.clone(),
            ResolvedReference::Element(element) => element,
        };

        match element {
            Element::Class(c) => self.type_url(c.name()),
            Element::Interface(i) => self.type_url(i.name()),
            Element::Trait(t) => self.type_url(t.name()),
            Element::Function(f) => self.function_url(f.name()),
            Element::ClassMethod(m) | Element::InterfaceMethod(m) | Element::TraitMethod(m) => {
                let magic = if m.is_synthetic() {
                    self.config.magic_prefix.as_str()
                } else {
                    ""
                };
                format!(
                    "{}#{magic}_{}",
                    self.owner_url(&m.declared_in().kind, &m.declared_in().name),
                    m.name()
                )
            }
            Element::ClassProperty(p) | Element::TraitProperty(p) => {
                let magic = if p.is_synthetic() {
                    self.config.magic_prefix.as_str()
                } else {
                    ""
                };
                format!(
                    "{}#{magic}${}",
                    self.owner_url(&p.declared_in().kind, &p.declared_in().name),
                    p.name()
                )
            }
            Element::ClassConstant(c) | Element::InterfaceConstant(c) => {
                format!(
                    "{}#{}",
                    self.owner_url(&c.declared_in().kind, &c.declared_in().name),
                    c.name()
                )
            }
            Element::Parameter(p) => p.name().to_string(),
        }
    }

    fn owner_url(&self, kind: &ScopeKind, name: &str) -> String {
        match kind {
            ScopeKind::Function => self.function_url(name),
            _ => self.type_url(name),
        }
    }

    fn type_url(&self, fqn: &str) -> String {
        format!(
            "{}-{}.{}",
            self.config.type_prefix,
            self.flatten(fqn),
            self.config.extension
        )
    }

    fn function_url(&self, fqn: &str) -> String {
        format!(
            "{}-{}.{}",
            self.config.function_prefix,
            self.flatten(fqn),
            self.config.extension
        )
    }

    fn flatten(&self, fqn: &str) -> String {
        fqn.replace(NAMESPACE_SEPARATOR, &self.config.namespace_delimiter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures;
    use crate::core::resolver::ReferenceResolver;
    use crate::raw::{RawSnapshot, ScopeKind};

    fn synthesizer() -> LinkSynthesizer {
        LinkSynthesizer::new(&LinkConfig::default())
    }

    #[test]
    fn type_identifiers_are_flattened_and_prefixed() {
        let mut snapshot = RawSnapshot::default();
        snapshot.classes.push(fixtures::class(1, "App\\Ui\\Widget"));
        snapshot.functions.push(fixtures::function(2, "App\\render"));
        let project = fixtures::project(snapshot);

        let widget = project.store().class("App\\Ui\\Widget").unwrap().clone();
        let url = synthesizer().link_for(&ResolvedReference::Element(Element::Class(widget)));
        assert_eq!(url, "class-App.Ui.Widget.html");
        assert!(!url.contains(NAMESPACE_SEPARATOR));

        let render = project.store().function("App\\render").unwrap().clone();
        let url = synthesizer().link_for(&ResolvedReference::Element(Element::Function(render)));
        assert_eq!(url, "function-App.render.html");
    }

    #[test]
    fn member_identifiers_carry_anchors() {
        let mut snapshot = RawSnapshot::default();
        let mut class = fixtures::class(1, "App\\Foo");
        class
            .methods
            .push(fixtures::method(10, "run", ScopeKind::Class, "App\\Foo"));
        let mut magic = fixtures::method(11, "wake", ScopeKind::Class, "App\\Foo");
        magic.is_synthetic = true;
        class.methods.push(magic);
        class
            .properties
            .push(fixtures::property(12, "size", ScopeKind::Class, "App\\Foo"));
        class.constants.push(fixtures::constant(
            13,
            "LIMIT",
            ScopeKind::Class,
            "App\\Foo",
            "3",
        ));
        snapshot.classes.push(class);
        let project = fixtures::project(snapshot);

        let class = project.store().class("App\\Foo").unwrap().clone();
        let synthesizer = synthesizer();

        let method = class.method("run", &project).unwrap();
        assert_eq!(
            synthesizer.link_for(&ResolvedReference::Element(method)),
            "class-App.Foo.html#_run"
        );

        let magic = class.method("wake", &project).unwrap();
        assert_eq!(
            synthesizer.link_for(&ResolvedReference::Element(magic)),
            "class-App.Foo.html#m_wake"
        );

        let property = class.property("size", &project).unwrap();
        assert_eq!(
            synthesizer.link_for(&ResolvedReference::Element(property)),
            "class-App.Foo.html#$size"
        );

        let constant = class.constant("LIMIT", &project).unwrap();
        assert_eq!(
            synthesizer.link_for(&ResolvedReference::Element(constant)),
            "class-App.Foo.html#LIMIT"
        );
    }

    #[test]
    fn literals_pass_through_unchanged() {
        let project = fixtures::project(RawSnapshot::default());
        let resolver = ReferenceResolver::new(&project).unwrap();

        let link = resolver.resolve("TotallyUnknownType", None).unwrap();
        assert_eq!(
            synthesizer().link_for(&link.target),
            "TotallyUnknownType"
        );

        let link = resolver.resolve("http://example.com/x", None).unwrap();
        assert_eq!(
            synthesizer().link_for(&link.target),
            "http://example.com/x"
        );
    }
}
