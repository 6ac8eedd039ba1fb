// src/core/selector.rs
//
// Typed stand-in for the handful of CSS selectors the capture code needs.
// A `Selector` is a comma list of compound selectors; each compound is
// `tag? [attr]* .class? :not(.class)?`. Everything is `'static` so the
// selectors can live in consts next to the DOM conventions they encode.

use super::dom::{Document, NodeId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttrTest {
    /// `[name]`
    Present(&'static str),
    /// `[name="value"]`
    Equals(&'static str, &'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Compound {
    pub tag: Option<&'static str>,
    pub attrs: &'static [AttrTest],
    pub class: Option<&'static str>,
    pub not_class: Option<&'static str>,
}

impl Compound {
    /// `*`
    pub const ANY: Compound = Compound { tag: None, attrs: &[], class: None, not_class: None };

    pub const fn tag(tag: &'static str) -> Self {
        Compound { tag: Some(tag), ..Compound::ANY }
    }

    pub const fn class(class: &'static str) -> Self {
        Compound { class: Some(class), ..Compound::ANY }
    }

    pub const fn with_attrs(self, attrs: &'static [AttrTest]) -> Self {
        Compound { attrs, ..self }
    }

    pub const fn not_class(self, class: &'static str) -> Self {
        Compound { not_class: Some(class), ..self }
    }

    fn matches(&self, doc: &Document, id: NodeId) -> bool {
        let Some(tag) = doc.tag(id) else { return false; };
        if let Some(want) = self.tag {
            if !tag.eq_ignore_ascii_case(want) { return false; }
        }
        for t in self.attrs {
            let ok = match *t {
                AttrTest::Present(name) => doc.attr(id, name).is_some(),
                AttrTest::Equals(name, value) => doc.attr(id, name) == Some(value),
            };
            if !ok { return false; }
        }
        if let Some(c) = self.class {
            if !doc.has_class(id, c) { return false; }
        }
        if let Some(c) = self.not_class {
            if doc.has_class(id, c) { return false; }
        }
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selector(pub &'static [Compound]);

impl Selector {
    pub fn matches(&self, doc: &Document, id: NodeId) -> bool {
        self.0.iter().any(|c| c.matches(doc, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TITLED_NOT_COPYABLE: Selector = Selector(&[
        Compound::tag("span").with_attrs(&[AttrTest::Present("title")]).not_class("copyable-text"),
    ]);

    #[test]
    fn not_class_excludes_and_attr_presence_required() {
        let doc = Document::parse(concat!(
            r#"<span class="copyable-text" title="a">a</span>"#,
            r#"<span>b</span>"#,
            r#"<span class="x" title="">c</span>"#,
        ));
        let hit = doc.query_selector(doc.root(), &TITLED_NOT_COPYABLE).unwrap();
        assert_eq!(doc.text_content(hit), "c");
    }

    #[test]
    fn comma_list_matches_either_side() {
        const EITHER: Selector = Selector(&[
            Compound::ANY.with_attrs(&[AttrTest::Equals("data-icon", "x")]),
            Compound::tag("img"),
        ]);
        let doc = Document::parse(r#"<div><img src="a.png"></div>"#);
        assert_eq!(doc.query_selector_all(doc.root(), &EITHER).len(), 1);

        let doc = Document::parse(r#"<div><span data-icon="y"></span></div>"#);
        assert!(doc.query_selector(doc.root(), &EITHER).is_none());
    }
}
