// src/capture/extract.rs
//
// Row classification and field extraction. Pure reads over the host tree,
// so the heuristics can be tested against saved markup.
//
// Classification order matters:
//   1. must be a `div[role=row]`
//   2. must carry a contact marker (default-contact icon or an <img>);
//      rows without one are not rendered yet or are not people
//   3. a group icon wins over a contact marker
//   4. the "Contacts" / "Groups" section headers are rows too

use crate::config::consts::*;
use crate::core::{AttrTest, Compound, Document, NodeId, Selector};
use crate::core::sanitize::{clean_description, clean_name};
use crate::store::CapturedProfile;

pub const ROW: Selector = Selector(&[
    Compound::tag(ROW_TAG).with_attrs(&[AttrTest::Equals("role", ROW_ROLE)]),
]);

pub const CONTAINER: Selector = Selector(&[
    Compound::ANY.with_attrs(&[AttrTest::Equals("aria-label", CONTAINER_LABELS[0])]),
    Compound::ANY.with_attrs(&[AttrTest::Equals("aria-label", CONTAINER_LABELS[1])]),
]);

pub const CONTACT_MARKER: Selector = Selector(&[
    Compound::ANY.with_attrs(&[AttrTest::Equals("data-icon", ICON_CONTACT)]),
    Compound::tag("img"),
]);

pub const GROUP_MARKER: Selector = Selector(&[
    Compound::ANY.with_attrs(&[AttrTest::Equals("data-icon", ICON_GROUP)]),
]);

pub const NAME: Selector = Selector(&[
    Compound::tag("span").with_attrs(&[AttrTest::Present("title")]).not_class(COPYABLE_CLASS),
]);

pub const DESCRIPTION: Selector = Selector(&[
    Compound::tag("span").with_attrs(&[AttrTest::Equals("data-testid", SELECTABLE_TESTID)]),
    Compound::class(STATUS_CLASS),
]);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowClass {
    Contact,
    NotARow,
    NoContactMarker,
    Group,
    SectionHeader,
}

pub fn classify(doc: &Document, row: NodeId) -> RowClass {
    if !ROW.matches(doc, row) {
        return RowClass::NotARow;
    }
    if doc.query_selector(row, &CONTACT_MARKER).is_none() {
        return RowClass::NoContactMarker;
    }
    if doc.query_selector(row, &GROUP_MARKER).is_some() {
        return RowClass::Group;
    }
    let text = doc.text_content(row);
    if SECTION_HEADERS.contains(&text.as_str()) {
        return RowClass::SectionHeader;
    }
    RowClass::Contact
}

/// Cleaned display name: `title` attribute first, text as fallback.
pub fn extract_name(doc: &Document, row: NodeId) -> Option<String> {
    let el = doc.query_selector(row, &NAME)?;
    let raw = match doc.attr(el, "title") {
        Some(t) if !t.is_empty() => s!(t),
        _ => doc.text_content(el),
    };
    let name = clean_name(&raw);
    (!name.is_empty()).then_some(name)
}

pub fn extract_description(doc: &Document, row: NodeId) -> Option<String> {
    let el = doc.query_selector(row, &DESCRIPTION)?;
    clean_description(&doc.text_content(el))
}

/// Full pass over one row. `None` means "nothing to capture (yet)".
///
/// There is no phone number in the sidebar, so the display name doubles as
/// id and phone number. Two contacts sharing a name collapse into one record.
pub fn extract_profile(doc: &Document, row: NodeId) -> Option<CapturedProfile> {
    let class = classify(doc, row);
    if class != RowClass::Contact {
        logd!("skip row {:?}: {:?}", row, class);
        return None;
    }
    let Some(name) = extract_name(doc, row) else {
        logd!("skip row {:?}: no name yet", row);
        return None;
    };
    Some(CapturedProfile {
        profile_id: name.clone(),
        description: extract_description(doc, row),
        phone_number: Some(name.clone()),
        name: Some(name),
        source: None,
    })
}

/// First search-results / chat-list container at or below `node`.
pub fn find_container(doc: &Document, node: NodeId) -> Option<NodeId> {
    if !doc.is_element(node) { return None; }
    if CONTAINER.matches(doc, node) { return Some(node); }
    doc.query_selector(node, &CONTAINER)
}
