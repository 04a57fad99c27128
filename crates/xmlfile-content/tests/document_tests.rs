//! Tests for building documents and reading values back

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use xmlfile_content::{Document, Error, NodeKind, ValueDescriptor};

#[test]
fn test_build_then_render() {
    let mut doc = Document::new("config").unwrap();
    let root = doc.root_element().unwrap();
    let item = doc.create_element("item").unwrap();
    doc.append_child(root, item).unwrap();
    doc.set_attribute(item, "id", "1").unwrap();
    doc.set_text(item, "value").unwrap();

    let reparsed = Document::parse(&doc.render().unwrap()).unwrap();
    let root = reparsed.get(reparsed.root_element().unwrap()).unwrap();
    let item = root.element_children().next().unwrap();
    assert_eq!(item.attribute("id"), Some("1"));
    assert_eq!(item.text_content(), "value");
}

#[test]
fn test_text_only_nodes_cannot_hold_children() {
    let mut doc = Document::new("config").unwrap();
    let root = doc.root_element().unwrap();
    let text = doc.create_text("x");
    doc.append_child(root, text).unwrap();

    let child = doc.create_element("child").unwrap();
    let err = doc.append_child(text, child).unwrap_err();
    assert!(matches!(err, Error::InvalidOperation(_)));
    assert!(doc.set_attribute(text, "a", "b").is_err());
}

#[test]
fn test_attached_node_cannot_be_appended_twice() {
    let mut doc = Document::new("config").unwrap();
    let root = doc.root_element().unwrap();
    let a = doc.create_element("a").unwrap();
    let b = doc.create_element("b").unwrap();
    doc.append_child(root, a).unwrap();
    doc.append_child(root, b).unwrap();

    assert!(doc.append_child(b, a).is_err());
    // Cycles are rejected too
    assert!(doc.append_child(a, root).is_err());
}

#[test]
fn test_removed_handles_stay_dead() {
    let mut doc = Document::parse("<a><b/><c/></a>").unwrap();
    let root = doc.get(doc.root_element().unwrap()).unwrap();
    let b = root.child_ids()[0];

    doc.remove(b).unwrap();
    assert!(!doc.contains(b));
    assert!(doc.remove(b).is_err());
    assert!(doc.set_text(b, "x").is_err());
}

#[test]
fn test_processing_instruction_at_document_level() {
    let mut doc = Document::new("config").unwrap();
    let pi = doc
        .create_processing_instruction("xml-stylesheet", "href=\"a.xsl\"")
        .unwrap();
    doc.append_child(doc.document_node(), pi).unwrap();

    let node = doc.get(pi).unwrap();
    assert_eq!(node.kind(), NodeKind::ProcessingInstruction);
    assert!(node.is_text_only());
    assert!(doc.render().unwrap().contains("<?xml-stylesheet href=\"a.xsl\"?>"));
}

#[test]
fn test_descriptor_from_json() {
    let descriptor: ValueDescriptor =
        serde_json::from_str(r#"{"value": "x", "attributes": {"id": "1"}}"#).unwrap();
    assert_eq!(
        descriptor,
        ValueDescriptor::new().with_text("x").with_attribute("id", "1")
    );
}

fn text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 <>&\"']{1,24}".prop_filter("needs a visible character", |s| {
        !s.trim().is_empty()
    })
}

proptest! {
    #[test]
    fn prop_text_and_attributes_survive_render(
        text in text_strategy(),
        value in "[a-zA-Z0-9 <>&\"']{0,24}",
    ) {
        let mut doc = Document::new("config").unwrap();
        let root = doc.root_element().unwrap();
        doc.set_attribute(root, "value", &value).unwrap();
        doc.set_text(root, &text).unwrap();

        let reparsed = Document::parse(&doc.render().unwrap()).unwrap();
        let root = reparsed.get(reparsed.root_element().unwrap()).unwrap();
        prop_assert_eq!(root.text_content(), text);
        prop_assert_eq!(root.attribute("value"), Some(value.as_str()));
    }
}
