//! Tests for the owned DOM tree: accessors, serialization, and the debug dump.

use loom_dom::{AttributesMap, Node, write_tree};

/// Helper to build an attribute map from pairs.
fn attrs(pairs: &[(&str, &str)]) -> AttributesMap {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn sample() -> Node {
    Node::element(
        "div",
        attrs(&[("id", "main"), ("class", "box wide")]),
        vec![
            Node::element("p", AttributesMap::new(), vec![Node::text("Hello")]),
            Node::text("world "),
        ],
    )
}

#[test]
fn test_accessors() {
    let tree = sample();
    let div = tree.as_element().expect("root should be an element");
    assert_eq!(div.tag_name, "div");
    assert_eq!(div.id().map(String::as_str), Some("main"));
    assert!(div.classes().contains("wide"));
    assert_eq!(tree.children().len(), 2);
    assert_eq!(tree.children()[1].as_text(), Some("world "));
}

#[test]
fn test_text_content_concatenates_descendants() {
    assert_eq!(sample().text_content(), "Helloworld ");
}

#[test]
fn test_find_element_depth_first() {
    let tree = sample();
    assert!(tree.find_element("p").is_some());
    assert!(tree.find_element("span").is_none());
    assert_eq!(tree.find_element("div").map(|e| e.children.len()), Some(2));
}

#[test]
fn test_to_html_sorts_attributes() {
    assert_eq!(
        sample().to_html(),
        "<div class=\"box wide\" id=\"main\"><p>Hello</p>world </div>"
    );
}

#[test]
fn test_to_html_switches_quote_for_embedded_double_quote() {
    let node = Node::element("a", attrs(&[("title", "say \"hi\"")]), Vec::new());
    assert_eq!(node.to_html(), "<a title='say \"hi\"'></a>");
}

#[test]
fn test_write_tree_format() {
    let mut out = String::new();
    write_tree(&mut out, &sample(), 0).expect("writing to a String cannot fail");
    let expected = "<div class=\"box wide\" id=\"main\">\n  <p>\n    \"Hello\"\n  \"world\u{00B7}\"\n";
    assert_eq!(out, expected);
}

#[test]
fn test_display_matches_write_tree() {
    let tree = sample();
    let mut out = String::new();
    write_tree(&mut out, &tree, 0).expect("writing to a String cannot fail");
    assert_eq!(tree.to_string(), out);
}

#[test]
fn test_serialize_json() {
    let node = Node::element("b", AttributesMap::new(), vec![Node::text("x")]);
    let json = serde_json::to_value(&node).expect("node should serialize");
    assert_eq!(json["Element"]["tag_name"], "b");
    assert_eq!(json["Element"]["children"][0]["Text"], "x");
}
