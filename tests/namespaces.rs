//! Namespace resolution: fixed URIs, `svg`/`math` default-namespace
//! propagation, and `xmlns`-declared prefixes.

use pretty_assertions::assert_eq;

use quick_html::{NodeKind, Reader, ReaderConfig, HTML_NS, MATHML_NS, SVG_NS, XLINK_NS};

#[test]
fn svg_subtree_resolves_to_svg_namespace() {
    let mut reader = Reader::from_str("<svg><circle/></svg><p>after</p>");

    let mut seen = Vec::new();
    while reader.read().unwrap() {
        if reader.node_kind() == NodeKind::Element {
            seen.push((reader.local_name().to_string(), reader.namespace_uri().to_string()));
        }
    }
    assert_eq!(
        seen,
        vec![
            // synthesized structural ancestors always carry the real HTML
            // URI, independent of `emit_html_namespace` (which only governs
            // how a *literal* unprefixed tag resolves).
            ("html".to_string(), HTML_NS.to_string()),
            ("body".to_string(), HTML_NS.to_string()),
            ("svg".to_string(), SVG_NS.to_string()),
            ("circle".to_string(), SVG_NS.to_string()),
            // a sibling of the svg subtree is unaffected
            ("p".to_string(), String::new()),
        ]
    );
}

#[test]
fn math_subtree_resolves_to_mathml_namespace() {
    let mut reader = Reader::from_str("<math><mi>x</mi></math>");
    let mut saw_mi_namespace = None;
    while reader.read().unwrap() {
        if reader.node_kind() == NodeKind::Element && reader.local_name() == "mi" {
            saw_mi_namespace = Some(reader.namespace_uri().to_string());
        }
    }
    assert_eq!(saw_mi_namespace.as_deref(), Some(MATHML_NS));
}

#[test]
fn emit_html_namespace_setting_qualifies_unprefixed_elements() {
    let config = ReaderConfig::new().emit_html_namespace(true);
    let mut reader = Reader::from_str_with_config("<p>hi</p>", config);
    reader.read().unwrap(); // html
    reader.read().unwrap(); // body
    reader.read().unwrap(); // p
    assert_eq!(reader.namespace_uri(), HTML_NS);
}

#[test]
fn xlink_prefix_resolves_to_fixed_uri() {
    let mut reader = Reader::from_str(r#"<svg><a xlink:href="#x"></a></svg>"#);
    let mut found = None;
    while reader.read().unwrap() {
        if reader.node_kind() == NodeKind::Element && reader.local_name() == "a" {
            found = reader.get_attribute_by_name("href", Some(XLINK_NS)).map(str::to_string);
        }
    }
    assert_eq!(found.as_deref(), Some("#x"));
}

#[test]
fn undeclared_prefix_resolves_to_synthetic_placeholder() {
    let mut reader = Reader::from_str("<custom:widget></custom:widget>");
    reader.read().unwrap(); // html
    reader.read().unwrap(); // body
    reader.read().unwrap(); // widget
    assert_eq!(reader.namespace_uri(), "uri:namespace:custom");
}

#[test]
fn name_table_setting_does_not_change_observed_names() {
    let config = ReaderConfig::new().name_table(true);
    let mut reader = Reader::from_str_with_config("<div><p>a</p><p>b</p></div>", config);
    let mut local_names = Vec::new();
    while reader.read().unwrap() {
        if reader.node_kind() == NodeKind::Element {
            local_names.push(reader.local_name().to_string());
        }
    }
    assert_eq!(local_names, vec!["html", "body", "div", "p", "p"]);
}

#[test]
fn lookup_namespace_reflects_the_open_element_stack() {
    let mut reader = Reader::from_str(r#"<root xmlns:x="urn:example"><child/></root>"#);
    reader.read().unwrap(); // html
    reader.read().unwrap(); // body
    reader.read().unwrap(); // root
    assert_eq!(reader.lookup_namespace("x"), "urn:example");
}
