//! End-to-end scenarios over literal HTML fragments, one assertion per
//! expected emitted sequence.

use quick_html::NodeKind::*;

use pretty_assertions::assert_eq;

mod helpers;
use helpers::{drain_str, snap};

#[test]
fn implicit_sibling_close_of_unclosed_p() {
    let events = drain_str("<p>a<p>b</p>");
    assert_eq!(
        events,
        vec![
            snap(Element, "html", ""),
            snap(Element, "body", ""),
            snap(Element, "p", ""),
            snap(Text, "", "a"),
            snap(EndElement, "p", ""),
            snap(Element, "p", ""),
            snap(Text, "", "b"),
            snap(EndElement, "p", ""),
            snap(EndElement, "body", ""),
            snap(EndElement, "html", ""),
            snap(EndEntity, "", ""),
        ]
    );
}

#[test]
fn void_element_has_no_matching_end() {
    let events = drain_str("<br>");
    assert_eq!(
        events,
        vec![
            snap(Element, "html", ""),
            snap(Element, "body", ""),
            snap(Element, "br", ""),
            snap(EndElement, "body", ""),
            snap(EndElement, "html", ""),
            snap(EndEntity, "", ""),
        ]
    );
    let mut reader = quick_html::Reader::from_str("<br>");
    while reader.read().unwrap() && reader.local_name() != "br" {}
    assert!(reader.is_empty_element());
}

#[test]
fn synthesizes_tbody_for_bare_tr_in_table() {
    let events = drain_str("<table><tr><td>x</table>");
    assert_eq!(
        events,
        vec![
            snap(Element, "html", ""),
            snap(Element, "body", ""),
            snap(Element, "table", ""),
            snap(Element, "tbody", ""),
            snap(Element, "tr", ""),
            snap(Element, "td", ""),
            snap(Text, "", "x"),
            snap(EndElement, "td", ""),
            snap(EndElement, "tr", ""),
            snap(EndElement, "tbody", ""),
            snap(EndElement, "table", ""),
            snap(EndElement, "body", ""),
            snap(EndElement, "html", ""),
            snap(EndEntity, "", ""),
        ]
    );
}

#[test]
fn doctype_and_comment_precede_content() {
    let events = drain_str("<!DOCTYPE html><html><body><!--c--><p>hi</p></body></html>");
    assert_eq!(
        events,
        vec![
            snap(DocumentType, "html", ""),
            snap(Element, "html", ""),
            snap(Element, "body", ""),
            snap(Comment, "", "c"),
            snap(Element, "p", ""),
            snap(Text, "", "hi"),
            snap(EndElement, "p", ""),
            snap(EndElement, "body", ""),
            snap(EndElement, "html", ""),
            snap(EndEntity, "", ""),
        ]
    );
}

#[test]
fn doctype_name_is_normalized_regardless_of_content() {
    let events = drain_str("<!DOCTYPE HTML PUBLIC \"-//W3C//DTD HTML 4.01//EN\"><p>hi</p>");
    assert_eq!(events[0], snap(DocumentType, "html", ""));
}

#[test]
fn explicit_html_and_body_are_not_duplicated() {
    let events = drain_str("<html><body><p>hi</p></body></html>");
    let opens: Vec<_> = events
        .iter()
        .filter(|e| e.kind == Element && (e.name == "html" || e.name == "body"))
        .collect();
    assert_eq!(opens.len(), 2);
}
