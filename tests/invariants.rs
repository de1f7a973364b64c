//! Property-style checks: balancedness, depth, truncation termination,
//! and the `ignore_*` filtering contract.

use std::collections::VecDeque;

use quick_html::{NodeKind, Reader, ReaderConfig};

fn collect_all(input: &str, config: ReaderConfig) -> Vec<(NodeKind, String, String, usize, bool)> {
    let mut reader = Reader::from_str_with_config(input, config);
    let mut out = Vec::new();
    while reader.read().unwrap() {
        out.push((
            reader.node_kind(),
            reader.prefix().to_string(),
            reader.local_name().to_string(),
            reader.depth(),
            reader.is_empty_element(),
        ));
    }
    out
}

const SAMPLE_DOCS: &[&str] = &[
    "<p>a<p>b</p>",
    "<br><hr><img src=x>",
    "<table><tr><td>x</table>",
    "<svg><circle/><rect/></svg>",
    "<!DOCTYPE html><html><body><!--c--><p>hi</p></body></html>",
    "<div><span>one</span><span>two</span></div>",
    "<ul><li>a<li>b<li>c</ul>",
    "plain text, no tags at all",
    "<p>unterminated",
    "</p>stray close tag first",
];

#[test]
fn emitted_stream_is_balanced() {
    for doc in SAMPLE_DOCS {
        let mut stack: Vec<(String, String)> = Vec::new();
        for (kind, prefix, local, _, is_empty) in collect_all(doc, ReaderConfig::default()) {
            match kind {
                NodeKind::Element if !is_empty => stack.push((prefix, local)),
                NodeKind::EndElement => {
                    let top = stack.pop().unwrap_or_else(|| {
                        panic!("EndElement with no matching open element in {doc:?}")
                    });
                    assert_eq!(top, (prefix, local), "mismatched close in {doc:?}");
                }
                _ => {}
            }
        }
        assert!(stack.is_empty(), "unclosed elements left over in {doc:?}: {stack:?}");
    }
}

#[test]
fn depth_increases_and_decreases_by_one() {
    for doc in SAMPLE_DOCS {
        let mut expected_depth: VecDeque<usize> = VecDeque::new();
        let mut current_depth = 0usize;
        for (kind, _, _, depth, is_empty) in collect_all(doc, ReaderConfig::default()) {
            match kind {
                NodeKind::Element => {
                    assert_eq!(depth, current_depth, "open depth mismatch in {doc:?}");
                    if !is_empty {
                        expected_depth.push_back(current_depth);
                        current_depth += 1;
                    }
                }
                NodeKind::EndElement => {
                    current_depth -= 1;
                    let expected = expected_depth.pop_back().unwrap();
                    assert_eq!(depth, expected, "close depth mismatch in {doc:?}");
                }
                _ => {}
            }
        }
    }
}

#[test]
fn void_elements_are_never_followed_by_a_matching_end() {
    let events = collect_all("<br><hr><img src=x>", ReaderConfig::default());
    let void_opens: Vec<_> = events
        .iter()
        .filter(|(kind, _, local, _, _)| *kind == NodeKind::Element && matches!(local.as_str(), "br" | "hr" | "img"))
        .collect();
    assert_eq!(void_opens.len(), 3);
    for (_, _, _, _, is_empty) in &void_opens {
        assert!(*is_empty);
    }
    assert!(!events
        .iter()
        .any(|(kind, _, local, _, _)| *kind == NodeKind::EndElement && matches!(local.as_str(), "br" | "hr" | "img")));
}

#[test]
fn every_truncation_of_a_well_formed_document_terminates() {
    let doc = "<!DOCTYPE html><html><body><p>hello <b>world</b>!</p><svg><circle/></svg></body></html>";
    for end in 0..=doc.chars().count() {
        let truncated: String = doc.chars().take(end).collect();
        let mut reader = Reader::from_str(&truncated);
        let mut guard = 0;
        loop {
            guard += 1;
            assert!(guard < 10_000, "possible infinite loop truncating at {end}");
            match reader.read() {
                Ok(true) => continue,
                Ok(false) => break,
                Err(_) => break, // the iteration-cap error is itself a form of termination
            }
        }
    }
}

#[test]
fn ignore_flags_remove_nodes_without_perturbing_the_rest() {
    let doc = "<!--c--><p><?pi data?>  text  <!--c2--></p>";
    let baseline = collect_all(doc, ReaderConfig::default());

    let config = ReaderConfig::new()
        .ignore_comments(true)
        .ignore_processing_instructions(true)
        .ignore_insignificant_whitespace(true);
    let filtered = collect_all(doc, config);

    let expected: Vec<_> = baseline
        .into_iter()
        .filter(|(kind, ..)| {
            !matches!(
                kind,
                NodeKind::Comment | NodeKind::ProcessingInstruction | NodeKind::Whitespace
            )
        })
        .collect();
    assert_eq!(filtered, expected);
}
