use tmplparts_testkit::{RecordingProcessor, fixture, normalized_html, substitutions};
use tmplparts_core::Template;

#[test]
fn test_recording_processor_records_and_fills() {
    let template = Template::extract(&fixture(r#"<p title="{{t}}">{{x}}</p>"#));
    let mut processor = RecordingProcessor::new();
    let instance = template
        .instantiate(&mut processor, &substitutions(&[("x", "X"), ("t", "T")]))
        .unwrap();

    assert_eq!(processor.call_count(), 1);
    assert_eq!(processor.calls()[0], vec!["t", "x"]);
    assert_eq!(instance.to_html(), r#"<p title="T">X</p>"#);
}

#[test]
fn test_normalized_html_collapses_layout_whitespace() {
    let source = fixture("<ul>\n  <li>a b</li>\n  <li>c</li>\n</ul>");
    let contents = tmplparts_core::dom::template_contents(&source).unwrap();
    assert_eq!(normalized_html(&contents), "<ul><li>a b</li><li>c</li></ul>");
}
