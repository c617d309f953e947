//! Integration tests for extract → instantiate → update

use std::rc::Rc;
use tmplparts_core::{Template, TemplateCache};
use tmplparts_testkit::{RecordingProcessor, fixture, normalized_html, substitutions};

/// The greeting example: attribute segment plus child part
#[test]
fn test_greeting_instantiate_then_update() {
    let source = fixture(r#"<div class="foo {{y}}">{{x}} world</div>"#);
    let template = Template::extract(&source);
    let mut processor = RecordingProcessor::new();

    let mut instance = template
        .instantiate(&mut processor, &substitutions(&[("x", "Hello"), ("y", "bar")]))
        .unwrap();
    assert_eq!(instance.to_html(), r#"<div class="foo bar">Hello world</div>"#);

    let div = instance.root().children.borrow()[0].clone();
    instance
        .update(&mut processor, &substitutions(&[("x", "Goodbye"), ("y", "baz")]))
        .unwrap();

    assert_eq!(instance.to_html(), r#"<div class="foo baz">Goodbye world</div>"#);
    assert!(Rc::ptr_eq(&instance.root().children.borrow()[0], &div));
    assert_eq!(processor.call_count(), 2);
    assert_eq!(processor.calls()[0], processor.calls()[1]);
}

#[test]
fn test_source_tree_is_never_mutated() {
    let source = fixture(r#"<a href="/u/{{id}}">{{name}}</a>"#);
    let contents = tmplparts_core::dom::template_contents(&source).unwrap();
    let before = tmplparts_core::dom::to_html(&contents);

    let template = Template::extract(&source);
    let mut processor = RecordingProcessor::new();
    template
        .instantiate(&mut processor, &substitutions(&[("id", "7"), ("name", "Ada")]))
        .unwrap();

    assert_eq!(tmplparts_core::dom::to_html(&contents), before);
}

#[test]
fn test_deeply_nested_layout() {
    let source = fixture(
        r#"
        <article data-id="{{id}}">
          <header><h1>{{title}}</h1></header>
          <section>
            <p class="lead {{tone}}">{{lead}}</p>
            <footer>by {{author}}</footer>
          </section>
        </article>
        "#,
    );
    let mut cache = TemplateCache::new();
    let template = cache.get_or_create(&source);
    let expressions: Vec<&str> = template.parts().iter().map(|p| p.expression()).collect();
    assert_eq!(expressions, vec!["id", "title", "tone", "lead", "author"]);

    let mut processor = RecordingProcessor::new();
    let instance = cache
        .instantiate(
            &source,
            &mut processor,
            &substitutions(&[
                ("id", "42"),
                ("title", "Parts"),
                ("tone", "calm"),
                ("lead", "Intro"),
                ("author", "Ada"),
            ]),
        )
        .unwrap();

    assert_eq!(
        normalized_html(instance.root()),
        r#"<article data-id="42"><header><h1>Parts</h1></header><section><p class="lead calm">Intro</p><footer>by Ada</footer></section></article>"#
    );
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_repeated_updates_do_not_grow_tree() {
    let source = fixture("<ul><li>{{a}}</li><li>{{b}}</li></ul>");
    let template = Template::extract(&source);
    let mut processor = RecordingProcessor::new();
    let mut instance = template
        .instantiate(&mut processor, &substitutions(&[]))
        .unwrap();

    for round in 0..10 {
        let value = round.to_string();
        instance
            .update(
                &mut processor,
                &substitutions(&[("a", value.as_str()), ("b", value.as_str())]),
            )
            .unwrap();
    }

    assert_eq!(instance.to_html(), "<ul><li>9</li><li>9</li></ul>");
    assert_eq!(instance.parts().len(), 2);
    let ul = instance.root().children.borrow()[0].clone();
    for li in ul.children.borrow().iter() {
        // Current text plus the part's anchor
        assert_eq!(li.children.borrow().len(), 2);
    }
}
