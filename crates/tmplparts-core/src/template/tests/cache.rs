//! Template cache and processor binding tests

use super::helpers::sample_params;
use super::*;
use crate::dom;
use crate::error::PartsError;
use std::collections::HashMap;
use std::sync::Arc;

#[test]
fn test_cache_returns_same_template_for_same_source() {
    let source = dom::parse_fragment("<p>{{x}}</p>").unwrap();
    let mut cache = TemplateCache::new();
    let first = cache.get_or_create(&source);
    let second = cache.get_or_create(&source);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_cache_keys_by_identity_not_content() {
    let a = dom::parse_fragment("<p>{{x}}</p>").unwrap();
    let b = dom::parse_fragment("<p>{{x}}</p>").unwrap();
    let mut cache = TemplateCache::new();
    let first = cache.get_or_create(&a);
    let second = cache.get_or_create(&b);
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_cache_serves_stale_template_until_invalidated() {
    let source = dom::parse_fragment("<p>{{x}}</p>").unwrap();
    let mut cache = TemplateCache::new();
    assert_eq!(cache.get_or_create(&source).parts().len(), 1);

    let contents = dom::template_contents(&source).unwrap();
    dom::append(&contents, dom::create_text("{{y}}"));
    assert_eq!(cache.get_or_create(&source).parts().len(), 1);

    assert!(cache.invalidate(&source));
    assert_eq!(cache.get_or_create(&source).parts().len(), 2);
    assert!(!cache.invalidate(&dom::create_fragment()));
}

#[test]
fn test_cache_purge_drops_discarded_sources() {
    let kept = dom::parse_fragment("<p>{{x}}</p>").unwrap();
    let mut cache = TemplateCache::new();
    cache.get_or_create(&kept);
    {
        let discarded = dom::parse_fragment("<p>{{y}}</p>").unwrap();
        cache.get_or_create(&discarded);
    }
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.purge(), 1);
    assert_eq!(cache.len(), 1);
    assert!(!cache.is_empty());
}

#[test]
fn test_cache_instantiate_uses_config() {
    let config = EngineConfig {
        boolean_attributes: Vec::new(),
        ..EngineConfig::default()
    };
    let source = dom::parse_fragment(r#"<div hidden="{{hidden}}"></div>"#).unwrap();
    let mut cache = TemplateCache::with_config(config);
    let instance = cache
        .instantiate(&source, &mut ParamsProcessor::new(), &sample_params())
        .unwrap();
    assert_eq!(instance.to_html(), r#"<div hidden="false"></div>"#);
}

#[test]
fn test_cache_get_or_create_with_hook() {
    let source = dom::parse_fragment("{{a}}<template>{{b}}</template>").unwrap();
    let mut cache = TemplateCache::new();
    let template = cache.get_or_create_with(&source, |_| NestedTemplateAction::Verbatim);
    assert_eq!(template.parts().len(), 1);
}

fn shout(parts: &mut [LivePart], params: &Params) -> Result<(), PartsError> {
    ParamsProcessor::new().process(parts, params)?;
    for part in parts.iter_mut() {
        if let Some(child) = part.as_child_mut() {
            let text = child.text().to_uppercase();
            child.replace_with([text]);
        }
    }
    Ok(())
}

fn whisper(parts: &mut [LivePart], params: &Params) -> Result<(), PartsError> {
    ParamsProcessor::new().process(parts, params)?;
    for part in parts.iter_mut() {
        if let Some(child) = part.as_child_mut() {
            let text = child.text().to_lowercase();
            child.replace_with([text]);
        }
    }
    Ok(())
}

type ProcessorFn = fn(&mut [LivePart], &Params) -> Result<(), PartsError>;

fn resolver() -> HashMap<String, ProcessorFn> {
    let mut resolver: HashMap<String, ProcessorFn> = HashMap::new();
    resolver.insert("shout".to_string(), shout);
    resolver.insert("whisper".to_string(), whisper);
    resolver
}

#[test]
fn test_instantiate_declared_dispatches_by_type() {
    let mut resolver = resolver();
    let mut cache = TemplateCache::new();

    let loud = dom::parse_template(r#"<template type="shout"><p>{{title}}</p></template>"#).unwrap();
    let quiet =
        dom::parse_template(r#"<template type="whisper"><p>{{title}}</p></template>"#).unwrap();

    let loud = cache
        .instantiate_declared(&loud, &mut resolver, &sample_params())
        .unwrap();
    let quiet = cache
        .instantiate_declared(&quiet, &mut resolver, &sample_params())
        .unwrap();
    assert_eq!(loud.to_html(), "<p>HELLO</p>");
    assert_eq!(quiet.to_html(), "<p>hello</p>");
}

#[test]
fn test_instantiate_declared_unknown_name() {
    let mut resolver = resolver();
    let source = dom::parse_template(r#"<template type="sing">{{title}}</template>"#).unwrap();
    let err = Template::extract(&source)
        .instantiate_declared(&mut resolver, &sample_params())
        .unwrap_err();
    assert!(matches!(err, PartsError::ProcessorNotFound(ref name) if name == "sing"));
}

#[test]
fn test_instantiate_declared_without_type() {
    let mut resolver = resolver();
    let source = dom::parse_template("<template>{{title}}</template>").unwrap();
    let err = Template::extract(&source)
        .instantiate_declared(&mut resolver, &sample_params())
        .unwrap_err();
    assert!(matches!(err, PartsError::ProcessorNotDeclared));
}
