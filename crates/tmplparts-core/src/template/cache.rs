//! Memoized extraction keyed by source-tree identity

use crate::config::EngineConfig;
use crate::error::PartsError;
use markup5ever_rcdom::{Handle, Node};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use super::extract::{Extractor, NestedTemplateAction};
use super::instance::Instance;
use super::processor::{BindingResolver, Processor};
use super::Template;

struct CacheEntry {
    /// Confirms the key still names the same live source
    source: Weak<Node>,
    template: Arc<Template>,
}

/// Templates extracted once per source tree
///
/// Sources are assumed immutable after first use. A source mutated later
/// keeps its stale template until [`TemplateCache::invalidate`] is called.
pub struct TemplateCache {
    config: EngineConfig,
    entries: HashMap<usize, CacheEntry>,
}

impl Default for TemplateCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            entries: HashMap::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the cached template for `source`, extracting it on first use
    pub fn get_or_create(&mut self, source: &Handle) -> Arc<Template> {
        self.get_or_create_with(source, |_| NestedTemplateAction::Extract)
    }

    /// Like [`TemplateCache::get_or_create`], consulting `hook` for nested
    /// templates when extraction happens
    pub fn get_or_create_with<F>(&mut self, source: &Handle, hook: F) -> Arc<Template>
    where
        F: FnMut(&Handle) -> NestedTemplateAction,
    {
        let key = key_of(source);
        if let Some(entry) = self.entries.get(&key) {
            let alive = entry
                .source
                .upgrade()
                .is_some_and(|cached| Rc::ptr_eq(&cached, source));
            if alive {
                tracing::debug!("template cache hit");
                return Arc::clone(&entry.template);
            }
        }

        tracing::debug!("template cache miss, extracting");
        let template = Arc::new(
            Extractor::new(&self.config)
                .with_nested_hook(hook)
                .extract(source),
        );
        self.entries.insert(
            key,
            CacheEntry {
                source: Rc::downgrade(source),
                template: Arc::clone(&template),
            },
        );
        template
    }

    /// Forgets the template for `source`, so the next use re-extracts it
    pub fn invalidate(&mut self, source: &Handle) -> bool {
        self.entries.remove(&key_of(source)).is_some()
    }

    /// Drops entries whose source tree has been discarded
    pub fn purge(&mut self) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.source.strong_count() > 0);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Instantiates the cached template for `source`
    pub fn instantiate<P, Pr>(
        &mut self,
        source: &Handle,
        processor: &mut Pr,
        params: &P,
    ) -> Result<Instance, Pr::Error>
    where
        P: ?Sized,
        Pr: Processor<P> + ?Sized,
    {
        self.get_or_create(source).instantiate(processor, params)
    }

    /// Instantiates the cached template for `source` with the processor
    /// `resolver` binds to its declared name
    pub fn instantiate_declared<P, R>(
        &mut self,
        source: &Handle,
        resolver: &mut R,
        params: &P,
    ) -> Result<Instance, <R::Processor as Processor<P>>::Error>
    where
        P: ?Sized,
        R: BindingResolver<P> + ?Sized,
        <R::Processor as Processor<P>>::Error: From<PartsError>,
    {
        self.get_or_create(source)
            .instantiate_declared(resolver, params)
    }
}

fn key_of(source: &Handle) -> usize {
    Rc::as_ptr(source) as usize
}
