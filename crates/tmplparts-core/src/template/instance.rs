//! Instantiation and in-place update

use crate::dom;
use markup5ever_rcdom::Handle;
use std::cell::RefCell;
use std::rc::Rc;

use super::Template;
use super::live::{AttributeLivePart, AttributeSlot, ChildLivePart, LivePart};
use super::part::Target;
use super::processor::{BindingResolver, Processor};
use crate::error::PartsError;

/// A concrete tree produced from a template, with its live parts
///
/// The tree is exclusively owned by the instance; no other instance shares
/// any of its nodes. Dropping the tree empties every node still attached to
/// it, so detach nodes you mean to keep (grafting with [`dom::append`] does).
#[derive(Debug)]
pub struct Instance {
    root: Handle,
    parts: Vec<LivePart>,
}

impl Template {
    /// Clones the skeleton, binds live parts and runs `processor` once
    ///
    /// # Errors
    ///
    /// Returns the processor's error unchanged; the partially processed
    /// tree is dropped.
    pub fn instantiate<P, Pr>(&self, processor: &mut Pr, params: &P) -> Result<Instance, Pr::Error>
    where
        P: ?Sized,
        Pr: Processor<P> + ?Sized,
    {
        let mut instance = self.bind();
        tracing::debug!("instantiating template with {} parts", instance.parts.len());
        processor.process(&mut instance.parts, params)?;
        Ok(instance)
    }

    /// Instantiates with the processor `resolver` binds to the declared
    /// processor name
    ///
    /// # Errors
    ///
    /// `ProcessorNotDeclared` when the source template has no `type`,
    /// `ProcessorNotFound` when the resolver knows no such name, otherwise
    /// the processor's own error.
    pub fn instantiate_declared<P, R>(
        &self,
        resolver: &mut R,
        params: &P,
    ) -> Result<Instance, <R::Processor as Processor<P>>::Error>
    where
        P: ?Sized,
        R: BindingResolver<P> + ?Sized,
        <R::Processor as Processor<P>>::Error: From<PartsError>,
    {
        let name = self
            .declared_processor()
            .ok_or(PartsError::ProcessorNotDeclared)?;
        let processor = resolver
            .resolve(name)
            .ok_or_else(|| PartsError::ProcessorNotFound(name.to_string()))?;
        self.instantiate(processor, params)
    }

    /// Builds a fresh tree and binds one live part per template part
    pub(crate) fn bind(&self) -> Instance {
        let (root, nodes) = self.skeleton.build();
        let slots: Vec<Rc<RefCell<AttributeSlot>>> = self
            .layouts
            .iter()
            .map(|layout| {
                Rc::new(RefCell::new(AttributeSlot::new(
                    nodes[layout.element].clone(),
                    layout,
                )))
            })
            .collect();

        let parts = self
            .parts
            .iter()
            .map(|part| match part.target {
                Target::Attribute { layout, segment } => {
                    LivePart::Attribute(AttributeLivePart::new(
                        part.expression.clone(),
                        self.layouts[layout].whole,
                        segment,
                        slots[layout].clone(),
                    ))
                }
                Target::Child { parent, anchor } => LivePart::Child(ChildLivePart::new(
                    part.expression.clone(),
                    nodes[parent].clone(),
                    nodes[anchor].clone(),
                )),
            })
            .collect();

        Instance { root, parts }
    }
}

impl Instance {
    /// Re-runs `processor` against the same live parts, in place
    ///
    /// Never re-walks the template and never changes the number or order of
    /// parts. Substitutions replace earlier ones rather than accumulating.
    ///
    /// # Errors
    ///
    /// Returns the processor's error unchanged; parts it already changed
    /// stay changed.
    pub fn update<P, Pr>(&mut self, processor: &mut Pr, params: &P) -> Result<(), Pr::Error>
    where
        P: ?Sized,
        Pr: Processor<P> + ?Sized,
    {
        tracing::debug!("updating instance with {} parts", self.parts.len());
        processor.process(&mut self.parts, params)
    }

    /// Root of the instance tree (a fragment node)
    pub fn root(&self) -> &Handle {
        &self.root
    }

    /// Live parts in template order
    pub fn parts(&self) -> &[LivePart] {
        &self.parts
    }

    /// Serializes the instance tree to markup
    pub fn to_html(&self) -> String {
        dom::to_html(&self.root)
    }

    /// Gives up the live parts and hands over the tree, e.g. for grafting
    /// into a host document
    ///
    /// Nodes still under the returned root are emptied when it drops; move
    /// them into the host first.
    pub fn into_root(self) -> Handle {
        self.root
    }
}
