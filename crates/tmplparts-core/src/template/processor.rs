//! Processor protocol and name-based binding

use std::collections::HashMap;

use super::live::LivePart;

/// Caller-supplied logic that fills in live parts from `params`
///
/// Invoked once per `instantiate` and once per `update`, synchronously, with
/// the parts in template order.
pub trait Processor<P: ?Sized> {
    type Error;

    fn process(&mut self, parts: &mut [LivePart], params: &P) -> Result<(), Self::Error>;
}

impl<P, E, F> Processor<P> for F
where
    P: ?Sized,
    F: FnMut(&mut [LivePart], &P) -> Result<(), E>,
{
    type Error = E;

    fn process(&mut self, parts: &mut [LivePart], params: &P) -> Result<(), E> {
        self(parts, params)
    }
}

/// Pins a closure to the processor signature so its argument types infer
///
/// ```
/// use tmplparts_core::template::processor_fn;
/// use tmplparts_core::{LivePart, Template, dom};
///
/// let source = dom::parse_fragment("<p>{{name}}</p>").unwrap();
/// let template = Template::extract(&source);
/// let mut fill = processor_fn(|parts: &mut [LivePart], name: &str| {
///     for part in parts.iter_mut() {
///         if let Some(child) = part.as_child_mut() {
///             child.replace_with([name]);
///         }
///     }
///     Ok::<(), std::convert::Infallible>(())
/// });
/// let instance = template.instantiate(&mut fill, "Ada").unwrap();
/// assert_eq!(instance.to_html(), "<p>Ada</p>");
/// ```
pub fn processor_fn<P, E, F>(f: F) -> F
where
    P: ?Sized,
    F: FnMut(&mut [LivePart], &P) -> Result<(), E>,
{
    f
}

/// Host-injected mapping from a declared processor name to a processor
pub trait BindingResolver<P: ?Sized> {
    type Processor: Processor<P> + ?Sized;

    fn resolve(&mut self, name: &str) -> Option<&mut Self::Processor>;
}

impl<P, Pr> BindingResolver<P> for HashMap<String, Pr>
where
    P: ?Sized,
    Pr: Processor<P>,
{
    type Processor = Pr;

    fn resolve(&mut self, name: &str) -> Option<&mut Pr> {
        self.get_mut(name)
    }
}
