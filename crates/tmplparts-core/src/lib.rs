//! tmplparts - template parts engine
//!
//! Parses a markup template containing `{{expr}}` placeholders into an ordered
//! list of parts once, instantiates it into independent trees through a
//! caller-supplied processor, and re-runs that processor in place to update
//! only the dynamic locations.

// Core modules
pub mod config;
pub mod dom;
pub mod error;
pub mod template;

// Re-export commonly used types
pub use config::EngineConfig;
pub use error::{PartsError, Result};
pub use template::{
    AttrValue, AttributeLivePart, BindingResolver, ChildLivePart, Content, Extractor, Instance,
    LivePart, NestedTemplateAction, NodePath, Params, ParamsProcessor, Part, PartLocation,
    PathStep, Processor, Segment, Segments, Template, TemplateCache, processor_fn, tokenize,
};
