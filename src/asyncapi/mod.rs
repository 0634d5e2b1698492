//! AsyncAPI document model and loader
//!
//! Only the parts of an AsyncAPI 2.x document that drive tmctl generation are
//! modelled: document info, servers, and channels with their subscribe
//! operation bindings. Everything else in the input is ignored.

mod document;

pub use document::*;
