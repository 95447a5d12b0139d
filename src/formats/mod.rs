//! Position and graph codecs, external to the layout core. The core
//! never imports this module; it exists for callers that need to read a
//! graph in or write positions out.

pub mod binary;
pub mod json;
