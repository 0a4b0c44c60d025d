//! # causeway-ingest
//!
//! The ingestion front door: normalize raw text, deduplicate by content
//! fingerprint, persist the document, and hand off to the out-of-band NLP
//! worker via the message bus. The handler returns immediately —
//! extraction and graph sync run in a separate consumer.

pub mod fingerprint;
pub mod normalizer;
pub mod pipeline;

pub use fingerprint::fingerprint;
pub use normalizer::normalize;
pub use pipeline::ingest_text;
