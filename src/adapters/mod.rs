//! External integrations
//!
//! Adapters translating between the core and its external collaborators:
//! CSV parsing for uploaded record sets and the HTTP client for the remote
//! NER inference service.

pub mod csv;
pub mod ner;

pub use ner::HttpTokenClassifier;
