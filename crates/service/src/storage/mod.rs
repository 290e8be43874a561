//! Storage abstractions for service layer
//!
//! Contains reusable file-backed stores that persist a whole document as JSON.

pub mod json_document_store;
