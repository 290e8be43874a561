//! Pieces shared by the binary and the HTTP server: logging setup and
//! small response types.

pub mod types;
pub mod utils;
