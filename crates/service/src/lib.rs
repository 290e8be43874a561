//! Restaurant directory service layer.
//! - `restaurant`: domain types, the `RestaurantStore` trait and its file and SeaORM backends.
//! - `storage`: reusable JSON-document persistence used by the file backend.
//! - `runtime`: builds the configured store at startup.

pub mod errors;
pub mod runtime;
#[cfg(test)]
pub mod test_support;
pub mod storage;
pub mod restaurant;
