// Adapters layer: concrete implementations for external systems (catalog http, storage).

pub mod http;
pub mod storage;

pub use http::GraphqlCatalog;
pub use storage::LocalStorage;
