pub mod error;
pub mod http;
pub mod traits;
pub mod types;

pub use error::BackendError;
pub use http::HttpBackend;
pub use traits::Backend;
