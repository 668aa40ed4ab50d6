pub mod credentials;
pub mod retry;
pub mod service_client;

pub use crate::domain::model::{ErrorModel, HttpResponse};
pub use crate::domain::ports::Credentials;
pub use crate::utils::error::Result;
