mod mindcast_error;
mod registry_error;
mod service_error;
mod store_error;

pub use mindcast_error::{MindcastError, MindcastResult};
pub use registry_error::RegistryError;
pub use service_error::ServiceError;
pub use store_error::StoreError;
