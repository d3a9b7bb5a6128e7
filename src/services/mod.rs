pub mod models;
pub mod resource_store;

pub use models::{Product, ProductPayload, User, UserPayload};
pub use resource_store::{Resource, ResourceStore};
