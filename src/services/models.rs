//! Resource models served by the user and product routes

use serde::{Deserialize, Serialize};

use super::resource_store::Resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
}

/// Request body for creating or replacing a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
}

impl Resource for User {
    type Payload = UserPayload;
    const KIND: &'static str = "user";

    fn from_payload(id: u64, payload: UserPayload) -> Self {
        Self {
            id,
            name: payload.name,
            email: payload.email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: f64,
}

/// Request body for creating or replacing a product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub price: f64,
}

impl Resource for Product {
    type Payload = ProductPayload;
    const KIND: &'static str = "product";

    fn from_payload(id: u64, payload: ProductPayload) -> Self {
        Self {
            id,
            name: payload.name,
            price: payload.price,
        }
    }
}
