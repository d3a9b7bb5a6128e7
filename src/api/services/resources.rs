//! User and product CRUD routes
//!
//! The handlers are generic over [`Resource`]; `user_routes` and
//! `product_routes` instantiate them against their own store.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use tracing::{info, trace};

use crate::errors::ServiceError;
use crate::services::{Product, Resource, ResourceStore, User};

use super::helpers::{error_from_service, success_response};

fn not_found<T: Resource>(id: u64) -> HttpResponse {
    error_from_service(&ServiceError::not_found(format!(
        "{} {} not found",
        T::KIND,
        id
    )))
}

pub async fn list_resources<T: Resource>(store: web::Data<ResourceStore<T>>) -> HttpResponse {
    let items = store.list();
    trace!("Listing {} {} entries", items.len(), T::KIND);
    success_response(StatusCode::OK, items)
}

pub async fn get_resource<T: Resource>(
    path: web::Path<u64>,
    store: web::Data<ResourceStore<T>>,
) -> HttpResponse {
    let id = path.into_inner();
    match store.get(id) {
        Some(item) => success_response(StatusCode::OK, item),
        None => not_found::<T>(id),
    }
}

pub async fn create_resource<T: Resource>(
    payload: web::Json<T::Payload>,
    store: web::Data<ResourceStore<T>>,
) -> HttpResponse {
    let item = store.create(payload.into_inner());
    info!("Created {}", T::KIND);
    success_response(StatusCode::CREATED, item)
}

pub async fn update_resource<T: Resource>(
    path: web::Path<u64>,
    payload: web::Json<T::Payload>,
    store: web::Data<ResourceStore<T>>,
) -> HttpResponse {
    let id = path.into_inner();
    match store.update(id, payload.into_inner()) {
        Some(item) => {
            info!("Updated {} {}", T::KIND, id);
            success_response(StatusCode::OK, item)
        }
        None => not_found::<T>(id),
    }
}

pub async fn delete_resource<T: Resource>(
    path: web::Path<u64>,
    store: web::Data<ResourceStore<T>>,
) -> HttpResponse {
    let id = path.into_inner();
    if store.delete(id) {
        info!("Deleted {} {}", T::KIND, id);
        HttpResponse::NoContent().finish()
    } else {
        not_found::<T>(id)
    }
}

fn resource_scope<T: Resource>(prefix: &str) -> actix_web::Scope {
    web::scope(prefix)
        .route("", web::get().to(list_resources::<T>))
        .route("", web::post().to(create_resource::<T>))
        .route("/{id}", web::get().to(get_resource::<T>))
        .route("/{id}", web::put().to(update_resource::<T>))
        .route("/{id}", web::delete().to(delete_resource::<T>))
}

/// 用户路由 `/users`
pub fn user_routes() -> actix_web::Scope {
    resource_scope::<User>("/users")
}

/// 商品路由 `/products`
pub fn product_routes() -> actix_web::Scope {
    resource_scope::<Product>("/products")
}
