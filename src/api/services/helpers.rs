//! API 帮助函数

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;

use crate::errors::ServiceError;

use super::types::{ApiResponse, ErrorCode};

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: code as i32,
            message: message.into(),
            data,
        })
}

/// 构建成功响应
pub fn success_response<T: Serialize>(status: StatusCode, data: T) -> HttpResponse {
    json_response(status, ErrorCode::Success, "OK", Some(data))
}

/// 构建错误响应
pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// 从 ServiceError 构建错误响应（自动映射 HTTP 状态码和 ErrorCode）
pub fn error_from_service(err: &ServiceError) -> HttpResponse {
    let (status, code) = match err {
        ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NotFound),
        ServiceError::Serialization(_) => (StatusCode::BAD_REQUEST, ErrorCode::BadRequest),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalServerError,
        ),
    };
    error_response(status, code, err.message())
}
