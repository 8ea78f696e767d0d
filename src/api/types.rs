// src/api/types.rs

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::infra::errors::LucenceError;

/// Canonical envelope codes. Serialized as their numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum ResponseCode {
    Success,
    Fail,
    Unauthorized,
    NotFound,
    ServerError,
}

impl ResponseCode {
    pub fn as_u16(self) -> u16 {
        match self {
            Self::Success => 200,
            Self::Fail => 400,
            Self::Unauthorized => 401,
            Self::NotFound => 404,
            Self::ServerError => 500,
        }
    }

    pub fn status(self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            Self::Fail => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ResponseCode> for u16 {
    fn from(code: ResponseCode) -> Self {
        code.as_u16()
    }
}

impl TryFrom<u16> for ResponseCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            200 => Ok(Self::Success),
            400 => Ok(Self::Fail),
            401 => Ok(Self::Unauthorized),
            404 => Ok(Self::NotFound),
            500 => Ok(Self::ServerError),
            other => Err(format!("unknown response code {other}")),
        }
    }
}

/// `{ code, message, data? }` envelope returned by every JSON route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: ResponseCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success_with(message: impl Into<String>, data: T) -> Self {
        Self {
            code: ResponseCode::Success,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::info(ResponseCode::Fail, message)
    }

    pub fn info(code: ResponseCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn from_error(err: &LucenceError) -> Self {
        Self::info(err.code(), err.to_string())
    }

    pub fn is_success(&self) -> bool {
        self.code == ResponseCode::Success
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

/// `?pluginName=<name>`
#[derive(Debug, Deserialize)]
pub struct PluginQuery {
    #[serde(rename = "pluginName")]
    pub plugin_name: String,
}

/// `?context=<ctx>`
#[derive(Debug, Deserialize)]
pub struct HeadQuery {
    pub context: String,
}

/// Payload of `GET /head`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadInjection {
    pub context: String,
    pub fragments: Vec<String>,
    pub markup: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_serialization() {
        let resp: ApiResponse<()> = ApiResponse::fail("Plugin has existed.");
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(json, r#"{"code":400,"message":"Plugin has existed."}"#);

        let resp = ApiResponse::success_with("ok", vec!["a", "b"]);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["code"], 200);
        assert_eq!(json["data"][1], "b");
    }

    #[test]
    fn test_envelope_roundtrip_code() {
        let parsed: ApiResponse<serde_json::Value> =
            serde_json::from_str(r#"{"code":404,"message":"missing"}"#).unwrap();
        assert_eq!(parsed.code, ResponseCode::NotFound);
        assert!(parsed.data.is_none());

        let bad = serde_json::from_str::<ApiResponse<()>>(r#"{"code":418,"message":""}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_status_mirrors_code() {
        for code in [
            ResponseCode::Success,
            ResponseCode::Fail,
            ResponseCode::Unauthorized,
            ResponseCode::NotFound,
            ResponseCode::ServerError,
        ] {
            assert_eq!(code.status().as_u16(), code.as_u16());
        }
    }

    #[test]
    fn test_from_error() {
        let err = LucenceError::NotFound {
            name: "ghost".into(),
        };
        let resp: ApiResponse<()> = ApiResponse::from_error(&err);
        assert_eq!(resp.code, ResponseCode::NotFound);
        assert_eq!(resp.message, "Plugin 'ghost' not found");
    }
}
