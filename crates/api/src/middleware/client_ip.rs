use std::{net::SocketAddr, sync::Arc};

use async_trait::async_trait;
use attendance_core::errors::AttendanceError;
use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::request::Parts,
};

use super::error_handling::AppError;
use crate::ApiState;

pub const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// The network address a request is attributed to.
///
/// Behind a trusted proxy this is the first `X-Forwarded-For` hop, otherwise
/// the socket peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

pub fn forwarded_for(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(FORWARDED_FOR_HEADER)?
        .to_str()
        .ok()?
        .split(',')
        .map(str::trim)
        .find(|hop| !hop.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for ClientIp {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        if state.trust_forwarded_for {
            if let Some(ip) = forwarded_for(parts) {
                return Ok(ClientIp(ip));
            }
        }

        parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| ClientIp(addr.ip().to_string()))
            .ok_or_else(|| {
                AppError(AttendanceError::Forbidden(
                    "Unable to determine client address".to_string(),
                ))
            })
    }
}
