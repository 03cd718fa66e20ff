//! 리다이렉트 간 메시지 전달 (flash message)
//!
//! 메시지 목록을 JSON으로 직렬화한 뒤 hex로 인코딩하여 `flash` 쿠키에 담습니다.
//! 메시지를 보여주는 화면은 쿠키를 읽은 뒤 제거합니다.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const FLASH_COOKIE: &str = "flash";

/// 쿠키 유지 시간 (초)
const FLASH_MAX_AGE_SECONDS: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

impl FlashMessage {
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Error, message)
    }
}

pub fn encode_messages(messages: &[FlashMessage]) -> String {
    // Vec<구조체> 직렬화는 실패하지 않음
    let json = serde_json::to_vec(messages).unwrap_or_default();
    hex::encode(json)
}

pub fn decode_messages(value: &str) -> Vec<FlashMessage> {
    hex::decode(value)
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}

/// 기존 flash 메시지 뒤에 새 메시지를 추가합니다.
pub fn push(jar: CookieJar, message: FlashMessage) -> CookieJar {
    let mut messages = jar
        .get(FLASH_COOKIE)
        .map(|c| decode_messages(c.value()))
        .unwrap_or_default();
    messages.push(message);

    let cookie = Cookie::build((FLASH_COOKIE, encode_messages(&messages)))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(FLASH_MAX_AGE_SECONDS));

    jar.add(cookie)
}

/// flash 메시지를 읽고 쿠키를 제거합니다.
pub fn take(jar: CookieJar) -> (CookieJar, Vec<FlashMessage>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, Vec::new());
    };
    let messages = decode_messages(cookie.value());
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, messages)
}
