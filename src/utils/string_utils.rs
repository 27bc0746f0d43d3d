//! # 문자열 유틸리티
//!
//! 입력 검증, 헤더 파싱, form 인코딩 해석 등 문자열 처리 함수들입니다.

use std::collections::HashMap;

use serde::Deserialize;
use crate::core::errors::AppError;
use crate::domain::dto::requests::MAX_AUTH_ID_LENGTH;

/// 필수 문자열 필드 검증 및 정리
///
/// 빈 문자열이나 공백만 있는 경우 ValidationError를 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 반환합니다.
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::validate_required_string;
///
/// assert_eq!(validate_required_string("  Hello  ", "text").unwrap(), "Hello");
/// assert!(validate_required_string("   ", "text").is_err());
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            format!("{}은(는) 필수입니다", field_name)
        ));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열 필드 정리
///
/// None 값이거나 빈 문자열/공백만 있는 경우 None을 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 Some 옵션으로 반환합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 선택적 문자열 필드를 위한 serde deserializer
///
/// 빈 문자열이나 공백만 있는 문자열을 None으로 변환합니다.
/// `#[serde(deserialize_with = "deserialize_optional_string")]`와 함께 사용됩니다.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// 필수 문자열 필드를 위한 serde deserializer
///
/// 앞뒤 공백을 제거합니다. 비어 있는지는 `validator`의 `length(min = 1)`로 검사합니다.
pub fn deserialize_trimmed_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

/// `authId` 검증
///
/// 클라이언트가 생성한 값이므로 암호학적 강도는 가정하지 않고 최소한만 검증합니다.
///
/// - 공백 제거 후 비어 있지 않을 것
/// - 128자 이하
/// - ASCII 영숫자, `-`, `_` 만 허용
pub fn validate_auth_id(auth_id: &str) -> Result<String, AppError> {
    let auth_id = validate_required_string(auth_id, "authId")?;

    if auth_id.len() as u64 > MAX_AUTH_ID_LENGTH {
        return Err(AppError::ValidationError(format!(
            "authId는 {}자 이하여야 합니다",
            MAX_AUTH_ID_LENGTH
        )));
    }

    if !auth_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::ValidationError(
            "authId에 허용되지 않는 문자가 포함되어 있습니다".to_string(),
        ));
    }

    Ok(auth_id)
}

/// `Authorization` 헤더에서 Bearer 토큰 추출
///
/// # 예제
/// ```rust,ignore
/// assert_eq!(parse_auth_header(Some("Bearer deadbeef")), Some("deadbeef"));
/// assert_eq!(parse_auth_header(Some("Basic hoge")), None);
/// assert_eq!(parse_auth_header(None), None);
/// ```
pub fn parse_auth_header(header: Option<&str>) -> Option<&str> {
    let mut parts = header?.split(' ');
    match (parts.next(), parts.next()) {
        (Some("Bearer"), Some(token)) if !token.is_empty() => Some(token),
        _ => None,
    }
}

/// `application/x-www-form-urlencoded` 문자열을 키-값 맵으로 해석
///
/// Twitter의 OAuth 토큰 엔드포인트 응답과 브라우저 form 본문에 사용합니다.
/// 같은 키가 여러 번 나오면 마지막 값을 사용합니다.
pub fn parse_form_encoded(input: &str) -> HashMap<String, String> {
    input
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_form_component(key), decode_form_component(value))
        })
        .collect()
}

fn decode_form_component(component: &str) -> String {
    let spaced = component.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .unwrap_or(spaced)
}
