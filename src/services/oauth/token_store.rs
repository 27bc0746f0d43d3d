//! # OAuth 토큰 저장소
//!
//! 진행 중인 OAuth 흐름과 로그인 세션의 자격 증명을 프로세스 메모리에 보관합니다.
//!
//! ## 상태 전이
//!
//! ```text
//! oauth_request ──► REQUESTED (oauth_token → authId, token_secret)
//!                        │ take_request (1회)
//!                        ▼
//! oauth_callback ──► VERIFIED (authId → TwitterAuth)
//!                        │ take_verified (1회)
//!                        ▼
//! oauth_end ───────► CONSUMED ──► open_session ──► SESSION (handle → TwitterAuth)
//! ```
//!
//! 모든 접근 시 만료된 항목을 먼저 제거합니다. REQUESTED/VERIFIED는 흐름 TTL,
//! SESSION은 세션 TTL(쿠키 수명과 동일)을 따릅니다.
//!
//! 잠금은 `std::sync::Mutex`이며 가드를 `.await` 너머로 유지하지 않습니다.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};

use crate::domain::models::twitter_auth::TwitterAuth;

/// `take_verified` 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OAuthEnd {
    /// 자격 증명이 준비되어 있었고, 방금 소비됨
    Ready(TwitterAuth),
    /// 요청 토큰은 발급되었지만 콜백이 아직 완료되지 않음
    NotReady,
    /// 해당 authId로 진행 중인 흐름이 없음 (이미 소비된 경우 포함)
    NeverRequested,
}

/// REQUESTED 상태의 요청 토큰 항목
#[derive(Debug, Clone)]
pub struct RequestTokenEntry {
    pub auth_id: String,
    pub token_secret: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct Timed<T> {
    value: T,
    created_at: DateTime<Utc>,
}

impl<T> Timed<T> {
    fn now(value: T) -> Self {
        Self {
            value,
            created_at: Utc::now(),
        }
    }
}

#[derive(Default)]
struct StoreState {
    requested: HashMap<String, RequestTokenEntry>,
    verified: HashMap<String, Timed<TwitterAuth>>,
    sessions: HashMap<String, Timed<TwitterAuth>>,
}

impl StoreState {
    fn sweep(&mut self, flow_ttl: Duration, session_ttl: Duration) {
        let now = Utc::now();
        self.requested.retain(|_, entry| now - entry.created_at < flow_ttl);
        self.verified.retain(|_, entry| now - entry.created_at < flow_ttl);
        self.sessions.retain(|_, entry| now - entry.created_at < session_ttl);
    }
}

/// OAuth 흐름 및 세션 자격 증명 저장소
///
/// OAuth 서비스 구현체가 단독으로 소유하며, 라우터는 `OAuthService` trait을 통해서만
/// 간접적으로 접근합니다.
pub struct TokenStore {
    flow_ttl: Duration,
    session_ttl: Duration,
    state: Mutex<StoreState>,
}

impl TokenStore {
    pub fn new(flow_ttl: Duration, session_ttl: Duration) -> Self {
        Self {
            flow_ttl,
            session_ttl,
            state: Mutex::new(StoreState::default()),
        }
    }

    /// 분 단위 흐름 TTL과 시간 단위 세션 TTL로 생성합니다.
    ///
    /// 표현할 수 없는 값이면 기본값(10분, 24시간)을 사용합니다.
    pub fn with_ttl_minutes(flow_ttl_minutes: i64, session_ttl_hours: i64) -> Self {
        let flow_ttl = Duration::try_minutes(flow_ttl_minutes).unwrap_or_else(|| {
            log::error!("흐름 TTL {}분은 범위를 벗어났습니다. 기본값 10분 사용", flow_ttl_minutes);
            Duration::minutes(10)
        });
        let session_ttl = Duration::try_hours(session_ttl_hours).unwrap_or_else(|| {
            log::error!("세션 TTL {}시간은 범위를 벗어났습니다. 기본값 24시간 사용", session_ttl_hours);
            Duration::hours(24)
        });

        Self::new(flow_ttl, session_ttl)
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        let mut guard = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.sweep(self.flow_ttl, self.session_ttl);
        guard
    }

    /// 요청 토큰을 REQUESTED 상태로 등록합니다.
    ///
    /// 같은 authId로 먼저 등록된 REQUESTED 항목은 제거됩니다 (마지막 요청 우선).
    pub fn insert_request(&self, oauth_token: &str, auth_id: &str, token_secret: &str) {
        let mut state = self.lock();

        let before = state.requested.len();
        state.requested.retain(|_, entry| entry.auth_id != auth_id);
        if state.requested.len() < before {
            log::debug!("authId {}의 이전 요청 토큰을 폐기했습니다", auth_id);
        }

        state.requested.insert(
            oauth_token.to_string(),
            RequestTokenEntry {
                auth_id: auth_id.to_string(),
                token_secret: token_secret.to_string(),
                created_at: Utc::now(),
            },
        );
    }

    /// 요청 토큰 항목을 꺼내고 삭제합니다. 알 수 없거나 만료된 토큰이면 `None`.
    pub fn take_request(&self, oauth_token: &str) -> Option<RequestTokenEntry> {
        self.lock().requested.remove(oauth_token)
    }

    /// 콜백이 완료된 자격 증명을 VERIFIED 상태로 저장합니다.
    pub fn insert_verified(&self, auth_id: &str, auth: TwitterAuth) {
        self.lock()
            .verified
            .insert(auth_id.to_string(), Timed::now(auth));
    }

    /// VERIFIED 자격 증명을 한 번만 꺼냅니다.
    pub fn take_verified(&self, auth_id: &str) -> OAuthEnd {
        let mut state = self.lock();

        if let Some(entry) = state.verified.remove(auth_id) {
            return OAuthEnd::Ready(entry.value);
        }

        if state.requested.values().any(|entry| entry.auth_id == auth_id) {
            OAuthEnd::NotReady
        } else {
            OAuthEnd::NeverRequested
        }
    }

    /// 로그인 세션 핸들에 자격 증명을 연결합니다.
    pub fn insert_session(&self, handle: &str, auth: TwitterAuth) {
        self.lock()
            .sessions
            .insert(handle.to_string(), Timed::now(auth));
    }

    /// 세션 핸들로 자격 증명을 조회합니다. 세션은 소비되지 않습니다.
    pub fn session(&self, handle: &str) -> Option<TwitterAuth> {
        self.lock()
            .sessions
            .get(handle)
            .map(|entry| entry.value.clone())
    }

    /// REQUESTED 상태 항목 수
    pub fn pending_requests(&self) -> usize {
        self.lock().requested.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::twitter_auth::ConsumerCredentials;

    fn store() -> TokenStore {
        TokenStore::with_ttl_minutes(10, 24)
    }

    fn credential(token: &str) -> TwitterAuth {
        TwitterAuth::from_consumer(&ConsumerCredentials::new("ck", "cs"), token, "ts")
    }

    #[test]
    fn test_request_token_is_single_use() {
        let store = store();
        store.insert_request("T", "abc", "secret");

        let entry = store.take_request("T").unwrap();
        assert_eq!(entry.auth_id, "abc");
        assert_eq!(entry.token_secret, "secret");
        assert!(store.take_request("T").is_none());
    }

    #[test]
    fn test_take_verified_is_one_shot() {
        let store = store();
        store.insert_verified("abc", credential("access"));

        assert_eq!(store.take_verified("abc"), OAuthEnd::Ready(credential("access")));
        assert_eq!(store.take_verified("abc"), OAuthEnd::NeverRequested);
    }

    #[test]
    fn test_take_verified_reports_pending_flow() {
        let store = store();
        store.insert_request("T", "abc", "secret");

        assert_eq!(store.take_verified("abc"), OAuthEnd::NotReady);
        assert_eq!(store.take_verified("xyz"), OAuthEnd::NeverRequested);
    }

    #[test]
    fn test_new_request_replaces_previous_for_same_auth_id() {
        let store = store();
        store.insert_request("T1", "abc", "s1");
        store.insert_request("T2", "abc", "s2");
        store.insert_request("U1", "other", "s3");

        assert!(store.take_request("T1").is_none());
        assert_eq!(store.take_request("T2").unwrap().token_secret, "s2");
        assert_eq!(store.pending_requests(), 1);
    }

    #[test]
    fn test_expired_entries_are_evicted() {
        let store = TokenStore::new(Duration::zero(), Duration::zero());
        store.insert_request("T", "abc", "secret");
        store.insert_verified("abc", credential("access"));
        store.insert_session("handle", credential("access"));

        assert!(store.take_request("T").is_none());
        assert_eq!(store.take_verified("abc"), OAuthEnd::NeverRequested);
        assert!(store.session("handle").is_none());
    }

    #[test]
    fn test_out_of_range_ttl_falls_back_to_default() {
        let store = TokenStore::with_ttl_minutes(i64::MAX, i64::MAX);

        assert_eq!(store.flow_ttl, Duration::minutes(10));
        assert_eq!(store.session_ttl, Duration::hours(24));

        store.insert_request("T", "abc", "secret");
        assert_eq!(store.take_request("T").unwrap().auth_id, "abc");
    }

    #[test]
    fn test_session_lookup_does_not_consume() {
        let store = store();
        store.insert_session("handle", credential("access"));

        assert_eq!(store.session("handle").unwrap().token, "access");
        assert_eq!(store.session("handle").unwrap().token, "access");
        assert!(store.session("unknown").is_none());
    }
}
