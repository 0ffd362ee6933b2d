//! services/dashboard/src/web/cookies.rs
//!
//! Reading the session cookie and writing the `token`/`role` pair.
//!
//! Both cookies are always produced together from a `Session`, and cleared
//! together, so they cannot disagree.

use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::Response;
use chrono::Duration;
use tracing::warn;
use travel_portal_core::domain::Session;

pub const TOKEN_COOKIE: &str = "token";
pub const ROLE_COOKIE: &str = "role";

/// How long the browser keeps the session cookies. The server-side session
/// expires with them.
pub fn session_max_age() -> Duration {
    Duration::days(7)
}

fn max_age() -> i64 {
    session_max_age().num_seconds()
}

/// Finds a cookie by name across every `Cookie` header of the request.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then_some(value)
        })
}

/// The non-empty token cookie, if any.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    read_cookie(headers, TOKEN_COOKIE).filter(|t| !t.trim().is_empty())
}

fn cookie(name: &str, value: &str, max_age: i64, secure: bool) -> String {
    let mut cookie = format!("{}={}; Path=/; SameSite=Lax; Max-Age={}", name, value, max_age);
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// The `Set-Cookie` values that mirror a session in the browser.
pub fn session_cookies(session: &Session, secure: bool) -> [String; 2] {
    [
        cookie(TOKEN_COOKIE, &session.token, max_age(), secure),
        cookie(ROLE_COOKIE, session.role.as_str(), max_age(), secure),
    ]
}

/// The `Set-Cookie` values that remove both session cookies.
pub fn cleared_cookies(secure: bool) -> [String; 2] {
    [
        cookie(TOKEN_COOKIE, "", 0, secure),
        cookie(ROLE_COOKIE, "", 0, secure),
    ]
}

/// Appends `Set-Cookie` headers to a response.
pub fn attach(mut response: Response, cookies: [String; 2]) -> Response {
    for value in cookies {
        match HeaderValue::from_str(&value) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => warn!("Dropping malformed cookie header: {}", e),
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use travel_portal_core::domain::{Role, UserProfile};

    fn session() -> Session {
        Session::new(
            "T",
            UserProfile {
                id: "u1".into(),
                name: "Ahmad".into(),
                email: "a@b.com".into(),
                phone: None,
                role: Role::Jamaah,
                referral_code: None,
                created_at: None,
            },
        )
    }

    #[test]
    fn reads_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; token=abc; role=ADMIN"));
        assert_eq!(read_cookie(&headers, "token"), Some("abc"));
        assert_eq!(read_cookie(&headers, "role"), Some("ADMIN"));
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn empty_token_is_treated_as_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("token="));
        assert_eq!(session_token(&headers), None);
    }

    #[test]
    fn session_cookies_carry_token_and_role() {
        let [token, role] = session_cookies(&session(), false);
        assert_eq!(token, "token=T; Path=/; SameSite=Lax; Max-Age=604800");
        assert_eq!(role, "role=JAMAAH; Path=/; SameSite=Lax; Max-Age=604800");
        assert!(!token.contains("HttpOnly"));
    }

    #[test]
    fn cleared_cookies_expire_both_and_respect_secure() {
        let [token, role] = cleared_cookies(true);
        assert!(token.starts_with("token=;"));
        assert!(role.starts_with("role=;"));
        assert!(token.contains("Max-Age=0") && role.contains("Max-Age=0"));
        assert!(token.ends_with("; Secure"));
    }
}
