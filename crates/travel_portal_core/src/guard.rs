//! crates/travel_portal_core/src/guard.rs
//!
//! Route access rules applied to every navigation request.
//!
//! The guard only looks at whether a `token` cookie is present. It does not
//! inspect the role; role checks live in the individual page handlers.

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const PROTECTED_AREA: &str = "/dashboard";

const PUBLIC_PATHS: [&str; 2] = [LOGIN_PATH, REGISTER_PATH];

/// The outcome of evaluating a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(&'static str),
}

/// Evaluates the access rules in order; the first matching rule wins.
///
/// An empty token value is treated the same as a missing cookie.
pub fn evaluate(path: &str, token: Option<&str>) -> GuardDecision {
    let has_token = token.is_some_and(|t| !t.trim().is_empty());
    let path = normalize_path(path);

    if path == "/" {
        return if has_token {
            GuardDecision::Redirect(PROTECTED_AREA)
        } else {
            GuardDecision::Redirect(LOGIN_PATH)
        };
    }

    if has_token && PUBLIC_PATHS.contains(&path) {
        return GuardDecision::Redirect(PROTECTED_AREA);
    }

    if !has_token && is_protected(path) {
        return GuardDecision::Redirect(LOGIN_PATH);
    }

    GuardDecision::Allow
}

/// Prefix match on the protected area, aligned to path segments.
pub fn is_protected(path: &str) -> bool {
    let path = normalize_path(path);
    path == PROTECTED_AREA
        || path
            .strip_prefix(PROTECTED_AREA)
            .is_some_and(|rest| rest.starts_with('/'))
}

// Drops a trailing slash (except for the root) so `/login/` matches `/login`.
fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_redirects_by_token_presence() {
        assert_eq!(evaluate("/", Some("T")), GuardDecision::Redirect(PROTECTED_AREA));
        assert_eq!(evaluate("/", None), GuardDecision::Redirect(LOGIN_PATH));
        assert_eq!(evaluate("", None), GuardDecision::Redirect(LOGIN_PATH));
    }

    #[test]
    fn empty_token_counts_as_missing() {
        assert_eq!(evaluate("/", Some("")), GuardDecision::Redirect(LOGIN_PATH));
        assert_eq!(
            evaluate("/dashboard/payments", Some("  ")),
            GuardDecision::Redirect(LOGIN_PATH)
        );
    }

    #[test]
    fn public_paths_bounce_authenticated_users() {
        for path in ["/login", "/register", "/login/"] {
            assert_eq!(
                evaluate(path, Some("T")),
                GuardDecision::Redirect(PROTECTED_AREA),
                "{path}"
            );
            assert_eq!(evaluate(path, None), GuardDecision::Allow, "{path}");
        }
    }

    #[test]
    fn protected_paths_require_a_token() {
        for path in [
            "/dashboard",
            "/dashboard/",
            "/dashboard/jamaah",
            "/dashboard/support/room-1",
        ] {
            assert_eq!(evaluate(path, None), GuardDecision::Redirect(LOGIN_PATH), "{path}");
            assert_eq!(evaluate(path, Some("T")), GuardDecision::Allow, "{path}");
        }
    }

    #[test]
    fn unrelated_paths_pass_through() {
        assert_eq!(evaluate("/swagger-ui", None), GuardDecision::Allow);
        assert_eq!(evaluate("/dashboards", None), GuardDecision::Allow);
        assert_eq!(evaluate("/logout", Some("T")), GuardDecision::Allow);
    }
}
