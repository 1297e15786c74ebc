use crate::api::cookies::{with_session, without_session};

use acct_auth::TokenPair;

use axum::response::IntoResponse;
use axum_extra::extract::cookie::CookieJar;
use http::header::SET_COOKIE;

fn set_cookies(jar: CookieJar) -> Vec<String> {
    jar.into_response()
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

#[test]
fn given_tokens_then_both_cookies_http_only_secure_root_path() {
    let tokens = TokenPair {
        access_token: "a.b.c".to_string(),
        refresh_token: "d.e.f".to_string(),
    };

    let cookies = set_cookies(with_session(CookieJar::new(), &tokens, true));

    assert_eq!(cookies.len(), 2);
    for cookie in &cookies {
        assert!(cookie.contains("HttpOnly"), "{}", cookie);
        assert!(cookie.contains("Secure"), "{}", cookie);
        assert!(cookie.contains("Path=/"), "{}", cookie);
    }
    assert!(cookies.iter().any(|c| c.starts_with("accessToken=a.b.c")));
    assert!(cookies.iter().any(|c| c.starts_with("refreshToken=d.e.f")));
}

#[test]
fn given_insecure_setting_then_secure_flag_omitted() {
    let tokens = TokenPair {
        access_token: "a".to_string(),
        refresh_token: "r".to_string(),
    };

    let cookies = set_cookies(with_session(CookieJar::new(), &tokens, false));

    assert!(cookies.iter().all(|c| !c.contains("Secure")));
}

#[test]
fn given_logout_then_both_cookies_expired_even_if_never_sent() {
    let cookies = set_cookies(without_session(CookieJar::new(), true));

    assert_eq!(cookies.len(), 2);
    assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));
}
