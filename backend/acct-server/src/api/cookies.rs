use acct_auth::TokenPair;

use axum_extra::extract::cookie::{Cookie, CookieJar};

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Set both session cookies, `HttpOnly` and (unless disabled) `Secure`
pub fn with_session(jar: CookieJar, tokens: &TokenPair, secure: bool) -> CookieJar {
    jar.add(session_cookie(ACCESS_TOKEN_COOKIE, tokens.access_token.clone(), secure))
        .add(session_cookie(REFRESH_TOKEN_COOKIE, tokens.refresh_token.clone(), secure))
}

/// Expire both session cookies, whether or not the client sent them
pub fn without_session(jar: CookieJar, secure: bool) -> CookieJar {
    jar.add(expired_cookie(ACCESS_TOKEN_COOKIE, secure))
        .add(expired_cookie(REFRESH_TOKEN_COOKIE, secure))
}

fn session_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(secure)
        .path("/")
        .build()
}

fn expired_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    let mut cookie = session_cookie(name, String::new(), secure);
    cookie.make_removal();
    cookie
}
