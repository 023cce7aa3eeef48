//! Session cookie handling
//!
//! The session token travels in an `HttpOnly` cookie named `token`. Nothing
//! is stored server side; clearing the cookie is the whole of logout.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::jwt::SESSION_TTL_SECONDS;

/// Name of the session cookie
pub const TOKEN_COOKIE: &str = "token";

/// Binds session tokens to cookies with a fixed set of attributes
#[derive(Debug, Clone, Copy)]
pub struct SessionCookie {
    secure: bool,
}

impl SessionCookie {
    /// `secure` must be true whenever the service is reached over HTTPS
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    /// Add the session cookie carrying `token` to the jar
    pub fn attach(&self, jar: CookieJar, token: String) -> CookieJar {
        let mut cookie = self.base(token);
        cookie.set_max_age(Duration::seconds(SESSION_TTL_SECONDS));

        jar.add(cookie)
    }

    /// Add an already-expired session cookie to the jar
    ///
    /// Emitted unconditionally so logout works even when the request carried
    /// no cookie.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        let mut cookie = self.base(String::new());
        cookie.make_removal();

        jar.add(cookie)
    }

    /// Read the session token from the request cookies
    pub fn extract(&self, jar: &CookieJar) -> Option<String> {
        jar.get(TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|token| !token.is_empty())
    }

    fn base(&self, value: String) -> Cookie<'static> {
        Cookie::build((TOKEN_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .build()
    }
}
