use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::Engine;
use base64::prelude::BASE64_URL_SAFE_NO_PAD;
use serde::Deserialize;

/// Tokens expiring within this window are refreshed up front.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Deserialize)]
struct Claims {
    exp: Option<u64>,
}

/// `exp` claim of a JWT, `None` when the token isn't a JWT or carries none.
fn expiration(token: &str) -> Option<u64> {
    let mut parts = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };

    let payload = BASE64_URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice::<Claims>(&payload).ok()?.exp
}

/// Whether an access token can still be sent as is.
pub(crate) fn is_current(token: &str) -> bool {
    let Some(exp) = expiration(token) else {
        return false;
    };
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    exp > (now + EXPIRY_MARGIN).as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt_with_exp(exp: u64) -> String {
        let header = BASE64_URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = BASE64_URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{},"typ":"Bearer"}}"#, exp));
        format!("{}.{}.signature", header, payload)
    }

    #[test]
    fn future_token_is_current() {
        assert!(is_current(&jwt_with_exp(4_102_444_800)));
    }

    #[test]
    fn expired_token_is_not_current() {
        assert!(!is_current(&jwt_with_exp(1_600_000_000)));
    }

    #[test]
    fn token_inside_margin_is_not_current() {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap();
        assert!(!is_current(&jwt_with_exp(now.as_secs() + 10)));
    }

    #[test]
    fn opaque_token_has_no_expiration() {
        assert_eq!(expiration("stale"), None);
        assert_eq!(expiration("a.b.c.d"), None);
        assert!(!is_current("not.a-jwt.token"));
    }
}
