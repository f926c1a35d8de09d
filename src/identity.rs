use rand::Rng;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};

use crate::config::Config;
use crate::consts;

const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");
const X_REAL_IP: HeaderName = HeaderName::from_static("x-real-ip");

/// Single-use guest credentials for one upstream call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestIdentity {
    /// `guest_` followed by 32 lowercase hex digits.
    pub guest_id: String,
    /// Dotted-quad string sent in forwarded-IP headers. Never used for networking.
    pub forwarded_ip: String,
}

impl GuestIdentity {
    pub fn new() -> Self {
        Self::generate(&mut rand::thread_rng())
    }

    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let hex: String = (0..32)
            .map(|_| char::from_digit(rng.gen_range(0..16), 16).unwrap_or('0'))
            .collect();
        let forwarded_ip = (0..4)
            .map(|_| rng.gen_range(0..255u8).to_string())
            .collect::<Vec<_>>()
            .join(".");

        Self {
            guest_id: format!("{}{}", consts::GUEST_ID_PREFIX, hex),
            forwarded_ip,
        }
    }

    pub fn bearer_token(&self) -> String {
        format!("Bearer {}{}", consts::GUEST_TOKEN_PREFIX, self.guest_id)
    }
}

impl Default for GuestIdentity {
    fn default() -> Self {
        Self::new()
    }
}

/// Browser-like header set attached to every upstream call.
///
/// Values that are not valid header text (e.g. a user agent with control
/// characters) are left out rather than failing the request.
pub fn upstream_headers(identity: &GuestIdentity, config: &Config) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    let values = [
        (header::AUTHORIZATION, identity.bearer_token()),
        (header::USER_AGENT, config.user_agent.clone()),
        (header::ORIGIN, config.upstream_url.clone()),
        (header::REFERER, format!("{}/", config.upstream_url)),
        (X_FORWARDED_FOR, identity.forwarded_ip.clone()),
        (X_REAL_IP, identity.forwarded_ip.clone()),
    ];
    for (name, value) in values {
        match HeaderValue::from_str(&value) {
            Ok(value) => {
                headers.insert(name, value);
            }
            Err(_) => log::warn!("skipping invalid upstream header value for {name}"),
        }
    }

    headers
}
