use std::net::{IpAddr, SocketAddr};

use axum::{
    extract::{ConnectInfo, Request},
    http::header::USER_AGENT,
    middleware::Next,
    response::Response,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::info;

const UNKNOWN: &str = "Unknown";

lazy_static! {
    static ref OS_PATTERN: Regex = Regex::new(r"\(([^)]+)\)").expect("valid OS pattern");
}

/// Caller metadata derived for logging. Attached to request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub ip: String,
    pub user_agent: String,
    pub operating_system: String,
}

impl ClientInfo {
    pub fn new(peer: Option<IpAddr>, user_agent: Option<&str>) -> Self {
        let user_agent = user_agent.unwrap_or(UNKNOWN).to_string();
        Self {
            ip: peer
                .map(|ip| normalize_ip(ip).to_string())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            operating_system: operating_system(&user_agent).to_string(),
            user_agent,
        }
    }
}

/// `::ffff:a.b.c.d` becomes `a.b.c.d`; everything else is untouched.
pub fn normalize_ip(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V6(v6) => v6.to_ipv4_mapped().map(IpAddr::V4).unwrap_or(ip),
        v4 => v4,
    }
}

/// Contents of the first parenthesised group of a user-agent string.
pub fn operating_system(user_agent: &str) -> &str {
    OS_PATTERN
        .captures(user_agent)
        .and_then(|caps| caps.get(1))
        .map_or(UNKNOWN, |m| m.as_str())
}

pub async fn log_client_info(mut request: Request, next: Next) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let user_agent = request
        .headers()
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok());
    let client = ClientInfo::new(peer, user_agent);

    info!(method = %request.method(), uri = %request.uri(), "Received request");
    info!(
        ip = %client.ip,
        user_agent = %client.user_agent,
        operating_system = %client.operating_system,
        "Client info"
    );

    request.extensions_mut().insert(client);
    next.run(request).await
}
