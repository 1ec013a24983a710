use chrono::{DateTime, Utc};
use std::net::IpAddr;

/// Source of the current instant, passed explicitly so results are reproducible.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub trait ServerSettings: Send + Sync {
    fn host(&self) -> &str;
    fn port(&self) -> u16;
    fn allowed_origins(&self) -> &[String];
    fn json_logs(&self) -> bool;

    /// `host:port`, with IPv6 literals bracketed whether or not the
    /// configured host already was.
    fn bind_address(&self) -> String {
        let host = self.host();
        let unbracketed = host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(host);

        match unbracketed.parse::<IpAddr>() {
            Ok(IpAddr::V6(addr)) => format!("[{}]:{}", addr, self.port()),
            _ => format!("{}:{}", host, self.port()),
        }
    }

    /// True when no origin list is configured or it contains `*`.
    fn allows_any_origin(&self) -> bool {
        let origins = self.allowed_origins();
        origins.is_empty() || origins.iter().any(|o| o == "*")
    }
}
