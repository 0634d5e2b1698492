//! Validation of typed source objects

use std::time::Duration;

use crate::crd::HTTPPollerSource;
use crate::{Error, Result};

/// Methods an HTTPPollerSource may poll with
pub const HTTP_METHODS: [&str; 7] = ["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];

/// Validate an HTTPPollerSource spec
pub fn validate_http_poller_source(source: &HTTPPollerSource) -> Result<()> {
    let spec = &source.spec;

    if spec.event_type.trim().is_empty() {
        return Err(Error::ValidationError(
            "spec.eventType cannot be empty".to_string(),
        ));
    }

    if !(spec.endpoint.starts_with("http://") || spec.endpoint.starts_with("https://")) {
        return Err(Error::ValidationError(format!(
            "spec.endpoint must be an http:// or https:// URL, got '{}'",
            spec.endpoint
        )));
    }

    if !HTTP_METHODS.contains(&spec.method.as_str()) {
        return Err(Error::ValidationError(format!(
            "spec.method must be one of: {:?}",
            HTTP_METHODS
        )));
    }

    match parse_duration(&spec.interval) {
        Some(interval) if !interval.is_zero() => {}
        _ => {
            return Err(Error::ValidationError(format!(
                "spec.interval must be a positive duration such as 10s or 1m30s, got '{}'",
                spec.interval
            )))
        }
    }

    if spec.sink.ref_.is_none() && spec.sink.uri.is_none() {
        return Err(Error::ValidationError(
            "spec.sink requires either ref or uri".to_string(),
        ));
    }

    if let Some(password) = &spec.basic_auth_password {
        if password.value.is_none() && password.value_from_secret.is_none() {
            return Err(Error::ValidationError(
                "spec.basicAuthPassword requires either value or valueFromSecret".to_string(),
            ));
        }
    }

    Ok(())
}

/// Parse a duration made of `<n><unit>` segments, units `ms`, `s`, `m`, `h`
///
/// Returns `None` for anything else, including the empty string.
pub fn parse_duration(input: &str) -> Option<Duration> {
    if input.is_empty() {
        return None;
    }

    let mut total = Duration::ZERO;
    let mut rest = input;

    while !rest.is_empty() {
        let digits = rest.find(|c: char| !c.is_ascii_digit())?;
        if digits == 0 {
            return None;
        }
        let value: u64 = rest[..digits].parse().ok()?;
        rest = &rest[digits..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(rest.len());
        let segment = match &rest[..unit_len] {
            "ms" => Duration::from_millis(value),
            "s" => Duration::from_secs(value),
            "m" => Duration::from_secs(value.checked_mul(60)?),
            "h" => Duration::from_secs(value.checked_mul(3600)?),
            _ => return None,
        };
        total = total.checked_add(segment)?;
        rest = &rest[unit_len..];
    }

    Some(total)
}
