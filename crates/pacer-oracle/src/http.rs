//! Shared HTTP response helpers for the LLM transport.
//!
//! 429 becomes [`OracleError::RateLimited`] with `Retry-After` parsing;
//! any other non-success status becomes [`OracleError::Api`].

use crate::error::OracleError;

/// Seconds to wait when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Return the response unchanged on success, or the matching error.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, OracleError> {
    if resp.status() == 429 {
        return Err(OracleError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        return Err(OracleError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn mock_response(status: u16, retry_after: Option<&str>, body: &'static str) -> reqwest::Response {
        let mut builder = ::http::Response::builder().status(status);
        if let Some(value) = retry_after {
            builder = builder.header("Retry-After", value);
        }
        reqwest::Response::from(builder.body(body).unwrap())
    }

    #[rstest]
    #[case::numeric(Some("120"), 120)]
    #[case::missing(None, 60)]
    #[case::http_date(Some("Wed, 21 Oct 2026 07:28:00 GMT"), 60)]
    fn retry_after_header(#[case] header: Option<&str>, #[case] expected: u64) {
        let resp = mock_response(429, header, "");
        assert_eq!(parse_retry_after(&resp), expected);
    }

    #[tokio::test]
    async fn rate_limited_maps_to_variant() {
        let err = check_response(mock_response(429, Some("30"), ""))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            OracleError::RateLimited {
                retry_after_secs: 30
            }
        ));
    }

    #[tokio::test]
    async fn server_error_keeps_body() {
        let err = check_response(mock_response(503, None, "overloaded"))
            .await
            .unwrap_err();
        match err {
            OracleError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "overloaded");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn success_passes_through() {
        assert!(check_response(mock_response(200, None, "{}")).await.is_ok());
    }
}
