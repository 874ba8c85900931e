use reqwest::{header, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::errors::ClientError;

use super::models::ErrorBody;

pub(crate) fn endpoint(base: &Url, path: &str) -> Result<Url, ClientError> {
    base.join(path)
        .map_err(|e| ClientError::Validation(format!("invalid endpoint {}{}: {}", base, path, e)))
}

pub(crate) fn with_bearer(req: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    let req = req.header(header::ACCEPT, "application/json");
    match token {
        Some(token) => req.bearer_auth(token),
        None => req,
    }
}

/// Sends the request and turns any non-2xx answer into a `ClientError`.
/// A 401/403 only counts as `Unauthorized` when a bearer token was attached.
pub(crate) async fn send(
    req: RequestBuilder,
    authenticated: bool,
) -> Result<Response, ClientError> {
    let resp = req.send().await?;
    let status = resp.status();
    log::debug!("{} {}", status.as_u16(), resp.url());

    if status.is_success() {
        return Ok(resp);
    }

    if authenticated && (status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN) {
        log::warn!("{} rejected the session with {}", resp.url(), status);
        return Err(ClientError::Unauthorized {
            status: status.as_u16(),
        });
    }

    let body = resp.text().await.unwrap_or_default();
    let error = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error);
    log::warn!("request failed with {}: {}", status, body.trim());
    Err(ClientError::Http {
        status: status.as_u16(),
        error,
        body,
    })
}

pub(crate) async fn send_json<T: DeserializeOwned>(
    req: RequestBuilder,
    authenticated: bool,
) -> Result<T, ClientError> {
    let resp = send(req, authenticated).await?;
    let bytes = resp.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_replaces_base_path() {
        let base = Url::parse("http://localhost:8082/ignored/").unwrap();
        let url = endpoint(&base, "/api/products").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8082/api/products");
    }
}
