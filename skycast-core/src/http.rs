use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Error, Result};

const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("skycast/", env!("CARGO_PKG_VERSION"));

/// Thin GET-and-decode wrapper shared by both provider adapters.
///
/// One request per call: no retries, no caching. The only deadline is the
/// transport-level client timeout.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
}

impl ApiClient {
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { http })
    }

    /// GET `base_url` + `path` with the given query pairs and decode the JSON body.
    ///
    /// Non-2xx responses keep the status, the request path and a truncated body
    /// in the error so the caller can tell quota problems from bad requests.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        base_url: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = build_url(base_url, path, query)?;
        debug!(%path, "issuing GET");

        let res = self.http.get(url).send().await?;
        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                path: path.to_string(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| Error::Decode {
            path: path.to_string(),
            source,
            body: truncate_body(&body),
        })
    }
}

/// Join `path` onto `base_url` and append the query pairs.
///
/// `path` is expected to be absolute ("/data/2.5/onecall"); key order in
/// `query` is irrelevant to the providers.
pub(crate) fn build_url(base_url: &str, path: &str, query: &[(&str, String)]) -> Result<Url> {
    let mut url = Url::parse(base_url)?.join(path)?;

    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }

    Ok(url)
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = body
            .char_indices()
            .take_while(|(i, _)| *i <= MAX)
            .last()
            .map_or(0, |(i, _)| i);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
