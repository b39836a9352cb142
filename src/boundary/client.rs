//! Blocking REST client for the boundary service

use std::collections::HashSet;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use super::model::{BoundaryDto, BoundaryInfo};
use crate::{Error, Result};

/// Version prefix of every endpoint
pub const API_VERSION: &str = "v1";

/// Upper bound on a whole request, body included
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the boundary service.
///
/// Holds one HTTP client for its whole life so connections are reused
/// across calls. Safe to share between threads.
#[derive(Debug, Clone)]
pub struct BoundaryClient {
    base: Url,
    http: Client,
}

impl BoundaryClient {
    /// Create a client for the service rooted at `service_url`
    pub fn new(service_url: &str) -> Result<Self> {
        Self::with_timeout(service_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(service_url: &str, timeout: Duration) -> Result<Self> {
        let base = parse_service_url(service_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .build()?;
        Ok(Self { base, http })
    }

    pub fn service_url(&self) -> &str {
        self.base.as_str()
    }

    /// Fetch one boundary file by id
    pub fn get_boundary(&self, id: &str) -> Option<BoundaryInfo> {
        let what = format!("boundary with id {}", id);
        self.fetch::<BoundaryDto>(self.endpoint(&["boundaries", id]), &what)
            .map(BoundaryInfo::from)
    }

    /// Fetch the latest boundary files
    pub fn get_last_boundaries(&self) -> Vec<BoundaryInfo> {
        self.fetch::<Vec<BoundaryDto>>(self.endpoint(&["boundaries", "last"]), "last boundaries")
            .map(|boundaries| boundaries.into_iter().map(BoundaryInfo::from).collect())
            .unwrap_or_default()
    }

    pub fn get_tsos_list(&self) -> HashSet<String> {
        self.get_list("tsos")
    }

    pub fn get_business_processes_list(&self) -> HashSet<String> {
        self.get_list("business-processes")
    }

    fn get_list(&self, list_name: &str) -> HashSet<String> {
        let what = format!("list of {}", list_name);
        self.fetch::<HashSet<String>>(self.endpoint(&[list_name]), &what)
            .unwrap_or_default()
    }

    /// `{base}v1/{segments...}`, each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push(API_VERSION).extend(segments);
        }
        url
    }

    /// GET `url` and decode a 200 body. Every failure is logged and
    /// reported as `None`.
    fn fetch<T: DeserializeOwned>(&self, url: Url, what: &str) -> Option<T> {
        let response = match self.http.get(url).send() {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                tracing::error!("Timeout when getting {}: {}", what, e);
                return None;
            }
            Err(e) => {
                tracing::error!("I/O error while getting {}: {}", what, e);
                return None;
            }
        };

        let status = response.status();
        tracing::info!("Cgmes boundary server response status: {}", status.as_u16());
        if status != StatusCode::OK {
            return None;
        }

        match response.json::<T>() {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::error!("Unreadable response while getting {}: {}", what, e);
                None
            }
        }
    }
}

fn parse_service_url(service_url: &str) -> Result<Url> {
    let mut url = Url::parse(service_url.trim())
        .map_err(|e| Error::InvalidServiceUrl(format!("{}: {}", service_url, e)))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(Error::InvalidServiceUrl(format!(
            "{}: expected an http(s) base URL",
            service_url
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_appends_version() {
        let client = BoundaryClient::new("http://localhost:5000/").unwrap();
        assert_eq!(
            client.endpoint(&["boundaries", "last"]).as_str(),
            "http://localhost:5000/v1/boundaries/last"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = BoundaryClient::new("http://gateway/cgmes-boundary").unwrap();
        assert_eq!(client.service_url(), "http://gateway/cgmes-boundary/");
        assert_eq!(
            client.endpoint(&["business-processes"]).as_str(),
            "http://gateway/cgmes-boundary/v1/business-processes"
        );
    }

    #[test]
    fn test_endpoint_encodes_id() {
        let client = BoundaryClient::new("http://localhost:5000/").unwrap();
        assert_eq!(
            client.endpoint(&["boundaries", "a b/c"]).as_str(),
            "http://localhost:5000/v1/boundaries/a%20b%2Fc"
        );
    }

    #[test]
    fn test_rejects_bad_service_url() {
        assert!(matches!(BoundaryClient::new("not a url"), Err(Error::InvalidServiceUrl(_))));
        assert!(matches!(BoundaryClient::new("mailto:ops@example.com"), Err(Error::InvalidServiceUrl(_))));
    }
}
