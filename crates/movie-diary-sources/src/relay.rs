use crate::error::SourceError;
use reqwest::Client;
use std::future::Future;
use tracing::{debug, warn};

/// Ordered chain of CORS relay endpoints. A proxied URL is the endpoint
/// followed by the percent-encoded target; endpoints are tried in sequence
/// until one returns a payload containing the expected structural marker.
///
/// Upstream markup changes and flaky relays are both expected, so a payload
/// without the marker counts as a failed relay, not a fatal error.
#[derive(Debug, Clone)]
pub struct RelayChain {
    endpoints: Vec<String>,
}

impl RelayChain {
    pub fn new(endpoints: Vec<String>) -> Self {
        Self { endpoints }
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    pub fn proxied_url(endpoint: &str, target: &str) -> String {
        format!("{}{}", endpoint, urlencoding::encode(target))
    }

    /// Fetch `target` through the chain with a shared HTTP client.
    pub async fn fetch(
        &self,
        client: &Client,
        target: &str,
        marker: &str,
    ) -> Result<String, SourceError> {
        self.fetch_with(target, marker, |url| async move {
            let response = client.get(&url).send().await?;
            Ok(response.error_for_status()?.text().await?)
        })
        .await
    }

    /// Chain logic generic over the page getter, so relay selection is
    /// testable without a network.
    pub async fn fetch_with<G, Fut>(
        &self,
        target: &str,
        marker: &str,
        get: G,
    ) -> Result<String, SourceError>
    where
        G: Fn(String) -> Fut,
        Fut: Future<Output = Result<String, SourceError>>,
    {
        for (index, endpoint) in self.endpoints.iter().enumerate() {
            let url = Self::proxied_url(endpoint, target);
            debug!(
                relay = index + 1,
                total = self.endpoints.len(),
                endpoint = endpoint.as_str(),
                "trying relay"
            );
            match get(url).await {
                Ok(body) if body.contains(marker) => {
                    debug!(endpoint = endpoint.as_str(), bytes = body.len(), "relay succeeded");
                    return Ok(body);
                }
                Ok(_) => {
                    warn!(
                        endpoint = endpoint.as_str(),
                        "relay returned a payload without the expected marker"
                    );
                }
                Err(e) => {
                    warn!(endpoint = endpoint.as_str(), error = %e, "relay fetch failed");
                }
            }
        }
        Err(SourceError::RelaysExhausted {
            url: target.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_chain() -> RelayChain {
        RelayChain::new(vec![
            "https://relay-one.test/?".to_string(),
            "https://relay-two.test/?".to_string(),
            "https://relay-three.test/?".to_string(),
        ])
    }

    #[test]
    fn test_proxied_url_percent_encodes_target() {
        let url = RelayChain::proxied_url(
            "https://relay-one.test/?",
            "https://letterboxd.com/user/rss/",
        );
        assert_eq!(
            url,
            "https://relay-one.test/?https%3A%2F%2Fletterboxd.com%2Fuser%2Frss%2F"
        );
    }

    #[tokio::test]
    async fn test_first_two_relays_fail_third_succeeds() {
        let chain = create_chain();
        let body = chain
            .fetch_with("https://letterboxd.com/user/rss/", "<item>", |url| async move {
                if url.starts_with("https://relay-three.test/") {
                    Ok("<rss><item>letterboxd</item></rss>".to_string())
                } else {
                    Err(SourceError::Lookup("connection refused".to_string()))
                }
            })
            .await
            .unwrap();
        assert!(body.contains("<item>"));
    }

    #[tokio::test]
    async fn test_payload_without_marker_counts_as_failure() {
        let chain = create_chain();
        let result = chain
            .fetch_with("https://letterboxd.com/user/rss/", "<item>", |_url| async move {
                Ok("<html>relay error page</html>".to_string())
            })
            .await;
        assert!(matches!(result, Err(SourceError::RelaysExhausted { .. })));
    }

    #[tokio::test]
    async fn test_all_relays_failing_exhausts_the_chain() {
        let chain = create_chain();
        let result = chain
            .fetch_with("https://letterboxd.com/user/rss/", "<item>", |_url| async move {
                Err(SourceError::Lookup("timeout".to_string()))
            })
            .await;
        match result {
            Err(SourceError::RelaysExhausted { url }) => {
                assert_eq!(url, "https://letterboxd.com/user/rss/");
            }
            other => panic!("expected RelaysExhausted, got {:?}", other.map(|_| ())),
        }
    }
}
