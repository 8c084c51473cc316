//! Pagination over list endpoints.
//!
//! List endpoints answer with one page of results and a `next` link. The
//! client keeps following the `page` parameter of that link until it is gone,
//! one request at a time, since each cursor comes from the previous body.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::client::{Client, ClientError};
use crate::query::{get_page_num, Params};

/// One page of a list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of results across all pages
    #[serde(default)]
    pub count: Option<u64>,

    /// Link to the next page, absent on the last one
    #[serde(default)]
    pub next: Option<String>,

    #[serde(default)]
    pub previous: Option<String>,

    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Cursor for the next page, empty when this is the last page.
    pub fn next_page(&self) -> String {
        self.next.as_deref().map(get_page_num).unwrap_or_default()
    }
}

impl Client {
    /// Fetch every page of `path` and return all results in fetch order.
    ///
    /// `params` may already hold a `page` to start from. A failure on any
    /// page fails the whole call, as does a `next` link pointing back to a
    /// page already fetched.
    pub async fn fetch_all<T>(&self, path: &str, params: &Params) -> Result<Vec<T>, ClientError>
    where
        T: DeserializeOwned,
    {
        let mut query = params.clone();
        let mut results = Vec::new();
        let mut seen: HashSet<String> = query.get("page").cloned().into_iter().collect();

        loop {
            let page: Page<T> = self.get_json(path, &query).await?;
            let cursor = page.next_page();
            results.extend(page.results);

            if cursor.is_empty() {
                break;
            }

            if !seen.insert(cursor.clone()) {
                return Err(ClientError::RepeatedPage(cursor));
            }

            self.debug(format_args!("next page={}", cursor));
            query.insert("page".to_string(), cursor);
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::ScriptedTransport;
    use crate::http::RawResponse;
    use crate::options::Config;
    use serde_json::json;

    fn page(results: serde_json::Value, next: Option<&str>) -> RawResponse {
        let body = json!({
            "count": 3,
            "next": next,
            "previous": null,
            "results": results,
        });
        RawResponse::new(200, body.to_string())
    }

    fn client(transport: ScriptedTransport) -> Client {
        Client::with_transport(
            vec![Config::default()
                .with_api_key("foo")
                .with_endpoint("http://atlas.test")],
            transport,
        )
    }

    #[test]
    fn test_next_page() {
        let page: Page<u32> = Page {
            count: None,
            next: Some("https://atlas.ripe.net/api/v2/probes/?page=3&asn=1".to_string()),
            previous: None,
            results: vec![],
        };
        assert_eq!(page.next_page(), "3");

        let last: Page<u32> = serde_json::from_str(r#"{"results": [1, 2]}"#).unwrap();
        assert_eq!(last.next_page(), "");
        assert_eq!(last.results, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_fetch_all_single_page() {
        let transport = ScriptedTransport::new(vec![page(json!([1, 2, 3]), None)]);
        let client = client(transport.clone());

        let results: Vec<u32> = client.fetch_all("/probes/", &Params::new()).await.unwrap();
        assert_eq!(results, vec![1, 2, 3]);
        assert_eq!(transport.urls(), vec!["http://atlas.test/probes/?key=foo"]);
    }

    #[tokio::test]
    async fn test_fetch_all_follows_next() {
        let transport = ScriptedTransport::new(vec![
            page(json!([1, 2]), Some("https://atlas.ripe.net/api/v2/probes/?country_code=fr&page=2")),
            page(json!([3]), None),
            page(json!([99]), None),
        ]);
        let client = client(transport.clone());

        let mut params = Params::new();
        params.insert("country_code".to_string(), "fr".to_string());

        let results: Vec<u32> = client.fetch_all("/probes/", &params).await.unwrap();
        assert_eq!(results, vec![1, 2, 3]);
        assert_eq!(
            transport.urls(),
            vec![
                "http://atlas.test/probes/?country_code=fr&key=foo",
                "http://atlas.test/probes/?country_code=fr&key=foo&page=2",
            ]
        );
        assert!(!params.contains_key("page"));
    }

    #[tokio::test]
    async fn test_fetch_all_starts_at_given_page() {
        let transport = ScriptedTransport::new(vec![page(json!([7]), None)]);
        let client = client(transport.clone());

        let mut params = Params::new();
        params.insert("page".to_string(), "4".to_string());

        let results: Vec<u32> = client.fetch_all("/probes/", &params).await.unwrap();
        assert_eq!(results, vec![7]);
        assert_eq!(transport.urls(), vec!["http://atlas.test/probes/?key=foo&page=4"]);
    }

    #[tokio::test]
    async fn test_fetch_all_stops_on_empty_cursor() {
        let transport = ScriptedTransport::new(vec![
            page(json!([1]), Some("https://atlas.ripe.net/api/v2/probes/?asn=3333")),
            page(json!([2]), None),
        ]);
        let client = client(transport.clone());

        let results: Vec<u32> = client.fetch_all("/probes/", &Params::new()).await.unwrap();
        assert_eq!(results, vec![1]);
        assert_eq!(transport.urls().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_all_aborts_on_failure() {
        let transport = ScriptedTransport::new(vec![
            page(json!([1, 2]), Some("https://atlas.ripe.net/api/v2/probes/?page=2")),
            RawResponse::new(503, r#"{"error": {"status": 503, "code": 1, "detail": "down"}}"#),
        ]);
        let client = client(transport.clone());

        let result = client.fetch_all::<u32>("/probes/", &Params::new()).await;
        match result {
            Err(ClientError::Api(err)) => assert_eq!(err.detail, "down"),
            other => panic!("expected API error, got {:?}", other),
        }
        assert_eq!(transport.urls().len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_all_bad_page_body() {
        let transport = ScriptedTransport::new(vec![RawResponse::new(200, "<html>")]);
        let client = client(transport);

        let result = client.fetch_all::<u32>("/probes/", &Params::new()).await;
        assert!(matches!(result, Err(ClientError::Parse(_))));
    }

    #[tokio::test]
    async fn test_fetch_all_transport_failure() {
        let client = client(ScriptedTransport::default());

        let result = client.fetch_all::<u32>("/probes/", &Params::new()).await;
        assert!(matches!(result, Err(ClientError::NoResponse)));
    }

    #[tokio::test]
    async fn test_fetch_all_repeated_cursor() {
        let repeated = (0..50)
            .map(|_| page(json!([1]), Some("http://x/p/?page=2")))
            .collect();
        let transport = ScriptedTransport::new(repeated);
        let client = client(transport.clone());

        let result = client.fetch_all::<u32>("/probes/", &Params::new()).await;
        assert!(matches!(result, Err(ClientError::RepeatedPage(ref page)) if page == "2"));
        assert_eq!(transport.urls().len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_all_next_points_to_start_page() {
        let transport = ScriptedTransport::new(vec![
            page(json!([1]), Some("http://x/p/?page=3")),
            page(json!([2]), None),
        ]);
        let client = client(transport.clone());

        let mut params = Params::new();
        params.insert("page".to_string(), "3".to_string());

        let result = client.fetch_all::<u32>("/probes/", &params).await;
        assert!(matches!(result, Err(ClientError::RepeatedPage(_))));
        assert_eq!(transport.urls().len(), 1);
    }
}
