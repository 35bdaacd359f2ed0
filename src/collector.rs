//! One-shot collection orchestration.

use tracing::debug;

use crate::catalog::Endpoint;
use crate::client::ManagementClient;
use crate::error::CollectError;
use crate::extract;
use crate::metric::Metric;
use crate::request::Request;

/// Runs one collection pass for a request.
#[derive(Debug)]
pub struct Collector {
    client: ManagementClient,
    request: Request,
}

impl Collector {
    pub fn new(request: Request) -> Result<Self, CollectError> {
        let client = ManagementClient::new(&request)?;
        Ok(Self { client, request })
    }

    /// The request this collector was built for.
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Fetch both endpoints concurrently and extract the requested
    /// metrics.
    ///
    /// Both requests are always issued and carry no ordering guarantee
    /// between their completions. The overview result is inspected
    /// first, so when both endpoints fail the overview error wins. On
    /// success the combined metrics are in catalog order.
    pub async fn collect(&self) -> Result<Vec<Metric>, CollectError> {
        let (overview, nodes) = tokio::join!(
            self.collect_endpoint(Endpoint::Overview),
            self.collect_endpoint(Endpoint::Nodes),
        );

        let mut metrics = overview?;
        metrics.extend(nodes?);

        debug!(count = metrics.len(), "collection pass complete");
        Ok(metrics)
    }

    async fn collect_endpoint(&self, endpoint: Endpoint) -> Result<Vec<Metric>, CollectError> {
        let fetched = self.client.fetch(endpoint).await?;
        match endpoint {
            Endpoint::Overview => {
                extract::overview_metrics(&fetched.body, &self.request, fetched.timing)
            }
            Endpoint::Nodes => extract::node_metrics(&fetched.body, &self.request, fetched.timing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MetricId;
    use crate::request::DEFAULT_PORT;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const OVERVIEW: &str = r#"{
        "queue_totals": {
            "messages": 42,
            "messages_ready": 10,
            "messages_unacknowledged": 2,
            "messages_details": {"rate": 1.5},
            "messages_ready_details": {"rate": 0.5},
            "messages_unacknowledged_details": {"rate": 0.1}
        }
    }"#;

    const NODES: &str = r#"[{"mem_used": 104857600}]"#;

    /// Serve canned management API documents for `connections`
    /// connections on an ephemeral port, routing by request path.
    async fn serve_api(overview: &'static str, nodes: &'static str, connections: usize) -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            for _ in 0..connections {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut buf = vec![0u8; 4096];
                let n = socket.read(&mut buf).await.unwrap();
                let head = String::from_utf8_lossy(&buf[..n]).to_string();

                let (status, body) = if head.starts_with("GET /api/overview") {
                    ("200 OK", overview)
                } else if head.starts_with("GET /api/nodes") {
                    ("200 OK", nodes)
                } else {
                    ("404 Not Found", "")
                };

                let response = format!(
                    "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                socket.write_all(response.as_bytes()).await.unwrap();
            }
        });

        port
    }

    fn request_for(port: u16, state: &str) -> Request {
        let args = vec![
            state.to_string(),
            "127.0.0.1".to_string(),
            port.to_string(),
            "guest".to_string(),
            "guest".to_string(),
        ];
        Request::from_args(&args, DEFAULT_PORT).unwrap()
    }

    #[tokio::test]
    async fn collects_all_seven_metrics_in_catalog_order() {
        let port = serve_api(OVERVIEW, NODES, 2).await;
        let collector = Collector::new(request_for(port, "1,1,1,1,1,1,1")).unwrap();

        let metrics = collector.collect().await.unwrap();

        let ids: Vec<MetricId> = metrics.iter().map(|m| m.id).collect();
        assert_eq!(ids, MetricId::ALL.to_vec());

        let values: Vec<String> = metrics.iter().map(|m| m.value.to_string()).collect();
        assert_eq!(values, ["42", "10", "2", "1.5", "0.5", "0.1", "100"]);
    }

    #[tokio::test]
    async fn line_count_never_exceeds_the_requested_subset() {
        let port = serve_api(OVERVIEW, NODES, 2).await;
        let collector = Collector::new(request_for(port, "1,0,1,0,0,0,1")).unwrap();

        let metrics = collector.collect().await.unwrap();
        assert_eq!(metrics.len(), 3);
    }

    #[tokio::test]
    async fn both_endpoints_are_fetched_even_when_one_side_is_disabled() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let hits = Arc::new(AtomicUsize::new(0));
        let served = hits.clone();

        tokio::spawn(async move {
            for _ in 0..2 {
                let (mut socket, _) = listener.accept().await.unwrap();
                served.fetch_add(1, Ordering::SeqCst);
                let mut buf = vec![0u8; 4096];
                let n = socket.read(&mut buf).await.unwrap();
                let head = String::from_utf8_lossy(&buf[..n]).to_string();

                let body = if head.starts_with("GET /api/nodes") { NODES } else { OVERVIEW };
                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                socket.write_all(response.as_bytes()).await.unwrap();
            }
        });

        let collector = Collector::new(request_for(port, "1,1,1,1,1,1,0")).unwrap();
        let metrics = collector.collect().await.unwrap();

        assert_eq!(metrics.len(), 6);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn authentication_failure_from_the_nodes_endpoint_aborts() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            for _ in 0..2 {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut buf = vec![0u8; 4096];
                let n = socket.read(&mut buf).await.unwrap();
                let head = String::from_utf8_lossy(&buf[..n]).to_string();

                let (status, body) = if head.starts_with("GET /api/nodes") {
                    ("401 Unauthorized", "")
                } else {
                    ("200 OK", OVERVIEW)
                };
                let response = format!(
                    "HTTP/1.1 {status}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                socket.write_all(response.as_bytes()).await.unwrap();
            }
        });

        let collector = Collector::new(request_for(port, "1,1,1,1,1,1,1")).unwrap();
        let err = collector.collect().await.unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn schema_mismatch_surfaces_as_metric_not_found() {
        let port = serve_api(r#"{"queue_totals": {}}"#, NODES, 2).await;
        let collector = Collector::new(request_for(port, "1,0,0,0,0,0,0")).unwrap();

        let err = collector.collect().await.unwrap_err();
        assert!(matches!(err, CollectError::MetricNotFound("33:Total messages")));
    }
}
