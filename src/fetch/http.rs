//! Stock [`Transport`] backed by `reqwest`.

use reqwest::header::{ACCEPT, CONTENT_TYPE};

use super::transport::{FetchRequest, Response, Transport, TransportError};

/// HTTP transport with a cookie store, so same-origin credentials follow
/// every request.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|err| TransportError(err.to_string()))?;
        Ok(Self { client })
    }

    /// Use a preconfigured client (proxies, custom TLS roots...).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn get(&self, request: &FetchRequest) -> Result<Response, TransportError> {
        let response = self
            .client
            .get(request.url.clone())
            .header(ACCEPT, "text/html")
            .send()
            .await
            .map_err(|err| TransportError(err.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .map_err(|err| TransportError(err.to_string()))?
            .to_vec();

        Ok(Response {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use tiny_http::{Header, Response as HttpResponse, Server, StatusCode};
    use url::Url;

    use super::*;

    /// Serve `count` requests: `/missing` gets a 404, everything else a page.
    fn serve(count: usize) -> (Url, thread::JoinHandle<()>) {
        let server = Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let handle = thread::spawn(move || {
            for _ in 0..count {
                let Ok(request) = server.recv() else { return };
                let status = if request.url() == "/missing" { 404 } else { 200 };
                let header = Header::from_bytes("Content-Type", "text/html; charset=utf-8").unwrap();
                let response = HttpResponse::from_string("<main><p>served</p></main>")
                    .with_status_code(StatusCode(status))
                    .with_header(header);
                request.respond(response).unwrap();
            }
        });
        (Url::parse(&format!("http://{addr}/")).unwrap(), handle)
    }

    #[tokio::test]
    async fn test_get_page() {
        let (base, handle) = serve(1);
        let transport = HttpTransport::new().unwrap();

        let response = transport
            .get(&FetchRequest::same_origin(base.join("/about").unwrap()))
            .await
            .unwrap();

        assert!(response.is_success());
        assert_eq!(
            response.content_type.as_deref(),
            Some("text/html; charset=utf-8")
        );
        assert_eq!(response.body, b"<main><p>served</p></main>");
        handle.join().unwrap();
    }

    #[tokio::test]
    async fn test_status_is_reported_not_failed() {
        let (base, handle) = serve(1);
        let transport = HttpTransport::new().unwrap();

        let response = transport
            .get(&FetchRequest::same_origin(base.join("/missing").unwrap()))
            .await
            .unwrap();

        assert_eq!(response.status, 404);
        handle.join().unwrap();
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Bind then drop to get a port nobody listens on
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let transport = HttpTransport::new().unwrap();
        let url = Url::parse(&format!("http://127.0.0.1:{port}/")).unwrap();

        assert!(transport.get(&FetchRequest::same_origin(url)).await.is_err());
    }
}
