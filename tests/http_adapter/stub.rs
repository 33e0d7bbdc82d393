//! Minimal HTTP/1.1 stub adapter for integration tests.
//!
//! The stub answers scripted routes, records every request it sees and
//! closes each connection after one response. Unscripted routes answer
//! `404`.

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Credentials the tests present to stub adapters.
pub const USERNAME: &str = "aggregator";
/// Password paired with [`USERNAME`].
pub const PASSWORD: &str = "secret";
/// Expected `Authorization` header for [`USERNAME`] and [`PASSWORD`].
pub const BASIC_AUTH: &str = "Basic YWdncmVnYXRvcjpzZWNyZXQ=";

/// A request as seen by the stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: String,
    /// Request path.
    pub path: String,
    /// `Authorization` header, when present.
    pub authorization: Option<String>,
}

#[derive(Debug, Clone)]
struct Reply {
    status: u16,
    body: String,
}

type Routes = HashMap<(String, String), Reply>;

/// Builder for a [`StubAdapter`].
#[derive(Debug, Default)]
pub struct StubAdapterBuilder {
    routes: Routes,
}

impl StubAdapterBuilder {
    /// Answers `method path` with `status` and a JSON `body`.
    #[must_use]
    pub fn route(mut self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.routes.insert(
            (method.to_owned(), path.to_owned()),
            Reply {
                status,
                body: body.to_owned(),
            },
        );
        self
    }

    /// Binds an ephemeral local port and starts serving.
    pub async fn start(self) -> io::Result<StubAdapter> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let address = format!("http://{}", listener.local_addr()?);
        let requests = Arc::new(Mutex::new(Vec::new()));
        let routes = Arc::new(self.routes);

        let recorded = Arc::clone(&requests);
        let server = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let connection_routes = Arc::clone(&routes);
                let connection_requests = Arc::clone(&recorded);
                tokio::spawn(async move {
                    if let Err(err) =
                        serve(stream, &connection_routes, &connection_requests).await
                    {
                        tracing::debug!(%err, "stub connection failed");
                    }
                });
            }
        });

        Ok(StubAdapter {
            address,
            requests,
            server,
        })
    }
}

/// Running stub adapter; stops serving when dropped.
pub struct StubAdapter {
    address: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    server: JoinHandle<()>,
}

impl StubAdapter {
    /// Starts describing a stub.
    #[must_use]
    pub fn builder() -> StubAdapterBuilder {
        StubAdapterBuilder::default()
    }

    /// Returns the base address, e.g. `http://127.0.0.1:40123`.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the requests received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("request log lock").clone()
    }
}

impl Drop for StubAdapter {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// Returns an address nothing is listening on.
pub async fn unreachable_address() -> io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = format!("http://{}", listener.local_addr()?);
    drop(listener);
    Ok(address)
}

async fn serve(
    stream: TcpStream,
    routes: &Routes,
    requests: &Mutex<Vec<RecordedRequest>>,
) -> io::Result<()> {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_owned();
    let path = parts.next().unwrap_or_default().to_owned();

    let mut authorization = None;
    let mut content_length = 0_usize;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header).await? == 0 || header.trim().is_empty() {
            break;
        }
        let Some((name, value)) = header.split_once(':') else {
            continue;
        };
        if name.eq_ignore_ascii_case("authorization") {
            authorization = Some(value.trim().to_owned());
        } else if name.eq_ignore_ascii_case("content-length") {
            content_length = value.trim().parse().unwrap_or_default();
        }
    }
    let mut body = vec![0_u8; content_length];
    reader.read_exact(&mut body).await?;

    let reply = routes
        .get(&(method.clone(), path.clone()))
        .cloned()
        .unwrap_or(Reply {
            status: 404,
            body: String::from(r#"{"error":"not found"}"#),
        });
    requests.lock().expect("request log lock").push(RecordedRequest {
        method,
        path,
        authorization,
    });

    let response = format!(
        "HTTP/1.1 {} STUB\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        reply.status,
        reply.body.len(),
        reply.body
    );
    let mut stream = reader.into_inner();
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}
