//! Native HTTP server implementation
//!
//! Drives a [`Mux`] over HTTP/1.1 with hyper:
//! - Multi-threaded tokio runtime, one task per connection
//! - SO_REUSEADDR so restarts don't trip over TIME_WAIT
//! - TCP_NODELAY for low latency
//! - Optional connection-context hook run once per accepted connection

use crate::{Error, Method, Mux, Request, Response, Result, StatusCode};
use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use socket2::{Domain, Protocol, Socket, Type};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub hostname: String,
    /// Runtime worker threads, used by whoever builds the runtime
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            hostname: "0.0.0.0".to_string(),
            workers: num_cpus::get(),
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Socket address to bind
    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.hostname, self.port)
            .parse()
            .map_err(|e| Error::Parse(format!("bind address {}:{}: {}", self.hostname, self.port, e)))
    }
}

/// Addresses of an accepted connection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConnInfo {
    pub peer_addr: SocketAddr,
    pub local_addr: SocketAddr,
}

/// Hook run once per accepted connection
///
/// Whatever it returns is attached to every request on that connection.
pub type ConnContext = Arc<dyn Fn(ConnInfo) -> ConnInfo + Send + Sync>;

/// HTTP server dispatching every request through a [`Mux`]
pub struct Server {
    config: ServerConfig,
    mux: Arc<Mux>,
    conn_context: Option<ConnContext>,
}

impl Server {
    pub fn new(config: ServerConfig, mux: Arc<Mux>) -> Self {
        Self {
            config,
            mux,
            conn_context: None,
        }
    }

    /// Install a connection-context hook
    pub fn conn_context(mut self, hook: impl Fn(ConnInfo) -> ConnInfo + Send + Sync + 'static) -> Self {
        self.conn_context = Some(Arc::new(hook));
        self
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Bind the configured address
    pub fn bind(&self) -> Result<TcpListener> {
        let addr = self.config.addr()?;
        let socket = create_optimized_socket(&addr)?;
        let listener: std::net::TcpListener = socket.into();
        listener.set_nonblocking(true)?;
        Ok(TcpListener::from_std(listener)?)
    }

    /// Bind and serve until the process exits
    pub async fn run(self) -> Result<()> {
        let listener = self.bind()?;
        self.serve(listener).await
    }

    /// Accept connections from `listener` forever
    ///
    /// A failing connection is logged and dropped; it never stops the loop.
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let local_addr = listener.local_addr()?;
        tracing::info!(address = %local_addr, routes = self.mux.len(), "listening for connections");

        loop {
            let (stream, peer_addr) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(err) => {
                    tracing::warn!(error = %err, "failed to accept connection");
                    continue;
                }
            };

            if let Err(err) = stream.set_nodelay(true) {
                tracing::debug!(%peer_addr, error = %err, "failed to set TCP_NODELAY");
            }

            let info = ConnInfo { peer_addr, local_addr };
            let info = match &self.conn_context {
                Some(hook) => hook(info),
                None => info,
            };

            let mux = Arc::clone(&self.mux);
            tokio::spawn(async move {
                let service = service_fn(move |req| {
                    let mux = Arc::clone(&mux);
                    async move { Ok::<_, Infallible>(handle(&mux, req, info).await) }
                });

                if let Err(err) = http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), service)
                    .await
                {
                    tracing::debug!(%peer_addr, error = %err, "connection error");
                }
            });
        }
    }
}

async fn handle(mux: &Mux, req: hyper::Request<Incoming>, info: ConnInfo) -> hyper::Response<Full<Bytes>> {
    let request = match from_hyper_request(req, info).await {
        Ok(request) => request,
        Err(err) => {
            tracing::debug!(peer_addr = %info.peer_addr, error = %err, "rejected request");
            return to_hyper_response(
                crate::ResponseBuilder::new(StatusCode::BAD_REQUEST)
                    .header("content-type", "text/plain; charset=utf-8")
                    .body(err.to_string())
                    .build(),
            );
        }
    };

    to_hyper_response(mux.dispatch(request).await)
}

/// Create a TCP socket with optimizations
pub fn create_optimized_socket(addr: &SocketAddr) -> std::io::Result<Socket> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    // SO_REUSEADDR - allow binding to address in TIME_WAIT
    socket.set_reuse_address(true)?;

    // TCP_NODELAY - disable Nagle's algorithm for lower latency
    socket.set_nodelay(true)?;

    socket.bind(&(*addr).into())?;
    socket.listen(1024)?;

    Ok(socket)
}

/// Convert hyper request to our Request type, collecting the body
///
/// Any method token hyper accepts is carried through; only a failing body
/// read is an error.
pub async fn from_hyper_request(req: hyper::Request<Incoming>, info: ConnInfo) -> Result<Request> {
    let (parts, body) = req.into_parts();
    let method: Method = parts.method.as_str().parse()?;
    let target = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    let mut request = Request::new(method, target);
    request.remote_addr = Some(info.peer_addr);

    for (name, value) in &parts.headers {
        request.headers.push((name.to_string(), header_value(value)));
    }

    request.body = body
        .collect()
        .await
        .map_err(|e| Error::Hyper(e.to_string()))?
        .to_bytes();

    Ok(request)
}

/// Header value as text, replacing non-UTF-8 bytes (obs-text)
fn header_value(value: &http::HeaderValue) -> String {
    match value.to_str() {
        Ok(v) => v.to_string(),
        Err(_) => {
            tracing::debug!(value = ?value, "non-ASCII header value kept lossily");
            String::from_utf8_lossy(value.as_bytes()).into_owned()
        }
    }
}

/// Convert our Response to hyper Response
///
/// Headers that are not valid HTTP are dropped with a warning.
pub fn to_hyper_response(res: Response) -> hyper::Response<Full<Bytes>> {
    let mut out = hyper::Response::new(Full::new(res.body));
    *out.status_mut() = http::StatusCode::from_u16(res.status.as_u16())
        .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);

    for (name, value) in &res.headers {
        match (
            http::HeaderName::from_bytes(name.as_bytes()),
            http::HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                out.headers_mut().append(name, value);
            }
            _ => tracing::warn!(header = %name, "dropping invalid response header"),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.addr().unwrap(), "0.0.0.0:8080".parse().unwrap());
        assert!(config.workers >= 1);
    }

    #[test]
    fn test_invalid_hostname() {
        let config = ServerConfig::new().hostname("not a host");
        assert!(matches!(config.addr(), Err(Error::Parse(_))));
    }

    #[test]
    fn test_non_utf8_header_value_kept() {
        let value = http::HeaderValue::from_bytes(b"caf\xe9").unwrap();
        assert_eq!(header_value(&value), "caf\u{fffd}");

        let value = http::HeaderValue::from_static("plain");
        assert_eq!(header_value(&value), "plain");
    }

    #[test]
    fn test_to_hyper_response() {
        let res = crate::ResponseBuilder::new(StatusCode(418))
            .header("x-custom", "value")
            .header("bad header", "dropped")
            .body("teapot")
            .build();

        let out = to_hyper_response(res);
        assert_eq!(out.status().as_u16(), 418);
        assert_eq!(out.headers()["x-custom"], "value");
        assert_eq!(out.headers().len(), 1);
    }
}
