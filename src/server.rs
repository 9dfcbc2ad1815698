//! HTTP query surface.
//!
//! Serves the recorded series and the chart page that renders it:
//!
//! - `GET /data` - the full series as a JSON array of
//!   `{timestamp, viewCounts}` records
//! - `GET /` - the embedded chart page, which polls `/data` from the browser
//! - `GET /health` / `GET /healthz` - liveness probe
//!
//! Every request reads its own snapshot from the store, so responses are
//! always a consistent view of the series regardless of concurrent appends.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::store::SeriesStore;

/// The chart page served at `/`. A static collaborator: everything it shows
/// comes from polling `/data`.
const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Run the HTTP server until the process exits.
pub async fn run(listen_addr: &str, store: Arc<SeriesStore>) -> Result<()> {
    let addr: SocketAddr = listen_addr
        .parse()
        .with_context(|| format!("invalid listen address {listen_addr:?}"))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, "serving chart and data API");

    loop {
        let (stream, _) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let store = store.clone();

        tokio::spawn(async move {
            let service = service_fn(move |req: Request<hyper::body::Incoming>| {
                let store = store.clone();
                async move { Ok::<_, Infallible>(respond(req.uri().path(), &store)) }
            });

            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                error!(error = %e, "connection error");
            }
        });
    }
}

/// Route a request path to its response.
fn respond(path: &str, store: &SeriesStore) -> Response<Full<Bytes>> {
    match path {
        "/data" => match store.to_json() {
            Ok(json) => Response::builder()
                .status(StatusCode::OK)
                .header("Content-Type", "application/json")
                .body(Full::new(Bytes::from(json)))
                .unwrap(),
            Err(e) => {
                error!(error = %e, "failed to serialize series");
                Response::builder()
                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                    .header("Content-Type", "text/plain")
                    .body(Full::new(Bytes::from("failed to serialize series")))
                    .unwrap()
            }
        },
        "/" => Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", "text/html")
            .body(Full::new(Bytes::from(INDEX_HTML)))
            .unwrap(),
        "/health" | "/healthz" => Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", "text/plain")
            .body(Full::new(Bytes::from("OK")))
            .unwrap(),
        _ => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .header("Content-Type", "text/plain")
            .body(Full::new(Bytes::from("Not Found")))
            .unwrap(),
    }
}
