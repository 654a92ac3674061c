use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::header::{CONTENT_TYPE, HeaderValue};
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode, Uri};
use hyper_util::rt::{TokioExecutor, TokioIo};
use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use url::Url;

/// A request as seen by the mock upstream.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: Uri,
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// Local HTTP server that answers every request with a canned JSON reply and
/// records what it received.
pub struct MockUpstream {
    url: Url,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockUpstream {
    pub async fn start(status: StatusCode, reply: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let port = listener.local_addr().expect("local addr").port();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    return;
                };
                let io = TokioIo::new(stream);
                let recorded = recorded.clone();

                tokio::spawn(async move {
                    let handler = move |req: Request<Incoming>| {
                        let recorded = recorded.clone();
                        async move {
                            let (parts, body) = req.into_parts();
                            let body = body
                                .collect()
                                .await
                                .map(|collected| collected.to_bytes())
                                .unwrap_or_default();

                            recorded.lock().expect("lock").push(RecordedRequest {
                                method: parts.method,
                                uri: parts.uri,
                                content_type: parts
                                    .headers
                                    .get(CONTENT_TYPE)
                                    .and_then(|v| v.to_str().ok())
                                    .map(str::to_owned),
                                body,
                            });

                            let mut response = Response::new(Full::new(Bytes::from_static(
                                reply.as_bytes(),
                            )));
                            *response.status_mut() = status;
                            response.headers_mut().insert(
                                CONTENT_TYPE,
                                HeaderValue::from_static("application/json"),
                            );
                            Ok::<_, Infallible>(response)
                        }
                    };

                    let _ = hyper_util::server::conn::auto::Builder::new(TokioExecutor::new())
                        .serve_connection(io, service_fn(handler))
                        .await;
                });
            }
        });

        Self {
            url: Url::parse(&format!("http://127.0.0.1:{port}/")).expect("valid url"),
            requests,
        }
    }

    /// Base URL of the mock, with a trailing slash.
    pub fn url(&self) -> Url {
        self.url.clone()
    }

    /// Everything received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("lock").clone()
    }
}

/// A URL nothing is listening on, so connecting to it fails.
pub async fn unreachable_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to address");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);

    Url::parse(&format!("http://127.0.0.1:{port}/")).expect("valid url")
}
