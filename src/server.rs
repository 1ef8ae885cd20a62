use crate::{config::Config, file::ServedFile, listing::Listing};
use anyhow::{Context, Result, anyhow};
use std::{
    io::{Cursor, ErrorKind, Read},
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};
use tiny_http::{Header, Method, Request, Response, Server};

/// Static file server for the FlashWords front end.
///
/// Serves the configured root directory (including the `listes/` word lists)
/// and decorates every response with permissive CORS headers so the browser
/// app can fetch lists from any origin.
pub struct FlashWordsServer {
    server: Arc<Server>,
    root: PathBuf,
    addr: SocketAddr,
}

/// Cloneable handle that unblocks the accept loop, releasing the listener.
#[derive(Clone)]
pub struct StopHandle(Arc<Server>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.unblock();
    }
}

impl FlashWordsServer {
    pub fn bind(config: &Config) -> Result<Self> {
        let server = Server::http(format!("{}:{}", config.host, config.port)).map_err(|error| {
            match error.downcast::<std::io::Error>() {
                Ok(io_error) if io_error.kind() == ErrorKind::AddrInUse => anyhow!(
                    "port {} is already in use (stop the other process or set FLASHWORDS_PORT)",
                    config.port
                ),
                Ok(io_error) => anyhow::Error::from(*io_error),
                Err(other) => anyhow!(other),
            }
        })?;

        let addr = server
            .server_addr()
            .to_ip()
            .context("server is not bound to an ip address")?;

        Ok(Self {
            server: Arc::new(server),
            root: config.root.clone(),
            addr,
        })
    }

    /// The bound address, with the real port when an ephemeral one was asked.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(Arc::clone(&self.server))
    }

    /// Blocks serving requests one at a time until [`StopHandle::stop`] is
    /// called.
    pub fn serve(&self) -> Result<()> {
        for request in self.server.incoming_requests() {
            if let Err(error) = self.handle(request) {
                println!("Error while processing request: {error}");
            }
        }

        Ok(())
    }

    fn handle(&self, request: Request) -> Result<()> {
        // CORS preflight: answer immediately, never consult the filesystem.
        if request.method() == &Method::Options {
            return respond(request, Response::empty(200));
        }

        if !matches!(request.method(), Method::Get | Method::Head) {
            return respond(request, Response::empty(405));
        }

        // Strip the querystring so the path maps onto the filesystem.
        let url_path = request
            .url()
            .split('?')
            .next()
            .unwrap_or_default()
            .to_string();
        let url_path = percent_decode(&url_path);

        // Reject parent components instead of resolving them.
        if url_path.split('/').any(|part| part == "..") {
            return respond(request, not_found());
        }

        let path = self.root.join(url_path.trim_start_matches('/'));

        if path.is_dir() {
            let index = path.join("index.html");

            if index.is_file() {
                return self.serve_file(request, index);
            }

            return respond(request, Listing::new(&url_path, &path)?.into());
        }

        if path.is_file() {
            return self.serve_file(request, path);
        }

        respond(request, not_found())
    }

    // The open can still fail after the is_file check (file removed or made
    // unreadable in between); answer in-band so the CORS headers are kept.
    fn serve_file(&self, request: Request, path: PathBuf) -> Result<()> {
        match ServedFile::new(path).response() {
            Ok(response) => respond(request, response),
            Err(error) => {
                println!("Error while reading file: {error}");
                respond(request, internal_error())
            }
        }
    }
}

/// Decodes every `%XX` escape; malformed escapes pass through untouched.
fn percent_decode(path: &str) -> String {
    let bytes = path.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut index = 0;

    while index < bytes.len() {
        if bytes[index] == b'%' && index + 2 < bytes.len() {
            let high = (bytes[index + 1] as char).to_digit(16);
            let low = (bytes[index + 2] as char).to_digit(16);

            if let (Some(high), Some(low)) = (high, low) {
                decoded.push((high * 16 + low) as u8);
                index += 3;
                continue;
            }
        }

        decoded.push(bytes[index]);
        index += 1;
    }

    String::from_utf8_lossy(&decoded).into_owned()
}

fn cors_headers() -> [Header; 3] {
    [
        ("Access-Control-Allow-Origin", "*"),
        ("Access-Control-Allow-Methods", "GET, POST, OPTIONS"),
        ("Access-Control-Allow-Headers", "Content-Type"),
    ]
    .map(|(field, value)| Header::from_bytes(field, value).expect("formatted correctly"))
}

fn with_cors<R: Read>(mut response: Response<R>) -> Response<R> {
    for header in cors_headers() {
        response.add_header(header);
    }

    response
}

fn respond<R: Read>(request: Request, response: Response<R>) -> Result<()> {
    request.respond(with_cors(response))?;

    Ok(())
}

fn not_found() -> Response<Cursor<Vec<u8>>> {
    Response::from_string("<h1>404: Page not found</h1>")
        .with_status_code(404)
        .with_header(html_header())
}

fn internal_error() -> Response<Cursor<Vec<u8>>> {
    Response::from_string("<h1>500: Internal server error</h1>")
        .with_status_code(500)
        .with_header(html_header())
}

fn html_header() -> Header {
    Header::from_bytes("content-type", "text/html; charset=utf-8").expect("formatted correctly")
}
