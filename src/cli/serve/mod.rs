//! HTTP server for the news sitemap.
//!
//! The request loop runs every request through the route interceptor
//! first; whichever detection strategy fires hands off to the generator
//! and the response ends there. Everything else falls through to static
//! file serving from the public directory.

mod lifecycle;
mod path;
mod response;

use crate::config::{SiteConfig, cfg};
use crate::generator::NewsSitemap;
use crate::router::Interceptor;
use crate::store::DirStore;
use crate::utils::date::DateTimeUtc;
use crate::{debug, log};
use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tiny_http::{Request, Server};

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
    addr: SocketAddr,
}

/// Bind the HTTP server without starting the request loop
pub fn bind_server(config: &SiteConfig) -> Result<BoundServer> {
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    lifecycle::register_server_for_shutdown(Arc::clone(&server));

    log!("serve"; "http://{}", addr);
    log!("serve"; "sitemap at http://{}/{}", addr, config.sitemap.filename);

    Ok(BoundServer { server, addr })
}

impl BoundServer {
    /// Get the bound address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the request loop (blocking).
    pub fn run(self, interceptor: Arc<Interceptor>) -> Result<()> {
        run_request_loop(&self.server, &interceptor);
        Ok(())
    }
}

/// Serve entry point: install routes, bind, run.
pub fn serve(config: &SiteConfig) -> Result<()> {
    let interceptor = Arc::new(Interceptor::install(config)?);
    debug!("serve"; "{} rewrite rules active", interceptor.active_rules());

    let bound = bind_server(config)?;
    bound.run(interceptor)
}

fn run_request_loop(server: &Server, interceptor: &Arc<Interceptor>) {
    // Use thread pool to handle requests concurrently
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .expect("failed to create thread pool");

    for request in server.incoming_requests() {
        let config = cfg();
        let interceptor = Arc::clone(interceptor);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &config, &interceptor) {
                log!("serve"; "request error: {e}");
            }
        });
    }
}

/// Handle a single HTTP request
fn handle_request(
    request: Request,
    config: &SiteConfig,
    interceptor: &Interceptor,
) -> Result<()> {
    // Early exit if shutdown requested
    if crate::core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    let url = request.url().to_string();
    let (request_path, raw_query) = match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url.as_str(), None),
    };

    // Sitemap interception: first matching strategy wins, and the
    // response terminates request handling
    if let Some(phase) = interceptor.decide(request_path, raw_query) {
        debug!("serve"; "sitemap request via {:?}: {}", phase, url);

        let store = DirStore::new(config.store.content.clone());
        let sitemap = NewsSitemap::build(&store, config, DateTimeUtc::now())?;
        debug!("sitemap"; "{} entries", sitemap.len());
        return response::respond_sitemap(request, sitemap.into_xml());
    }

    // Fallthrough: static files from the public directory
    if let Some(file) = path::resolve_path(&url, &config.serve.public) {
        return response::respond_file(request, &file);
    }

    response::respond_not_found(request)
}
