use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::config::Config;
use crate::http::connection::{Connection, ConnectionLimits};
use crate::http::dispatcher::Dispatcher;
use crate::http::error_page::ErrorPages;
use crate::storage::{FileStore, PathResolver, Storage};

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let store = FileStore::open(&cfg.storage.root)
        .await
        .with_context(|| format!("opening storage root {}", cfg.storage.root.display()))?;
    info!("Serving files from {}", store.root().display());

    let resolver = PathResolver::new(store.root());
    let error_pages = ErrorPages::new(cfg.error_pages.image_base_url.as_str());
    let dispatcher = Arc::new(Dispatcher::new(store, resolver, error_pages));

    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!("Listening on {}", cfg.server.listen_addr);

    serve(listener, dispatcher, ConnectionLimits::from(&cfg.server)).await
}

/// Accepts connections forever, one task each.
pub async fn serve<S: Storage>(
    listener: TcpListener,
    dispatcher: Arc<Dispatcher<S>>,
    limits: ConnectionLimits,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = listener.accept().await?;
        debug!("Accepted connection from {}", peer);

        let dispatcher = dispatcher.clone();
        tokio::spawn(async move {
            let mut conn = Connection::with_limits(socket, dispatcher, limits);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
