//! Switchable transport seam
//!
//! Sessions talk to the board through [`Transport`], so the same
//! reconciliation loop runs over HTTP in production and in-process in
//! tests and simulations.

use crate::error::ClientError;
use async_trait::async_trait;
use letterboard_model::{StyleMap, Tile};
use letterboard_service::BoardService;
use letterboard_store::DocumentStore;
use std::sync::Arc;

/// Client-side view of the synchronization service
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch the full tile collection in sequence order
    async fn fetch_tiles(&self) -> Result<Vec<Tile>, ClientError>;

    /// Fetch the shared board style
    async fn fetch_board(&self) -> Result<StyleMap, ClientError>;

    /// Send a partial update for the tile at `index`; returns the
    /// canonical post-update record
    async fn put_tile(&self, index: usize, tile: &Tile) -> Result<Tile, ClientError>;
}

/// HTTP transport against a running service
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base: String,
    http: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport for a base URL like `http://localhost:3001`
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base = base_url.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            base,
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch_tiles(&self) -> Result<Vec<Tile>, ClientError> {
        let res = self.http.get(self.url("/letters")).send().await?;
        if !res.status().is_success() {
            return Err(ClientError::Status(res.status().as_u16()));
        }
        Ok(res.json().await?)
    }

    async fn fetch_board(&self) -> Result<StyleMap, ClientError> {
        let res = self.http.get(self.url("/board")).send().await?;
        if !res.status().is_success() {
            return Err(ClientError::Status(res.status().as_u16()));
        }
        Ok(res.json().await?)
    }

    async fn put_tile(&self, index: usize, tile: &Tile) -> Result<Tile, ClientError> {
        let res = self
            .http
            .put(self.url(&format!("/letters/{index}")))
            .json(tile)
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(ClientError::Status(res.status().as_u16()));
        }
        Ok(res.json().await?)
    }
}

/// In-process transport over a [`BoardService`]
///
/// Same contract as the HTTP path minus the wire; end-to-end tests and
/// headless simulations use this to exercise the full protocol.
#[derive(Debug)]
pub struct LocalTransport<S> {
    service: Arc<BoardService<S>>,
}

impl<S> LocalTransport<S> {
    /// Wrap a shared service
    #[inline]
    #[must_use]
    pub fn new(service: Arc<BoardService<S>>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<S: DocumentStore + 'static> Transport for LocalTransport<S> {
    async fn fetch_tiles(&self) -> Result<Vec<Tile>, ClientError> {
        Ok(self.service.list_tiles().await?)
    }

    async fn fetch_board(&self) -> Result<StyleMap, ClientError> {
        Ok(self.service.board_style().await?)
    }

    async fn put_tile(&self, index: usize, tile: &Tile) -> Result<Tile, ClientError> {
        Ok(self.service.update_tile(index, tile).await?)
    }
}
