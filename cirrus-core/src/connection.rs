//! # Lazy Connections
//!
//! SDK clients never dial the server when they are built. They hold a [`LazyChannel`], which
//! resolves a `tonic` [`Channel`] through a [`Connector`] the first time an RPC needs it and
//! caches it for every later call (and every clone of the handle).
//!
//! A failed connection attempt is not cached: it surfaces as a `Status::unavailable` through the
//! regular RPC error path and the next call tries again.
use crate::BoxError;
use futures_util::future::BoxFuture;
use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tonic::Status;
use tonic::transport::{Channel, Endpoint};
use tracing::{debug, warn};

/// Bound on dialing an endpoint prepared by [`LazyChannel::connect_to`].
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when configuring a connection.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("Invalid URL '{0}': {1}")]
    InvalidUrl(String, #[source] tonic::transport::Error),
}

/// A factory producing the transport channel used by SDK clients.
pub trait Connector: Send + Sync + 'static {
    fn connect(&self) -> BoxFuture<'_, Result<Channel, BoxError>>;
}

impl Connector for Endpoint {
    fn connect(&self) -> BoxFuture<'_, Result<Channel, BoxError>> {
        Box::pin(async move { Endpoint::connect(self).await.map_err(Into::into) })
    }
}

/// An already established (or natively lazy) channel.
impl Connector for Channel {
    fn connect(&self) -> BoxFuture<'_, Result<Channel, BoxError>> {
        Box::pin(async move { Ok(self.clone()) })
    }
}

/// A [`Connector`] backed by an async closure. See [`connector_fn`].
pub struct FnConnector<F>(F);

/// Wraps an async closure into a [`Connector`].
pub fn connector_fn<F, Fut>(f: F) -> FnConnector<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Channel, BoxError>> + Send + 'static,
{
    FnConnector(f)
}

impl<F, Fut> Connector for FnConnector<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Channel, BoxError>> + Send + 'static,
{
    fn connect(&self) -> BoxFuture<'_, Result<Channel, BoxError>> {
        Box::pin((self.0)())
    }
}

/// A shared, lazily established connection.
///
/// Cloning is cheap and all clones share the same connection slot.
#[derive(Clone)]
pub struct LazyChannel {
    connector: Arc<dyn Connector>,
    channel: Arc<OnceCell<Channel>>,
}

impl LazyChannel {
    pub fn new(connector: impl Connector) -> Self {
        Self {
            connector: Arc::new(connector),
            channel: Arc::new(OnceCell::new()),
        }
    }

    /// Prepares a connection to `addr` without dialing it.
    ///
    /// The dial itself gives up after [`DEFAULT_CONNECT_TIMEOUT`].
    ///
    /// # Arguments
    ///
    /// * `addr` - The server URI (e.g., `http://localhost:50051`).
    ///
    /// # Returns
    ///
    /// * `Ok(LazyChannel)` - The handle, not connected yet.
    /// * `Err(ConnectError)` - If the URL is invalid.
    pub fn connect_to(addr: &str) -> Result<Self, ConnectError> {
        let endpoint = Endpoint::new(addr.to_string())
            .map_err(|e| ConnectError::InvalidUrl(addr.to_string(), e))?
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT);

        Ok(Self::new(endpoint))
    }

    /// Whether a channel has been established already.
    pub fn is_connected(&self) -> bool {
        self.channel.initialized()
    }

    /// Returns the shared channel, connecting first if needed.
    pub async fn channel(&self) -> Result<Channel, Status> {
        self.channel
            .get_or_try_init(|| async {
                debug!("Establishing connection");
                self.connector.connect().await.map_err(|err| {
                    warn!(error = %err, "Connection attempt failed");
                    Status::unavailable(format!("Failed to connect: '{err}'"))
                })
            })
            .await
            .cloned()
    }

    /// Like [`LazyChannel::channel`], but fails with `DEADLINE_EXCEEDED` when establishing the
    /// connection takes longer than `deadline`. An abandoned attempt is not cached.
    pub async fn channel_within(&self, deadline: Option<Duration>) -> Result<Channel, Status> {
        let Some(deadline) = deadline else {
            return self.channel().await;
        };

        match tokio::time::timeout(deadline, self.channel()).await {
            Ok(result) => result,
            Err(_) => {
                warn!(?deadline, "Connection attempt timed out");
                Err(Status::deadline_exceeded(format!(
                    "Failed to connect within {deadline:?}"
                )))
            }
        }
    }
}

impl Debug for LazyChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyChannel")
            .field("connected", &self.is_connected())
            .finish()
    }
}
