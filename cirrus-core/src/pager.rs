//! # Paginated Iterator
//!
//! Server-side list calls return one page of items at a time together with an opaque
//! continuation token. [`Pager`] hides that protocol behind a pull-based sequence:
//!
//! * [`Pager::advance`] moves to the next item, fetching a new page only once the buffered one
//!   is used up.
//! * [`Pager::current`] borrows the item the pager is positioned on.
//! * [`Pager::take_up_to`] / [`Pager::take_all`] pull many items at once, sizing each page
//!   request so that a bounded take never asks the server for more than it needs.
//!
//! The pager is agnostic to the concrete resource. A request type only has to expose its
//! page size and page token ([`PageRequest`]), a response type has to split into items and
//! the next token ([`PageResponse`]), and the remote call itself is injected as a
//! [`ListCall`], which is implemented for plain closures.
//!
//! ## Error handling
//!
//! The first failed call is stored as the terminal error. From then on the pager produces
//! nothing and never calls the server again. Errors are not retried.
//!
//! ## Example
//!
//! ```rust,no_run
//! use cirrus_core::api::cloud::compute::v1::ListInstancesRequest;
//! use cirrus_core::{CallOptions, LazyChannel, sdk::compute::InstanceServiceClient};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = InstanceServiceClient::new(LazyChannel::connect_to("http://localhost:50051")?);
//!
//! let request = ListInstancesRequest {
//!     folder_id: "my-folder".to_string(),
//!     ..Default::default()
//! };
//!
//! let mut pager = client.instance_iterator(request, CallOptions::default());
//!
//! while pager.advance().await {
//!     println!("{}", pager.current().name);
//! }
//!
//! if let Some(status) = pager.last_error() {
//!     eprintln!("listing failed: {status}");
//! }
//! # Ok(())
//! # }
//! ```
use futures_util::Stream;
use std::collections::VecDeque;
use std::future::Future;
use tonic::Status;
use tracing::{debug, warn};

#[cfg(test)]
mod tests;

/// Page size used when the caller's request does not specify one.
pub const DEFAULT_PAGE_SIZE: i64 = 1000;

/// A list request carrying a page size and a continuation token.
pub trait PageRequest: Clone {
    fn page_size(&self) -> i64;
    fn set_page_size(&mut self, page_size: i64);
    fn page_token(&self) -> &str;
    fn set_page_token(&mut self, page_token: String);
}

/// A list response made of one page of items and the token of the following page.
///
/// An empty token marks the last page.
pub trait PageResponse {
    type Item;

    fn into_page(self) -> (Vec<Self::Item>, String);
}

/// The remote "list" capability a [`Pager`] pulls pages from.
///
/// Any `FnMut(Req) -> Future<Output = Result<Response, Status>>` closure is a `ListCall`,
/// which is how the SDK wrappers bind a generated client method and how tests plug in stubs.
pub trait ListCall<Req> {
    type Response: PageResponse;

    fn list(&mut self, request: Req)
    -> impl Future<Output = Result<Self::Response, Status>> + Send;
}

impl<Req, Resp, F, Fut> ListCall<Req> for F
where
    F: FnMut(Req) -> Fut,
    Fut: Future<Output = Result<Resp, Status>> + Send,
    Resp: PageResponse,
{
    type Response = Resp;

    fn list(&mut self, request: Req) -> impl Future<Output = Result<Resp, Status>> + Send {
        self(request)
    }
}

/// Item type produced by a [`Pager`] driven by the list call `L`.
pub type ItemOf<L, Req> = <<L as ListCall<Req>>::Response as PageResponse>::Item;

/// The outcome of a bulk take that hit a failed list call.
///
/// The status is authoritative: the listing is incomplete. Items collected before the failure
/// are kept so callers can still report or use them.
#[derive(Debug, thiserror::Error)]
#[error("Listing stopped after {} item(s): '{status}'", .items.len())]
pub struct PartialTake<T> {
    pub items: Vec<T>,
    #[source]
    pub status: Status,
}

impl<T> PartialTake<T> {
    pub fn into_parts(self) -> (Vec<T>, Status) {
        (self.items, self.status)
    }
}

/// Lazy iterator over every item of a server-paginated list call.
///
/// A pager is owned by a single call site: every operation takes `&mut self` and the pending
/// RPC is awaited inline by the caller. Nothing is fetched before the first pull.
pub struct Pager<L, Req>
where
    L: ListCall<Req>,
{
    client: L,
    request: Req,
    page_size: i64,
    current: Option<ItemOf<L, Req>>,
    // Undelivered items of the last page.
    items: VecDeque<ItemOf<L, Req>>,
    error: Option<Status>,
    started: bool,
    // Items still wanted by the bulk take in progress, 0 outside of a take.
    requested: usize,
}

impl<L, Req> Pager<L, Req>
where
    L: ListCall<Req>,
    Req: PageRequest,
{
    /// Creates a pager that starts listing from `request`.
    ///
    /// The request's page size becomes the configured page size, or [`DEFAULT_PAGE_SIZE`] when
    /// it is not positive. A non-empty page token in `request` resumes a previous listing.
    pub fn new(client: L, request: Req) -> Self {
        let page_size = match request.page_size() {
            size if size > 0 => size,
            _ => DEFAULT_PAGE_SIZE,
        };

        Self {
            client,
            request,
            page_size,
            current: None,
            items: VecDeque::new(),
            error: None,
            started: false,
            requested: 0,
        }
    }

    /// Overrides the configured page size. Non-positive values select [`DEFAULT_PAGE_SIZE`].
    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = if page_size > 0 {
            page_size
        } else {
            DEFAULT_PAGE_SIZE
        };
        self
    }

    /// The page size sent with every request outside of a bounded take.
    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Token the next page fetch would resume from. Empty before the first fetch (unless the
    /// initial request carried one) and after the last page.
    pub fn next_page_token(&self) -> &str {
        self.request.page_token()
    }

    /// Moves to the next item.
    ///
    /// Returns `true` when an item is available through [`Pager::current`], `false` once the
    /// listing is exhausted or a call failed (see [`Pager::last_error`]).
    pub async fn advance(&mut self) -> bool {
        self.requested = 0;
        self.step().await
    }

    /// Borrows the item the pager is positioned on.
    ///
    /// # Panics
    ///
    /// Panics if no item is buffered, i.e. when [`Pager::advance`] was never called or its last
    /// call returned `false`. Bulk takes move their items out, so they leave nothing buffered
    /// either.
    pub fn current(&self) -> &ItemOf<L, Req> {
        self.current
            .as_ref()
            .expect("Pager::current called without a successful Pager::advance")
    }

    /// The terminal error, if a list call failed.
    pub fn last_error(&self) -> Option<&Status> {
        self.error.as_ref()
    }

    /// Collects up to `limit` items, `0` meaning no limit.
    ///
    /// Each page request asks for at most the number of items still missing. The pager can
    /// keep being used afterwards, either item by item or with another take.
    ///
    /// # Returns
    ///
    /// * `Ok(items)` - The listing ended or `limit` items were collected.
    /// * `Err(PartialTake)` - A list call failed; carries the items collected so far.
    pub async fn take_up_to(
        &mut self,
        limit: usize,
    ) -> Result<Vec<ItemOf<L, Req>>, PartialTake<ItemOf<L, Req>>> {
        if let Some(status) = &self.error {
            return Err(PartialTake {
                items: Vec::new(),
                status: status.clone(),
            });
        }

        self.requested = if limit == 0 { usize::MAX } else { limit };

        let mut items = Vec::new();

        while self.requested > 0 && self.step().await {
            self.requested -= 1;
            items.extend(self.current.take());
        }

        self.requested = 0;

        match &self.error {
            Some(status) => Err(PartialTake {
                items,
                status: status.clone(),
            }),
            None => Ok(items),
        }
    }

    /// Collects every remaining item. Same as `take_up_to(0)`.
    pub async fn take_all(&mut self) -> Result<Vec<ItemOf<L, Req>>, PartialTake<ItemOf<L, Req>>> {
        self.take_up_to(0).await
    }

    /// Turns the pager into a stream of items.
    ///
    /// A failed list call is yielded once as an `Err`, after which the stream ends.
    pub fn into_stream(self) -> impl Stream<Item = Result<ItemOf<L, Req>, Status>> {
        futures_util::stream::unfold((self, false), |(mut pager, failed)| async move {
            if failed {
                return None;
            }

            if pager.advance().await
                && let Some(item) = pager.current.take()
            {
                return Some((Ok(item), (pager, false)));
            }

            pager
                .error
                .clone()
                .map(|status| (Err(status), (pager, true)))
        })
    }

    async fn step(&mut self) -> bool {
        self.current = None;

        if self.error.is_some() {
            return false;
        }

        if let Some(item) = self.items.pop_front() {
            self.current = Some(item);
            return true;
        }

        if self.started && self.request.page_token().is_empty() {
            return false;
        }

        self.started = true;

        let page_size = match self.requested {
            0 => self.page_size,
            remaining => i64::try_from(remaining).map_or(self.page_size, |r| r.min(self.page_size)),
        };
        self.request.set_page_size(page_size);

        debug!(
            page_size,
            resumed = !self.request.page_token().is_empty(),
            "Fetching page"
        );

        match self.client.list(self.request.clone()).await {
            Ok(response) => {
                let (items, next_page_token) = response.into_page();
                debug!(
                    items = items.len(),
                    last = next_page_token.is_empty(),
                    "Received page"
                );
                self.items = items.into();
                self.request.set_page_token(next_page_token);
                self.current = self.items.pop_front();
                self.current.is_some()
            }
            Err(status) => {
                warn!(code = ?status.code(), message = status.message(), "List call failed");
                self.error = Some(status);
                false
            }
        }
    }
}
