//! # Cirrus Core
//!
//! `cirrus-core` is the library powering the Cirrus CLI. It is a binding to a cloud
//! control-plane gRPC API whose list calls are paginated by the server.
//!
//! ## Key Components
//!
//! * **[`Pager`]:** A lazy, pull-based iterator over a server-paginated `List` call. It is
//!   generic over the request/response pair, so every resource shares the same implementation.
//! * **[`LazyChannel`]:** A connection handle that only dials the server on the first call.
//! * **[`CallOptions`]:** Metadata (headers) and deadline forwarded unchanged to every RPC.
//! * **[`sdk`]:** Per-service wrappers exposing `get`, `list` and iterator constructors.
//!
//! ## Generated code
//!
//! The [`api`] module contains the `prost` messages and `tonic` clients generated at build time
//! from the bundled proto definitions.
//!
//! ## Re-exports
//!
//! This crate re-exports `prost` and `tonic` to ensure that consumers
//! use compatible versions of these underlying dependencies.
pub mod api;
pub mod connection;
pub mod options;
pub mod pager;
pub mod render;
pub mod sdk;

pub use connection::{ConnectError, Connector, LazyChannel};
pub use options::CallOptions;
pub use pager::{ListCall, PageRequest, PageResponse, Pager, PartialTake};

// Re-exports
pub use prost;
pub use tonic;

/// Type alias for the standard boxed error used in generic bounds.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
