//! # SDK Wrappers
//!
//! Thin per-service clients over a [`LazyChannel`](crate::LazyChannel). Each wrapper exposes the
//! unary RPCs of its service plus one iterator constructor per paginated `List*` method.
//!
//! The generated `List*Request` / `List*Response` pairs all share the same shape
//! (`page_size`, `page_token`, a repeated items field, `next_page_token`), so the
//! [`PageRequest`](crate::PageRequest) and [`PageResponse`](crate::PageResponse) impls are
//! produced by the `paged!` macro below instead of being written by hand for every resource.

/// A message returned by list calls that can be rendered generically.
pub trait Resource: prost::Message + Default + Clone {
    /// Fully qualified protobuf name (e.g. `cloud.compute.v1.Instance`).
    const MESSAGE_NAME: &'static str;
}

macro_rules! paged {
    ($request:ty => $response:ty { $items:ident: $item:ty }) => {
        impl $crate::pager::PageRequest for $request {
            fn page_size(&self) -> i64 {
                self.page_size
            }

            fn set_page_size(&mut self, page_size: i64) {
                self.page_size = page_size;
            }

            fn page_token(&self) -> &str {
                &self.page_token
            }

            fn set_page_token(&mut self, page_token: String) {
                self.page_token = page_token;
            }
        }

        impl $crate::pager::PageResponse for $response {
            type Item = $item;

            fn into_page(self) -> (Vec<$item>, String) {
                (self.$items, self.next_page_token)
            }
        }
    };
}

macro_rules! resource {
    ($($item:ty => $name:literal),+ $(,)?) => {
        $(
            impl $crate::sdk::Resource for $item {
                const MESSAGE_NAME: &'static str = $name;
            }
        )+
    };
}

pub(crate) use paged;
pub(crate) use resource;

pub mod compute;
