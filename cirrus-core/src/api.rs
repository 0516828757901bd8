//! # Generated API
//!
//! Message types and `tonic` client stubs compiled from the `.proto` files under `proto/`.
//!
//! The module tree mirrors the protobuf packages so that cross-package references emitted by
//! `prost` (e.g. `super::super::operation::Operation`) resolve.
pub mod cloud {
    pub mod operation {
        include!(concat!(env!("OUT_DIR"), "/cloud.operation.rs"));
    }

    pub mod compute {
        pub mod v1 {
            include!(concat!(env!("OUT_DIR"), "/cloud.compute.v1.rs"));
        }
    }
}

/// Encoded `FileDescriptorSet` of every compiled proto file, used for JSON rendering.
pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("descriptors");
