//! # Cloud Fixture
//!
//! **INTERNAL USE ONLY**: This crate exists solely to provide the server side of the
//! compute API so the `cirrus_core` SDK can be integration tested against a real
//! gRPC server. It is not intended for production use.

pub mod pb {
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
}

pub use pb::cloud::compute::v1::disk_service_server::{DiskService, DiskServiceServer};
pub use pb::cloud::compute::v1::instance_service_server::{
    InstanceService, InstanceServiceServer,
};
