use std::io::Result;

fn main() -> Result<()> {
    // The fixture serves the very same schema the SDK is generated from
    let proto_files = &[
        "../cirrus-core/proto/cloud/operation/operation.proto",
        "../cirrus-core/proto/cloud/compute/v1/instance.proto",
        "../cirrus-core/proto/cloud/compute/v1/disk.proto",
    ];

    let proto_folder = "../cirrus-core/proto";

    tonic_prost_build::configure()
        .build_client(false)
        .compile_protos(proto_files, &[proto_folder])
        .unwrap();

    Ok(())
}
