//! # Cirrus CLI Entry Point
//!
//! The main executable for the Cirrus tool. This file drives the application lifecycle:
//!
//! 1. **Initialization**: Parses command-line arguments using [`cli::Cli`] and installs logging.
//! 2. **Connection**: Prepares a lazy connection to the API endpoint via `cirrus_core`.
//! 3. **Execution**: Delegates the request to the matching SDK client, draining paginated
//!    listings through a `Pager`.
//! 4. **Presentation**: Prints each resource as JSON to standard output, errors to standard error.

mod cli;
mod formatter;

use cirrus_core::{
    CallOptions, LazyChannel, ListCall, PageRequest, Pager,
    api::cloud::compute::v1::{
        GetDiskRequest, GetInstanceRequest, ListDisksRequest, ListInstanceOperationsRequest,
        ListInstancesRequest,
    },
    pager::ItemOf,
    render,
    sdk::{
        Resource,
        compute::{DiskServiceClient, InstanceServiceClient},
    },
    tonic::Status,
};
use clap::Parser;
use cli::{Cli, Commands, DiskCommands, FolderListArgs, InstanceCommands, PageArgs};
use formatter::{FormattedString, Incomplete};
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    init_tracing();

    let conn = match LazyChannel::connect_to(&args.endpoint) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("{}", FormattedString::from(err));
            process::exit(1);
        }
    };

    tracing::debug!(endpoint = %args.endpoint, "Prepared connection");

    let options = CallOptions {
        headers: args.headers,
        timeout: args.timeout,
    };

    match args.command {
        Commands::Instances { sub } => {
            let client = InstanceServiceClient::new(conn);
            match sub {
                InstanceCommands::List(FolderListArgs {
                    folder_id,
                    filter,
                    page,
                }) => {
                    let request = ListInstancesRequest {
                        folder_id,
                        filter,
                        page_size: page.page_size,
                        ..Default::default()
                    };
                    drain(client.instance_iterator(request, options), page.limit).await
                }
                InstanceCommands::Get { id } => {
                    let request = GetInstanceRequest { instance_id: id };
                    print_one(client.get(request, &options).await)
                }
                InstanceCommands::Operations {
                    id,
                    page: PageArgs { page_size, limit },
                } => {
                    let request = ListInstanceOperationsRequest {
                        instance_id: id,
                        page_size,
                        ..Default::default()
                    };
                    drain(client.operation_iterator(request, options), limit).await
                }
            }
        }
        Commands::Disks { sub } => {
            let client = DiskServiceClient::new(conn);
            match sub {
                DiskCommands::List(FolderListArgs {
                    folder_id,
                    filter,
                    page,
                }) => {
                    let request = ListDisksRequest {
                        folder_id,
                        filter,
                        page_size: page.page_size,
                        ..Default::default()
                    };
                    drain(client.disk_iterator(request, options), page.limit).await
                }
                DiskCommands::Get { id } => {
                    let request = GetDiskRequest { disk_id: id };
                    print_one(client.get(request, &options).await)
                }
            }
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints up to `limit` items of a listing (`0` for all of them).
async fn drain<L, Req>(mut pager: Pager<L, Req>, limit: usize)
where
    L: ListCall<Req>,
    Req: PageRequest,
    ItemOf<L, Req>: Resource,
{
    let result = if limit == 0 {
        pager.take_all().await
    } else {
        pager.take_up_to(limit).await
    };

    match result {
        Ok(items) => print_all(&items),
        Err(partial) => {
            let (items, status) = partial.into_parts();
            print_all(&items);
            eprintln!("{}", FormattedString::from(status));
            if !items.is_empty() {
                eprintln!("{}", FormattedString::from(Incomplete(items.len())));
            }
            process::exit(1);
        }
    }
}

fn print_one<R: Resource>(result: Result<R, Status>) {
    match result {
        Ok(resource) => print_all(&[resource]),
        Err(status) => {
            eprintln!("{}", FormattedString::from(status));
            process::exit(1);
        }
    }
}

fn print_all<R: Resource>(resources: &[R]) {
    for resource in resources {
        match render::to_json(resource) {
            Ok(value) => println!("{}", FormattedString::from(value)),
            Err(err) => {
                eprintln!("{}", FormattedString::from(err));
                process::exit(1);
            }
        }
    }
}
