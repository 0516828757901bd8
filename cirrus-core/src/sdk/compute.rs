//! # Compute Service Clients
//!
//! SDK wrappers for `cloud.compute.v1`: instances (with their operations) and disks.
use super::{paged, resource};
use crate::api::cloud::compute::v1::{
    Disk, GetDiskRequest, GetInstanceRequest, Instance, ListDisksRequest, ListDisksResponse,
    ListInstanceOperationsRequest, ListInstanceOperationsResponse, ListInstancesRequest,
    ListInstancesResponse, disk_service_client::DiskServiceClient as GrpcDiskServiceClient,
    instance_service_client::InstanceServiceClient as GrpcInstanceServiceClient,
};
use crate::api::cloud::operation::Operation;
use crate::{CallOptions, LazyChannel, ListCall, Pager};
use tonic::Status;
use tonic::transport::Channel;

paged!(ListInstancesRequest => ListInstancesResponse { instances: Instance });
paged!(ListInstanceOperationsRequest => ListInstanceOperationsResponse { operations: Operation });
paged!(ListDisksRequest => ListDisksResponse { disks: Disk });

resource! {
    Instance => "cloud.compute.v1.Instance",
    Disk => "cloud.compute.v1.Disk",
    Operation => "cloud.operation.Operation",
}

/// Client for `cloud.compute.v1.InstanceService`.
#[derive(Debug, Clone)]
pub struct InstanceServiceClient {
    conn: LazyChannel,
}

impl InstanceServiceClient {
    pub fn new(conn: LazyChannel) -> Self {
        Self { conn }
    }

    async fn client(
        &self,
        options: &CallOptions,
    ) -> Result<GrpcInstanceServiceClient<Channel>, Status> {
        let channel = self.conn.channel_within(options.timeout).await?;
        Ok(GrpcInstanceServiceClient::new(channel))
    }

    /// Returns the instance with the given id.
    pub async fn get(
        &self,
        request: GetInstanceRequest,
        options: &CallOptions,
    ) -> Result<Instance, Status> {
        let mut client = self.client(options).await?;
        let response = client.get(options.request(request)?).await?;
        Ok(response.into_inner())
    }

    /// Fetches a single page of instances.
    pub async fn list(
        &self,
        request: ListInstancesRequest,
        options: &CallOptions,
    ) -> Result<ListInstancesResponse, Status> {
        let mut client = self.client(options).await?;
        let response = client.list(options.request(request)?).await?;
        Ok(response.into_inner())
    }

    /// Fetches a single page of operations performed on an instance.
    pub async fn list_operations(
        &self,
        request: ListInstanceOperationsRequest,
        options: &CallOptions,
    ) -> Result<ListInstanceOperationsResponse, Status> {
        let mut client = self.client(options).await?;
        let response = client.list_operations(options.request(request)?).await?;
        Ok(response.into_inner())
    }

    /// Iterates over every instance matching `request`.
    pub fn instance_iterator(
        &self,
        request: ListInstancesRequest,
        options: CallOptions,
    ) -> Pager<
        impl ListCall<ListInstancesRequest, Response = ListInstancesResponse> + use<>,
        ListInstancesRequest,
    > {
        let this = self.clone();
        let list = move |request: ListInstancesRequest| {
            let this = this.clone();
            let options = options.clone();
            async move { this.list(request, &options).await }
        };

        Pager::new(list, request)
    }

    /// Iterates over every operation performed on the instance named by `request`.
    pub fn operation_iterator(
        &self,
        request: ListInstanceOperationsRequest,
        options: CallOptions,
    ) -> Pager<
        impl ListCall<ListInstanceOperationsRequest, Response = ListInstanceOperationsResponse>
        + use<>,
        ListInstanceOperationsRequest,
    > {
        let this = self.clone();
        let list = move |request: ListInstanceOperationsRequest| {
            let this = this.clone();
            let options = options.clone();
            async move { this.list_operations(request, &options).await }
        };

        Pager::new(list, request)
    }
}

/// Client for `cloud.compute.v1.DiskService`.
#[derive(Debug, Clone)]
pub struct DiskServiceClient {
    conn: LazyChannel,
}

impl DiskServiceClient {
    pub fn new(conn: LazyChannel) -> Self {
        Self { conn }
    }

    async fn client(
        &self,
        options: &CallOptions,
    ) -> Result<GrpcDiskServiceClient<Channel>, Status> {
        let channel = self.conn.channel_within(options.timeout).await?;
        Ok(GrpcDiskServiceClient::new(channel))
    }

    pub async fn get(&self, request: GetDiskRequest, options: &CallOptions) -> Result<Disk, Status> {
        let mut client = self.client(options).await?;
        let response = client.get(options.request(request)?).await?;
        Ok(response.into_inner())
    }

    pub async fn list(
        &self,
        request: ListDisksRequest,
        options: &CallOptions,
    ) -> Result<ListDisksResponse, Status> {
        let mut client = self.client(options).await?;
        let response = client.list(options.request(request)?).await?;
        Ok(response.into_inner())
    }

    pub fn disk_iterator(
        &self,
        request: ListDisksRequest,
        options: CallOptions,
    ) -> Pager<impl ListCall<ListDisksRequest, Response = ListDisksResponse> + use<>, ListDisksRequest>
    {
        let this = self.clone();
        let list = move |request: ListDisksRequest| {
            let this = this.clone();
            let options = options.clone();
            async move { this.list(request, &options).await }
        };

        Pager::new(list, request)
    }
}
