//! Backend-backed record source.

use super::RecordSource;
use crate::{
    client::ApiClient,
    errors::Result,
    models::{Order, Permission, Product, Role, WallPost},
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use tracing::info;

/// A record type with a list endpoint under `/api/`.
pub trait Resource {
    /// Path below `/api/`, e.g. "products"
    const PATH: &'static str;
}

impl Resource for Product {
    const PATH: &'static str = "products";
}

impl Resource for Order {
    const PATH: &'static str = "orders";
}

impl Resource for Role {
    const PATH: &'static str = "roles";
}

impl Resource for Permission {
    const PATH: &'static str = "permissions";
}

impl Resource for WallPost {
    const PATH: &'static str = "wall-posts";
}

/// Fetches `T` from its list endpoint on every call.
#[derive(Debug, Clone)]
pub struct HttpSource<T> {
    client: ApiClient,
    _record: PhantomData<fn() -> T>,
}

impl<T> HttpSource<T> {
    /// Creates a source over `client`.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self {
            client,
            _record: PhantomData,
        }
    }
}

#[async_trait]
impl<T> RecordSource<T> for HttpSource<T>
where
    T: Resource + DeserializeOwned + Send + 'static,
{
    async fn fetch_all(&self) -> Result<Vec<T>> {
        let records: Vec<T> = self.client.list(T::PATH).await?;
        info!("Fetched {} records from /api/{}", records.len(), T::PATH);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Error;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_http_source_fetches_roles() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/roles")
                    .header("authorization", "Bearer tok");
                then.status(200).json_body(json!({
                    "success": true,
                    "data": [
                        {"id": 1, "name": "admin", "display_name": "Administrator",
                         "description": "All", "is_active": true,
                         "permissions": [1, 2], "permissions_count": 2, "users_count": 3}
                    ]
                }));
            })
            .await;

        let source = HttpSource::<Role>::new(ApiClient::new(server.base_url(), "tok")?);
        let roles = source.fetch_all().await?;

        mock.assert_async().await;
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].permissions_count(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_http_source_propagates_api_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/orders");
                then.status(401)
                    .json_body(json!({"success": false, "message": "Session expired"}));
            })
            .await;

        let source = HttpSource::<Order>::new(ApiClient::new(server.base_url(), "old").unwrap());
        let err = source.fetch_all().await.unwrap_err();

        assert!(matches!(err, Error::Api { status: Some(401), .. }));
        assert_eq!(err.user_message(), "Session expired");
    }
}
