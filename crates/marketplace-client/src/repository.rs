//! Generic fetch-all repository
//!
//! One repository per endpoint: a path below the base URL whose response is
//! a JSON array of records.

use serde::de::DeserializeOwned;
use std::fmt;
use std::marker::PhantomData;

use crate::rest::{RestClient, RestRequest};
use crate::Result;

/// Fetch-all wrapper over a single REST/RPC endpoint
///
/// # Examples
/// ```
/// use marketplace_client::{ClientConfig, Color, GenericRepository, RestClient};
///
/// async fn example() -> marketplace_client::Result<()> {
///     let client = RestClient::new(ClientConfig::default())?;
///     let colors = GenericRepository::<Color>::new(client, "/rpc/get_colors");
///
///     for color in colors.get_all().await? {
///         println!("{} {}", color.name, color.hex);
///     }
///     Ok(())
/// }
/// ```
pub struct GenericRepository<T> {
    client: RestClient,
    path: String,
    _record: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> GenericRepository<T> {
    /// Create a repository for `path`
    pub fn new(client: RestClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            _record: PhantomData,
        }
    }

    /// Issue one GET to the endpoint and decode every record
    pub async fn get_all(&self) -> Result<Vec<T>> {
        let response = self
            .client
            .execute_with_retry::<Vec<T>>(RestRequest::get(self.path.as_str()))
            .await?;

        tracing::debug!(path = %self.path, count = response.data.len(), "fetched records");
        Ok(response.data)
    }

    /// Endpoint path
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl<T> Clone for GenericRepository<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            path: self.path.clone(),
            _record: PhantomData,
        }
    }
}

impl<T> fmt::Debug for GenericRepository<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericRepository")
            .field("base_url", &self.client.base_url())
            .field("path", &self.path)
            .finish()
    }
}
