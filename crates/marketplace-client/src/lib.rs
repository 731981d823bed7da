//! Marketplace backend client
//!
//! This crate talks to the Rose Bedsheet backend (Supabase PostgREST):
//! the REST client with retry logic, environment selection, the generic
//! fetch-all repository, record models and the seller service.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod environment;
pub mod models;
pub mod repository;
pub mod rest;
pub mod seller;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use environment::{Environment, NetworkEnvironmentUrl};
pub use models::{
    Category, CategoryWithSizes, Color, Design, DesignType, Fabric, Material, ProductType, Size,
};
pub use repository::GenericRepository;
pub use rest::{ClientConfig, RequestError, RestClient, RestRequest, RestResponse, RetryConfig};
pub use seller::{RestSellerService, SellerService};

/// Result type for backend operations
pub type Result<T> = std::result::Result<T, RequestError>;
