//! Product attribute records
//!
//! Decoded verbatim from the backend RPC functions. No client-side
//! validation happens here.

use serde::{Deserialize, Serialize};

/// Listing color
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Record id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Hex code, e.g. "#FF0000"
    pub hex: String,
}

/// Product type (bedsheet, pillowcase, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductType {
    /// Record id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Type key
    #[serde(rename = "type")]
    pub kind: String,
}

/// Fabric type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fabric {
    /// Record id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Stable key
    pub key: String,
}

/// Design type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DesignType {
    /// Record id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Stable key
    pub key: String,
}

/// Listing category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    /// Record id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Stable key
    pub key: String,
}

/// Material
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Material {
    /// Record id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Stable key
    pub key: String,
}

/// Design
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Design {
    /// Record id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Stable key
    pub key: String,
}

/// Size offered within a category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    /// Record id
    pub id: i64,
    /// Display name, e.g. "Queen"
    pub name: String,
}

/// Category together with the sizes it offers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryWithSizes {
    /// Record id
    pub id: i64,
    /// Category name
    pub name: String,
    /// Offered sizes
    #[serde(default)]
    pub sizes: Vec<Size>,
}
