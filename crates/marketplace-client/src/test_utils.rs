//! Test fixtures for backend records
//!
//! Shared by the unit and integration tests of the workspace.

use crate::models::{CategoryWithSizes, Color, Fabric, ProductType, Size};

/// Color fixtures
pub mod colors {
    use super::*;

    /// Red
    pub fn red() -> Color {
        Color {
            id: 1,
            name: "Red".to_string(),
            hex: "#FF0000".to_string(),
        }
    }

    /// Ivory
    pub fn ivory() -> Color {
        Color {
            id: 2,
            name: "Ivory".to_string(),
            hex: "#FFFFF0".to_string(),
        }
    }

    /// Both colors
    pub fn all() -> Vec<Color> {
        vec![red(), ivory()]
    }
}

/// Product type fixtures
pub mod product_types {
    use super::*;

    /// Bedsheet and pillowcase types
    pub fn all() -> Vec<ProductType> {
        vec![
            ProductType {
                id: 1,
                name: "Bedsheet".to_string(),
                kind: "bedsheet".to_string(),
            },
            ProductType {
                id: 2,
                name: "Pillowcases".to_string(),
                kind: "pillowcase".to_string(),
            },
        ]
    }
}

/// Fabric fixtures
pub mod fabrics {
    use super::*;

    /// Cotton and linen
    pub fn all() -> Vec<Fabric> {
        vec![
            Fabric {
                id: 1,
                name: "Cotton".to_string(),
                key: "cotton".to_string(),
            },
            Fabric {
                id: 2,
                name: "Linen".to_string(),
                key: "linen".to_string(),
            },
        ]
    }
}

/// Category and size fixtures
pub mod categories {
    use super::*;

    /// Build a size
    pub fn size(id: i64, name: &str) -> Size {
        Size {
            id,
            name: name.to_string(),
        }
    }

    /// Bedsheets in twin/queen/king
    pub fn bedsheets() -> CategoryWithSizes {
        CategoryWithSizes {
            id: 1,
            name: "Bedsheets".to_string(),
            sizes: vec![size(1, "Twin"), size(2, "Queen"), size(3, "King")],
        }
    }

    /// Pillowcases in standard only
    pub fn pillowcases() -> CategoryWithSizes {
        CategoryWithSizes {
            id: 2,
            name: "Pillowcases".to_string(),
            sizes: vec![size(4, "Standard")],
        }
    }

    /// Every category
    pub fn all() -> Vec<CategoryWithSizes> {
        vec![bedsheets(), pillowcases()]
    }
}
