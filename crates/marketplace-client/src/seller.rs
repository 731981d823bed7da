//! Seller service
//!
//! Product attribute lookups used by the listing form.

use async_trait::async_trait;

use crate::models::{
    Category, CategoryWithSizes, Color, Design, DesignType, Fabric, Material, ProductType,
};
use crate::repository::GenericRepository;
use crate::rest::RestClient;
use crate::Result;

/// RPC endpoint paths
pub mod paths {
    /// Colors
    pub const COLORS: &str = "/rpc/get_colors";
    /// Product types
    pub const PRODUCT_TYPES: &str = "/rpc/get_product_types";
    /// Fabric types
    pub const FABRIC_TYPES: &str = "/rpc/get_fabric_types";
    /// Design types
    pub const DESIGN_TYPES: &str = "/rpc/get_design_types";
    /// Categories
    pub const CATEGORIES: &str = "/rpc/get_categories";
    /// Materials
    pub const MATERIALS: &str = "/rpc/get_materials";
    /// Designs
    pub const DESIGNS: &str = "/rpc/get_designs";
    /// Categories with their sizes
    pub const CATEGORIES_WITH_SIZES: &str = "/rpc/get_categories_with_sizes";
}

/// Attribute lookups for sellers
#[async_trait]
pub trait SellerService: Send + Sync {
    /// Fetch all colors
    async fn fetch_colors(&self) -> Result<Vec<Color>>;

    /// Fetch all product types
    async fn fetch_product_types(&self) -> Result<Vec<ProductType>>;

    /// Fetch all fabric types
    async fn fetch_fabric_types(&self) -> Result<Vec<Fabric>>;

    /// Fetch all design types
    async fn fetch_design_types(&self) -> Result<Vec<DesignType>>;

    /// Fetch all categories
    async fn fetch_categories(&self) -> Result<Vec<Category>>;

    /// Fetch all materials
    async fn fetch_materials(&self) -> Result<Vec<Material>>;

    /// Fetch all designs
    async fn fetch_designs(&self) -> Result<Vec<Design>>;

    /// Fetch all categories with their sizes
    async fn fetch_categories_with_sizes(&self) -> Result<Vec<CategoryWithSizes>>;
}

/// [`SellerService`] backed by one [`GenericRepository`] per endpoint
#[derive(Debug, Clone)]
pub struct RestSellerService {
    colors: GenericRepository<Color>,
    product_types: GenericRepository<ProductType>,
    fabric_types: GenericRepository<Fabric>,
    design_types: GenericRepository<DesignType>,
    categories: GenericRepository<Category>,
    materials: GenericRepository<Material>,
    designs: GenericRepository<Design>,
    categories_with_sizes: GenericRepository<CategoryWithSizes>,
}

impl RestSellerService {
    /// Create the service over a shared client
    pub fn new(client: RestClient) -> Self {
        Self {
            colors: GenericRepository::new(client.clone(), paths::COLORS),
            product_types: GenericRepository::new(client.clone(), paths::PRODUCT_TYPES),
            fabric_types: GenericRepository::new(client.clone(), paths::FABRIC_TYPES),
            design_types: GenericRepository::new(client.clone(), paths::DESIGN_TYPES),
            categories: GenericRepository::new(client.clone(), paths::CATEGORIES),
            materials: GenericRepository::new(client.clone(), paths::MATERIALS),
            designs: GenericRepository::new(client.clone(), paths::DESIGNS),
            categories_with_sizes: GenericRepository::new(client, paths::CATEGORIES_WITH_SIZES),
        }
    }
}

#[async_trait]
impl SellerService for RestSellerService {
    async fn fetch_colors(&self) -> Result<Vec<Color>> {
        self.colors.get_all().await
    }

    async fn fetch_product_types(&self) -> Result<Vec<ProductType>> {
        self.product_types.get_all().await
    }

    async fn fetch_fabric_types(&self) -> Result<Vec<Fabric>> {
        self.fabric_types.get_all().await
    }

    async fn fetch_design_types(&self) -> Result<Vec<DesignType>> {
        self.design_types.get_all().await
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>> {
        self.categories.get_all().await
    }

    async fn fetch_materials(&self) -> Result<Vec<Material>> {
        self.materials.get_all().await
    }

    async fn fetch_designs(&self) -> Result<Vec<Design>> {
        self.designs.get_all().await
    }

    async fn fetch_categories_with_sizes(&self) -> Result<Vec<CategoryWithSizes>> {
        self.categories_with_sizes.get_all().await
    }
}
