//! Seller view model
//!
//! Holds the product attribute lists the listing form renders. Every list is
//! fetched independently; fetches may run concurrently because each one only
//! writes its own field.

use marketplace_client::{
    Category, CategoryWithSizes, Color, Design, DesignType, Fabric, Material, ProductType,
    RequestError, SellerService, Size,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::observable::Published;

/// What happens to a list when its fetch fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FetchFailurePolicy {
    /// Leave the previously loaded records in place
    #[default]
    KeepPrevious,
    /// Empty the list
    Clear,
}

/// Identifies one of the view model's lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttributeList {
    /// Colors
    Colors,
    /// Product types
    ProductTypes,
    /// Fabrics
    Fabrics,
    /// Design types
    DesignTypes,
    /// Categories
    Categories,
    /// Materials
    Materials,
    /// Designs
    Designs,
    /// Categories with sizes
    CategoriesWithSizes,
}

impl AttributeList {
    /// Name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeList::Colors => "colors",
            AttributeList::ProductTypes => "product_types",
            AttributeList::Fabrics => "fabrics",
            AttributeList::DesignTypes => "design_types",
            AttributeList::Categories => "categories",
            AttributeList::Materials => "materials",
            AttributeList::Designs => "designs",
            AttributeList::CategoriesWithSizes => "categories_with_sizes",
        }
    }
}

impl fmt::Display for AttributeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fetch failure kept for the view layer until the list loads again
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    /// List whose fetch failed
    pub list: AttributeList,
    /// Why it failed
    pub error: RequestError,
}

/// Observable state behind the seller screens
///
/// # Example
///
/// ```no_run
/// use app_state::{FetchFailurePolicy, SellerViewModel};
/// use marketplace_client::{ClientConfig, RestClient, RestSellerService};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() {
///     let client = RestClient::new(ClientConfig::default()).unwrap();
///     let view_model = SellerViewModel::new(
///         Arc::new(RestSellerService::new(client)),
///         FetchFailurePolicy::KeepPrevious,
///     );
///
///     view_model.fetch_listing_form_attributes().await;
///     println!("{} colors", view_model.colors().read(|c| c.len()));
/// }
/// ```
pub struct SellerViewModel {
    service: Arc<dyn SellerService>,
    failure_policy: FetchFailurePolicy,
    colors: Published<Vec<Color>>,
    product_types: Published<Vec<ProductType>>,
    fabrics: Published<Vec<Fabric>>,
    design_types: Published<Vec<DesignType>>,
    categories: Published<Vec<Category>>,
    materials: Published<Vec<Material>>,
    designs: Published<Vec<Design>>,
    categories_with_sizes: Published<Vec<CategoryWithSizes>>,
    sizes_for_selected_category: Published<Vec<Size>>,
    failures: Published<Vec<FetchFailure>>,
    last_failure: Published<Option<FetchFailure>>,
}

impl SellerViewModel {
    /// Create an empty view model
    pub fn new(service: Arc<dyn SellerService>, failure_policy: FetchFailurePolicy) -> Self {
        Self {
            service,
            failure_policy,
            colors: Published::default(),
            product_types: Published::default(),
            fabrics: Published::default(),
            design_types: Published::default(),
            categories: Published::default(),
            materials: Published::default(),
            designs: Published::default(),
            categories_with_sizes: Published::default(),
            sizes_for_selected_category: Published::default(),
            failures: Published::default(),
            last_failure: Published::default(),
        }
    }

    /// Active failure policy
    pub fn failure_policy(&self) -> FetchFailurePolicy {
        self.failure_policy
    }

    // =========================================================================
    // Fetches
    // =========================================================================

    /// Fetch colors. Returns true when the list was refreshed.
    pub async fn fetch_colors(&self) -> bool {
        self.load(AttributeList::Colors, &self.colors, self.service.fetch_colors())
            .await
    }

    /// Fetch product types
    pub async fn fetch_product_types(&self) -> bool {
        self.load(
            AttributeList::ProductTypes,
            &self.product_types,
            self.service.fetch_product_types(),
        )
        .await
    }

    /// Fetch fabric types
    pub async fn fetch_fabrics(&self) -> bool {
        self.load(AttributeList::Fabrics, &self.fabrics, self.service.fetch_fabric_types())
            .await
    }

    /// Fetch design types
    pub async fn fetch_design_types(&self) -> bool {
        self.load(
            AttributeList::DesignTypes,
            &self.design_types,
            self.service.fetch_design_types(),
        )
        .await
    }

    /// Fetch categories
    pub async fn fetch_categories(&self) -> bool {
        self.load(AttributeList::Categories, &self.categories, self.service.fetch_categories())
            .await
    }

    /// Fetch materials
    pub async fn fetch_materials(&self) -> bool {
        self.load(AttributeList::Materials, &self.materials, self.service.fetch_materials())
            .await
    }

    /// Fetch designs
    pub async fn fetch_designs(&self) -> bool {
        self.load(AttributeList::Designs, &self.designs, self.service.fetch_designs())
            .await
    }

    /// Fetch categories together with their sizes
    pub async fn fetch_categories_with_sizes(&self) -> bool {
        self.load(
            AttributeList::CategoriesWithSizes,
            &self.categories_with_sizes,
            self.service.fetch_categories_with_sizes(),
        )
        .await
    }

    /// Load what the create-listing form shows on appear
    ///
    /// Colors, product types and fabrics are fetched concurrently. Returns
    /// true when all three were refreshed.
    pub async fn fetch_listing_form_attributes(&self) -> bool {
        let (colors, product_types, fabrics) = tokio::join!(
            self.fetch_colors(),
            self.fetch_product_types(),
            self.fetch_fabrics()
        );
        colors && product_types && fabrics
    }

    /// Fetch every list concurrently. Returns true when all were refreshed.
    pub async fn fetch_all(&self) -> bool {
        let (attributes, catalog) = tokio::join!(
            async {
                tokio::join!(
                    self.fetch_colors(),
                    self.fetch_product_types(),
                    self.fetch_fabrics(),
                    self.fetch_design_types(),
                )
            },
            async {
                tokio::join!(
                    self.fetch_categories(),
                    self.fetch_materials(),
                    self.fetch_designs(),
                    self.fetch_categories_with_sizes(),
                )
            },
        );
        [attributes, catalog].iter().all(|&(a, b, c, d)| a && b && c && d)
    }

    async fn load<T, Fut>(
        &self,
        list: AttributeList,
        target: &Published<Vec<T>>,
        fetch: Fut,
    ) -> bool
    where
        Fut: Future<Output = marketplace_client::Result<Vec<T>>>,
    {
        match fetch.await {
            Ok(records) => {
                tracing::debug!(list = %list, count = records.len(), "list refreshed");
                target.set(records);
                let resolved = self.failures.modify_if(|failures| {
                    let before = failures.len();
                    failures.retain(|failure| failure.list != list);
                    failures.len() != before
                });
                if resolved {
                    self.sync_last_failure();
                }
                true
            }
            Err(error) => {
                tracing::warn!(
                    list = %list,
                    error = %error,
                    policy = ?self.failure_policy,
                    "fetch failed"
                );
                if self.failure_policy == FetchFailurePolicy::Clear {
                    target.modify_if(|records| {
                        let had_records = !records.is_empty();
                        records.clear();
                        had_records
                    });
                }
                self.failures.modify(|failures| {
                    failures.retain(|failure| failure.list != list);
                    failures.push(FetchFailure { list, error });
                });
                self.sync_last_failure();
                false
            }
        }
    }

    fn sync_last_failure(&self) {
        let latest = self.failures.read(|failures| failures.last().cloned());
        self.last_failure.modify_if(|current| {
            let changed = *current != latest;
            *current = latest;
            changed
        });
    }

    // =========================================================================
    // Category selection
    // =========================================================================

    /// Show the sizes of the selected category
    ///
    /// Uses the first loaded category whose name matches exactly; sizes are
    /// empty when none does. Category names are assumed unique upstream.
    pub fn select_category(&self, selected: &CategoryWithSizes) {
        let sizes = self.categories_with_sizes.read(|categories| {
            categories
                .iter()
                .find(|category| category.name == selected.name)
                .map(|category| category.sizes.clone())
                .unwrap_or_default()
        });
        self.sizes_for_selected_category.set(sizes);
    }

    /// Forget the selected category's sizes
    pub fn clear_selected_category(&self) {
        self.sizes_for_selected_category.set(Vec::new());
    }

    // =========================================================================
    // Observable state
    // =========================================================================

    /// Colors
    pub fn colors(&self) -> &Published<Vec<Color>> {
        &self.colors
    }

    /// Product types
    pub fn product_types(&self) -> &Published<Vec<ProductType>> {
        &self.product_types
    }

    /// Fabrics
    pub fn fabrics(&self) -> &Published<Vec<Fabric>> {
        &self.fabrics
    }

    /// Design types
    pub fn design_types(&self) -> &Published<Vec<DesignType>> {
        &self.design_types
    }

    /// Categories
    pub fn categories(&self) -> &Published<Vec<Category>> {
        &self.categories
    }

    /// Materials
    pub fn materials(&self) -> &Published<Vec<Material>> {
        &self.materials
    }

    /// Designs
    pub fn designs(&self) -> &Published<Vec<Design>> {
        &self.designs
    }

    /// Categories with sizes
    pub fn categories_with_sizes(&self) -> &Published<Vec<CategoryWithSizes>> {
        &self.categories_with_sizes
    }

    /// Sizes of the selected category
    pub fn sizes_for_selected_category(&self) -> &Published<Vec<Size>> {
        &self.sizes_for_selected_category
    }

    /// Unresolved fetch failures, oldest first, at most one per list
    pub fn failures(&self) -> &Published<Vec<FetchFailure>> {
        &self.failures
    }

    /// Unresolved failure for one list
    pub fn failure_for(&self, list: AttributeList) -> Option<RequestError> {
        self.failures.read(|failures| {
            failures
                .iter()
                .find(|failure| failure.list == list)
                .map(|failure| failure.error.clone())
        })
    }

    /// Most recent unresolved fetch failure
    pub fn last_failure(&self) -> &Published<Option<FetchFailure>> {
        &self.last_failure
    }
}

impl fmt::Debug for SellerViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SellerViewModel")
            .field("failure_policy", &self.failure_policy)
            .field("colors", &self.colors)
            .field("product_types", &self.product_types)
            .field("fabrics", &self.fabrics)
            .field("failures", &self.failures)
            .finish_non_exhaustive()
    }
}
