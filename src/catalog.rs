// =============================================================================
// CATALOG MODULE
// =============================================================================
// Read-only product and brand data, fixed when the process starts.
//
// NOTES:
// - Products are handed out as Arc<Product> so cart lines and comparison
//   entries can share them without copying
// - Nothing in the crate mutates a Catalog after it is built
// - Showcase queries (brand filter + sort) return new Vecs, never reorder
//   the catalog itself
// =============================================================================

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::{Brand, BrandFilter, Product, ProductSpecs, SortOrder};

#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Arc<Product>>,
    brands: Vec<Brand>,
}

/// On-disk shape of a catalog file
#[derive(Debug, Deserialize)]
struct CatalogFile {
    products: Vec<Product>,
    #[serde(default)]
    brands: Vec<Brand>,
}

impl Catalog {
    // -------------------------------------------------------------------------
    // CONSTRUCTION
    // -------------------------------------------------------------------------
    /// Build a catalog from owned records, checking every product invariant.
    pub fn new(products: Vec<Product>, brands: Vec<Brand>) -> AppResult<Self> {
        validate(&products)?;
        Ok(Self {
            products: products.into_iter().map(Arc::new).collect(),
            brands,
        })
    }

    /// Parse a catalog from JSON: `{ "products": [...], "brands": [...] }`
    pub fn from_json(raw: &str) -> AppResult<Self> {
        let file: CatalogFile = serde_json::from_str(raw)?;
        Self::new(file.products, file.brands)
    }

    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_json(&raw)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            products = catalog.products.len(),
            brands = catalog.brands.len(),
            "Catalog loaded from file"
        );
        Ok(catalog)
    }

    /// The laptops and brands the storefront ships with
    pub fn builtin() -> Self {
        Self {
            products: builtin_products().into_iter().map(Arc::new).collect(),
            brands: builtin_brands(),
        }
    }

    // -------------------------------------------------------------------------
    // LOOKUPS
    // -------------------------------------------------------------------------
    pub fn products(&self) -> &[Arc<Product>] {
        &self.products
    }

    pub fn brands(&self) -> &[Brand] {
        &self.brands
    }

    pub fn product(&self, id: &str) -> Option<&Arc<Product>> {
        self.products.iter().find(|product| product.id == id)
    }

    pub fn featured(&self) -> Vec<Arc<Product>> {
        self.products
            .iter()
            .filter(|product| product.featured)
            .cloned()
            .collect()
    }

    // -------------------------------------------------------------------------
    // SHOWCASE
    // -------------------------------------------------------------------------
    /// Products matching `filter`, ordered by `sort`.
    ///
    /// The sort is stable: ties keep catalog order.
    pub fn showcase(&self, filter: &BrandFilter, sort: SortOrder) -> Vec<Arc<Product>> {
        let mut selected: Vec<Arc<Product>> = self
            .products
            .iter()
            .filter(|product| filter.matches(product))
            .cloned()
            .collect();

        match sort {
            SortOrder::Featured => selected.sort_by_key(|product| !product.featured),
            SortOrder::PriceLowToHigh => selected.sort_by_key(|product| product.price),
            SortOrder::PriceHighToLow => {
                selected.sort_by(|a, b| b.price.cmp(&a.price));
            }
            SortOrder::Rating => selected.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        }

        selected
    }

    /// Filter chips: `"all"` then every brand that has at least one product
    pub fn brand_filters(&self) -> Vec<String> {
        let stocked: HashSet<&str> = self
            .products
            .iter()
            .map(|product| product.brand.as_str())
            .collect();

        std::iter::once("all".to_string())
            .chain(
                self.brands
                    .iter()
                    .filter(|brand| stocked.contains(brand.name.as_str()))
                    .map(|brand| brand.name.clone()),
            )
            .collect()
    }
}

// =============================================================================
// VALIDATION
// =============================================================================
fn validate(products: &[Product]) -> AppResult<()> {
    let mut seen = HashSet::new();

    for product in products {
        if !seen.insert(product.id.as_str()) {
            return Err(AppError::InvalidCatalog(format!(
                "duplicate product id {}",
                product.id
            )));
        }
        if product.price == 0 {
            return Err(AppError::InvalidCatalog(format!(
                "product {} has no price",
                product.id
            )));
        }
        if let Some(original) = product.original_price {
            if original <= product.price {
                return Err(AppError::InvalidCatalog(format!(
                    "product {}: original price {} must exceed price {}",
                    product.id, original, product.price
                )));
            }
        }
        if product.colors.is_empty() {
            return Err(AppError::InvalidCatalog(format!(
                "product {} has no colors",
                product.id
            )));
        }
        if !(0.0..=5.0).contains(&product.rating) {
            return Err(AppError::InvalidCatalog(format!(
                "product {}: rating {} outside 0-5",
                product.id, product.rating
            )));
        }
    }

    Ok(())
}

// =============================================================================
// BUILT-IN DATA
// =============================================================================

#[allow(clippy::too_many_arguments)]
fn laptop(
    id: &str,
    name: &str,
    brand: &str,
    price: u64,
    original_price: Option<u64>,
    image: &str,
    specs: [&str; 5],
    colors: &[&str],
    rating: f32,
    reviews: u32,
    featured: bool,
) -> Product {
    let [processor, ram, storage, display, graphics] = specs;
    Product {
        id: id.to_string(),
        name: name.to_string(),
        brand: brand.to_string(),
        price,
        original_price,
        image: image.to_string(),
        specs: ProductSpecs {
            processor: processor.to_string(),
            ram: ram.to_string(),
            storage: storage.to_string(),
            display: display.to_string(),
            graphics: graphics.to_string(),
        },
        colors: colors.iter().map(|color| color.to_string()).collect(),
        rating,
        reviews,
        featured,
    }
}

const IMG_MACBOOK_PRO: &str = "https://images.unsplash.com/photo-1517336714731-489689fd1ca8?w=800&q=80";
const IMG_MACBOOK_AIR: &str = "https://images.unsplash.com/photo-1611186871348-b1ce696e52c9?w=800&q=80";
const IMG_XPS: &str = "https://images.unsplash.com/photo-1593642632823-8f785ba67e45?w=800&q=80";
const IMG_ULTRABOOK: &str = "https://images.unsplash.com/photo-1588872657578-7efd1f1555ed?w=800&q=80";
const IMG_GAMING: &str = "https://images.unsplash.com/photo-1603302576837-37561b2e2302?w=800&q=80";

fn builtin_products() -> Vec<Product> {
    vec![
        laptop(
            "1",
            "MacBook Pro 16\"",
            "Apple",
            2499,
            Some(2799),
            IMG_MACBOOK_PRO,
            ["Apple M3 Pro", "16GB", "512GB SSD", "16\" Liquid Retina XDR", "Integrated GPU"],
            &["Space Gray", "Silver"],
            4.9,
            1247,
            true,
        ),
        laptop(
            "2",
            "MacBook Air 15\"",
            "Apple",
            1299,
            None,
            IMG_MACBOOK_AIR,
            ["Apple M2", "8GB", "256GB SSD", "15.3\" Liquid Retina", "Integrated GPU"],
            &["Midnight", "Starlight", "Space Gray", "Silver"],
            4.8,
            892,
            true,
        ),
        laptop(
            "3",
            "XPS 15",
            "Dell",
            1899,
            Some(2199),
            IMG_XPS,
            ["Intel Core i7-13700H", "16GB", "512GB SSD", "15.6\" OLED 3.5K", "NVIDIA RTX 4050"],
            &["Platinum Silver", "Graphite"],
            4.7,
            634,
            true,
        ),
        laptop(
            "4",
            "Spectre x360",
            "HP",
            1599,
            None,
            IMG_ULTRABOOK,
            ["Intel Core i7-1355U", "16GB", "1TB SSD", "13.5\" OLED 3K2K", "Intel Iris Xe"],
            &["Nightfall Black", "Nocturne Blue"],
            4.6,
            421,
            false,
        ),
        laptop(
            "5",
            "ThinkPad X1 Carbon",
            "Lenovo",
            1749,
            None,
            IMG_ULTRABOOK,
            ["Intel Core i7-1365U", "32GB", "1TB SSD", "14\" WUXGA", "Intel Iris Xe"],
            &["Black"],
            4.7,
            789,
            false,
        ),
        laptop(
            "6",
            "ROG Zephyrus G14",
            "Asus",
            1999,
            Some(2299),
            IMG_GAMING,
            ["AMD Ryzen 9 7940HS", "32GB", "1TB SSD", "14\" QHD+ 165Hz", "NVIDIA RTX 4060"],
            &["Eclipse Gray", "Moonlight White"],
            4.8,
            567,
            true,
        ),
        laptop(
            "7",
            "Surface Laptop 5",
            "Microsoft",
            1299,
            None,
            IMG_ULTRABOOK,
            ["Intel Core i5-1245U", "16GB", "512GB SSD", "13.5\" PixelSense", "Intel Iris Xe"],
            &["Platinum", "Matte Black", "Sage"],
            4.5,
            342,
            false,
        ),
        laptop(
            "8",
            "Razer Blade 15",
            "Razer",
            2799,
            None,
            IMG_GAMING,
            ["Intel Core i9-13950HX", "32GB", "1TB SSD", "15.6\" QHD 240Hz", "NVIDIA RTX 4080"],
            &["Black"],
            4.7,
            412,
            false,
        ),
    ]
}

fn builtin_brands() -> Vec<Brand> {
    [
        ("Apple", "🍎"),
        ("Dell", "💻"),
        ("HP", "🖥️"),
        ("Lenovo", "💼"),
        ("Asus", "⚡"),
        ("Microsoft", "🪟"),
        ("Razer", "🐍"),
        ("Acer", "🔷"),
    ]
    .into_iter()
    .map(|(name, logo)| Brand {
        name: name.to_string(),
        logo: logo.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(products: &[Arc<Product>]) -> Vec<&str> {
        products.iter().map(|product| product.id.as_str()).collect()
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.products().len(), 8);
        assert_eq!(catalog.brands().len(), 8);

        let owned: Vec<Product> = catalog.products().iter().map(|p| (**p).clone()).collect();
        assert!(validate(&owned).is_ok());
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.product("3").map(|p| p.name.as_str()), Some("XPS 15"));
        assert!(catalog.product("99").is_none());
    }

    #[test]
    fn test_featured_keeps_catalog_order() {
        let catalog = Catalog::builtin();
        assert_eq!(ids(&catalog.featured()), vec!["1", "2", "3", "6"]);
    }

    #[test]
    fn test_showcase_brand_filter() {
        let catalog = Catalog::builtin();
        let apple = catalog.showcase(&BrandFilter::from("Apple"), SortOrder::Featured);
        assert_eq!(ids(&apple), vec!["1", "2"]);

        let acer = catalog.showcase(&BrandFilter::from("Acer"), SortOrder::Featured);
        assert!(acer.is_empty());
    }

    #[test]
    fn test_showcase_sorts() {
        let catalog = Catalog::builtin();

        let featured = catalog.showcase(&BrandFilter::All, SortOrder::Featured);
        assert_eq!(ids(&featured), vec!["1", "2", "3", "6", "4", "5", "7", "8"]);

        let cheap_first = catalog.showcase(&BrandFilter::All, SortOrder::PriceLowToHigh);
        assert_eq!(ids(&cheap_first), vec!["2", "7", "4", "5", "3", "6", "1", "8"]);

        let dear_first = catalog.showcase(&BrandFilter::All, SortOrder::PriceHighToLow);
        assert_eq!(ids(&dear_first), vec!["8", "1", "6", "3", "5", "4", "2", "7"]);

        let rated = catalog.showcase(&BrandFilter::All, SortOrder::Rating);
        assert_eq!(ids(&rated), vec!["1", "2", "6", "3", "5", "8", "4", "7"]);
    }

    #[test]
    fn test_brand_filters_skip_unstocked_brands() {
        let filters = Catalog::builtin().brand_filters();
        assert_eq!(
            filters,
            vec!["all", "Apple", "Dell", "HP", "Lenovo", "Asus", "Microsoft", "Razer"]
        );
    }

    #[test]
    fn test_from_json_reads_camel_case() {
        let raw = r#"{
            "products": [{
                "id": "a1",
                "name": "Aspire 5",
                "brand": "Acer",
                "price": 699,
                "originalPrice": 799,
                "image": "aspire.png",
                "specs": {
                    "processor": "Ryzen 5",
                    "ram": "8GB",
                    "storage": "512GB SSD",
                    "display": "15.6\" FHD",
                    "graphics": "Radeon"
                },
                "colors": ["Silver"],
                "rating": 4.2,
                "reviews": 10
            }],
            "brands": [{ "name": "Acer", "logo": "A" }]
        }"#;

        let catalog = Catalog::from_json(raw).expect("catalog should parse");
        let aspire = catalog.product("a1").expect("product present");
        assert_eq!(aspire.original_price, Some(799));
        assert!(!aspire.featured);
        assert_eq!(catalog.brand_filters(), vec!["all", "Acer"]);
    }

    #[test]
    fn test_validation_rejects_bad_products() {
        let base = builtin_products().remove(0);

        let mut no_colors = base.clone();
        no_colors.colors.clear();
        assert!(matches!(
            Catalog::new(vec![no_colors], vec![]),
            Err(AppError::InvalidCatalog(_))
        ));

        let mut bad_sale = base.clone();
        bad_sale.original_price = Some(bad_sale.price);
        assert!(Catalog::new(vec![bad_sale], vec![]).is_err());

        let mut bad_rating = base.clone();
        bad_rating.rating = 5.5;
        assert!(Catalog::new(vec![bad_rating], vec![]).is_err());

        assert!(Catalog::new(vec![base.clone(), base], vec![]).is_err());
    }

    #[test]
    fn test_from_path_missing_file_is_io_error() {
        let result = Catalog::from_path("/nonexistent/catalog.json");
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
