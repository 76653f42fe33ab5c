use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use skbasket_core::{Catalog, CatalogError, Product, ProductId};

use crate::config::StorefrontConfig;

/// Canonical storefront seed: the six-sneaker listing the shop launches with.
const SEED_PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        id: 1,
        name: "Air Force Pro",
        brand: "Nike",
        price: 12_990,
        image: "https://cdn.poehali.dev/projects/d4deb591-b1d5-4343-ba8f-2f2a0c183a72/files/6899aea9-fcfd-4559-9415-78c1fd2621d3.jpg",
        is_new: true,
        in_stock: true,
    },
    SeedProduct {
        id: 2,
        name: "Court Elite",
        brand: "Jordan",
        price: 15_990,
        image: "https://cdn.poehali.dev/projects/d4deb591-b1d5-4343-ba8f-2f2a0c183a72/files/1021ed5e-b568-44f0-94ba-3a12713c69af.jpg",
        is_new: true,
        in_stock: true,
    },
    SeedProduct {
        id: 3,
        name: "Zoom Flight",
        brand: "Nike",
        price: 13_990,
        image: "https://cdn.poehali.dev/projects/d4deb591-b1d5-4343-ba8f-2f2a0c183a72/files/26d41c56-d8ed-47c9-adb2-678871d293fd.jpg",
        is_new: false,
        in_stock: true,
    },
    SeedProduct {
        id: 4,
        name: "Precision Max",
        brand: "Anta",
        price: 9_990,
        image: "https://cdn.poehali.dev/projects/d4deb591-b1d5-4343-ba8f-2f2a0c183a72/files/6899aea9-fcfd-4559-9415-78c1fd2621d3.jpg",
        is_new: false,
        in_stock: true,
    },
    SeedProduct {
        id: 5,
        name: "Thunder Strike",
        brand: "Li-Ning",
        price: 11_990,
        image: "https://cdn.poehali.dev/projects/d4deb591-b1d5-4343-ba8f-2f2a0c183a72/files/1021ed5e-b568-44f0-94ba-3a12713c69af.jpg",
        is_new: false,
        in_stock: true,
    },
    SeedProduct {
        id: 6,
        name: "Dynasty Pro",
        brand: "Jordan",
        price: 16_990,
        image: "https://cdn.poehali.dev/projects/d4deb591-b1d5-4343-ba8f-2f2a0c183a72/files/26d41c56-d8ed-47c9-adb2-678871d293fd.jpg",
        is_new: false,
        in_stock: true,
    },
];

#[derive(Clone, Copy, Debug)]
struct SeedProduct {
    id: u32,
    name: &'static str,
    brand: &'static str,
    price: u64,
    image: &'static str,
    is_new: bool,
    in_stock: bool,
}

impl SeedProduct {
    fn to_product(self) -> Product {
        Product {
            id: ProductId(self.id),
            name: self.name.to_string(),
            brand: self.brand.to_string(),
            price: self.price,
            image: self.image.to_string(),
            is_new: self.is_new,
            in_stock: self.in_stock,
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("could not read catalog file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error(transparent)]
    Invalid(#[from] CatalogError),
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    products: Vec<Product>,
}

/// The built-in catalog used when no catalog file is configured.
pub fn builtin_catalog() -> Catalog {
    let products = SEED_PRODUCTS.iter().map(|seed| seed.to_product()).collect();
    Catalog::new(products).expect("seed product ids are unique")
}

/// Loads a catalog from a TOML file with `[[products]]` entries.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogLoadError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| CatalogLoadError::ReadFile { path: path.to_path_buf(), source })?;

    let file = toml::from_str::<CatalogFile>(&raw)
        .map_err(|source| CatalogLoadError::ParseFile { path: path.to_path_buf(), source })?;

    Ok(Catalog::new(file.products)?)
}

/// Resolves the catalog named by the config: a file if one is
/// configured, the built-in seed otherwise.
pub fn catalog_from_config(config: &StorefrontConfig) -> Result<Catalog, CatalogLoadError> {
    match &config.catalog.path {
        Some(path) => load_catalog(path),
        None => Ok(builtin_catalog()),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use skbasket_core::ProductId;

    use super::{builtin_catalog, load_catalog, CatalogLoadError, SEED_PRODUCTS};

    #[test]
    fn seed_contract_holds() {
        assert_eq!(SEED_PRODUCTS.len(), 6);

        let catalog = builtin_catalog();
        assert_eq!(catalog.len(), 6);

        let expected: &[(u32, &str, &str, u64, bool)] = &[
            (1, "Air Force Pro", "Nike", 12_990, true),
            (2, "Court Elite", "Jordan", 15_990, true),
            (3, "Zoom Flight", "Nike", 13_990, false),
            (4, "Precision Max", "Anta", 9_990, false),
            (5, "Thunder Strike", "Li-Ning", 11_990, false),
            (6, "Dynasty Pro", "Jordan", 16_990, false),
        ];

        for (id, name, brand, price, is_new) in expected {
            let product = catalog.find(ProductId(*id)).expect("seed product is present");
            assert_eq!(product.name, *name);
            assert_eq!(product.brand, *brand);
            assert_eq!(product.price, *price);
            assert_eq!(product.is_new, *is_new);
            assert!(product.in_stock);
        }
    }

    #[test]
    fn loads_catalog_from_toml_file() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("products.toml");
        fs::write(
            &path,
            r#"
[[products]]
id = 10
name = "Court Vision"
brand = "Nike"
price = 8990
image = "https://cdn.example/court-vision.jpg"
in_stock = true

[[products]]
id = 11
name = "Retro High"
brand = "Jordan"
price = 17990
image = "https://cdn.example/retro-high.jpg"
is_new = true
in_stock = false
"#,
        )
        .expect("write catalog file");

        let catalog = load_catalog(&path).expect("catalog file loads");
        assert_eq!(catalog.len(), 2);

        let vision = catalog.find(ProductId(10)).expect("first product is present");
        assert!(!vision.is_new);
        assert!(vision.in_stock);

        let retro = catalog.find(ProductId(11)).expect("second product is present");
        assert!(retro.is_new);
        assert!(!retro.in_stock);
    }

    #[test]
    fn rejects_catalog_file_with_duplicate_ids() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("products.toml");
        fs::write(
            &path,
            r#"
[[products]]
id = 1
name = "First"
brand = "Nike"
price = 1000
image = "https://cdn.example/first.jpg"
in_stock = true

[[products]]
id = 1
name = "Second"
brand = "Nike"
price = 2000
image = "https://cdn.example/second.jpg"
in_stock = true
"#,
        )
        .expect("write catalog file");

        let error = load_catalog(&path).expect_err("duplicate ids must be rejected");
        assert!(matches!(error, CatalogLoadError::Invalid(_)));
    }

    #[test]
    fn rejects_a_malformed_catalog_file() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("products.toml");
        fs::write(&path, "[[products]]\nid = \"not a number\"\n").expect("write catalog file");

        let error = load_catalog(&path).expect_err("malformed file must fail");
        assert!(matches!(error, CatalogLoadError::ParseFile { .. }));
    }

    #[test]
    fn read_failure_reports_the_path() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("missing.toml");

        let error = load_catalog(&path).expect_err("missing file must fail");
        assert!(matches!(error, CatalogLoadError::ReadFile { .. }));
        assert!(error.to_string().contains("missing.toml"));
    }
}
