//! Catalog seeding from a YAML file.
//!
//! # Usage
//!
//! ```bash
//! oli-cli seed crates/cli/seed/catalog.yaml
//! oli-cli seed crates/cli/seed/catalog.yaml --clear
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string
//!
//! Seeding is idempotent: categories and products are upserted by their
//! slugged id, settings by key. `--clear` wipes the catalog tables first
//! (orders are never touched).

use std::collections::HashMap;
use std::path::Path;

use chrono::Utc;
use oli_poli_admin::db::{self, CategoryRepository, ProductRepository, SettingsRepository};
use oli_poli_core::slug::slugify;
use oli_poli_core::{Category, CategoryId, Product, ProductId};
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde::Deserialize;
use tracing::info;

/// Seed file layout. Every section is optional.
#[derive(Debug, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub settings: HashMap<String, String>,
    #[serde(default)]
    pub categories: Vec<SeedCategory>,
    #[serde(default)]
    pub products: Vec<SeedProduct>,
}

#[derive(Debug, Deserialize)]
pub struct SeedCategory {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub struct SeedProduct {
    pub name: String,
    /// Category id (the slug, e.g. `brinquedos`).
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub emoji: Option<String>,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

/// Seed the database from a YAML file.
///
/// # Errors
///
/// Returns an error if environment variables are missing, the file cannot
/// be read or parsed, or a database operation fails.
pub async fn run(file_path: &str, clear: bool) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| "DATABASE_URL not set")?;

    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading seed file");

    // Parse and validate before touching the database
    let content = tokio::fs::read_to_string(path).await?;
    let seed: SeedFile = serde_yaml::from_str(&content)?;
    validate(&seed)?;

    info!(
        categories = seed.categories.len(),
        products = seed.products.len(),
        settings = seed.settings.len(),
        "Parsed seed file"
    );

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    if clear {
        info!("Clearing existing catalog");
        sqlx::query("DELETE FROM products").execute(&pool).await?;
        sqlx::query("DELETE FROM categories").execute(&pool).await?;
    }

    let now = Utc::now();

    let category_repo = CategoryRepository::new(&pool);
    for entry in &seed.categories {
        let category = Category {
            id: CategoryId::new(slugify(&entry.name)),
            name: entry.name.clone(),
            description: entry.description.clone(),
            icon: entry.icon.clone(),
            created_at: now,
            updated_at: now,
        };
        category_repo.upsert(&category).await?;
        info!(id = %category.id, "Seeded category");
    }

    let product_repo = ProductRepository::new(&pool);
    for entry in &seed.products {
        let product = Product {
            id: ProductId::new(slugify(&entry.name)),
            name: entry.name.clone(),
            category: CategoryId::new(entry.category.clone()),
            description: entry.description.clone(),
            price: entry.price,
            image_url: entry.image_url.clone(),
            emoji: entry.emoji.clone(),
            stock: entry.stock,
            featured: entry.featured,
            active: entry.active,
            created_at: now,
            updated_at: now,
        };
        product_repo.upsert(&product).await?;
        info!(id = %product.id, "Seeded product");
    }

    let settings_repo = SettingsRepository::new(&pool);
    for (key, value) in &seed.settings {
        settings_repo.upsert(key, value).await?;
    }

    info!("Seeding complete!");
    Ok(())
}

/// Check seed entries before any write happens.
fn validate(seed: &SeedFile) -> Result<(), String> {
    let category_ids: Vec<String> = seed
        .categories
        .iter()
        .map(|c| slugify(&c.name))
        .collect();

    for entry in &seed.categories {
        if slugify(&entry.name).is_empty() {
            return Err(format!("category name produces an empty id: {:?}", entry.name));
        }
    }

    for entry in &seed.products {
        if slugify(&entry.name).is_empty() {
            return Err(format!("product name produces an empty id: {:?}", entry.name));
        }
        if entry.price < Decimal::ZERO {
            return Err(format!("product has a negative price: {:?}", entry.name));
        }
        if entry.stock < 0 {
            return Err(format!("product has negative stock: {:?}", entry.name));
        }
        if !category_ids.contains(&entry.category) {
            return Err(format!(
                "product {:?} references unknown category {:?}",
                entry.name, entry.category
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r"
settings:
  company_name: Oli Poli
  whatsapp: '5511987654321'
categories:
  - name: Brinquedos
    icon: 🧸
products:
  - name: Cofrinho Unicórnio
    category: brinquedos
    price: 29.90
    emoji: 🦄
    stock: 10
";

    #[test]
    fn test_sample_parses_and_validates() {
        let seed: SeedFile = serde_yaml::from_str(SAMPLE).expect("parse");
        assert_eq!(seed.categories.len(), 1);
        assert_eq!(seed.products.len(), 1);
        assert_eq!(
            seed.products[0].price,
            "29.90".parse::<Decimal>().expect("decimal")
        );
        assert!(seed.products[0].active, "active defaults to true");
        assert!(validate(&seed).is_ok());
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let mut seed: SeedFile = serde_yaml::from_str(SAMPLE).expect("parse");
        seed.products[0].category = "festa".to_string();
        assert!(validate(&seed).is_err());
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let mut seed: SeedFile = serde_yaml::from_str(SAMPLE).expect("parse");
        seed.products[0].price = "-1".parse().expect("decimal");
        assert!(validate(&seed).is_err());
    }
}
