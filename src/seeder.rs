// Seeder: walks the classified sheet rows and persists the catalog.
use std::collections::HashMap;

use tracing::{error, info};

use crate::classifier::{Classifier, RowClass};
use crate::config;
use crate::groups::GroupDef;
use crate::model::{Role, SeedError, StorageError};
use crate::storage::SqliteStorage;
use crate::utils::slugify;

const BCRYPT_COST: u32 = 12;

#[derive(Debug, Default)]
pub struct SeedSummary {
    pub products_created: usize,
    pub products_skipped: usize,
}

/// Creates the default administrative account unless one already exists.
/// The password hash is only computed when the user is actually created.
pub fn provision_admin(storage: &SqliteStorage) -> Result<(), SeedError> {
    let email = config::admin_email();
    if storage.find_user_id_by_email(&email)?.is_some() {
        info!("✅ Admin user already present: {}", email);
        return Ok(());
    }

    let hash = bcrypt::hash(config::admin_password(), BCRYPT_COST)?;
    storage.upsert_user(&email, "Admin", &hash, Role::Admin)?;
    info!("✅ Admin user: {}", email);
    Ok(())
}

/// Runs the single seeding pass over the sheet rows. One bad product row is
/// logged and skipped; a failed category or brand write aborts the run, since
/// every following row of that section would be mis-attributed.
pub fn run(
    storage: &SqliteStorage,
    rows: &[Vec<String>],
    groups: &[GroupDef],
) -> Result<SeedSummary, SeedError> {
    let mut classifier = Classifier::new(groups);

    // Кэши slug → id живут только в пределах одного прогона
    let mut category_cache: HashMap<String, i64> = HashMap::new();
    let mut brand_cache: HashMap<String, i64> = HashMap::new();

    let mut current_brand_id: Option<i64> = None;
    let mut summary = SeedSummary::default();

    for row in rows {
        match classifier.classify(row) {
            RowClass::SectionStart { group, brand_name } => {
                let category_id = match category_cache.get(group.category_slug) {
                    Some(id) => *id,
                    None => {
                        let id =
                            storage.upsert_category(group.category_name, group.category_slug)?;
                        info!("📁 Category: {}", group.category_name);
                        category_cache.insert(group.category_slug.to_string(), id);
                        id
                    }
                };

                let brand_slug = slugify(&brand_name);
                let brand_id = match brand_cache.get(&brand_slug) {
                    Some(id) => *id,
                    None => {
                        let id = storage.upsert_brand(&brand_name, &brand_slug, category_id)?;
                        info!("🏷️  Brand: {}", brand_name);
                        brand_cache.insert(brand_slug, id);
                        id
                    }
                };
                current_brand_id = Some(brand_id);
            }
            RowClass::Data { group, name } => {
                let Some(brand_id) = current_brand_id else {
                    continue;
                };
                let slug = slugify(&name);
                match seed_product(storage, group, row, &name, &slug, brand_id) {
                    Ok(true) => {
                        info!("✅ {}", name);
                        summary.products_created += 1;
                    }
                    Ok(false) => {
                        info!("⏭️  Skipping duplicate: {}", name);
                        summary.products_skipped += 1;
                    }
                    Err(e) => error!("❌ Error seeding {}: {}", name, e),
                }
            }
            RowClass::HeaderLabel | RowClass::Ignored => {}
        }
    }

    Ok(summary)
}

/// Returns true if the product was created, false if a product with the same
/// slug already exists (first occurrence wins).
fn seed_product(
    storage: &SqliteStorage,
    group: &GroupDef,
    row: &[String],
    name: &str,
    slug: &str,
    brand_id: i64,
) -> Result<bool, StorageError> {
    if storage.find_product_id_by_slug(slug)?.is_some() {
        return Ok(false);
    }

    let props = (group.map_row)(row);
    storage.insert_product(name, slug, brand_id, &props)?;
    Ok(true)
}
