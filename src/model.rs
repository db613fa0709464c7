// Core structs: Category, Brand, Product + error types
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Brand {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub category_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub brand_id: i64,
    pub props: ProductProps,
    pub created_at: DateTime<Utc>,
}

/// Технические свойства марки. Каждая группа заполняет только свой
/// набор колонок, остальные поля остаются `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductProps {
    pub vicat_softening_temp: Option<f64>,
    pub vicat_temp: Option<f64>,
    pub vicat_a_temp: Option<f64>,
    pub vicat_b120_temp: Option<f64>,
    pub mfi220_10: Option<f64>,
    pub mfi200_5: Option<f64>,
    pub mfi260_5: Option<f64>,
    pub izod_impact: Option<f64>,
    pub charpy_impact: Option<f64>,
    pub particle_size_range: Option<String>,
    pub blowing_agent: Option<String>,
    pub density_range: Option<String>,
    pub type_label: Option<String>,
    pub main_applications: Option<String>,
}

/// Роли пользователей каталога. Сидер создаёт только администратора.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Editor => "EDITOR",
            Role::Viewer => "VIEWER",
        }
    }
}

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::XlsxError),
    #[error("workbook has no sheets")]
    NoSheet,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Sheet(#[from] SheetError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("password hash error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}
