use serde::Deserialize;
use std::fs;
use std::path::Path;

const DEFAULT_EXCEL_PATH: &str = "#Complete_Styrenics_Products_Overview.xlsx";
const DEFAULT_DB_PATH: &str = "catalog.db";
const DEFAULT_ADMIN_EMAIL: &str = "admin@versalis.eni.com";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_excel_path")]
    pub excel_path: String,
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

fn default_excel_path() -> String {
    DEFAULT_EXCEL_PATH.to_string()
}

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            excel_path: default_excel_path(),
            db_path: default_db_path(),
        }
    }
}

/// Загружает конфигурацию из JSON-файла; отсутствующий файл не ошибка,
/// в этом случае используются значения по умолчанию.
pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    if !Path::new(path).exists() {
        return Ok(AppConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Учётные данные администратора берутся из окружения,
/// чтобы не хранить их в файле конфигурации.
pub fn admin_email() -> String {
    std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string())
}

pub fn admin_password() -> String {
    std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string())
}
