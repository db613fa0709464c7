use crate::model::{Brand, Category, Product, ProductProps, Role, StorageError};
use chrono::Utc;
use rusqlite::{Connection, Row, params};

pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Создаёт новое хранилище, открывая соединение к БД и выполняя миграции
    pub fn new(db_path: &str) -> Result<Self, StorageError> {
        let conn = Connection::open(db_path)?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                password TEXT NOT NULL,
                role TEXT NOT NULL DEFAULT 'VIEWER',
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                slug TEXT NOT NULL UNIQUE,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS brands (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                slug TEXT NOT NULL UNIQUE,
                category_id INTEGER NOT NULL REFERENCES categories(id),
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS products (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                slug TEXT NOT NULL UNIQUE,
                brand_id INTEGER NOT NULL REFERENCES brands(id),
                type TEXT,
                main_applications TEXT,
                vicat_softening_temp REAL,
                vicat_temp REAL,
                vicat_a_temp REAL,
                vicat_b120_temp REAL,
                mfi220_10 REAL,
                mfi200_5 REAL,
                mfi260_5 REAL,
                izod_impact REAL,
                charpy_impact REAL,
                particle_size_range TEXT,
                blowing_agent TEXT,
                density_range TEXT,
                created_at TEXT NOT NULL
            );
            ",
        )?;

        // Автомиграции для таблицы products: описательные колонки EPS
        // появились позже числовых, существующие базы получают их здесь
        Self::migrate_add_column_if_missing(&conn, "products", "particle_size_range", "TEXT")?;
        Self::migrate_add_column_if_missing(&conn, "products", "blowing_agent", "TEXT")?;
        Self::migrate_add_column_if_missing(&conn, "products", "density_range", "TEXT")?;

        Ok(Self { conn })
    }

    /// Проверяет наличие столбца и в случае отсутствия добавляет его в таблицу
    fn migrate_add_column_if_missing(
        conn: &Connection,
        table: &str,
        column: &str,
        column_def: &str,
    ) -> Result<(), StorageError> {
        let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
        let existing_columns: Vec<String> = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<_, _>>()?;

        if !existing_columns.iter().any(|c| c == column) {
            let alter_sql = format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, column_def);
            conn.execute(&alter_sql, [])?;
        }

        Ok(())
    }

    /// Создаёт категорию, если её ещё нет; существующая строка не меняется.
    /// Возвращает id категории с данным slug.
    pub fn upsert_category(&self, name: &str, slug: &str) -> Result<i64, StorageError> {
        self.conn.execute(
            "INSERT INTO categories (name, slug, created_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(slug) DO NOTHING",
            params![name, slug, Utc::now().to_rfc3339()],
        )?;

        let id = self.conn.query_row(
            "SELECT id FROM categories WHERE slug = ?1",
            params![slug],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// Создаёт бренд внутри категории, если его ещё нет. Возвращает id бренда.
    pub fn upsert_brand(&self, name: &str, slug: &str, category_id: i64) -> Result<i64, StorageError> {
        self.conn.execute(
            "INSERT INTO brands (name, slug, category_id, created_at) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(slug) DO NOTHING",
            params![name, slug, category_id, Utc::now().to_rfc3339()],
        )?;

        let id = self.conn.query_row(
            "SELECT id FROM brands WHERE slug = ?1",
            params![slug],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// Создаёт пользователя, если его ещё нет; пароль существующего
    /// пользователя не перезаписывается.
    pub fn upsert_user(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO users (email, name, password, role, created_at) VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(email) DO NOTHING",
            params![email, name, password_hash, role.as_str(), Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    pub fn find_user_id_by_email(&self, email: &str) -> Result<Option<i64>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT id FROM users WHERE email = ?1")?;
        let mut rows = stmt.query(params![email])?;
        if let Some(row) = rows.next()? {
            Ok(Some(row.get(0)?))
        } else {
            Ok(None)
        }
    }

    /// Проверяет, существует ли продукт с данным slug.
    pub fn find_product_id_by_slug(&self, slug: &str) -> Result<Option<i64>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT id FROM products WHERE slug = ?1")?;
        let mut rows = stmt.query(params![slug])?;
        if let Some(row) = rows.next()? {
            Ok(Some(row.get(0)?))
        } else {
            Ok(None)
        }
    }

    /// Вставляет новый продукт. Дубликаты по slug должны быть отфильтрованы
    /// вызывающей стороной через `find_product_id_by_slug`.
    pub fn insert_product(
        &self,
        name: &str,
        slug: &str,
        brand_id: i64,
        props: &ProductProps,
    ) -> Result<i64, StorageError> {
        self.conn.execute(
            "INSERT INTO products (
                name, slug, brand_id, type, main_applications,
                vicat_softening_temp, vicat_temp, vicat_a_temp, vicat_b120_temp,
                mfi220_10, mfi200_5, mfi260_5, izod_impact, charpy_impact,
                particle_size_range, blowing_agent, density_range, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
            params![
                name,
                slug,
                brand_id,
                &props.type_label,
                &props.main_applications,
                &props.vicat_softening_temp,
                &props.vicat_temp,
                &props.vicat_a_temp,
                &props.vicat_b120_temp,
                &props.mfi220_10,
                &props.mfi200_5,
                &props.mfi260_5,
                &props.izod_impact,
                &props.charpy_impact,
                &props.particle_size_range,
                &props.blowing_agent,
                &props.density_range,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, slug, created_at FROM categories WHERE slug = ?1",
        )?;
        let mut rows = stmt.query(params![slug])?;
        if let Some(row) = rows.next()? {
            Ok(Some(Category {
                id: row.get(0)?,
                name: row.get(1)?,
                slug: row.get(2)?,
                created_at: parse_created_at(row, 3)?,
            }))
        } else {
            Ok(None)
        }
    }

    pub fn get_brand_by_slug(&self, slug: &str) -> Result<Option<Brand>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, slug, category_id, created_at FROM brands WHERE slug = ?1",
        )?;
        let mut rows = stmt.query(params![slug])?;
        if let Some(row) = rows.next()? {
            Ok(Some(Brand {
                id: row.get(0)?,
                name: row.get(1)?,
                slug: row.get(2)?,
                category_id: row.get(3)?,
                created_at: parse_created_at(row, 4)?,
            }))
        } else {
            Ok(None)
        }
    }

    pub fn get_product_by_slug(&self, slug: &str) -> Result<Option<Product>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, slug, brand_id, type, main_applications,
                    vicat_softening_temp, vicat_temp, vicat_a_temp, vicat_b120_temp,
                    mfi220_10, mfi200_5, mfi260_5, izod_impact, charpy_impact,
                    particle_size_range, blowing_agent, density_range, created_at
             FROM products WHERE slug = ?1",
        )?;
        let mut rows = stmt.query(params![slug])?;
        if let Some(row) = rows.next()? {
            Ok(Some(Self::map_product(row)?))
        } else {
            Ok(None)
        }
    }

    /// Возвращает количество категорий, брендов и продуктов для итоговой сводки.
    pub fn counts(&self) -> Result<(i64, i64, i64), StorageError> {
        let categories = self
            .conn
            .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?;
        let brands = self
            .conn
            .query_row("SELECT COUNT(*) FROM brands", [], |row| row.get(0))?;
        let products = self
            .conn
            .query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?;
        Ok((categories, brands, products))
    }

    /// Приватная функция для маппинга строки результата в структуру Product.
    fn map_product(row: &Row) -> Result<Product, rusqlite::Error> {
        Ok(Product {
            id: row.get(0)?,
            name: row.get(1)?,
            slug: row.get(2)?,
            brand_id: row.get(3)?,
            props: ProductProps {
                type_label: row.get(4)?,
                main_applications: row.get(5)?,
                vicat_softening_temp: row.get(6)?,
                vicat_temp: row.get(7)?,
                vicat_a_temp: row.get(8)?,
                vicat_b120_temp: row.get(9)?,
                mfi220_10: row.get(10)?,
                mfi200_5: row.get(11)?,
                mfi260_5: row.get(12)?,
                izod_impact: row.get(13)?,
                charpy_impact: row.get(14)?,
                particle_size_range: row.get(15)?,
                blowing_agent: row.get(16)?,
                density_range: row.get(17)?,
            },
            created_at: parse_created_at(row, 18)?,
        })
    }
}

fn parse_created_at(row: &Row, idx: usize) -> Result<chrono::DateTime<Utc>, rusqlite::Error> {
    let value: String = row.get(idx)?;
    value.parse().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> SqliteStorage {
        SqliteStorage::new(":memory:").unwrap()
    }

    #[test]
    fn test_upsert_category_is_create_if_absent() {
        let storage = storage();
        let first = storage.upsert_category("ABS", "abs").unwrap();
        // второй вызов с другим именем не перезаписывает строку
        let second = storage.upsert_category("ABS changed", "abs").unwrap();
        assert_eq!(first, second);

        let category = storage.get_category_by_slug("abs").unwrap().unwrap();
        assert_eq!(category.name, "ABS");
        let (categories, _, _) = storage.counts().unwrap();
        assert_eq!(categories, 1);
    }

    #[test]
    fn test_upsert_brand_links_category() {
        let storage = storage();
        let category_id = storage.upsert_category("ABS", "abs").unwrap();
        let brand_id = storage.upsert_brand("Sinkral", "sinkral", category_id).unwrap();
        assert_eq!(
            storage.upsert_brand("Sinkral", "sinkral", category_id).unwrap(),
            brand_id
        );

        let brand = storage.get_brand_by_slug("sinkral").unwrap().unwrap();
        assert_eq!(brand.category_id, category_id);
        assert_eq!(brand.name, "Sinkral");
    }

    #[test]
    fn test_product_insert_and_lookup() {
        let storage = storage();
        let category_id = storage.upsert_category("ABS", "abs").unwrap();
        let brand_id = storage.upsert_brand("Sinkral", "sinkral", category_id).unwrap();

        assert!(storage.find_product_id_by_slug("sinkral-g-8300").unwrap().is_none());

        let props = ProductProps {
            vicat_softening_temp: Some(98.0),
            izod_impact: Some(12.0),
            type_label: Some("Injection".into()),
            main_applications: Some("Automotive".into()),
            ..ProductProps::default()
        };
        storage
            .insert_product("Sinkral G-8300", "sinkral-g-8300", brand_id, &props)
            .unwrap();

        let product = storage.get_product_by_slug("sinkral-g-8300").unwrap().unwrap();
        assert_eq!(product.name, "Sinkral G-8300");
        assert_eq!(product.brand_id, brand_id);
        assert_eq!(product.props, props);
        // undeclared fields stay NULL in the row
        assert_eq!(product.props.mfi220_10, None);
        assert_eq!(product.props.particle_size_range, None);
    }

    #[test]
    fn test_upsert_user_keeps_existing_password() {
        let storage = storage();
        storage
            .upsert_user("admin@versalis.eni.com", "Admin", "hash-one", Role::Admin)
            .unwrap();
        storage
            .upsert_user("admin@versalis.eni.com", "Admin", "hash-two", Role::Admin)
            .unwrap();

        let id = storage.find_user_id_by_email("admin@versalis.eni.com").unwrap();
        assert!(id.is_some());

        let password: String = storage
            .conn
            .query_row(
                "SELECT password FROM users WHERE email = ?1",
                params!["admin@versalis.eni.com"],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(password, "hash-one");
    }

    #[test]
    fn test_migrations_are_idempotent_on_reopen() {
        // повторное открытие того же соединения-файла не должно падать;
        // для in-memory базы достаточно повторного прогона миграций
        let storage = storage();
        SqliteStorage::migrate_add_column_if_missing(&storage.conn, "products", "density_range", "TEXT")
            .unwrap();
    }
}
