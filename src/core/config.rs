use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub categories: CategoriesConfig,
    pub supabase: Option<SupabaseConfig>,
    pub database: Option<DatabaseConfig>,
    pub admin: AdminConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

/// Which backend serves the `categories` table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySourceKind {
    /// Hosted Supabase project, reached over its PostgREST API
    Supabase,
    /// Direct Postgres connection
    Postgres,
}

impl std::str::FromStr for CategorySourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "supabase" => Ok(Self::Supabase),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            other => Err(format!(
                "CATEGORY_SOURCE must be 'supabase' or 'postgres', got '{}'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CategoriesConfig {
    pub source: CategorySourceKind,
    pub cache_ttl: Duration,
}

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
    pub categories_table: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

/// Admin capability settings.
///
/// When no token is configured every admin route answers 403.
#[derive(Debug, Clone, Default)]
pub struct AdminConfig {
    pub api_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        let categories = CategoriesConfig::from_env()?;
        let (supabase, database) = match categories.source {
            CategorySourceKind::Supabase => (Some(SupabaseConfig::from_env()?), None),
            CategorySourceKind::Postgres => (None, Some(DatabaseConfig::from_env()?)),
        };

        Ok(Config {
            app: AppConfig::from_env()?,
            categories,
            supabase,
            database,
            admin: AdminConfig::from_env(),
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl CategoriesConfig {
    const DEFAULT_CACHE_TTL_SECS: u64 = 300; // 5 minutes

    pub fn from_env() -> Result<Self, String> {
        let source = env::var("CATEGORY_SOURCE")
            .unwrap_or_else(|_| "supabase".to_string())
            .parse::<CategorySourceKind>()?;

        let cache_ttl_secs = env::var("CATEGORY_CACHE_TTL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_CACHE_TTL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "CATEGORY_CACHE_TTL_SECS must be a valid number".to_string())?;

        Ok(Self {
            source,
            cache_ttl: Duration::from_secs(cache_ttl_secs),
        })
    }
}

impl Default for CategoriesConfig {
    fn default() -> Self {
        Self {
            source: CategorySourceKind::Supabase,
            cache_ttl: Duration::from_secs(Self::DEFAULT_CACHE_TTL_SECS),
        }
    }
}

impl SupabaseConfig {
    const DEFAULT_TIMEOUT_SECS: u64 = 10;

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("SUPABASE_URL")
            .map_err(|_| "SUPABASE_URL environment variable is required".to_string())?
            .trim_end_matches('/')
            .to_string();

        let anon_key = env::var("SUPABASE_ANON_KEY")
            .map_err(|_| "SUPABASE_ANON_KEY environment variable is required".to_string())?;

        let categories_table =
            env::var("SUPABASE_CATEGORIES_TABLE").unwrap_or_else(|_| "categories".to_string());

        let timeout_secs = env::var("SUPABASE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "SUPABASE_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            anon_key,
            categories_table,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Base URL of the PostgREST endpoint (`<project>/rest/v1`)
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.url)
    }
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 5;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
        })
    }
}

impl AdminConfig {
    pub fn from_env() -> Self {
        // Only enable the admin capability for a non-empty token
        let api_token = env::var("ADMIN_API_TOKEN").ok().filter(|s| !s.is_empty());
        Self { api_token }
    }
}
