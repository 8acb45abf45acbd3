use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Blob storage backend configuration.
    pub storage: StorageConfig,
}

/// Which blob storage backend to use for evidence images.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// Local filesystem storage (development default).
    Local {
        /// Directory blobs are written under.
        root: String,
        /// Base URL blobs are served from (no trailing slash).
        public_base_url: String,
    },
    /// S3 storage; logical buckets are prefixed with `bucket_prefix`.
    S3 { bucket_prefix: String },
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `HOST`                 | `0.0.0.0`                        |
    /// | `PORT`                 | `3000`                           |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`          |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                             |
    /// | `STORAGE_BACKEND`      | `local`                          |
    /// | `STORAGE_ROOT`         | `./blobs` (local backend)        |
    /// | `PUBLIC_BLOB_BASE_URL` | `http://localhost:3000/blobs`    |
    /// | `S3_BUCKET_PREFIX`     | -- (required for the s3 backend) |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();
        let storage = StorageConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            storage,
        }
    }
}

impl StorageConfig {
    /// Load the storage backend selection from `STORAGE_BACKEND`.
    ///
    /// # Panics
    ///
    /// Panics on an unknown backend name or a missing `S3_BUCKET_PREFIX`
    /// when the s3 backend is selected -- misconfiguration should fail fast
    /// at startup.
    pub fn from_env() -> Self {
        let backend = std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "local".into());
        match backend.as_str() {
            "local" => StorageConfig::Local {
                root: std::env::var("STORAGE_ROOT").unwrap_or_else(|_| "./blobs".into()),
                public_base_url: std::env::var("PUBLIC_BLOB_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:3000/blobs".into()),
            },
            "s3" => StorageConfig::S3 {
                bucket_prefix: std::env::var("S3_BUCKET_PREFIX")
                    .expect("S3_BUCKET_PREFIX must be set when STORAGE_BACKEND=s3"),
            },
            other => panic!("Unknown STORAGE_BACKEND '{other}'. Must be 'local' or 's3'"),
        }
    }
}
