//! Server configuration

/// Runtime configuration for the economy core
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the embedded database and logs
    pub work_dir: String,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/gallery".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    pub fn with_work_dir(work_dir: impl Into<String>) -> Self {
        Self {
            work_dir: work_dir.into(),
            environment: "development".into(),
        }
    }
}
