use std::path::PathBuf;

/// Runtime configuration for embedding applications.
///
/// The engine takes everything it needs at construction; nothing in this
/// crate reads ambient globals after startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the admission log.
    pub data_dir: PathBuf,
    /// Prometheus exporter port. Metrics are disabled when unset.
    pub metrics_port: Option<u16>,
}

impl Config {
    /// Gather configuration from `TURFBOOK_*` environment variables,
    /// falling back to local defaults.
    pub fn from_env() -> Self {
        let data_dir = std::env::var("TURFBOOK_DATA_DIR").unwrap_or_else(|_| "./data".into());
        let metrics_port = std::env::var("TURFBOOK_METRICS_PORT")
            .ok()
            .and_then(|s| s.parse().ok());
        Self {
            data_dir: PathBuf::from(data_dir),
            metrics_port,
        }
    }

    /// Path of the admission log inside `data_dir`.
    pub fn wal_path(&self) -> PathBuf {
        self.data_dir.join("turfbook.wal")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wal_path_joins_data_dir() {
        let config = Config {
            data_dir: PathBuf::from("/var/lib/turfbook"),
            metrics_port: None,
        };
        assert_eq!(
            config.wal_path(),
            PathBuf::from("/var/lib/turfbook/turfbook.wal")
        );
    }
}
