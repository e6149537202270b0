//! Config and dataset loading shared by every subcommand.

use crate::DataArgs;
use anyhow::Context as _;
use drought_core::config::DashboardConfig;
use drought_core::state_coordinates::StateCoordinates;
use drought_data::{Dataset, LookupIndex};
use log::info;

/// Everything a subcommand reads: the effective config, the loaded
/// dataset and the state coordinate table.
pub struct Context {
    pub config: DashboardConfig,
    pub dataset: Dataset,
    pub coordinates: StateCoordinates,
    /// The dataset resource was unavailable or undecodable
    pub load_failed: bool,
}

/// Built-in config, or the given file, with `--data` applied on top.
pub fn resolve_config(args: &DataArgs) -> anyhow::Result<DashboardConfig> {
    let mut config = match &args.config {
        Some(path) => DashboardConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DashboardConfig::builtin(),
    };
    if let Some(data) = &args.data {
        config.data_source = data.clone();
    }
    Ok(config)
}

impl Context {
    pub fn new(config: DashboardConfig, dataset: Dataset) -> Self {
        Context {
            config,
            dataset,
            coordinates: StateCoordinates::builtin(),
            load_failed: false,
        }
    }

    /// Load the dataset named by the config. A missing or malformed
    /// dataset yields an empty one, never an error.
    pub async fn load(args: &DataArgs) -> anyhow::Result<Self> {
        let config = resolve_config(args)?;
        let (dataset, failure) = Dataset::load_or_empty(&config.source(), config.fetch_timeout()).await;
        info!(
            "context: {} prediction records from {}",
            dataset.len(),
            config.data_source
        );
        let mut ctx = Context::new(config, dataset);
        ctx.load_failed = failure.is_some();
        Ok(ctx)
    }

    pub fn index(&self) -> LookupIndex {
        self.dataset.index_or_fallback(
            self.config.map_years,
            self.load_failed,
            self.config.use_fallback_index,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[test]
    fn test_data_flag_overrides_config() {
        let args = DataArgs {
            data: Some("https://example.org/predictions.json".to_string()),
            config: None,
        };
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.data_source, "https://example.org/predictions.json");
        assert!(config.allow_synthetic);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args = DataArgs {
            data: None,
            config: Some("/nonexistent/dashboard_config.json".into()),
        };
        assert!(resolve_config(&args).is_err());
    }

    #[tokio::test]
    async fn test_load_from_temp_file() {
        let path = std::env::temp_dir().join("drought_cmd_context_test.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"predictions":[{{"state":"Goa","district":"Panaji","year":2024,"month":2,"drought_severity":1.2}}]}}"#
        )
        .unwrap();
        let args = DataArgs {
            data: Some(path.display().to_string()),
            config: None,
        };
        let ctx = Context::load(&args).await.unwrap();
        assert_eq!(ctx.dataset.len(), 1);
        assert_eq!(ctx.index().states, vec!["Goa"]);
        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_empty_dataset_file_keeps_dataset_index() {
        let path = std::env::temp_dir().join(format!("drought_cmd_empty_{}.json", std::process::id()));
        std::fs::write(&path, "[]").unwrap();
        let args = DataArgs {
            data: Some(path.display().to_string()),
            config: None,
        };
        let ctx = Context::load(&args).await.unwrap();
        std::fs::remove_file(&path).ok();
        assert!(!ctx.load_failed);
        let index = ctx.index();
        assert!(index.can_serve_predictions());
        assert!(index.states.is_empty());
    }

    #[tokio::test]
    async fn test_not_found_response_falls_back_to_builtin_index() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 2048];
                let _ = socket.read(&mut buf).await;
                let _ = socket
                    .write_all(b"HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
                    .await;
                let _ = socket.shutdown().await;
            }
        });
        let args = DataArgs {
            data: Some(format!("http://{addr}/prediction_data.json")),
            config: None,
        };
        let ctx = Context::load(&args).await.unwrap();
        assert!(ctx.load_failed);
        assert!(ctx.dataset.is_empty());
        assert!(!ctx.index().can_serve_predictions());
    }

    #[tokio::test]
    async fn test_unavailable_data_falls_back_to_builtin_index() {
        let args = DataArgs {
            data: Some("/nonexistent/prediction_data.json".to_string()),
            config: None,
        };
        let ctx = Context::load(&args).await.unwrap();
        assert!(ctx.dataset.is_empty());
        let index = ctx.index();
        assert!(!index.can_serve_predictions());
        assert!(index.periods.is_empty());
    }
}
