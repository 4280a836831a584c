//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the catalog feed configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        match config.validate() {
            Ok(_) => {
                println!("✅ Configuration is valid");
                println!();
                println!("Configuration Summary:");
                println!("  Log Level: {}", config.application.log_level);
                println!("  Dry Run: {}", config.application.dry_run);
                println!("  Domain: {}", config.feed.domain_id);
                println!("  Page Size: {}", config.feed.page_size);
                println!(
                    "  Out-of-stock Delivery Days: {}",
                    config.feed.out_of_stock_delivery_days
                );
                println!(
                    "  Image Size Limit: {}x{}",
                    config.feed.image_max_width, config.feed.image_max_height
                );
                println!("  Output: {}", config.export.output_path);
                println!("  Max Retries: {}", config.export.max_retries);
                if let Some(cursor) = config.export.start_cursor {
                    println!("  Start Cursor: {cursor}");
                }
                if config.logging.local_enabled {
                    println!(
                        "  Log Files: {} ({})",
                        config.logging.local_path, config.logging.local_rotation
                    );
                }
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(2)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_validate_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[feed]\ndomain_id = 1\npage_size = 50").unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_validate_invalid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[feed]\ndomain_id = 1\npage_size = 0").unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_validate_missing_file() {
        let code = ValidateArgs {}
            .execute("/nonexistent/catalog-feed.toml")
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
