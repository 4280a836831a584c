//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "catalog-feed.toml")]
    pub output: String,

    /// Include comments explaining every option
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing catalog feed configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} and set feed.domain_id", self.output);
                println!("  2. Validate configuration: catalog-feed validate-config");
                println!("  3. Run export: catalog-feed export --catalog catalog.json");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Catalog Feed Configuration File

[application]
log_level = "info"
dry_run = false

[feed]
domain_id = 1
page_size = 1000
out_of_stock_delivery_days = 10
image_max_width = 1024
image_max_height = 1024

[export]
output_path = "feed.jsonl"
max_retries = 3
retry_backoff_ms = [1000, 2000, 4000]

[logging]
local_enabled = true
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with comments
    fn generate_config_with_examples() -> String {
        r#"# Catalog Feed Configuration File
#
# Values may reference environment variables as ${VAR_NAME}.
# Any key can also be overridden with CATALOG_FEED_<SECTION>_<KEY>,
# for example CATALOG_FEED_FEED_PAGE_SIZE=500.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Dry run mode (assemble records but don't write them)
dry_run = false

# ============================================================================
# Feed Settings
# ============================================================================
[feed]
# Storefront domain to export
domain_id = 1

# Products per page (1-10000)
page_size = 1000

# Delivery days reported for products that are out of stock
out_of_stock_delivery_days = 10

# Exported image URLs are limited to this size
image_max_width = 1024
image_max_height = 1024

# ============================================================================
# Export Settings
# ============================================================================
[export]
# Output file in JSON Lines format (one record per line)
output_path = "feed.jsonl"

# Retries per failed page (0-10)
max_retries = 3

# Delay before each retry in milliseconds; the last value is reused
retry_backoff_ms = [1000, 2000, 4000]

# Resume after this product id (printed at the end of an interrupted run)
# start_cursor = 1200

# ============================================================================
# Logging Settings
# ============================================================================
[logging]
# Write JSON log files in addition to console output
local_enabled = true

# Log directory
local_path = "./logs"

# Log rotation (daily or hourly)
local_rotation = "daily"
"#
        .to_string()
    }
}
