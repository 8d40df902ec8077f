//! Report outputs for the `scrape-all` command.
//!
//! - [`json`]: writes the [`BatchReport`](crate::models::BatchReport) to a timestamped file
//! - [`text`]: renders the human-readable summary printed to stdout
//!
//! ```text
//! output_dir/
//! ├── scraping_results_20250714_081502.json
//! └── scraping_results_20250714_201933.json
//! ```

pub mod json;
pub mod text;
