//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{HomophonyArgs, OutputFormat};
use crate::corpus::GenerationStats;
use crate::error::Result;

/// Result structure for index building.
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexBuildResult {
    pub words: usize,
    pub groups: usize,
    pub output: Option<String>,
    pub duration_ms: u64,
}

/// Result structure for corpus generation.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationResult {
    pub output_dir: String,
    #[serde(flatten)]
    pub stats: GenerationStats,
    pub duration_ms: u64,
}

/// Output a command summary in the requested format.
///
/// Summaries go to stderr so that data written to stdout stays parseable.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &HomophonyArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &HomophonyArgs) -> Result<()> {
    if args.verbosity() == 0 {
        return Ok(());
    }

    eprintln!("{message}");
    let value = serde_json::to_value(result)?;
    if let Some(fields) = value.as_object() {
        for (key, value) in fields {
            if value.is_null() {
                continue;
            }
            let key = key.replace('_', " ");
            match value.as_str() {
                Some(text) => eprintln!("  {key}: {text}"),
                None => eprintln!("  {key}: {value}"),
            }
        }
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T) -> Result<()> {
    eprintln!("{}", serde_json::to_string(result)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_result_flattens_stats() {
        let result = GenerationResult {
            output_dir: "out".to_string(),
            stats: GenerationStats {
                files: 2,
                paragraphs: 3,
                samples: 10,
            },
            duration_ms: 5,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["files"], 2);
        assert_eq!(value["samples"], 10);
        assert_eq!(value["output_dir"], "out");
    }
}
