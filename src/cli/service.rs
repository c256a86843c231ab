//! Wiring shared by the commands: configuration, collaborators and input.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use crate::adapters::llm::{self, LlmWriter};
use crate::domain::models::Config;
use crate::domain::ports::Collaborators;
use crate::infrastructure::config::ConfigLoader;

/// Load configuration from `path` when given, otherwise from the project
/// hierarchy.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

/// LLM-backed writer for every collaborator port.
pub fn writer(config: &Config) -> Result<Arc<LlmWriter>> {
    let writer = llm::from_config(config).context("Failed to create provider client")?;
    if !writer.client().has_api_key() {
        tracing::warn!("no API key configured; set ANTHROPIC_API_KEY or provider.api_key");
    }
    Ok(Arc::new(writer))
}

pub fn collaborators(config: &Config) -> Result<Collaborators> {
    writer(config).map(Collaborators::from_provider)
}

/// Input text from the positional argument, a file, or stdin, in that order.
pub fn read_input(text: Option<String>, file: Option<&Path>) -> Result<String> {
    let input = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };

    if input.trim().is_empty() {
        bail!("No input text: pass TEXT, --file, or pipe text on stdin");
    }
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_input_prefers_argument() {
        let input = read_input(Some("inline".to_string()), None).unwrap();
        assert_eq!(input, "inline");
    }

    #[test]
    fn test_read_input_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "from a file").unwrap();
        let input = read_input(None, Some(file.path())).unwrap();
        assert_eq!(input, "from a file");
    }

    #[test]
    fn test_read_input_rejects_blank() {
        assert!(read_input(Some("  \n".to_string()), None).is_err());
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = read_input(None, Some(Path::new("/nonexistent/redraft.txt"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/redraft.txt"));
    }
}
