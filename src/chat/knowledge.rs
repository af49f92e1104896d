use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::StartupError;

/// Lower-case phrases that route a free-text question to the salon fact sheet.
/// Plain substring test: no word boundaries, no negation handling.
const SALON_INFO_PHRASES: [&str; 2] = ["about your salon", "tell me about your salon"];

/// The salon fact sheet, returned verbatim.
#[derive(Debug, Clone)]
pub struct SalonInfo {
    text: String,
}

impl SalonInfo {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn load(path: &Path) -> Result<Self, StartupError> {
        let text = fs::read_to_string(path).map_err(|source| StartupError::SalonInfo {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded salon info from {} ({} bytes)", path.display(), text.len());
        Ok(Self { text })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn answers(utterance: &str) -> bool {
        let lowered = utterance.to_lowercase();
        SALON_INFO_PHRASES.iter().any(|phrase| lowered.contains(phrase))
    }
}
