use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::error::{ModelError, Result};
use crate::sarimax::SarimaxModel;

/// Serialized model as written by the training process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Human readable model name
    pub name: String,
    /// Optional free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Unit of the forecast variable
    #[serde(default = "default_units")]
    pub units: String,
    /// Trained model
    pub model: SarimaxModel,
}

fn default_units() -> String {
    "km/h".to_string()
}

/// On-disk encoding of an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Json,
    Yaml,
}

impl ArtifactFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Ok(ArtifactFormat::Json),
            Some("yaml") | Some("yml") => Ok(ArtifactFormat::Yaml),
            Some(other) => Err(ModelError::UnsupportedFormat(other.to_string())),
            None => Err(ModelError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

impl ModelArtifact {
    /// Read, parse and validate an artifact file.
    ///
    /// The file is read fully and closed before parsing starts.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self> {
        let format = ArtifactFormat::from_path(path)?;
        debug!(?format, "Reading model artifact");

        let contents = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let artifact = Self::parse(&contents, format)?;
        info!(
            name = %artifact.name,
            model = %artifact.model,
            frequency = %artifact.model.frequency,
            last_observed = %artifact.model.last_observed,
            "Loaded model artifact"
        );
        Ok(artifact)
    }

    /// Parse and validate an artifact held in memory.
    pub fn parse(contents: &str, format: ArtifactFormat) -> Result<Self> {
        let artifact: ModelArtifact = match format {
            ArtifactFormat::Json => serde_json::from_str(contents)?,
            ArtifactFormat::Yaml => serde_yaml::from_str(contents)?,
        };
        artifact.model.validate()?;
        Ok(artifact)
    }
}
