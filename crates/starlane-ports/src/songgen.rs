use serde::{Deserialize, Serialize};

/// Song payload exactly as a generator hands it back, before any validation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneratedSongDto {
    pub title: String,
    pub difficulty: String,
    #[serde(default)]
    pub description: Option<String>,
    pub notes: Vec<GeneratedNoteDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneratedNoteDto {
    pub note: String,
    pub time: f64,
    pub duration: f64,
}

#[derive(thiserror::Error, Debug)]
pub enum GenerationError {
    #[error("generator unavailable: {0}")]
    Unavailable(String),
    #[error("generation failed: {0}")]
    Failed(String),
}

pub trait SongGeneratorPort: Send + Sync {
    fn generate(&self, theme: &str) -> Result<GeneratedSongDto, GenerationError>;
}
