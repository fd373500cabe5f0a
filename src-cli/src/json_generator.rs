use log::debug;
use starlane_ports::songgen::{GeneratedSongDto, GenerationError, SongGeneratorPort};
use std::fs;
use std::path::PathBuf;

/// Serves a generated-song payload from a file, whatever the theme.
pub struct JsonFileGenerator {
    path: PathBuf,
}

impl JsonFileGenerator {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SongGeneratorPort for JsonFileGenerator {
    fn generate(&self, theme: &str) -> Result<GeneratedSongDto, GenerationError> {
        debug!("generating {:?} from {}", theme, self.path.display());
        let data = fs::read(&self.path)
            .map_err(|e| GenerationError::Unavailable(format!("{}: {}", self.path.display(), e)))?;
        serde_json::from_slice(&data).map_err(|e| GenerationError::Failed(e.to_string()))
    }
}
