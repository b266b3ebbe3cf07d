use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Cannot copy asset {name}: {source}")]
    ResourceCopy {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Model load failed: {0}")]
    ModelLoad(String),
    #[error("No model loaded")]
    ModelNotLoaded,
    #[error("Cannot open image: {name}")]
    ImageDecode {
        name: String,
        #[source]
        source: image::ImageError,
    },
    #[error("Inference failed: {0}")]
    Inference(String),
    #[error("Cannot display: {0}")]
    Display(String),
    #[error("Cannot read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Event channel closed")]
    EventChannelClosed,
}

impl Error {
    pub fn resource_copy(name: &str, source: std::io::Error) -> Self {
        Error::ResourceCopy {
            name: name.to_string(),
            source,
        }
    }
}
