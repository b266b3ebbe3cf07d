use crate::error::Error;
use chrono::Offset;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_ENV_VAR: &str = "HELLO_CLASSIFIER_CONFIG";

/// Per-channel normalization applied to pixels scaled to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Normalization {
    pub mean: [f32; 3],
    pub std: [f32; 3],
}

impl Normalization {
    pub const TORCHVISION: Normalization = Normalization {
        mean: [0.485, 0.456, 0.406],
        std: [0.229, 0.224, 0.225],
    };
}

/// Where the rotation picks up after the screen becomes visible again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumePolicy {
    #[default]
    ContinueFromCurrent,
    RestartFromZero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenKind {
    #[default]
    Gui,
    Console,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub rotation_interval: Duration,
    pub model_asset: String,
    pub image_assets: Vec<String>,
    pub bundle_dir: PathBuf,
    pub storage_dir: PathBuf,
    pub copy_chunk_size: usize,
    /// Model input as (width, height).
    pub input_size: (u32, u32),
    pub normalization: Normalization,
    pub resume_policy: ResumePolicy,
    pub screen: ScreenKind,
    pub logger_timezone: chrono::FixedOffset,
    pub max_texture_side: u32,
    pub notice_duration: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rotation_interval: Duration::from_millis(5000),
            model_asset: "model.onnx".to_string(),
            image_assets: vec![
                "image.jpg".to_string(),
                "colibri.jpg".to_string(),
                "vaso_2000x2667.jpg".to_string(),
                "vaso_1000x1334.jpg".to_string(),
            ],
            bundle_dir: PathBuf::from("assets"),
            storage_dir: default_storage_dir(),
            copy_chunk_size: 4 * 1024,
            input_size: (224, 224),
            normalization: Normalization::TORCHVISION,
            resume_policy: ResumePolicy::default(),
            screen: ScreenKind::default(),
            logger_timezone: local_timezone(),
            max_texture_side: 8192,
            notice_duration: Duration::from_secs(3),
        }
    }
}

fn default_storage_dir() -> PathBuf {
    match dirs::data_local_dir() {
        Some(dir) => dir.join("hello-classifier").join("files"),
        None => PathBuf::from("files"),
    }
}

fn local_timezone() -> chrono::FixedOffset {
    chrono::Local::now().offset().fix()
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    rotation_interval_ms: Option<u64>,
    model_asset: Option<String>,
    image_assets: Option<Vec<String>>,
    bundle_dir: Option<PathBuf>,
    storage_dir: Option<PathBuf>,
    copy_chunk_size: Option<usize>,
    input_width: Option<u32>,
    input_height: Option<u32>,
    normalization: Option<Normalization>,
    resume_policy: Option<ResumePolicy>,
    screen: Option<ScreenKind>,
    logger_utc_offset_hours: Option<i32>,
    max_texture_side: Option<u32>,
    notice_duration_ms: Option<u64>,
}

impl Config {
    /// Defaults, overridden by the JSON file named in `HELLO_CLASSIFIER_CONFIG` if set.
    pub fn from_env() -> Result<Self, Error> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &text)
    }

    fn parse(path: &Path, text: &str) -> Result<Self, Error> {
        let file: ConfigFile = serde_json::from_str(text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::default().merge(file))
    }

    fn merge(mut self, file: ConfigFile) -> Self {
        if let Some(ms) = file.rotation_interval_ms {
            self.rotation_interval = Duration::from_millis(ms);
        }
        if let Some(model_asset) = file.model_asset {
            self.model_asset = model_asset;
        }
        if let Some(image_assets) = file.image_assets {
            self.image_assets = image_assets;
        }
        if let Some(bundle_dir) = file.bundle_dir {
            self.bundle_dir = bundle_dir;
        }
        if let Some(storage_dir) = file.storage_dir {
            self.storage_dir = storage_dir;
        }
        if let Some(chunk) = file.copy_chunk_size {
            self.copy_chunk_size = chunk.max(1);
        }
        if let Some(width) = file.input_width {
            self.input_size.0 = width;
        }
        if let Some(height) = file.input_height {
            self.input_size.1 = height;
        }
        if let Some(normalization) = file.normalization {
            self.normalization = normalization;
        }
        if let Some(resume_policy) = file.resume_policy {
            self.resume_policy = resume_policy;
        }
        if let Some(screen) = file.screen {
            self.screen = screen;
        }
        if let Some(offset) = file
            .logger_utc_offset_hours
            .and_then(|hours| chrono::FixedOffset::east_opt(hours * 3600))
        {
            self.logger_timezone = offset;
        }
        if let Some(side) = file.max_texture_side {
            self.max_texture_side = side;
        }
        if let Some(ms) = file.notice_duration_ms {
            self.notice_duration = Duration::from_millis(ms);
        }
        self
    }
}
