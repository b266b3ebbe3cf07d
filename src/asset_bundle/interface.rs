use std::io::Read;

/// Read-only source of named resources shipped with the application.
pub trait AssetBundle: Send + Sync {
    fn open(&self, name: &str) -> std::io::Result<Box<dyn Read + Send>>;
}
