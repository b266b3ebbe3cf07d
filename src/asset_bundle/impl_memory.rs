use crate::asset_bundle::interface::AssetBundle;
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Bundle backed by in-memory bytes. Counts how many times assets were opened.
#[derive(Default)]
pub struct AssetBundleMemory {
    assets: HashMap<String, Vec<u8>>,
    opens: AtomicUsize,
}

impl AssetBundleMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_asset(mut self, name: &str, bytes: Vec<u8>) -> Self {
        self.assets.insert(name.to_string(), bytes);
        self
    }

    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

impl AssetBundle for AssetBundleMemory {
    fn open(&self, name: &str) -> std::io::Result<Box<dyn Read + Send>> {
        let bytes = self.assets.get(name).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} is not in the bundle", name),
            )
        })?;
        self.opens.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(Cursor::new(bytes.clone())))
    }
}
