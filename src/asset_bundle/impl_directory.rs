use crate::asset_bundle::interface::AssetBundle;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

pub struct AssetBundleDirectory {
    root: PathBuf,
}

impl AssetBundleDirectory {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl AssetBundle for AssetBundleDirectory {
    fn open(&self, name: &str) -> std::io::Result<Box<dyn Read + Send>> {
        let file = File::open(self.root.join(name))?;
        Ok(Box::new(file))
    }
}
