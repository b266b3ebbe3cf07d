use crate::asset_bundle::interface::AssetBundle;
use crate::error::Error;
use crate::library::logger::interface::Logger;
use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Copies bundled assets into writable local storage so they have a real path.
///
/// A non-empty file already present in storage is reused as is. There is no
/// version check, so an updated bundle is not picked up until storage is cleared.
#[derive(Clone)]
pub struct AssetMaterializer {
    bundle: Arc<dyn AssetBundle + Send + Sync>,
    storage_dir: PathBuf,
    chunk_size: usize,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl AssetMaterializer {
    pub fn new(
        bundle: Arc<dyn AssetBundle + Send + Sync>,
        storage_dir: PathBuf,
        chunk_size: usize,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            bundle,
            storage_dir,
            chunk_size: chunk_size.max(1),
            logger: logger.with_namespace("assets"),
        }
    }

    pub fn materialize(&self, name: &str) -> Result<PathBuf, Error> {
        validate_name(name)?;

        let target = self.storage_dir.join(name);

        if is_cached(&target) {
            let _ = self.logger.info(&format!("Cache hit for {}", name));
            return absolute(name, &target);
        }

        let copied = self.copy_from_bundle(name, &target)?;
        let _ = self
            .logger
            .info(&format!("Copied {} ({} bytes) to {}", name, copied, target.display()));

        absolute(name, &target)
    }

    fn copy_from_bundle(&self, name: &str, target: &Path) -> Result<u64, Error> {
        let mut reader = self
            .bundle
            .open(name)
            .map_err(|e| Error::resource_copy(name, e))?;

        fs::create_dir_all(&self.storage_dir).map_err(|e| Error::resource_copy(name, e))?;

        let partial = self.storage_dir.join(format!(".{}.part", name));
        let copied = match write_chunks(&mut reader, &partial, self.chunk_size) {
            Ok(copied) => copied,
            Err(e) => {
                let _ = fs::remove_file(&partial);
                return Err(Error::resource_copy(name, e));
            }
        };

        fs::rename(&partial, target).map_err(|e| Error::resource_copy(name, e))?;

        Ok(copied)
    }
}

fn write_chunks(reader: &mut dyn Read, path: &Path, chunk_size: usize) -> std::io::Result<u64> {
    let mut file = File::create(path)?;
    let mut buffer = vec![0u8; chunk_size];
    let mut copied = 0u64;

    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(read) => read,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        file.write_all(&buffer[..read])?;
        copied += read as u64;
    }

    file.flush()?;
    file.sync_all()?;

    Ok(copied)
}

fn is_cached(path: &Path) -> bool {
    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.len() > 0)
        .unwrap_or(false)
}

fn absolute(name: &str, path: &Path) -> Result<PathBuf, Error> {
    fs::canonicalize(path).map_err(|e| Error::resource_copy(name, e))
}

fn validate_name(name: &str) -> Result<(), Error> {
    let plain = Path::new(name)
        .file_name()
        .map(|file_name| file_name == name)
        .unwrap_or(false);

    if plain {
        Ok(())
    } else {
        Err(Error::resource_copy(
            name,
            std::io::Error::new(ErrorKind::InvalidInput, "asset name must be a plain file name"),
        ))
    }
}
