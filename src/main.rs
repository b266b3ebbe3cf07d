use asset_bundle::impl_directory::AssetBundleDirectory;
use asset_materializer::AssetMaterializer;
use config::{Config, ScreenKind};
use image_classifier::impl_tract_onnx::ModelLoaderTractOnnx;
use library::logger::{impl_console::LoggerConsole, interface::Logger};
use rotation::main::Rotation;
use screen::impl_console::ScreenConsole;
use screen::impl_gui::ScreenGui;
use screen::interface::Screen;
use std::sync::{Arc, Mutex};

mod asset_bundle;
mod asset_materializer;
mod config;
mod error;
mod image_classifier;
mod library;
mod rotation;
mod screen;

const WINDOW_TITLE: &str = "Hello Classifier";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let bundle = Arc::new(AssetBundleDirectory::new(config.bundle_dir.clone()));

    let materializer = AssetMaterializer::new(
        bundle,
        config.storage_dir.clone(),
        config.copy_chunk_size,
        logger.clone(),
    );

    let model_loader = Arc::new(ModelLoaderTractOnnx::new(
        config.input_size,
        config.normalization,
    ));

    match config.screen {
        ScreenKind::Gui => {
            let (screen, window) = ScreenGui::new(config.max_texture_side, config.notice_duration);
            let closer = screen.closer();
            let screen: Arc<Mutex<dyn Screen + Send + Sync>> = Arc::new(Mutex::new(screen));

            let rotation = Rotation::new(config, logger, materializer, model_loader, screen);
            let handle = std::thread::spawn(move || rotation.run());

            window.run(WINDOW_TITLE)?;
            closer.close();

            handle.join().map_err(|_| "rotation thread panicked")??;
        }
        ScreenKind::Console => {
            let screen: Arc<Mutex<dyn Screen + Send + Sync>> =
                Arc::new(Mutex::new(ScreenConsole::new()));

            let rotation = Rotation::new(config, logger, materializer, model_loader, screen);
            rotation.run()?;
        }
    }

    Ok(())
}
