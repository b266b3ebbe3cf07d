use crate::error::Error;
use crate::image_classifier::decoded_image::DecodedImage;
use crate::screen::interface::{Screen, ScreenEvent};
use eframe::egui;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Without a drawn frame for this long the window counts as hidden. eframe
/// stops calling `update` while the window is minimized.
const FRAME_STALL: Duration = Duration::from_secs(1);
const FRAME_CHECK_INTERVAL: Duration = Duration::from_millis(250);
const REPAINT_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Default)]
struct ScreenBuffer {
    pending_image: Option<egui::ColorImage>,
    label: String,
    metadata: String,
    notice: Option<(String, Instant)>,
    subscribers: Vec<Sender<ScreenEvent>>,
    last_frame: Option<Instant>,
    hidden: bool,
    closed: bool,
}

impl ScreenBuffer {
    fn publish(&mut self, event: ScreenEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event).is_ok());
    }

    fn set_hidden(&mut self, hidden: bool) {
        if self.closed || self.hidden == hidden {
            return;
        }
        self.hidden = hidden;
        self.publish(if hidden {
            ScreenEvent::Hidden
        } else {
            ScreenEvent::Visible
        });
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.publish(ScreenEvent::Closed);
        }
    }

    fn frame_drawn(&mut self, now: Instant, hidden: bool) {
        self.last_frame = Some(now);
        self.set_hidden(hidden);
    }

    /// Returns false once the window is closed.
    fn check_frames(&mut self, now: Instant) -> bool {
        if self.closed {
            return false;
        }
        if matches!(self.last_frame, Some(last) if now.duration_since(last) >= FRAME_STALL) {
            self.set_hidden(true);
        }
        true
    }
}

/// Minimized, or in the background behind another window.
fn is_hidden(viewport: &egui::ViewportInfo) -> bool {
    viewport.minimized == Some(true) || viewport.focused == Some(false)
}

fn lock(buffer: &Mutex<ScreenBuffer>) -> MutexGuard<'_, ScreenBuffer> {
    buffer.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Screen handle used by the rotation. The matching window is driven by eframe.
pub struct ScreenGui {
    buffer: Arc<Mutex<ScreenBuffer>>,
    max_texture_side: u32,
    notice_duration: Duration,
}

pub struct ScreenWindow {
    buffer: Arc<Mutex<ScreenBuffer>>,
    texture: Option<egui::TextureHandle>,
}

/// Publishes `Closed` once the window has gone away. Subscribers that arrive
/// later still receive it.
#[derive(Clone)]
pub struct ScreenCloser {
    buffer: Arc<Mutex<ScreenBuffer>>,
}

impl ScreenCloser {
    pub fn close(&self) {
        lock(&self.buffer).close();
    }
}

impl ScreenGui {
    pub fn new(max_texture_side: u32, notice_duration: Duration) -> (Self, ScreenWindow) {
        let buffer = Arc::new(Mutex::new(ScreenBuffer::default()));

        let screen = Self {
            buffer: buffer.clone(),
            max_texture_side,
            notice_duration,
        };

        let window = ScreenWindow {
            buffer,
            texture: None,
        };

        (screen, window)
    }

    pub fn closer(&self) -> ScreenCloser {
        ScreenCloser {
            buffer: self.buffer.clone(),
        }
    }
}

impl Screen for ScreenGui {
    fn show_image(&mut self, image: &DecodedImage) -> Result<(), Error> {
        if image.width() > self.max_texture_side || image.height() > self.max_texture_side {
            return Err(Error::Display(format!(
                "{} is {}x{}, larger than the {} pixel texture limit",
                image.name,
                image.width(),
                image.height(),
                self.max_texture_side
            )));
        }

        let rgba = image.image.to_rgba8();
        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [rgba.width() as usize, rgba.height() as usize],
            rgba.as_raw(),
        );

        lock(&self.buffer).pending_image = Some(color_image);
        Ok(())
    }

    fn write_label(&mut self, text: &str) -> Result<(), Error> {
        lock(&self.buffer).label = text.to_string();
        Ok(())
    }

    fn write_metadata(&mut self, text: &str) -> Result<(), Error> {
        lock(&self.buffer).metadata = text.to_string();
        Ok(())
    }

    fn show_notice(&mut self, text: &str) -> Result<(), Error> {
        lock(&self.buffer).notice = Some((text.to_string(), Instant::now() + self.notice_duration));
        Ok(())
    }

    fn events(&mut self) -> Receiver<ScreenEvent> {
        let (sender, receiver) = channel();
        let mut buffer = lock(&self.buffer);
        if buffer.closed {
            let _ = sender.send(ScreenEvent::Closed);
        } else {
            buffer.subscribers.push(sender);
        }
        receiver
    }
}

impl ScreenWindow {
    pub fn run(self, title: &str) -> Result<(), Error> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([480.0, 720.0])
                .with_title(title),
            ..Default::default()
        };

        watch_frames(self.buffer.clone());

        eframe::run_native(title, options, Box::new(|_cc| Box::new(self)))
            .map_err(|e| Error::Display(e.to_string()))
    }

    fn publish_lifecycle(&self, ctx: &egui::Context) {
        let (hidden, close_requested) = ctx.input(|i| {
            (
                is_hidden(i.viewport()),
                i.viewport().close_requested(),
            )
        });

        let mut buffer = lock(&self.buffer);
        buffer.frame_drawn(Instant::now(), hidden);
        if close_requested {
            buffer.close();
        }
    }
}

/// Hides the screen when frames stop arriving. Exits once the window closes.
fn watch_frames(buffer: Arc<Mutex<ScreenBuffer>>) {
    std::thread::spawn(move || {
        while lock(&buffer).check_frames(Instant::now()) {
            std::thread::sleep(FRAME_CHECK_INTERVAL);
        }
    });
}

impl eframe::App for ScreenWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.publish_lifecycle(ctx);

        let (label, metadata, notice) = {
            let mut buffer = lock(&self.buffer);

            if let Some(image) = buffer.pending_image.take() {
                self.texture =
                    Some(ctx.load_texture("classified-image", image, egui::TextureOptions::LINEAR));
            }

            if matches!(&buffer.notice, Some((_, until)) if *until <= Instant::now()) {
                buffer.notice = None;
            }

            (
                buffer.label.clone(),
                buffer.metadata.clone(),
                buffer.notice.as_ref().map(|(text, _)| text.clone()),
            )
        };

        egui::TopBottomPanel::bottom("classification").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.label(egui::RichText::new(label).size(22.0).strong());
            ui.add_space(4.0);
            ui.label(egui::RichText::new(metadata).monospace());
            ui.add_space(8.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.centered_and_justified(|ui| match &self.texture {
                Some(texture) => {
                    ui.add(
                        egui::Image::from_texture(egui::load::SizedTexture::from_handle(texture))
                            .shrink_to_fit(),
                    );
                }
                None => {
                    ui.spinner();
                }
            });
        });

        if let Some(notice) = notice {
            egui::Area::new(egui::Id::new("notice"))
                .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 16.0))
                .show(ctx, |ui| {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.label(notice);
                    });
                });
        }

        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}
