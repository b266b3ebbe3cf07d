use crate::error::Error;
use crate::image_classifier::decoded_image::DecodedImage;
use crate::screen::interface::{Screen, ScreenEvent};
use std::io::{BufRead, Write};
use std::sync::mpsc::{channel, Receiver};

/// Prints to stdout. Reads `pause`, `resume` and `quit` from stdin.
pub struct ScreenConsole {
    label: String,
    metadata: String,
}

impl ScreenConsole {
    pub fn new() -> Self {
        Self {
            label: String::new(),
            metadata: String::new(),
        }
    }

    fn render(&self) -> Result<(), Error> {
        let width = self
            .metadata
            .lines()
            .chain(std::iter::once(self.label.as_str()))
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);

        let mut out = std::io::stdout().lock();
        let border = "─".repeat(width + 2);
        let mut lines = vec![format!("┌{}┐", border), boxed(&self.label, width)];
        if !self.metadata.is_empty() {
            lines.push(format!("├{}┤", border));
            lines.extend(self.metadata.lines().map(|line| boxed(line, width)));
        }
        lines.push(format!("└{}┘", border));

        for line in lines {
            writeln!(out, "{}", line).map_err(|e| Error::Display(e.to_string()))?;
        }
        Ok(())
    }
}

fn boxed(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text.chars().count());
    format!("│ {}{} │", text, " ".repeat(padding))
}

fn parse_command(line: &str) -> Option<ScreenEvent> {
    match line.trim().to_lowercase().as_str() {
        "p" | "pause" => Some(ScreenEvent::Hidden),
        "r" | "resume" => Some(ScreenEvent::Visible),
        "q" | "quit" => Some(ScreenEvent::Closed),
        _ => None,
    }
}

impl Screen for ScreenConsole {
    fn show_image(&mut self, image: &DecodedImage) -> Result<(), Error> {
        writeln!(
            std::io::stdout().lock(),
            "[image {} {}x{}]",
            image.name,
            image.width(),
            image.height()
        )
        .map_err(|e| Error::Display(e.to_string()))
    }

    fn write_label(&mut self, text: &str) -> Result<(), Error> {
        if self.label != text {
            self.label = text.to_string();
            self.render()?;
        }
        Ok(())
    }

    fn write_metadata(&mut self, text: &str) -> Result<(), Error> {
        if self.metadata != text {
            self.metadata = text.to_string();
            self.render()?;
        }
        Ok(())
    }

    fn show_notice(&mut self, text: &str) -> Result<(), Error> {
        writeln!(std::io::stdout().lock(), "! {}", text).map_err(|e| Error::Display(e.to_string()))
    }

    fn events(&mut self) -> Receiver<ScreenEvent> {
        let (sender, receiver) = channel();

        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if let Some(event) = parse_command(&line) {
                    if sender.send(event).is_err() || event == ScreenEvent::Closed {
                        break;
                    }
                }
            }
        });

        receiver
    }
}
