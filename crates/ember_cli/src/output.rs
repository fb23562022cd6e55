//! Image encoders for finished renders.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use ember_renderer::{color_to_rgb8, Color, ImageBuffer, PixelSink};

/// Plain-text PPM (P3) writer.
pub struct PpmWriter<W: Write> {
    writer: W,
}

impl<W: Write> PpmWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PixelSink for PpmWriter<W> {
    fn begin(&mut self, width: u32, height: u32) -> io::Result<()> {
        write!(self.writer, "P3\n{} {}\n255\n", width, height)
    }

    fn write_pixel(&mut self, color: Color) -> io::Result<()> {
        let [r, g, b] = color_to_rgb8(color);
        writeln!(self.writer, "{} {} {}", r, g, b)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Write `image` as PPM to stdout.
pub fn write_stdout(image: &ImageBuffer) -> Result<()> {
    let stdout = io::stdout();
    let mut sink = PpmWriter::new(BufWriter::new(stdout.lock()));
    image
        .write_to(&mut sink)
        .context("Failed to write image to stdout")?;
    Ok(())
}

/// Save `image` to `path`, picking the encoder from the extension.
pub fn save(image: &ImageBuffer, path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("ppm") => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut sink = PpmWriter::new(BufWriter::new(file));
            image
                .write_to(&mut sink)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        Some("png") => {
            let buffer = image::RgbImage::from_raw(image.width, image.height, image.to_rgb8())
                .ok_or_else(|| anyhow!("Image buffer does not match its dimensions"))?;
            buffer
                .save(path)
                .with_context(|| format!("Failed to save {}", path.display()))?;
        }
        _ => bail!(
            "Unsupported output format for {} (use .ppm or .png)",
            path.display()
        ),
    }

    log::info!("Saved {}", path.display());
    Ok(())
}
