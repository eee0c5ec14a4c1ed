//! Writing rendered images to disk.
//!
//! PPM output is plain-text `P3`, one image row per line. PNG output goes
//! through the `image` crate with the same 8-bit pixels.

use crate::renderer::{color_to_rgb, ImageBuffer};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported output format `{0}` (expected .ppm or .png)")]
    UnsupportedFormat(String),
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Write `image` as an ASCII PPM (`P3`) to `writer`.
pub fn write_ppm<W: Write>(image: &ImageBuffer, mut writer: W) -> OutputResult<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for row in image.pixels.chunks_exact(image.width.max(1) as usize) {
        let line = row
            .iter()
            .map(|&color| {
                let [r, g, b] = color_to_rgb(color);
                format!("{r} {g} {b}")
            })
            .collect::<Vec<_>>()
            .join("\t");
        writeln!(writer, "{line}")?;
    }

    writer.flush()?;
    Ok(())
}

/// Save `image` to `path`, choosing the format from the file extension.
pub fn save_image<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> OutputResult<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "ppm" => {
            let file = File::create(path)?;
            write_ppm(image, BufWriter::new(file))?;
        }
        "png" => {
            let rgb = image::RgbImage::from_raw(image.width, image.height, image.to_rgb())
                .ok_or_else(|| {
                    std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        "pixel buffer does not match image size",
                    )
                })?;
            rgb.save_with_format(path, image::ImageFormat::Png)?;
        }
        _ => return Err(OutputError::UnsupportedFormat(extension)),
    }

    log::info!(
        "Saved {}x{} image to {}",
        image.width,
        image.height,
        path.display()
    );
    Ok(())
}
