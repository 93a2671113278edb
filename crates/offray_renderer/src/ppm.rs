//! Binary PPM (P6) output.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::renderer::ImageBuffer;

/// Write `image` as P6: a three-line ASCII header then raw RGB bytes,
/// top row first.
pub fn write_ppm<W: Write>(image: &ImageBuffer, mut writer: W) -> io::Result<()> {
    write!(writer, "P6\n{} {}\n255\n", image.width, image.height)?;
    writer.write_all(&image.to_rgb8())?;
    writer.flush()
}

/// Save `image` to `path` as binary PPM.
pub fn save_ppm<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> io::Result<()> {
    let file = File::create(path)?;
    write_ppm(image, BufWriter::new(file))
}
