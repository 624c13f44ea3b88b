use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write a binary P6 PPM image.
///
/// `pixels` is row-major packed RGBA (one byte each for red, green, blue,
/// alpha, in that order) with row 0 at the bottom of the image. The file's
/// row order is flipped so its first row is the top of the image, and the
/// alpha channel is dropped: header `P6\n<w> <h>\n255\n`, then exactly
/// `w * h * 3` raw bytes.
pub fn write_ppm(path: &Path, width: u32, height: u32, pixels: &[u32]) -> io::Result<()> {
    assert_eq!(
        pixels.len(),
        (width * height) as usize,
        "pixel buffer does not match the stated dimensions"
    );

    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    write!(out, "P6\n{} {}\n255\n", width, height)?;

    let bytes: &[u8] = bytemuck::cast_slice(pixels);
    let w = width as usize;
    let mut row = vec![0u8; 3 * w];
    for y in 0..height as usize {
        let src = &bytes[(height as usize - 1 - y) * w * 4..][..w * 4];
        for x in 0..w {
            row[3 * x..3 * x + 3].copy_from_slice(&src[4 * x..4 * x + 3]);
        }
        out.write_all(&row)?;
    }
    out.flush()
}
