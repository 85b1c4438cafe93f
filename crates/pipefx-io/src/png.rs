//! PNG format support.
//!
//! Reads 8-bit and 16-bit RGB, RGBA, grayscale, grayscale+alpha and
//! palette PNGs, normalised to 8-bit [`Rgb`] pixels. Alpha is not kept in
//! the buffer; an image with any alpha sample below 255 is flagged
//! translucent. Writes 8-bit RGB.
//!
//! # Example
//!
//! ```rust,ignore
//! use pipefx_io::png::{read, write};
//!
//! let image = read("input.png")?;
//! write("output.png", &image)?;
//! ```

use crate::{IoError, IoResult};
use pipefx_core::{ImageBuffer, Rgb};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Cursor, Seek, Write};
use std::path::Path;
use tracing::debug;

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageBuffer> {
    let file = File::open(path.as_ref())?;
    let image = decode(BufReader::new(file))?;
    debug!(path = %path.as_ref().display(), width = image.width(), height = image.height(), "png read");
    Ok(image)
}

/// Decodes a PNG held in memory.
pub fn read_from_memory(data: &[u8]) -> IoResult<ImageBuffer> {
    decode(Cursor::new(data))
}

/// Writes an image to a PNG file as 8-bit RGB.
pub fn write<P: AsRef<Path>>(path: P, image: &ImageBuffer) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    encode(BufWriter::new(file), image)?;
    debug!(path = %path.as_ref().display(), width = image.width(), height = image.height(), "png written");
    Ok(())
}

/// Encodes an image to PNG bytes as 8-bit RGB.
pub fn write_to_memory(image: &ImageBuffer) -> IoResult<Vec<u8>> {
    let mut buf = Vec::new();
    encode(&mut buf, image)?;
    Ok(buf)
}

fn decode<R: BufRead + Seek>(reader: R) -> IoResult<ImageBuffer> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    let bytes = &buf[..info.buffer_size()];

    let (pixels, translucent): (Vec<Rgb>, bool) = match (info.color_type, info.bit_depth) {
        (png::ColorType::Rgb, png::BitDepth::Eight) => (
            bytes.chunks_exact(3).map(|c| Rgb::new(c[0], c[1], c[2])).collect(),
            false,
        ),
        (png::ColorType::Rgba, png::BitDepth::Eight) => (
            bytes.chunks_exact(4).map(|c| Rgb::new(c[0], c[1], c[2])).collect(),
            bytes.chunks_exact(4).any(|c| c[3] < u8::MAX),
        ),
        (png::ColorType::Grayscale, png::BitDepth::Eight) => {
            (bytes.iter().map(|&g| Rgb::new(g, g, g)).collect(), false)
        }
        (png::ColorType::GrayscaleAlpha, png::BitDepth::Eight) => (
            bytes.chunks_exact(2).map(|c| Rgb::new(c[0], c[0], c[0])).collect(),
            bytes.chunks_exact(2).any(|c| c[1] < u8::MAX),
        ),
        (color_type, bit_depth) => {
            return Err(IoError::UnsupportedFormat(format!(
                "{:?} {:?}",
                color_type, bit_depth
            )));
        }
    };

    Ok(ImageBuffer::from_pixels(info.width, info.height, pixels)?.with_translucent(translucent))
}

fn encode<W: Write>(writer: W, image: &ImageBuffer) -> IoResult<()> {
    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    let bytes: Vec<u8> = image.data().iter().flat_map(|px| px.to_array()).collect();
    png_writer
        .write_image_data(&bytes)
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_raw(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);
            let mut w = encoder.write_header().unwrap();
            w.write_image_data(data).unwrap();
            w.finish().unwrap();
        }
        out
    }

    #[test]
    fn test_rgb_memory_roundtrip() {
        let data = (0..12u32)
            .map(|i| Rgb::new(i as u8 * 20, 255 - i as u8, 7))
            .collect();
        let image = ImageBuffer::from_pixels(4, 3, data).unwrap();
        let bytes = write_to_memory(&image).unwrap();
        let loaded = read_from_memory(&bytes).unwrap();
        assert_eq!(loaded, image);
        assert!(!loaded.is_translucent());
    }

    #[test]
    fn test_rgba_sets_translucent() {
        let opaque = encode_raw(2, 1, png::ColorType::Rgba, &[1, 2, 3, 255, 4, 5, 6, 255]);
        let img = read_from_memory(&opaque).unwrap();
        assert!(!img.is_translucent());
        assert_eq!(img.pixel(1, 0), Rgb::new(4, 5, 6));

        let partial = encode_raw(2, 1, png::ColorType::Rgba, &[1, 2, 3, 255, 4, 5, 6, 128]);
        assert!(read_from_memory(&partial).unwrap().is_translucent());
    }

    #[test]
    fn test_grayscale_expanded() {
        let gray = encode_raw(2, 1, png::ColorType::Grayscale, &[0, 200]);
        let img = read_from_memory(&gray).unwrap();
        assert_eq!(img.pixel(1, 0), Rgb::new(200, 200, 200));

        let ga = encode_raw(1, 1, png::ColorType::GrayscaleAlpha, &[50, 0]);
        let img = read_from_memory(&ga).unwrap();
        assert_eq!(img.pixel(0, 0), Rgb::new(50, 50, 50));
        assert!(img.is_translucent());
    }

    #[test]
    fn test_garbage_rejected() {
        let err = read_from_memory(b"not a png").unwrap_err();
        assert!(matches!(err, IoError::DecodeError(_)));
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundtrip.png");
        let image = ImageBuffer::filled(5, 2, Rgb::new(9, 99, 199));
        write(&path, &image).unwrap();
        assert_eq!(read(&path).unwrap(), image);
    }
}
