//! PNG decoding to RGBA rasters and encoding back.

use std::io::Cursor;

use tone_dither::Raster;

use crate::error::ImageError;

/// PNG file signature.
pub const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";

/// Check the 8-byte PNG signature.
pub fn is_png(bytes: &[u8]) -> bool {
    bytes.len() >= PNG_SIGNATURE.len() && &bytes[..PNG_SIGNATURE.len()] == PNG_SIGNATURE
}

/// Decode any PNG into 8-bit straight-alpha RGBA.
///
/// Palette and low-bit-depth images are expanded, 16-bit channels are
/// stripped to 8 bits, and images without alpha become fully opaque.
/// Images with more than `max_pixels` pixels are rejected before their pixel
/// data is allocated.
pub fn decode_png(bytes: &[u8], max_pixels: u64) -> Result<Raster, ImageError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

    let mut reader = decoder
        .read_info()
        .map_err(|e| ImageError::Decode(e.to_string()))?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    if width == 0 || height == 0 {
        return Err(ImageError::UnsupportedDimensions { width, height });
    }
    if width as u64 * height as u64 > max_pixels {
        return Err(ImageError::TooManyPixels {
            width,
            height,
            max_pixels,
        });
    }

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader
        .next_frame(&mut buf)
        .map_err(|e| ImageError::Decode(e.to_string()))?;
    buf.truncate(frame.buffer_size());

    if frame.bit_depth != png::BitDepth::Eight {
        return Err(ImageError::Decode(format!(
            "unexpected bit depth {:?} after expansion",
            frame.bit_depth
        )));
    }

    let rgba = match frame.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => return Ok(Raster::from_rgb(width, height, &buf)?),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|px| [px[0], px[0], px[0], px[1]])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::Indexed => {
            return Err(ImageError::Decode("palette was not expanded".to_string()))
        }
    };

    Ok(Raster::new(width, height, rgba)?)
}

/// Encode a raster as an 8-bit RGBA PNG.
///
/// With `optimize`, the output is re-compressed with oxipng; if that fails
/// the plain encoding is returned.
pub fn encode_png(raster: &Raster, optimize: bool) -> Result<Vec<u8>, ImageError> {
    let (width, height) = raster.dimensions();
    if raster.is_empty() {
        return Err(ImageError::UnsupportedDimensions { width, height });
    }

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        // oxipng redoes compression anyway
        encoder.set_compression(if optimize {
            png::Compression::Fast
        } else {
            png::Compression::Default
        });
        let mut writer = encoder
            .write_header()
            .map_err(|e| ImageError::Encode(e.to_string()))?;
        writer
            .write_image_data(raster.as_bytes())
            .map_err(|e| ImageError::Encode(e.to_string()))?;
    }
    let png_bytes = buf.into_inner();

    if !optimize {
        return Ok(png_bytes);
    }

    match oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    ) {
        Ok(optimized) => {
            tracing::debug!(
                before = png_bytes.len(),
                after = optimized.len(),
                "PNG re-compressed"
            );
            Ok(optimized)
        }
        Err(e) => {
            tracing::warn!(%e, "oxipng failed, using unoptimized PNG");
            Ok(png_bytes)
        }
    }
}
