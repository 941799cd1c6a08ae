//! Test fixtures: images built in memory.

use dithertone::rendering::encode_png;
use tone_dither::Raster;

/// Encode a raster as PNG bytes
pub fn png(raster: &Raster) -> Vec<u8> {
    encode_png(raster, false).expect("Failed to encode fixture")
}

/// Solid white image
pub fn white(width: u32, height: u32) -> Raster {
    Raster::filled(width, height, [255, 255, 255, 255])
}

/// One white and one black pixel side by side
pub fn white_black() -> Raster {
    let mut raster = Raster::filled(2, 1, [0, 0, 0, 255]);
    raster.set_pixel(0, 0, [255, 255, 255, 255]);
    raster
}

/// Horizontal gray ramp with varying alpha per row
pub fn ramp(width: u32, height: u32) -> Raster {
    let mut raster = Raster::filled(width, height, [0, 0, 0, 255]);
    for y in 0..height {
        for x in 0..width {
            let v = (x * 255 / (width - 1).max(1)) as u8;
            raster.set_pixel(x, y, [v, v, v, 255 - (y * 30 % 256) as u8]);
        }
    }
    raster
}
