//! Separable Gaussian blur on premultiplied RGBA.

use crate::raster::{Raster, CHANNELS};

/// Kernel half-width in standard deviations.
const KERNEL_SIGMAS: f64 = 3.0;

/// Above this radius the normalization sum comes from the continuous
/// Gaussian instead of being summed tap by tap.
const MAX_SUMMED_RADIUS: f64 = (1 << 20) as f64;

/// `erf(3 / sqrt(2))`: share of a Gaussian's mass within three sigmas.
const MASS_WITHIN_KERNEL: f64 = 0.997_300_203_936_740;

/// Normalized 1-D Gaussian kernel of radius `ceil(3 * sigma)`, truncated to
/// at most `max_radius` taps on each side.
///
/// Truncated taps keep the weights of the full kernel, so dropping taps that
/// only ever read outside the raster does not change the result.
///
/// Returns `[1.0]` for non-positive sigma.
pub fn gaussian_kernel(sigma: f64, max_radius: usize) -> Vec<f64> {
    if !(sigma > 0.0) {
        return vec![1.0];
    }
    let full_radius = (KERNEL_SIGMAS * sigma).ceil();
    let radius = if full_radius < max_radius as f64 {
        full_radius as usize
    } else {
        max_radius
    };
    let denom = 2.0 * sigma * sigma;
    let weight = |i: usize| {
        let d = i as f64;
        (-(d * d) / denom).exp()
    };

    let sum = if full_radius <= MAX_SUMMED_RADIUS {
        1.0 + 2.0 * (1..=full_radius as usize).map(weight).sum::<f64>()
    } else {
        sigma * (2.0 * std::f64::consts::PI).sqrt() * MASS_WITHIN_KERNEL
    };

    let mut kernel = Vec::with_capacity(2 * radius + 1);
    kernel.extend((1..=radius).rev().map(weight));
    kernel.push(1.0);
    kernel.extend((1..=radius).map(weight));
    for w in &mut kernel {
        *w /= sum;
    }
    kernel
}

/// Blur a raster with standard deviation `sigma` pixels.
///
/// Color is weighted by alpha during the convolution, so transparent pixels
/// contribute nothing and the edges of a glow fade to transparent instead of
/// darkening. Samples outside the raster count as transparent.
///
/// `sigma <= 0` (or NaN) returns an unchanged copy.
pub fn gaussian_blur(raster: &Raster, sigma: f32) -> Raster {
    if !(sigma > 0.0) || raster.is_empty() {
        return raster.clone();
    }
    let (width, height) = (raster.width() as usize, raster.height() as usize);
    // Taps further out than the raster is wide or tall never land on a pixel
    let kernel = gaussian_kernel(sigma as f64, width.max(height));

    let premultiplied: Vec<[f32; 4]> = raster
        .as_bytes()
        .chunks_exact(CHANNELS)
        .map(|px| {
            let a = px[3] as f32;
            let k = a / 255.0;
            [px[0] as f32 * k, px[1] as f32 * k, px[2] as f32 * k, a]
        })
        .collect();

    let horizontal = convolve(&premultiplied, width, height, &kernel, Axis::Horizontal);
    let blurred = convolve(&horizontal, width, height, &kernel, Axis::Vertical);

    let mut output = raster.clone();
    for (px, acc) in output
        .as_bytes_mut()
        .chunks_exact_mut(CHANNELS)
        .zip(blurred.iter())
    {
        let alpha = acc[3];
        if alpha <= 0.0 {
            px.copy_from_slice(&[0, 0, 0, 0]);
            continue;
        }
        let unpremultiply = 255.0 / alpha;
        for c in 0..3 {
            px[c] = (acc[c] * unpremultiply).round().clamp(0.0, 255.0) as u8;
        }
        px[3] = alpha.round().clamp(0.0, 255.0) as u8;
    }
    output
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

fn convolve(
    input: &[[f32; 4]],
    width: usize,
    height: usize,
    kernel: &[f64],
    axis: Axis,
) -> Vec<[f32; 4]> {
    let radius = (kernel.len() / 2) as isize;
    let mut output = vec![[0.0f32; 4]; input.len()];

    for y in 0..height {
        for x in 0..width {
            let mut acc = [0.0f64; 4];
            for (k, &weight) in kernel.iter().enumerate() {
                let offset = k as isize - radius;
                let (sx, sy) = match axis {
                    Axis::Horizontal => (x as isize + offset, y as isize),
                    Axis::Vertical => (x as isize, y as isize + offset),
                };
                if sx < 0 || sy < 0 || sx >= width as isize || sy >= height as isize {
                    continue;
                }
                let sample = &input[sy as usize * width + sx as usize];
                for c in 0..4 {
                    acc[c] += sample[c] as f64 * weight;
                }
            }
            output[y * width + x] = [acc[0] as f32, acc[1] as f32, acc[2] as f32, acc[3] as f32];
        }
    }

    output
}
