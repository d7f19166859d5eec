use super::IngestError;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageEncoder};

/// Default output ceiling: 0.5 MB.
pub const DEFAULT_MAX_SIZE_BYTES: usize = 512 * 1024;
/// Default ceiling for the longer side, in pixels.
pub const DEFAULT_MAX_DIMENSION: u32 = 1024;
/// Default JPEG quality, in percent.
pub const DEFAULT_QUALITY: u8 = 80;

const MIN_QUALITY: u8 = 30;
const QUALITY_STEP: u8 = 10;
const MAX_SHRINK_STEPS: usize = 8;
const SHRINK_FACTOR: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionOptions {
    pub max_size_bytes: usize,
    pub max_dimension: u32,
    pub quality: u8,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
            max_dimension: DEFAULT_MAX_DIMENSION,
            quality: DEFAULT_QUALITY,
        }
    }
}

/// Re-encodes an image within size and dimension bounds, best effort.
pub trait Compressor: Send + Sync {
    fn compress(&self, input: &[u8], options: &CompressionOptions) -> Result<Vec<u8>, IngestError>;
}

/// Downscales to fit `max_dimension`, then re-encodes as JPEG, trading
/// quality and then resolution until the output fits `max_size_bytes`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JpegCompressor;

impl Compressor for JpegCompressor {
    fn compress(&self, input: &[u8], options: &CompressionOptions) -> Result<Vec<u8>, IngestError> {
        let decoded =
            image::load_from_memory(input).map_err(|e| IngestError::Compression(e.to_string()))?;

        let mut img = fit_within(decoded, options.max_dimension.max(1));
        let mut quality = options.quality.clamp(1, 100);
        let mut out = encode_jpeg(&img, quality)?;

        let mut shrink_steps = 0;
        while out.len() > options.max_size_bytes {
            if quality > MIN_QUALITY {
                quality = quality.saturating_sub(QUALITY_STEP).max(MIN_QUALITY);
            } else if shrink_steps < MAX_SHRINK_STEPS {
                img = shrink(&img);
                shrink_steps += 1;
            } else {
                break;
            }
            out = encode_jpeg(&img, quality)?;
        }

        Ok(out)
    }
}

fn fit_within(img: DynamicImage, max_dimension: u32) -> DynamicImage {
    if img.width().max(img.height()) <= max_dimension {
        return img;
    }
    // resize() keeps the aspect ratio and fits inside the box
    img.resize(max_dimension, max_dimension, FilterType::Lanczos3)
}

fn shrink(img: &DynamicImage) -> DynamicImage {
    let width = ((img.width() as f32 * SHRINK_FACTOR) as u32).max(1);
    let height = ((img.height() as f32 * SHRINK_FACTOR) as u32).max(1);
    img.resize(width, height, FilterType::Triangle)
}

fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, IngestError> {
    // JPEG has no alpha channel
    let rgb = img.to_rgb8();
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality)
        .write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        .map_err(|e| IngestError::Compression(e.to_string()))?;
    Ok(buf)
}
