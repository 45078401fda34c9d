//! PNG encoding for composed figures.
//!
//! Two layouts are produced:
//! - **Indexed (color type 3)** when the image has at most 256 distinct
//!   RGBA colors, with a `tRNS` chunk only if some entry is translucent.
//! - **RGBA (color type 6)** otherwise, with a per-row filter chosen by the
//!   minimum-sum-of-absolute-differences heuristic.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::RgbaImage;
use radar_common::{RadarError, RadarResult};
use rayon::prelude::*;

const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Maximum colors for indexed PNG (PNG8)
const MAX_PALETTE_SIZE: usize = 256;

const COLOR_TYPE_INDEXED: u8 = 3;
const COLOR_TYPE_RGBA: u8 = 6;

/// Distinct colors in first-seen order plus one index per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub colors: Vec<[u8; 4]>,
    pub indices: Vec<u8>,
}

impl Palette {
    /// `None` as soon as a 257th color shows up.
    pub fn extract(pixels: &[u8]) -> Option<Self> {
        let mut lookup: HashMap<[u8; 4], u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
        let mut colors = Vec::with_capacity(MAX_PALETTE_SIZE);

        for px in pixels.chunks_exact(4) {
            let key = [px[0], px[1], px[2], px[3]];
            if lookup.contains_key(&key) {
                continue;
            }
            if colors.len() == MAX_PALETTE_SIZE {
                return None;
            }
            lookup.insert(key, colors.len() as u8);
            colors.push(key);
        }

        let indices = pixels
            .par_chunks_exact(4)
            .map(|px| lookup.get(&[px[0], px[1], px[2], px[3]]).copied().unwrap_or(0))
            .collect();

        Some(Self { colors, indices })
    }

    pub fn has_transparency(&self) -> bool {
        self.colors.iter().any(|c| c[3] < 255)
    }
}

/// Encode an image, picking indexed or RGBA layout.
pub fn encode_png(img: &RgbaImage) -> RadarResult<Vec<u8>> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(RadarError::Render("cannot encode an empty image".to_string()));
    }
    match Palette::extract(img.as_raw()) {
        Some(palette) => encode_indexed(width, height, &palette),
        None => encode_rgba(width, height, img.as_raw()),
    }
}

/// Encode and write to `path`, creating parent directories.
pub fn write_png(img: &RgbaImage, path: &Path) -> RadarResult<()> {
    let bytes = encode_png(img)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            RadarError::Render(format!("cannot create {}: {}", parent.display(), e))
        })?;
    }
    std::fs::write(path, bytes)
        .map_err(|e| RadarError::Render(format!("cannot write {}: {}", path.display(), e)))
}

fn ihdr(width: u32, height: u32, color_type: u8) -> [u8; 13] {
    let mut data = [0u8; 13];
    data[0..4].copy_from_slice(&width.to_be_bytes());
    data[4..8].copy_from_slice(&height.to_be_bytes());
    data[8] = 8; // bit depth
    data[9] = color_type;
    // compression, filter and interlace methods stay 0
    data
}

fn encode_indexed(width: u32, height: u32, palette: &Palette) -> RadarResult<Vec<u8>> {
    let mut png = SIGNATURE.to_vec();
    write_chunk(&mut png, b"IHDR", &ihdr(width, height, COLOR_TYPE_INDEXED));

    let plte: Vec<u8> = palette.colors.iter().flat_map(|c| [c[0], c[1], c[2]]).collect();
    write_chunk(&mut png, b"PLTE", &plte);

    if palette.has_transparency() {
        let trns: Vec<u8> = palette.colors.iter().map(|c| c[3]).collect();
        write_chunk(&mut png, b"tRNS", &trns);
    }

    let stride = width as usize;
    let mut raw = Vec::with_capacity(height as usize * (stride + 1));
    for row in palette.indices.chunks_exact(stride) {
        raw.push(0);
        raw.extend_from_slice(row);
    }
    write_chunk(&mut png, b"IDAT", &deflate(&raw)?);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

fn encode_rgba(width: u32, height: u32, pixels: &[u8]) -> RadarResult<Vec<u8>> {
    let mut png = SIGNATURE.to_vec();
    write_chunk(&mut png, b"IHDR", &ihdr(width, height, COLOR_TYPE_RGBA));

    let stride = width as usize * 4;
    let rows: Vec<&[u8]> = pixels.chunks_exact(stride).collect();
    let filtered: Vec<Vec<u8>> = (0..rows.len())
        .into_par_iter()
        .map(|i| {
            let prev = if i > 0 { Some(rows[i - 1]) } else { None };
            filter_row(rows[i], prev, 4)
        })
        .collect();

    write_chunk(&mut png, b"IDAT", &deflate(&filtered.concat())?);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

/// Filter one scanline, returning the filter byte followed by the data.
///
/// Tries None, Sub and Up and keeps the smallest sum of absolute values.
fn filter_row(row: &[u8], prev: Option<&[u8]>, bpp: usize) -> Vec<u8> {
    let none: Vec<u8> = row.to_vec();
    let sub: Vec<u8> = (0..row.len())
        .map(|i| {
            let left = if i >= bpp { row[i - bpp] } else { 0 };
            row[i].wrapping_sub(left)
        })
        .collect();
    let up: Vec<u8> = match prev {
        Some(prev) => row.iter().zip(prev).map(|(&a, &b)| a.wrapping_sub(b)).collect(),
        None => row.to_vec(),
    };

    let cost = |data: &[u8]| -> u64 { data.iter().map(|&b| (b as i8).unsigned_abs() as u64).sum() };
    let (filter, data) = [(0u8, none), (1, sub), (2, up)]
        .into_iter()
        .min_by_key(|(_, d)| cost(d))
        .unwrap_or((0, row.to_vec()));

    let mut out = Vec::with_capacity(row.len() + 1);
    out.push(filter);
    out.extend_from_slice(&data);
    out
}

fn deflate(raw: &[u8]) -> RadarResult<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(raw)
        .and_then(|_| encoder.finish())
        .map_err(|e| RadarError::Render(format!("IDAT compression failed: {}", e)))
}

fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_first_seen_order() {
        let pixels = [
            255, 0, 0, 255, //
            0, 255, 0, 255, //
            255, 0, 0, 255,
        ];
        let palette = Palette::extract(&pixels).unwrap();
        assert_eq!(palette.colors, vec![[255, 0, 0, 255], [0, 255, 0, 255]]);
        assert_eq!(palette.indices, vec![0, 1, 0]);
        assert!(!palette.has_transparency());
    }

    #[test]
    fn test_palette_overflow() {
        let pixels: Vec<u8> = (0..300u32)
            .flat_map(|i| [(i % 256) as u8, (i / 256) as u8, 0, 255])
            .collect();
        assert!(Palette::extract(&pixels).is_none());
    }

    #[test]
    fn test_filter_row_prefers_sub_on_gradient() {
        let row: Vec<u8> = (0..32).map(|i| (i * 8) as u8).collect();
        let out = filter_row(&row, None, 4);
        assert_eq!(out[0], 1);
        assert_eq!(out.len(), row.len() + 1);
    }

    #[test]
    fn test_filter_row_prefers_up_on_repeat() {
        let row: Vec<u8> = (0..32).map(|i| (i * 37 % 251) as u8).collect();
        let out = filter_row(&row, Some(&row), 4);
        assert_eq!(out[0], 2);
        assert!(out[1..].iter().all(|&b| b == 0));
    }
}
