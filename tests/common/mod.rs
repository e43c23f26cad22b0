#![allow(dead_code)]

use std::io::Cursor;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use labelgrid::{DrawingBackend, Error, PlacedImage, Size, SourceImage};

pub const EPS: f32 = 1e-3;

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPS
}

/// In-memory backend that records every draw call. Images with no bytes fail
/// to embed, and the "draw budget" lets a test make drawing fail mid-grid.
pub struct RecordingBackend {
    pub page_size: Size,
    pub draws: Vec<(String, PlacedImage, bool)>,
    pub draw_budget: Option<usize>,
}

impl DrawingBackend for RecordingBackend {
    type Image = String;

    fn new_document(page_size: Size) -> Self {
        RecordingBackend {
            page_size,
            draws: Vec::new(),
            draw_budget: None,
        }
    }

    fn embed_image(&mut self, image: &SourceImage) -> Result<String, Error> {
        if image.data.is_empty() {
            return Err(Error::Backend(format!("{}: empty image", image.name)));
        }
        Ok(image.name.clone())
    }

    fn draw_image(
        &mut self,
        image: &String,
        placement: PlacedImage,
        preserve_aspect_ratio: bool,
    ) -> Result<(), Error> {
        if let Some(budget) = self.draw_budget {
            if self.draws.len() >= budget {
                return Err(Error::Backend("write failed".into()));
            }
        }
        self.draws
            .push((image.clone(), placement, preserve_aspect_ratio));
        Ok(())
    }

    fn save(self) -> Result<Vec<u8>, Error> {
        Ok(format!(
            "{}x{}:{}",
            self.page_size.width,
            self.page_size.height,
            self.draws.len()
        )
        .into_bytes())
    }
}

pub fn png_bytes(width: u32, height: u32, opaque: bool) -> Vec<u8> {
    let alpha = if opaque { 255 } else { 128 };
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 40, 40, alpha]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("encode png");
    out.into_inner()
}

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([20, 90, 160]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Jpeg)
        .expect("encode jpeg");
    out.into_inner()
}

/// Bare JPEG header: optional APP14 "Adobe" segment, a DHT segment, then a
/// frame header of the given SOF kind for a 7x5 image.
pub fn jpeg_header(sof: u8, components: u8, adobe: bool) -> Vec<u8> {
    let mut out = vec![0xFF, 0xD8];
    if adobe {
        out.extend_from_slice(&[0xFF, 0xEE, 0x00, 0x0E]);
        out.extend_from_slice(b"Adobe");
        out.extend_from_slice(&[0x00, 0x64, 0x00, 0x00, 0x00, 0x00, 0x02]);
    }
    out.extend_from_slice(&[0xFF, 0xC4, 0x00, 0x03, 0x00]);
    let len = 8 + 3 * components as u16;
    out.extend_from_slice(&[0xFF, sof]);
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(&[8, 0x00, 0x05, 0x00, 0x07, components]);
    for c in 0..components {
        out.extend_from_slice(&[c + 1, 0x11, 0x00]);
    }
    out.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x02, 0xFF, 0xD9]);
    out
}

/// Fresh scratch directory under the system temp dir.
pub fn scratch_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "labelgrid-{name}-{}-{nanos}",
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

/// Numbers inside the first `/MediaBox [...]` of a PDF.
pub fn media_box(pdf: &[u8]) -> Option<Vec<f32>> {
    let text = String::from_utf8_lossy(pdf);
    let start = text.find("/MediaBox [")? + "/MediaBox [".len();
    let end = start + text[start..].find(']')?;
    Some(
        text[start..end]
            .split_whitespace()
            .filter_map(|s| s.parse().ok())
            .collect(),
    )
}
