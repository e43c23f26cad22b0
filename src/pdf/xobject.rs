use pdf_writer::{Filter, Pdf, Ref};

use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) enum ImageFormat {
    /// `adobe` is set when an APP14 "Adobe" segment precedes the frame header.
    Jpeg { components: u8, adobe: bool },
    Png,
}

pub(super) struct EmbeddedImage {
    pub(super) xobject: Ref,
    pub(super) pixel_width: u32,
    pub(super) pixel_height: u32,
}

/// SOF0..SOF15, minus DHT (C4), JPG (C8) and DAC (CC).
fn is_start_of_frame(marker: u8) -> bool {
    (0xC0..=0xCF).contains(&marker) && !matches!(marker, 0xC4 | 0xC8 | 0xCC)
}

/// Sniff the format from the magic bytes and read the pixel size from the header.
pub(super) fn image_header(data: &[u8]) -> Option<(u32, u32, ImageFormat)> {
    // JPEG: starts with FF D8
    if data.len() >= 2 && data[0] == 0xFF && data[1] == 0xD8 {
        let mut adobe = false;
        let mut i = 2;
        loop {
            if data.get(i) != Some(&0xFF) {
                return None;
            }
            // Any number of FF fill bytes may precede a marker.
            while data.get(i + 1) == Some(&0xFF) {
                i += 1;
            }
            let marker = *data.get(i + 1)?;
            if marker == 0xD9 || marker == 0xDA {
                return None;
            }
            // Standalone markers carry no length.
            if marker == 0x01 || (0xD0..=0xD7).contains(&marker) {
                i += 2;
                continue;
            }
            if i + 3 >= data.len() {
                return None;
            }
            let len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
            if marker == 0xEE && data.get(i + 4..i + 9) == Some(b"Adobe".as_slice()) {
                adobe = true;
            }
            if is_start_of_frame(marker) {
                if i + 9 >= data.len() {
                    return None;
                }
                let height = u16::from_be_bytes([data[i + 5], data[i + 6]]) as u32;
                let width = u16::from_be_bytes([data[i + 7], data[i + 8]]) as u32;
                let components = data[i + 9];
                return Some((width, height, ImageFormat::Jpeg { components, adobe }));
            }
            i += 2 + len;
        }
    }

    // PNG: starts with 89 50 4E 47, dimensions in IHDR chunk at bytes 16-23
    if data.len() >= 24 && data[0] == 0x89 && data[1] == 0x50 && data[2] == 0x4E && data[3] == 0x47
    {
        let width = u32::from_be_bytes([data[16], data[17], data[18], data[19]]);
        let height = u32::from_be_bytes([data[20], data[21], data[22], data[23]]);
        return Some((width, height, ImageFormat::Png));
    }

    None
}

/// Write `data` as an image XObject (plus a soft mask for translucent PNGs).
pub(super) fn write_image_xobject(
    pdf: &mut Pdf,
    alloc: &mut dyn FnMut() -> Ref,
    name: &str,
    data: &[u8],
) -> Result<EmbeddedImage, Error> {
    let (width, height, format) = image_header(data)
        .ok_or_else(|| Error::Backend(format!("{name}: not a PNG or JPEG image")))?;
    if width == 0 || height == 0 {
        return Err(Error::Backend(format!("{name}: image has zero size")));
    }

    let xobject = alloc();
    match format {
        ImageFormat::Jpeg { components, adobe } => {
            if !matches!(components, 1 | 3 | 4) {
                return Err(Error::Backend(format!(
                    "{name}: unsupported JPEG with {components} color components"
                )));
            }
            let mut xobj = pdf.image_xobject(xobject, data);
            xobj.filter(Filter::DctDecode);
            xobj.width(width as i32);
            xobj.height(height as i32);
            match components {
                1 => xobj.color_space().device_gray(),
                4 => xobj.color_space().device_cmyk(),
                _ => xobj.color_space().device_rgb(),
            }
            xobj.bits_per_component(8);
            // Adobe writes CMYK JPEGs with inverted samples.
            if components == 4 && adobe {
                xobj.decode([1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
            }
        }
        ImageFormat::Png => {
            let cursor = std::io::Cursor::new(data);
            let reader = image::ImageReader::with_format(
                std::io::BufReader::new(cursor),
                image::ImageFormat::Png,
            );
            let decoded = reader
                .decode()
                .map_err(|e| Error::Backend(format!("{name}: {e}")))?;
            let rgba: image::RgbaImage = decoded.to_rgba8();
            let (w, h) = (rgba.width(), rgba.height());
            let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);

            let rgb_data: Vec<u8> = rgba
                .pixels()
                .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
                .collect();
            let compressed_rgb = miniz_oxide::deflate::compress_to_vec_zlib(&rgb_data, 6);

            let smask_ref = if has_alpha {
                let alpha_data: Vec<u8> = rgba.pixels().map(|p| p.0[3]).collect();
                let compressed_alpha = miniz_oxide::deflate::compress_to_vec_zlib(&alpha_data, 6);
                let mask_ref = alloc();
                let mut mask = pdf.image_xobject(mask_ref, &compressed_alpha);
                mask.filter(Filter::FlateDecode);
                mask.width(w as i32);
                mask.height(h as i32);
                mask.color_space().device_gray();
                mask.bits_per_component(8);
                Some(mask_ref)
            } else {
                None
            };

            let mut xobj = pdf.image_xobject(xobject, &compressed_rgb);
            xobj.filter(Filter::FlateDecode);
            xobj.width(w as i32);
            xobj.height(h as i32);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
            if let Some(mask_ref) = smask_ref {
                xobj.s_mask(mask_ref);
            }
        }
    }

    Ok(EmbeddedImage {
        xobject,
        pixel_width: width,
        pixel_height: height,
    })
}
