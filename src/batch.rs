use std::path::Path;

use crate::error::Error;
use crate::layout::compute_layout;
use crate::model::{GridRequest, Layout, PageGeometry, RenderedPage, SourceImage};
use crate::render::{DrawingBackend, render_grid};
use crate::settings::SheetSettings;

/// A finalized label sheet for one input image.
#[derive(Debug)]
pub struct GeneratedSheet {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub page: RenderedPage,
    pub layout: Layout,
}

#[derive(Debug)]
pub struct ImageOutcome {
    pub name: String,
    pub result: Result<GeneratedSheet, Error>,
}

/// Per-image results of a batch, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<ImageOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> impl Iterator<Item = (&str, &GeneratedSheet)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|s| (o.name.as_str(), s)))
    }

    pub fn failed(&self) -> impl Iterator<Item = (&str, &Error)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.name.as_str(), e)))
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }
}

/// `{stem}-{page_label}-{rows*columns}.pdf`
pub fn output_file_name(image_name: &str, page_label: &str, rows: u32, columns: u32) -> String {
    let stem = Path::new(image_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(image_name);
    format!("{stem}-{page_label}-{}.pdf", u64::from(rows) * u64::from(columns))
}

/// Lay out, draw and finalize one sheet. Bytes are only returned after the
/// backend has saved the document.
pub fn process_image<B: DrawingBackend>(
    geometry: &PageGeometry,
    request: &GridRequest,
    page_label: &str,
    image: &SourceImage,
) -> Result<GeneratedSheet, Error> {
    let layout = compute_layout(geometry, request)?;

    let mut surface = B::new_document(geometry.size);
    let handle = surface.embed_image(image)?;
    let page = render_grid(geometry, request, &layout, &handle, &mut surface)?;
    let bytes = surface.save()?;

    Ok(GeneratedSheet {
        file_name: output_file_name(&image.name, page_label, request.rows, request.columns),
        bytes,
        page,
        layout,
    })
}

/// Run every job through its own failure boundary. A failing image is
/// recorded and the batch moves on to the next one.
pub fn process_jobs<'a, B, I>(jobs: I) -> BatchReport
where
    B: DrawingBackend,
    I: IntoIterator<Item = (&'a SheetSettings, &'a SourceImage)>,
{
    let outcomes = jobs
        .into_iter()
        .map(|(settings, image)| {
            let page_label = settings.page_size.label();
            let result = settings.geometry().and_then(|geometry| {
                let request = settings.grid_request()?;
                process_image::<B>(&geometry, &request, page_label, image)
            });
            match &result {
                Ok(sheet) => log::info!(
                    "{}: {} labels on {} -> {}",
                    image.name,
                    sheet.page.placements.len(),
                    page_label,
                    sheet.file_name
                ),
                Err(e) => log::warn!("Error processing {}: {e}", image.name),
            }
            ImageOutcome {
                name: image.name.clone(),
                result,
            }
        })
        .collect();

    BatchReport { outcomes }
}

/// Apply one set of sheet settings to every image.
pub fn process_batch<B: DrawingBackend>(
    settings: &SheetSettings,
    images: &[SourceImage],
) -> BatchReport {
    process_jobs::<B, _>(images.iter().map(|image| (settings, image)))
}
