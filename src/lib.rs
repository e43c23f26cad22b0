mod batch;
mod error;
mod layout;
mod model;
mod pdf;
mod render;
mod settings;

pub use batch::{
    BatchReport, GeneratedSheet, ImageOutcome, output_file_name, process_batch, process_image,
    process_jobs,
};
pub use error::{Error, LayoutError};
pub use layout::compute_layout;
pub use model::{
    GridRequest, Layout, Margins, Orientation, PT_PER_MM, PageGeometry, PageSize, PlacedImage,
    RenderedPage, Size, SourceImage, mm_to_pt, pt_to_mm,
};
pub use pdf::{PdfImage, PdfSurface};
pub use render::{DrawingBackend, render_grid};
pub use settings::{SheetSettings, parse_dimensions};

use std::path::{Path, PathBuf};
use std::time::Instant;

fn read_source_image(path: &Path) -> Result<SourceImage, Error> {
    let data = std::fs::read(path).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", e, path.display()),
        ))
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(SourceImage::new(name, data))
}

/// Build one PDF label sheet per input image and write it into `output_dir`.
///
/// Every image succeeds or fails on its own; read, layout, drawing and write
/// errors end up in that image's entry of the returned report.
pub fn generate_label_sheets(
    inputs: &[PathBuf],
    settings: &SheetSettings,
    output_dir: &Path,
) -> BatchReport {
    let t0 = Instant::now();
    let mut report = BatchReport::default();

    for input in inputs {
        let image = match read_source_image(input) {
            Ok(image) => image,
            Err(e) => {
                log::warn!("Error reading {}: {e}", input.display());
                report.outcomes.push(ImageOutcome {
                    name: input.display().to_string(),
                    result: Err(e),
                });
                continue;
            }
        };
        report
            .outcomes
            .extend(process_batch::<PdfSurface>(settings, std::slice::from_ref(&image)).outcomes);
    }
    let t_render = t0.elapsed();

    let mut written_bytes = 0usize;
    for outcome in &mut report.outcomes {
        let Ok(sheet) = &outcome.result else {
            continue;
        };
        let path = output_dir.join(&sheet.file_name);
        match std::fs::write(&path, &sheet.bytes) {
            Ok(()) => written_bytes += sheet.bytes.len(),
            Err(e) => {
                log::warn!("Error writing {}: {e}", path.display());
                outcome.result = Err(Error::Io(std::io::Error::new(
                    e.kind(),
                    format!("{}: {}", e, path.display()),
                )));
            }
        }
    }
    let t_total = t0.elapsed();

    log::info!(
        "Timing: render={:.1}ms, write={:.1}ms, total={:.1}ms ({} of {} sheets, {} bytes)",
        t_render.as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        report.succeeded().count(),
        report.outcomes.len(),
        written_bytes,
    );

    report
}
