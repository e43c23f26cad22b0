use crate::error::LayoutError;
use crate::model::{GridRequest, Layout, PageGeometry, Size};

/// Compute cell size and spacing for a grid on the printable area.
///
/// Without an explicit cell size the available area is split evenly, which
/// leaves zero spacing. An explicit size is used as given; only a single cell
/// is checked against the available area, so the whole grid may still
/// overflow the page.
pub fn compute_layout(
    geometry: &PageGeometry,
    request: &GridRequest,
) -> Result<Layout, LayoutError> {
    let available = geometry.available();
    let rows = request.rows as f32;
    let columns = request.columns as f32;

    let cell = match request.cell_size {
        Some(size) => size,
        None => Size::new(available.width / columns, available.height / rows),
    };

    if cell.width > available.width || cell.height > available.height {
        return Err(LayoutError::TooLarge { cell, available });
    }

    // Divide by at least 1 so a single row/column still yields a value.
    let gaps_x = request.columns.saturating_sub(1).max(1) as f32;
    let gaps_y = request.rows.saturating_sub(1).max(1) as f32;

    let layout = Layout {
        cell_width: cell.width,
        cell_height: cell.height,
        spacing_x: (available.width - cell.width * columns) / gaps_x,
        spacing_y: (available.height - cell.height * rows) / gaps_y,
    };

    log::debug!(
        "Layout: {}x{} grid, cell={:.2}x{:.2}pt, spacing={:.2}x{:.2}pt, available={:.2}x{:.2}pt",
        request.columns,
        request.rows,
        layout.cell_width,
        layout.cell_height,
        layout.spacing_x,
        layout.spacing_y,
        available.width,
        available.height,
    );

    Ok(layout)
}
