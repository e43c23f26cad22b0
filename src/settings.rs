//! Millimetre-facing sheet settings and their conversion to points.

use crate::error::Error;
use crate::model::{GridRequest, Margins, Orientation, PageGeometry, PageSize, Size};

/// Everything a caller chooses for one batch, in human units (millimetres).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SheetSettings {
    pub page_size: PageSize,
    pub orientation: Orientation,
    pub margins_mm: Margins,
    pub rows: u32,
    pub columns: u32,
    pub label_size_mm: Option<Size>,
}

impl Default for SheetSettings {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            margins_mm: Margins::default(),
            rows: 1,
            columns: 1,
            label_size_mm: None,
        }
    }
}

impl SheetSettings {
    /// Oriented page size in millimetres.
    pub fn page_size_mm(&self) -> Size {
        self.orientation.apply(self.page_size.size_mm())
    }

    pub fn geometry(&self) -> Result<PageGeometry, Error> {
        PageGeometry::new(self.page_size_mm().to_pt(), self.margins_mm.to_pt())
    }

    pub fn grid_request(&self) -> Result<GridRequest, Error> {
        GridRequest::new(
            self.rows,
            self.columns,
            self.label_size_mm.map(Size::to_pt),
        )
    }
}

/// Parse a `W x H` label size. Both sides must be positive numbers.
pub fn parse_dimensions(input: &str) -> Result<Size, Error> {
    let malformed = || {
        Error::InputFormat(format!(
            "label dimensions must look like \"W x H\", got {input:?}"
        ))
    };
    let mut parts = input.split(['x', 'X']);
    let (Some(w), Some(h), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed());
    };
    let parse = |s: &str| -> Result<f32, Error> {
        let v: f32 = s.trim().parse().map_err(|_| malformed())?;
        if !v.is_finite() || v <= 0.0 {
            return Err(Error::InputFormat(format!(
                "label dimensions must be positive, got {input:?}"
            )));
        }
        Ok(v)
    };
    Ok(Size::new(parse(w)?, parse(h)?))
}
