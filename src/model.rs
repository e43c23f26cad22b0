use crate::error::Error;

pub const PT_PER_MM: f32 = 72.0 / 25.4;

pub fn mm_to_pt(mm: f32) -> f32 {
    mm * PT_PER_MM
}

pub fn pt_to_mm(pt: f32) -> f32 {
    pt / PT_PER_MM
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn to_pt(self) -> Self {
        Self::new(mm_to_pt(self.width), mm_to_pt(self.height))
    }

    pub fn to_mm(self) -> Self {
        Self::new(pt_to_mm(self.width), pt_to_mm(self.height))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Margins {
    pub const fn uniform(value: f32) -> Self {
        Self {
            top: value,
            bottom: value,
            left: value,
            right: value,
        }
    }

    pub fn to_pt(self) -> Self {
        Self {
            top: mm_to_pt(self.top),
            bottom: mm_to_pt(self.bottom),
            left: mm_to_pt(self.left),
            right: mm_to_pt(self.right),
        }
    }
}

/// Page size and margins, in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    pub size: Size,
    pub margins: Margins,
}

impl PageGeometry {
    pub fn new(size: Size, margins: Margins) -> Result<Self, Error> {
        if !(size.width.is_finite() && size.height.is_finite())
            || size.width <= 0.0
            || size.height <= 0.0
        {
            return Err(Error::InputFormat(format!(
                "page size must be positive, got {}x{}",
                size.width, size.height
            )));
        }
        let sides = [
            ("top", margins.top),
            ("bottom", margins.bottom),
            ("left", margins.left),
            ("right", margins.right),
        ];
        for (side, value) in sides {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InputFormat(format!(
                    "{side} margin must be zero or positive, got {value}"
                )));
            }
        }
        Ok(Self { size, margins })
    }

    /// Area left after subtracting margins. May be negative.
    pub fn available(&self) -> Size {
        Size::new(
            self.size.width - (self.margins.left + self.margins.right),
            self.size.height - (self.margins.top + self.margins.bottom),
        )
    }
}

/// Grid shape for one sheet. `cell_size` is in points and used as-is when set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridRequest {
    pub rows: u32,
    pub columns: u32,
    pub cell_size: Option<Size>,
}

impl GridRequest {
    pub fn new(rows: u32, columns: u32, cell_size: Option<Size>) -> Result<Self, Error> {
        if rows == 0 || columns == 0 {
            return Err(Error::InputFormat(format!(
                "rows and columns must be at least 1, got {rows}x{columns}"
            )));
        }
        if rows.checked_mul(columns).is_none() {
            return Err(Error::InputFormat(format!(
                "{rows}x{columns} grid has too many labels for one page"
            )));
        }
        Ok(Self {
            rows,
            columns,
            cell_size,
        })
    }

    pub fn quantity(&self) -> u64 {
        u64::from(self.rows) * u64::from(self.columns)
    }
}

/// Cell size and inter-cell spacing, in points. Spacing may be negative when
/// an explicit cell size makes neighbouring cells overlap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub cell_width: f32,
    pub cell_height: f32,
    pub spacing_x: f32,
    pub spacing_y: f32,
}

impl Layout {
    pub fn cell_size_mm(&self) -> Size {
        Size::new(self.cell_width, self.cell_height).to_mm()
    }
}

/// One drawn copy of the image. Origin is the page's bottom-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedImage {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PlacedImage {
    /// Largest box with the image's aspect ratio that fits inside this one,
    /// centred on both axes.
    pub fn fit_aspect(self, pixel_width: u32, pixel_height: u32) -> PlacedImage {
        if pixel_width == 0 || pixel_height == 0 {
            return self;
        }
        let (pw, ph) = (pixel_width as f32, pixel_height as f32);
        let scale = (self.width / pw).min(self.height / ph);
        let (width, height) = (pw * scale, ph * scale);
        PlacedImage {
            x: self.x + (self.width - width) / 2.0,
            y: self.y + (self.height - height) / 2.0,
            width,
            height,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderedPage {
    pub size: Size,
    pub placements: Vec<PlacedImage>, // row-major, top row first
}

/// An encoded input image as handed to the drawing backend.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pub name: String,
    pub data: Vec<u8>,
}

impl SourceImage {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PageSize {
    A4,
    Letter,
    Legal,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PageSize {
    /// Portrait dimensions in millimetres.
    pub fn size_mm(&self) -> Size {
        match *self {
            PageSize::A4 => Size::new(210.0, 297.0),
            PageSize::Letter => Size::new(8.5 * 25.4, 11.0 * 25.4),
            PageSize::Legal => Size::new(8.5 * 25.4, 14.0 * 25.4),
            PageSize::Custom {
                width_mm,
                height_mm,
            } => Size::new(width_mm, height_mm),
        }
    }

    /// Lowercase name used in output file names.
    pub fn label(&self) -> &'static str {
        match self {
            PageSize::A4 => "a4",
            PageSize::Letter => "letter",
            PageSize::Legal => "legal",
            PageSize::Custom { .. } => "custom",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn apply(self, size: Size) -> Size {
        match self {
            Orientation::Portrait => size,
            Orientation::Landscape if size.width < size.height => {
                Size::new(size.height, size.width)
            }
            Orientation::Landscape => size,
        }
    }
}
