use crate::error::Error;
use crate::model::{
    GridRequest, Layout, PageGeometry, PlacedImage, RenderedPage, Size, SourceImage,
};

/// A document surface that can place images on a single page.
///
/// `save` consumes the backend, so a document is finalized at most once and
/// a backend dropped on an error path never hands out bytes.
pub trait DrawingBackend {
    type Image;

    fn new_document(page_size: Size) -> Self
    where
        Self: Sized;

    /// Decode and register an image so it can be drawn any number of times.
    fn embed_image(&mut self, image: &SourceImage) -> Result<Self::Image, Error>;

    fn draw_image(
        &mut self,
        image: &Self::Image,
        placement: PlacedImage,
        preserve_aspect_ratio: bool,
    ) -> Result<(), Error>;

    fn save(self) -> Result<Vec<u8>, Error>;
}

/// Place `rows × columns` copies of `image` on one page, top row first.
///
/// There is no page-break logic: every cell goes onto the same page even if
/// the grid overflows the margins.
pub fn render_grid<B: DrawingBackend>(
    geometry: &PageGeometry,
    request: &GridRequest,
    layout: &Layout,
    image: &B::Image,
    surface: &mut B,
) -> Result<RenderedPage, Error> {
    let margins = &geometry.margins;
    let page_height = geometry.size.height;
    let mut placements = Vec::new();

    for row in 0..request.rows {
        for col in 0..request.columns {
            let (row_f, col_f) = (row as f32, col as f32);
            // PDF y grows upwards; row 0 sits just below the top margin.
            let placement = PlacedImage {
                x: margins.left + col_f * (layout.cell_width + layout.spacing_x),
                y: page_height
                    - (margins.top + (row_f + 1.0) * layout.cell_height + row_f * layout.spacing_y),
                width: layout.cell_width,
                height: layout.cell_height,
            };
            surface.draw_image(image, placement, true)?;
            placements.push(placement);
        }
    }

    Ok(RenderedPage {
        size: geometry.size,
        placements,
    })
}
