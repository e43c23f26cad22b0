mod xobject;

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref};

use crate::error::Error;
use crate::model::{PlacedImage, Size, SourceImage};
use crate::render::DrawingBackend;

use xobject::write_image_xobject;

/// Handle to an image XObject registered in a [`PdfSurface`].
#[derive(Clone, Debug)]
pub struct PdfImage {
    pdf_name: String,
    pixel_width: u32,
    pixel_height: u32,
}

impl PdfImage {
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.pixel_width, self.pixel_height)
    }
}

/// Single-page PDF document built with `pdf-writer`.
pub struct PdfSurface {
    pdf: Pdf,
    next_id: i32,
    catalog_id: Ref,
    pages_id: Ref,
    page_id: Ref,
    content_id: Ref,
    page_size: Size,
    content: Content,
    image_xobjects: Vec<(String, Ref)>,
}

impl DrawingBackend for PdfSurface {
    type Image = PdfImage;

    fn new_document(page_size: Size) -> Self {
        // Fixed objects take the first refs; images are allocated after them.
        PdfSurface {
            pdf: Pdf::new(),
            next_id: 5,
            catalog_id: Ref::new(1),
            pages_id: Ref::new(2),
            page_id: Ref::new(3),
            content_id: Ref::new(4),
            page_size,
            content: Content::new(),
            image_xobjects: Vec::new(),
        }
    }

    fn embed_image(&mut self, image: &SourceImage) -> Result<PdfImage, Error> {
        let next_id = &mut self.next_id;
        let mut alloc = || {
            let r = Ref::new(*next_id);
            *next_id += 1;
            r
        };
        let embedded = write_image_xobject(&mut self.pdf, &mut alloc, &image.name, &image.data)?;

        let pdf_name = format!("Im{}", self.image_xobjects.len() + 1);
        self.image_xobjects.push((pdf_name.clone(), embedded.xobject));
        log::debug!(
            "Embedded {} as /{} ({}x{}px)",
            image.name,
            pdf_name,
            embedded.pixel_width,
            embedded.pixel_height
        );

        Ok(PdfImage {
            pdf_name,
            pixel_width: embedded.pixel_width,
            pixel_height: embedded.pixel_height,
        })
    }

    fn draw_image(
        &mut self,
        image: &PdfImage,
        placement: PlacedImage,
        preserve_aspect_ratio: bool,
    ) -> Result<(), Error> {
        if !self.image_xobjects.iter().any(|(name, _)| *name == image.pdf_name) {
            return Err(Error::Backend(format!(
                "image /{} is not registered in this document",
                image.pdf_name
            )));
        }
        let target = if preserve_aspect_ratio {
            placement.fit_aspect(image.pixel_width, image.pixel_height)
        } else {
            placement
        };
        self.content.save_state();
        self.content.transform([
            target.width,
            0.0,
            0.0,
            target.height,
            target.x,
            target.y,
        ]);
        self.content.x_object(Name(image.pdf_name.as_bytes()));
        self.content.restore_state();
        Ok(())
    }

    fn save(self) -> Result<Vec<u8>, Error> {
        let PdfSurface {
            mut pdf,
            catalog_id,
            pages_id,
            page_id,
            content_id,
            page_size,
            content,
            image_xobjects,
            ..
        } = self;

        let raw = content.finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        pdf.stream(content_id, &compressed).filter(Filter::FlateDecode);

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id).kids([page_id]).count(1);

        {
            let mut page = pdf.page(page_id);
            page.media_box(Rect::new(0.0, 0.0, page_size.width, page_size.height))
                .parent(pages_id)
                .contents(content_id);
            let mut resources = page.resources();
            if !image_xobjects.is_empty() {
                let mut xobjects = resources.x_objects();
                for (name, xobj_ref) in &image_xobjects {
                    xobjects.pair(Name(name.as_bytes()), *xobj_ref);
                }
            }
        }

        Ok(pdf.finish())
    }
}
