mod common;

use common::RecordingBackend;
use labelgrid::{
    Error, GridRequest, LayoutError, Margins, PageGeometry, PageSize, SheetSettings, Size,
    SourceImage, output_file_name, process_batch, process_image, process_jobs,
};

fn image(name: &str) -> SourceImage {
    SourceImage::new(name, vec![0xAB; 8])
}

fn grid_settings(rows: u32, columns: u32) -> SheetSettings {
    SheetSettings {
        margins_mm: Margins::uniform(10.0),
        rows,
        columns,
        ..Default::default()
    }
}

#[test]
fn output_name_uses_stem_page_label_and_quantity() {
    assert_eq!(output_file_name("label.png", "a4", 3, 4), "label-a4-12.pdf");
    assert_eq!(output_file_name("box.front.jpg", "letter", 1, 1), "box.front-letter-1.pdf");
    assert_eq!(output_file_name("noext", "custom", 2, 5), "noext-custom-10.pdf");
}

#[test]
fn output_name_quantity_does_not_wrap() {
    assert_eq!(
        output_file_name("a.png", "a4", 65536, 65536),
        "a-a4-4294967296.pdf"
    );
}

#[test]
fn process_image_returns_saved_document() {
    let geometry = PageGeometry::new(Size::new(100.0, 200.0), Margins::default()).unwrap();
    let request = GridRequest::new(2, 3, None).unwrap();
    let sheet =
        process_image::<RecordingBackend>(&geometry, &request, "custom", &image("tag.png"))
            .unwrap();

    assert_eq!(sheet.file_name, "tag-custom-6.pdf");
    assert_eq!(sheet.page.placements.len(), 6);
    assert_eq!(sheet.bytes, b"100x200:6".to_vec());
}

#[test]
fn layout_failure_in_the_middle_does_not_abort_batch() {
    let fits = grid_settings(2, 2);
    let too_large = SheetSettings {
        label_size_mm: Some(Size::new(500.0, 20.0)),
        ..fits
    };
    let images = [image("one.png"), image("two.png"), image("three.png")];
    let jobs = [(&fits, &images[0]), (&too_large, &images[1]), (&fits, &images[2])];

    let report = process_jobs::<RecordingBackend, _>(jobs);

    assert_eq!(report.outcomes.len(), 3);
    let names: Vec<&str> = report.succeeded().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["one.png", "three.png"]);
    let sheets: Vec<&str> = report
        .succeeded()
        .map(|(_, sheet)| sheet.file_name.as_str())
        .collect();
    assert_eq!(sheets, vec!["one-a4-4.pdf", "three-a4-4.pdf"]);

    let failures: Vec<(&str, &Error)> = report.failed().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, "two.png");
    assert!(matches!(
        failures[0].1,
        Error::Layout(LayoutError::TooLarge { .. })
    ));
    assert!(!report.all_succeeded());
}

#[test]
fn backend_failure_is_reported_per_image() {
    let settings = grid_settings(1, 2);
    let images = [
        image("a.png"),
        SourceImage::new("unreadable.png", Vec::new()),
        image("c.png"),
    ];
    let report = process_batch::<RecordingBackend>(&settings, &images);

    let ok: Vec<bool> = report.outcomes.iter().map(|o| o.result.is_ok()).collect();
    assert_eq!(ok, vec![true, false, true]);
    assert!(matches!(
        report.outcomes[1].result,
        Err(Error::Backend(_))
    ));
}

#[test]
fn invalid_settings_fail_every_image() {
    let settings = grid_settings(0, 2);
    let images = [image("a.png"), image("b.png")];
    let report = process_batch::<RecordingBackend>(&settings, &images);

    assert_eq!(report.outcomes.len(), 2);
    for outcome in &report.outcomes {
        assert!(matches!(outcome.result, Err(Error::InputFormat(_))));
    }
}

#[test]
fn landscape_page_label_is_unchanged() {
    let settings = SheetSettings {
        page_size: PageSize::Legal,
        orientation: labelgrid::Orientation::Landscape,
        ..grid_settings(1, 3)
    };
    let report = process_batch::<RecordingBackend>(&settings, &[image("x.jpg")]);
    let (_, sheet) = report.succeeded().next().unwrap();
    assert_eq!(sheet.file_name, "x-legal-3.pdf");
    assert!(sheet.page.size.width > sheet.page.size.height);
}
