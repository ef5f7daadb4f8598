//! End-to-end pipeline tests
//!
//! Synthesizes small PNG pages on disk and runs the full
//! discover/classify/enhance/serialize chain against them.

use scanbind::classify::PageKind;
use scanbind::pipeline::{PipelineError, PipelineOptions, assemble, discover_inputs};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

fn write_rgb_png(path: &Path, w: u32, h: u32, pixel: impl Fn(u32, u32) -> (u8, u8, u8)) {
    let mut data = Vec::with_capacity((w * h * 3) as usize);
    for y in 0..h {
        for x in 0..w {
            let (r, g, b) = pixel(x, y);
            data.extend_from_slice(&[r, g, b]);
        }
    }
    let file = File::create(path).unwrap();
    let mut encoder = png::Encoder::new(BufWriter::new(file), w, h);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(&data).unwrap();
}

/// Saturated red page: classifies as color.
fn write_color_page(path: &Path) {
    write_rgb_png(path, 64, 64, |_, _| (200, 30, 30));
}

/// Uniform mid-gray page: classifies as grayscale.
fn write_gray_page(path: &Path) {
    write_rgb_png(path, 64, 64, |_, _| (128, 128, 128));
}

/// White page with sparse black ink: classifies as black-and-white.
fn write_text_page(path: &Path) {
    write_rgb_png(path, 64, 64, |x, y| {
        if x % 4 == 0 && y % 4 == 0 {
            (0, 0, 0)
        } else {
            (255, 255, 255)
        }
    });
}

fn options_for(dir: &Path) -> PipelineOptions {
    PipelineOptions {
        pattern: dir.join("*.png").to_str().unwrap().to_string(),
        output: dir.join("out.pdf"),
        ..Default::default()
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[test]
fn assemble_binds_pages_in_filename_order() {
    let dir = tempfile::tempdir().unwrap();
    // Created out of order on purpose; page order must follow filenames
    write_text_page(&dir.path().join("c.png"));
    write_color_page(&dir.path().join("a.png"));
    write_gray_page(&dir.path().join("b.png"));

    let options = options_for(dir.path());
    let report = assemble(&options).unwrap();

    let names: Vec<_> = report
        .iter()
        .map(|r| r.path.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["a.png", "b.png", "c.png"]);

    let kinds: Vec<_> = report.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        [
            PageKind::Color,
            PageKind::Grayscale,
            PageKind::BlackAndWhite
        ]
    );

    // N inputs produce a document with exactly N pages
    let bytes = std::fs::read(&options.output).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(contains(&bytes, b"/Count 3"));
}

#[test]
fn first_page_is_forced_to_color() {
    let dir = tempfile::tempdir().unwrap();
    // A page that would otherwise classify as black-and-white
    write_text_page(&dir.path().join("cover.png"));

    let options = options_for(dir.path());
    let report = assemble(&options).unwrap();

    assert_eq!(report.len(), 1);
    assert_eq!(report[0].kind, PageKind::Color);

    // The cover page is embedded as RGB, not as a 1-bit stream
    let bytes = std::fs::read(&options.output).unwrap();
    assert!(contains(&bytes, b"/DeviceRGB"));
    assert!(!contains(&bytes, b"/BitsPerComponent 1"));
}

#[test]
fn later_text_pages_are_binarized() {
    let dir = tempfile::tempdir().unwrap();
    write_color_page(&dir.path().join("a.png"));
    write_text_page(&dir.path().join("b.png"));

    let options = options_for(dir.path());
    let report = assemble(&options).unwrap();

    assert_eq!(report[1].kind, PageKind::BlackAndWhite);
    let bytes = std::fs::read(&options.output).unwrap();
    assert!(contains(&bytes, b"/BitsPerComponent 1"));
}

#[test]
fn empty_input_is_an_explicit_error() {
    let dir = tempfile::tempdir().unwrap();
    let options = options_for(dir.path());

    let err = assemble(&options);
    assert!(matches!(err, Err(PipelineError::NoInputFiles { .. })));
    assert!(!options.output.exists());
}

#[test]
fn decode_failure_aborts_without_partial_output() {
    let dir = tempfile::tempdir().unwrap();
    write_gray_page(&dir.path().join("a.png"));
    std::fs::write(dir.path().join("b.png"), b"this is not an image").unwrap();

    let options = options_for(dir.path());
    let err = assemble(&options);

    assert!(matches!(err, Err(PipelineError::ReadPage { .. })));
    assert!(!options.output.exists());
}

#[test]
fn unwritable_output_is_an_explicit_error() {
    let dir = tempfile::tempdir().unwrap();
    write_gray_page(&dir.path().join("a.png"));

    // The output's parent directory does not exist, so the write fails
    let options = PipelineOptions {
        pattern: dir.path().join("*.png").to_str().unwrap().to_string(),
        output: dir.path().join("missing").join("out.pdf"),
        ..Default::default()
    };
    let err = assemble(&options);

    assert!(matches!(err, Err(PipelineError::WriteDocument { .. })));
    assert!(!options.output.exists());
}

#[test]
fn discover_inputs_sorts_lexicographically() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["page-10.png", "page-02.png", "page-01.png"] {
        write_gray_page(&dir.path().join(name));
    }

    let pattern = dir.path().join("*.png");
    let files = discover_inputs(pattern.to_str().unwrap()).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["page-01.png", "page-02.png", "page-10.png"]);
}
