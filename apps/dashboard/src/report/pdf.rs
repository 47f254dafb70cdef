//! PDF emission for the report layout, built directly on the lopdf object model.
//!
//! The document is written to a temporary file beside the target and renamed
//! into place, so readers only ever see a complete report.

use std::io::{BufWriter, Write};
use std::path::Path;

use image::imageops::FilterType;
use image::{ImageReader, RgbImage};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use thiserror::Error;
use tracing::debug;

use crate::report::font_metrics::FontFace;
use crate::report::layout::{
    layout_report, LayoutItem, ReportField, ReportLayout, PAGE_HEIGHT, PAGE_WIDTH,
};

/// Photo resolution embedded in the PDF (150 dpi across 2in).
const PHOTO_PIXELS: u32 = 300;
const PHOTO_RESOURCE: &str = "Im1";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("photo could not be decoded: {0}")]
    Photo(#[from] image::ImageError),

    #[error("PDF encoding failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders the report for `fields` with the photo at `photo_path` and writes it to `path`.
///
/// Blocking; call from `spawn_blocking` inside async code.
pub fn render_report(
    path: &Path,
    fields: &[ReportField],
    photo_path: &Path,
) -> Result<(), ReportError> {
    let photo = load_photo(photo_path)?;
    let layout = layout_report(fields);
    let mut doc = build_document(&layout, photo)?;
    write_atomically(&mut doc, path)?;
    debug!(
        "Wrote report {} ({} pages, {} rows)",
        path.display(),
        layout.pages.len(),
        layout.table_rows
    );
    Ok(())
}

fn load_photo(photo_path: &Path) -> Result<RgbImage, ReportError> {
    let image = ImageReader::open(photo_path)?
        .with_guessed_format()?
        .decode()?;
    Ok(image
        .resize_exact(PHOTO_PIXELS, PHOTO_PIXELS, FilterType::Triangle)
        .to_rgb8())
}

fn build_document(layout: &ReportLayout, photo: RgbImage) -> Result<Document, ReportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(font_dictionary(FontFace::Helvetica));
    let bold_id = doc.add_object(font_dictionary(FontFace::HelveticaBold));

    let (width, height) = photo.dimensions();
    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8_i64,
        },
        photo.into_raw(),
    ));

    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FontFace::Helvetica.resource_name() => regular_id,
            FontFace::HelveticaBold.resource_name() => bold_id,
        },
        "XObject" => dictionary! {
            PHOTO_RESOURCE => image_id,
        },
    });

    let mut page_ids: Vec<ObjectId> = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let content = Content {
            operations: page_operations(&page.items),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        page_ids.push(doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        }));
    }

    let kids: Vec<Object> = page_ids.iter().copied().map(Object::Reference).collect();
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_ids.len() as i64,
        "Resources" => resources_id,
        "MediaBox" => vec![int(0), int(0), int(PAGE_WIDTH), int(PAGE_HEIGHT)],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    Ok(doc)
}

fn font_dictionary(face: FontFace) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => face.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

fn page_operations(items: &[LayoutItem]) -> Vec<Operation> {
    let mut ops = Vec::new();
    for item in items {
        match item {
            LayoutItem::Text {
                x,
                y,
                face,
                size,
                text,
            } => {
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![name(face.resource_name()), int(*size)],
                ));
                ops.push(Operation::new("Td", vec![int(*x), int(*y)]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(win_ansi(text))],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            LayoutItem::Photo { x, y, size } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new(
                    "cm",
                    vec![int(*size), int(0), int(0), int(*size), int(*x), int(*y)],
                ));
                ops.push(Operation::new("Do", vec![name(PHOTO_RESOURCE)]));
                ops.push(Operation::new("Q", vec![]));
            }
        }
    }
    ops
}

fn int(v: i64) -> Object {
    Object::Integer(v)
}

fn name(n: &str) -> Object {
    Object::Name(n.as_bytes().to_vec())
}

/// Maps text onto the single-byte WinAnsi encoding of the base-14 fonts.
/// Printable ASCII and Latin-1 pass through, the punctuation WinAnsi keeps in
/// 0x80..=0x9F is translated, and anything else becomes `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u32 as u8,
            _ => win_ansi_high(c).unwrap_or(b'?'),
        })
        .collect()
}

fn win_ansi_high(c: char) -> Option<u8> {
    let byte = match c {
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

fn write_atomically(doc: &mut Document, path: &Path) -> Result<(), ReportError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::Builder::new()
        .prefix(".report-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        doc.save_to(&mut writer)?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| ReportError::Io(e.error))?;
    Ok(())
}
