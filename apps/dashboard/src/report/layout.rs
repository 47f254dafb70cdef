//! Fixed report layout: title, photo, then a two-column key/value table.
//!
//! Coordinates are whole PDF points with the origin at the bottom-left of an
//! A4 page. The table flows onto further pages when it runs past the bottom
//! margin; a row is never split.

use crate::report::font_metrics::FontFace;

pub const PAGE_WIDTH: i64 = 595;
pub const PAGE_HEIGHT: i64 = 842;
pub const MARGIN: i64 = 72;

pub const TITLE: &str = "Student Performance Report";
const TITLE_SIZE: i64 = 18;
const TITLE_LEADING: i64 = 22;

const SPACER: i64 = 20;
/// 2in x 2in.
pub const PHOTO_SIZE: i64 = 144;

pub const LABEL_COLUMN_WIDTH: i64 = 150;
pub const VALUE_COLUMN_WIDTH: i64 = 300;
const CELL_PADDING_X: i64 = 6;
const CELL_PADDING_Y: i64 = 3;
const BODY_SIZE: i64 = 10;
const BODY_LEADING: i64 = 12;

/// One labelled row of the report table.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportField {
    pub label: &'static str,
    pub value: String,
}

impl ReportField {
    pub fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutItem {
    Text {
        x: i64,
        y: i64,
        face: FontFace,
        size: i64,
        text: String,
    },
    /// Square photo; (x, y) is the bottom-left corner.
    Photo { x: i64, y: i64, size: i64 },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub items: Vec<LayoutItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub pages: Vec<PageLayout>,
    pub table_rows: usize,
}

/// Positions every element of the report.
pub fn layout_report(fields: &[ReportField]) -> ReportLayout {
    let mut pages = Vec::new();
    let mut page = PageLayout::default();
    let mut cursor = PAGE_HEIGHT - MARGIN;

    // Title, centred
    let title_width = FontFace::HelveticaBold
        .metrics()
        .width_pt(TITLE, TITLE_SIZE as f32)
        .round() as i64;
    page.items.push(LayoutItem::Text {
        x: (PAGE_WIDTH - title_width) / 2,
        y: cursor - TITLE_SIZE,
        face: FontFace::HelveticaBold,
        size: TITLE_SIZE,
        text: TITLE.to_string(),
    });
    cursor -= TITLE_LEADING + SPACER;

    // Photo, centred, aspect ratio ignored
    cursor -= PHOTO_SIZE;
    page.items.push(LayoutItem::Photo {
        x: (PAGE_WIDTH - PHOTO_SIZE) / 2,
        y: cursor,
        size: PHOTO_SIZE,
    });
    cursor -= SPACER;

    let table_x = (PAGE_WIDTH - LABEL_COLUMN_WIDTH - VALUE_COLUMN_WIDTH) / 2;
    let body = FontFace::Helvetica.metrics();
    let label_wrap = (LABEL_COLUMN_WIDTH - 2 * CELL_PADDING_X) as f32;
    let value_wrap = (VALUE_COLUMN_WIDTH - 2 * CELL_PADDING_X) as f32;

    for field in fields {
        let label_lines = body.wrap(field.label, BODY_SIZE as f32, label_wrap);
        let value_lines = body.wrap(&field.value, BODY_SIZE as f32, value_wrap);
        let line_count = label_lines.len().max(value_lines.len()) as i64;
        let row_height = line_count * BODY_LEADING + 2 * CELL_PADDING_Y;

        if cursor - row_height < MARGIN && cursor < PAGE_HEIGHT - MARGIN {
            pages.push(std::mem::take(&mut page));
            cursor = PAGE_HEIGHT - MARGIN;
        }

        let first_baseline = cursor - CELL_PADDING_Y - BODY_SIZE;
        for (column_x, lines) in [
            (table_x, &label_lines),
            (table_x + LABEL_COLUMN_WIDTH, &value_lines),
        ] {
            for (i, line) in lines.iter().enumerate() {
                if line.is_empty() {
                    continue;
                }
                page.items.push(LayoutItem::Text {
                    x: column_x + CELL_PADDING_X,
                    y: first_baseline - i as i64 * BODY_LEADING,
                    face: FontFace::Helvetica,
                    size: BODY_SIZE,
                    text: line.clone(),
                });
            }
        }
        cursor -= row_height;
    }
    pages.push(page);

    ReportLayout {
        pages,
        table_rows: fields.len(),
    }
}
