//! Shared test data.

use std::io::Cursor;

use bytes::Bytes;
use image::{ImageFormat, Rgb, RgbImage};

use crate::submission::form::{RawForm, UploadedPhoto};

/// A small valid PNG.
pub fn png_bytes() -> Vec<u8> {
    let img = RgbImage::from_pixel(8, 6, Rgb([200, 40, 40]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

/// The "Ravi Kumar" submission: High Risk, Fail.
pub fn ravi_form() -> RawForm {
    let mut raw = RawForm::default();
    for (key, value) in [
        ("name", "Ravi Kumar"),
        ("email", "ravi@example.com"),
        ("phone", "9876543210"),
        ("roll", "21CS042"),
        ("reg", "REG-2021-0042"),
        ("semester", "5"),
        ("branch", "CSE"),
        ("subjects", "Math"),
        ("subjects", "Physics"),
        ("attendance", "55"),
        ("marks", "30"),
    ] {
        raw.push_text(key, value);
    }
    raw.photo = Some(UploadedPhoto {
        original_name: "ravi.png".to_string(),
        bytes: Bytes::from(png_bytes()),
    });
    raw
}
