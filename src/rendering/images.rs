//! Wall object image loading.
//!
//! Raster files go through the `image` crate. SVG files are kept as source text
//! with their declared size; rasterising them is left to whoever draws the view.

use std::fs;
use std::path::Path;

use crate::world::MapError;

/// Decoded image data.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageData {
    Raster(image::RgbaImage),
    Vector(String),
}

/// A loaded wall object image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageHandle {
    pub path: String,
    pub width: f32,
    pub height: f32,
    pub data: ImageData,
}

impl ImageHandle {
    pub fn is_vector(&self) -> bool {
        matches!(self.data, ImageData::Vector(_))
    }
}

/// Loads images by path. Failures are returned, never panicked.
pub trait ImageLoader: Send + Sync {
    fn load(&self, path: &str) -> Result<ImageHandle, MapError>;
}

/// Loader reading from the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileImageLoader;

impl ImageLoader for FileImageLoader {
    fn load(&self, path: &str) -> Result<ImageHandle, MapError> {
        let failure = |details: String| MapError::ResourceLoadFailure {
            path: path.to_string(),
            details,
        };

        let is_svg = Path::new(path)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

        if is_svg {
            let source = fs::read_to_string(path).map_err(|e| failure(e.to_string()))?;
            let (width, height) =
                svg_dimensions(&source).ok_or_else(|| failure("not an SVG document with a size".to_string()))?;
            return Ok(ImageHandle {
                path: path.to_string(),
                width,
                height,
                data: ImageData::Vector(source),
            });
        }

        let decoded = image::open(path).map_err(|e| failure(e.to_string()))?;
        let rgba = decoded.to_rgba8();
        Ok(ImageHandle {
            path: path.to_string(),
            width: rgba.width() as f32,
            height: rgba.height() as f32,
            data: ImageData::Raster(rgba),
        })
    }
}

/// Size declared on the root `<svg>` element, from `width`/`height` or `viewBox`.
pub fn svg_dimensions(source: &str) -> Option<(f32, f32)> {
    let start = source.find("<svg")?;
    let end = start + source[start..].find('>')?;
    let tag = &source[start..end];

    let width = attribute(tag, "width").and_then(leading_number);
    let height = attribute(tag, "height").and_then(leading_number);
    if let (Some(w), Some(h)) = (width, height) {
        if w > 0.0 && h > 0.0 {
            return Some((w, h));
        }
    }

    let view_box: Vec<f32> = attribute(tag, "viewBox")?
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect();
    match view_box[..] {
        [_, _, w, h] if w > 0.0 && h > 0.0 => Some((w, h)),
        _ => None,
    }
}

fn attribute<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let mut rest = tag;
    while let Some(pos) = rest.find(name) {
        let preceded_by_space = rest[..pos].ends_with(char::is_whitespace);
        let after = rest[pos + name.len()..].trim_start();
        if preceded_by_space {
            if let Some(value) = after.strip_prefix('=') {
                let value = value.trim_start();
                let quote = value.chars().next()?;
                if quote == '"' || quote == '\'' {
                    let inner = &value[1..];
                    return inner.find(quote).map(|close| &inner[..close]);
                }
            }
        }
        rest = &rest[pos + name.len()..];
    }
    None
}

fn leading_number(value: &str) -> Option<f32> {
    let end = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(value.len());
    value[..end].parse().ok()
}
