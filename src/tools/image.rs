//! "Image Creator": solid background, optional centered text, saved as PNG/JPEG.

use super::{bool_arg, int_arg, opt_str_arg, str_arg, ToolHandler};
use crate::config::ToolkitConfig;
use crate::error::ToolkitError;
use crate::types::{InputField, ToolOutput};
use ab_glyph::{FontVec, PxScale};
use anyhow::{Context, Result};
use async_trait::async_trait;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const DEFAULT_FILENAME: &str = "my_image.png";

/// Added to the output when text was requested but no font could be loaded.
pub const NO_FONT_WARNING: &str =
    "Warning: no usable font, text was not drawn. Add a TrueType font to font_paths.";

const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("white", [255, 255, 255]),
    ("black", [0, 0, 0]),
    ("red", [255, 0, 0]),
    ("green", [0, 128, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("orange", [255, 165, 0]),
    ("purple", [128, 0, 128]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
];

/// Parse `#RRGGBB`, `#RGB`, `r,g,b` or a basic color name.
pub fn parse_color(input: &str) -> Result<Rgb<u8>, ToolkitError> {
    let s = input.trim();
    let bad = || ToolkitError::invalid("color", format!("'{}' is not a color", input));

    if let Some(hex) = s.strip_prefix('#') {
        if !hex.is_ascii() {
            return Err(bad());
        }
        let expanded: String = match hex.len() {
            6 => hex.to_string(),
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            _ => return Err(bad()),
        };
        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| bad());
        return Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]));
    }

    if s.contains(',') {
        let parts: Vec<u8> = s
            .split(',')
            .map(|p| p.trim().parse::<u8>().map_err(|_| bad()))
            .collect::<Result<_, _>>()?;
        return match parts.as_slice() {
            [r, g, b] => Ok(Rgb([*r, *g, *b])),
            _ => Err(bad()),
        };
    }

    let name = s.to_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, rgb)| Rgb(*rgb))
        .ok_or_else(bad)
}

/// Append `.png` unless the name already ends in a supported extension.
pub fn ensure_extension(filename: &str) -> String {
    let lower = filename.to_lowercase();
    if [".png", ".jpg", ".jpeg"].iter().any(|ext| lower.ends_with(ext)) {
        filename.to_string()
    } else {
        format!("{}.png", filename)
    }
}

/// Render the image in memory.
pub fn render(
    width: u32,
    height: u32,
    background: Rgb<u8>,
    text: Option<(&str, &FontVec, f32, Rgb<u8>)>,
) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, background);
    if let Some((text, font, size, color)) = text {
        let scale = PxScale::from(size);
        let (tw, th) = text_size(scale, font, text);
        let x = (width as i32 - tw as i32) / 2;
        let y = (height as i32 - th as i32) / 2;
        draw_text_mut(&mut img, color, x, y, scale, font, text);
    }
    img
}

pub struct ImageCreator {
    output_dir: PathBuf,
    font_paths: Vec<String>,
}

impl ImageCreator {
    pub fn new(config: &ToolkitConfig) -> Self {
        Self {
            output_dir: PathBuf::from(config.resolved_output_dir()),
            font_paths: config
                .font_paths
                .iter()
                .map(|p| config.resolve_path(p))
                .collect(),
        }
    }

    /// First readable TrueType font from the configured list.
    fn load_font(&self) -> Option<FontVec> {
        for path in &self.font_paths {
            let Ok(bytes) = std::fs::read(path) else {
                continue;
            };
            match FontVec::try_from_vec(bytes) {
                Ok(font) => {
                    debug!("Using font {}", path);
                    return Some(font);
                }
                Err(e) => debug!("Skipping font {}: {}", path, e),
            }
        }
        None
    }
}

#[async_trait]
impl ToolHandler for ImageCreator {
    fn entrypoint(&self) -> &str {
        "image_creator"
    }

    fn title(&self) -> &str {
        "Image Creator"
    }

    fn fields(&self) -> Vec<InputField> {
        vec![
            InputField::number("width", "Width", 50, 4000, 400),
            InputField::number("height", "Height", 50, 4000, 300),
            InputField::color("bg", "Background color", "#FFFFFF"),
            InputField::checkbox("add_text", "Add centered text", false),
            InputField::text_with_default("text", "Text", "")
                .optional()
                .when("add_text", "true"),
            InputField::number("font_size", "Font size", 8, 200, 24).when("add_text", "true"),
            InputField::color("text_color", "Text color", "#000000").when("add_text", "true"),
            InputField::text_with_default("filename", "Filename", DEFAULT_FILENAME),
        ]
    }

    fn action_label(&self) -> &str {
        "Create Image"
    }

    async fn execute(&self, params: &serde_json::Value) -> Result<ToolOutput> {
        let width = int_arg(params, "width")? as u32;
        let height = int_arg(params, "height")? as u32;
        let background = parse_color(str_arg(params, "bg")?)?;
        let filename =
            ensure_extension(opt_str_arg(params, "filename").unwrap_or(DEFAULT_FILENAME));

        let text = if bool_arg(params, "add_text") {
            opt_str_arg(params, "text")
        } else {
            None
        };

        let mut missing_font = false;
        let img = match text {
            Some(text) => {
                let size = int_arg(params, "font_size").unwrap_or(24) as f32;
                let color = parse_color(opt_str_arg(params, "text_color").unwrap_or("#000000"))?;
                match self.load_font() {
                    Some(font) => {
                        render(width, height, background, Some((text, &font, size, color)))
                    }
                    None => {
                        warn!("No font in {:?}, drawing background only", self.font_paths);
                        missing_font = true;
                        render(width, height, background, None)
                    }
                }
            }
            None => render(width, height, background, None),
        };

        let path = self.output_dir.join(&filename);
        save(&img, &path)?;
        let bytes = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        let mut out = ToolOutput::new("Image created.", format!("{}x{}", width, height))
            .detail(format!("Filename: {}", path.display()))
            .detail(format!("Dimensions: {}x{} pixels", width, height))
            .detail(format!("File size: {} bytes", bytes));
        if missing_font {
            out = out.detail(NO_FONT_WARNING);
        }
        Ok(out)
    }
}

fn save(img: &RgbImage, path: &Path) -> Result<()> {
    img.save(path)
        .with_context(|| format!("Failed to save image to {}", path.display()))
}
