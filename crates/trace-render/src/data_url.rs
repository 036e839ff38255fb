use base64::Engine;
use base64::engine::general_purpose::STANDARD;

pub const PNG_MIME: &str = "image/png";

pub const SVG_MIME: &str = "image/svg+xml";

pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

pub fn png_data_url(png: &[u8]) -> String {
    data_url(PNG_MIME, png)
}
