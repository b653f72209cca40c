//! Product image URLs

use reqwest::Url;

pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=200&width=200";

/// Resolve a product's `imagen` field for display.
///
/// Absolute URLs pass through, relative paths are resolved against the
/// backend's origin, and missing images get the placeholder.
pub fn resolve_image_url(base_url: &str, imagen: Option<&str>) -> String {
    let imagen = match imagen.map(str::trim).filter(|i| !i.is_empty()) {
        Some(i) => i,
        None => return PLACEHOLDER_IMAGE.to_string(),
    };

    if imagen.starts_with("http://") || imagen.starts_with("https://") {
        return imagen.to_string();
    }

    match Url::parse(base_url) {
        Ok(base) => {
            let origin = base.origin().ascii_serialization();
            format!("{}/{}", origin, imagen.trim_start_matches('/'))
        }
        Err(_) => imagen.to_string(),
    }
}
