//! Product catalog and inventory endpoints

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use std::path::Path;

use super::client::{decode, ApiClient};
use super::models::{ImagenSubida, Producto, ProductoInput};
use crate::error::{Error, Result};

pub const PUBLIC_PATH: &str = "/productos-publicos/";
pub const PRODUCTOS_PATH: &str = "/productos/";

fn item_path(id: i64) -> String {
    format!("{}{}/", PRODUCTOS_PATH, id)
}

/// Public showcase; no token sent, no session side effects
pub async fn list_public(client: &ApiClient) -> Result<Vec<Producto>> {
    let response = client.request_public(Method::GET, PUBLIC_PATH, None).await?;
    decode(response).await
}

pub async fn list(client: &ApiClient) -> Result<Vec<Producto>> {
    client.get_json(PRODUCTOS_PATH).await
}

/// Fetch one product; a missing id is `NotFound("Producto no encontrado")`
pub async fn get(client: &ApiClient, id: i64) -> Result<Producto> {
    client.get_json(&item_path(id)).await.map_err(|e| match e {
        Error::NotFound(_) => Error::NotFound("Producto no encontrado".to_string()),
        other => other,
    })
}

pub async fn create(client: &ApiClient, input: &ProductoInput) -> Result<Producto> {
    client.post_json(PRODUCTOS_PATH, input).await
}

pub async fn update(client: &ApiClient, id: i64, input: &ProductoInput) -> Result<Producto> {
    client.put_json(&item_path(id), input).await
}

pub async fn delete(client: &ApiClient, id: i64) -> Result<()> {
    client.delete(&item_path(id)).await
}

/// Upload a product picture as the multipart `imagen` field
pub async fn upload_image(client: &ApiClient, id: i64, file: &Path) -> Result<ImagenSubida> {
    let mime = image_mime(file).ok_or_else(|| {
        Error::Validation(format!(
            "Formato de imagen no soportado: {}",
            file.display()
        ))
    })?;

    let bytes = tokio::fs::read(file).await?;
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "imagen".to_string());

    let part = Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime)
        .map_err(|e| Error::Other(e.to_string()))?;
    let form = Form::new().part("imagen", part);

    let path = format!("{}imagen/", item_path(id));
    let response = client.request_multipart(&path, form).await?;
    decode(response).await
}

/// MIME type for the image formats the backend accepts
fn image_mime(file: &Path) -> Option<&'static str> {
    let ext = file.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
