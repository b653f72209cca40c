//! Transaction endpoints

use super::client::ApiClient;
use super::models::{NuevaTransaccion, Transaccion};
use crate::error::Result;

pub const TRANSACCIONES_PATH: &str = "/transacciones/";

pub async fn list(client: &ApiClient) -> Result<Vec<Transaccion>> {
    client.get_json(TRANSACCIONES_PATH).await
}

pub async fn create(client: &ApiClient, nueva: &NuevaTransaccion) -> Result<Transaccion> {
    client.post_json(TRANSACCIONES_PATH, nueva).await
}
