//! Accounting summary endpoint

use super::client::ApiClient;
use super::models::ResumenContable;
use crate::error::Result;

pub const CONTABILIDAD_PATH: &str = "/contabilidad/";

pub async fn resumen(client: &ApiClient) -> Result<ResumenContable> {
    client.get_json(CONTABILIDAD_PATH).await
}
