//! Transaction entry with stock validation

use crate::api::{self, ApiClient, NuevaTransaccion, Producto, TipoTransaccion, Transaccion};
use crate::error::{Error, Result};

pub const INSUFFICIENT_STOCK: &str = "No hay suficiente stock disponible";

/// Transaction form as entered
#[derive(Debug, Clone)]
pub struct TransactionForm {
    pub tipo: TipoTransaccion,
    pub monto: String,
    pub descripcion: String,
    pub producto: i64,
    pub cantidad: String,
}

impl TransactionForm {
    /// Field checks that need no product lookup
    pub fn validate(&self) -> Result<NuevaTransaccion> {
        let descripcion = self.descripcion.trim();
        if self.monto.trim().is_empty() || descripcion.is_empty() || self.cantidad.trim().is_empty()
        {
            return Err(Error::Validation(
                "Todos los campos son obligatorios".to_string(),
            ));
        }

        let monto = match self.monto.trim().parse::<f64>() {
            Ok(m) if m.is_finite() && m > 0.0 => m,
            _ => {
                return Err(Error::Validation(format!(
                    "Monto inválido: {}",
                    self.monto.trim()
                )))
            }
        };

        let cantidad = match self.cantidad.trim().parse::<i64>() {
            Ok(c) if c > 0 => c,
            _ => {
                return Err(Error::Validation(format!(
                    "Cantidad inválida: {}",
                    self.cantidad.trim()
                )))
            }
        };

        Ok(NuevaTransaccion {
            tipo: self.tipo,
            monto,
            descripcion: descripcion.to_string(),
            producto: self.producto,
            cantidad,
        })
    }
}

/// Reject a quantity the product cannot cover
pub fn check_stock(nueva: &NuevaTransaccion, producto: &Producto) -> Result<()> {
    if nueva.cantidad > producto.stock {
        return Err(Error::Validation(INSUFFICIENT_STOCK.to_string()));
    }
    Ok(())
}

/// Validate, look up the product, check stock, then record.
///
/// Nothing is posted unless every check passes. The looked-up product is
/// returned with the new transaction so the caller can show remaining stock.
pub async fn record(client: &ApiClient, form: &TransactionForm) -> Result<(Transaccion, Producto)> {
    let nueva = form.validate()?;
    let producto = api::productos::get(client, nueva.producto).await?;
    check_stock(&nueva, &producto)?;

    let transaccion = api::transacciones::create(client, &nueva).await?;
    tracing::info!(
        id = transaccion.id,
        producto = producto.id,
        cantidad = nueva.cantidad,
        "Transaction recorded"
    );
    Ok((transaccion, producto))
}
