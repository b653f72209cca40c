//! Inventory form rules

use crate::api::{Producto, ProductoInput};
use crate::error::{Error, Result};

const REQUIRED_FIELDS: &str = "Todos los campos son obligatorios";

/// New-product form as typed by the user
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub nombre: String,
    pub precio: String,
    pub stock: String,
    pub descripcion: Option<String>,
}

impl ProductForm {
    /// Validate without touching the network
    pub fn validate(&self) -> Result<ProductoInput> {
        let nombre = self.nombre.trim();
        if nombre.is_empty() || self.precio.trim().is_empty() || self.stock.trim().is_empty() {
            return Err(Error::Validation(REQUIRED_FIELDS.to_string()));
        }

        Ok(ProductoInput {
            nombre: nombre.to_string(),
            precio: parse_precio(&self.precio)?,
            stock: parse_stock(&self.stock)?,
            descripcion: self
                .descripcion
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
        })
    }
}

/// Partial edit of an existing product
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub nombre: Option<String>,
    pub precio: Option<String>,
    pub stock: Option<String>,
    pub descripcion: Option<String>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.nombre.is_none()
            && self.precio.is_none()
            && self.stock.is_none()
            && self.descripcion.is_none()
    }

    /// Merge onto the current record, producing the full PUT body
    pub fn apply(&self, current: &Producto) -> Result<ProductoInput> {
        if self.is_empty() {
            return Err(Error::Validation("No hay cambios que guardar".to_string()));
        }

        let mut input = ProductoInput::from(current);
        if let Some(nombre) = &self.nombre {
            let nombre = nombre.trim();
            if nombre.is_empty() {
                return Err(Error::Validation(REQUIRED_FIELDS.to_string()));
            }
            input.nombre = nombre.to_string();
        }
        if let Some(precio) = &self.precio {
            input.precio = parse_precio(precio)?;
        }
        if let Some(stock) = &self.stock {
            input.stock = parse_stock(stock)?;
        }
        if let Some(descripcion) = &self.descripcion {
            input.descripcion = Some(descripcion.trim().to_string()).filter(|d| !d.is_empty());
        }
        Ok(input)
    }
}

fn parse_precio(raw: &str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(p) if p.is_finite() && p >= 0.0 => Ok(p),
        _ => Err(Error::Validation(format!("Precio inválido: {}", raw.trim()))),
    }
}

fn parse_stock(raw: &str) -> Result<i64> {
    match raw.trim().parse::<i64>() {
        Ok(s) if s >= 0 => Ok(s),
        _ => Err(Error::Validation(format!("Stock inválido: {}", raw.trim()))),
    }
}

/// Two-decimal price text; unparseable input renders as "0.00"
pub fn format_precio(raw: &str) -> String {
    match raw.trim().parse::<f64>() {
        Ok(p) if p.is_finite() => format!("{:.2}", p),
        _ => "0.00".to_string(),
    }
}
