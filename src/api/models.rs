//! Wire types exchanged with the backend

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Decimal fields arrive either as JSON numbers or as numeric strings
fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid decimal: {:?}", s))),
    }
}

fn integer_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid integer: {:?}", s))),
    }
}

/// Credentials posted to the token endpoint
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Successful token endpoint response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access: String,
    /// Issued by the backend but unused; there is no refresh flow
    #[serde(default)]
    pub refresh: Option<String>,
}

/// A product as returned by the catalog and inventory endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Producto {
    pub id: i64,
    pub nombre: String,
    #[serde(deserialize_with = "number_or_string")]
    pub precio: f64,
    #[serde(deserialize_with = "integer_or_string")]
    pub stock: i64,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub imagen: Option<String>,
}

impl Producto {
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Body for creating or replacing a product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductoInput {
    pub nombre: String,
    pub precio: f64,
    pub stock: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
}

impl From<&Producto> for ProductoInput {
    fn from(p: &Producto) -> Self {
        Self {
            nombre: p.nombre.clone(),
            precio: p.precio,
            stock: p.stock,
            descripcion: p.descripcion.clone(),
        }
    }
}

/// Response of an image upload
#[derive(Debug, Clone, Deserialize)]
pub struct ImagenSubida {
    pub imagen_url: String,
}

/// Financial summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumenContable {
    #[serde(deserialize_with = "number_or_string")]
    pub total_ingresos: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub total_inversiones: f64,
    #[serde(deserialize_with = "number_or_string")]
    pub total_ganancias: f64,
}

/// Kind of money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TipoTransaccion {
    /// Sale
    Ingreso,
    /// Stock purchase or other spending
    #[value(alias = "inversión")]
    Inversion,
}

impl fmt::Display for TipoTransaccion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TipoTransaccion::Ingreso => write!(f, "ingreso"),
            TipoTransaccion::Inversion => write!(f, "inversion"),
        }
    }
}

/// A recorded transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaccion {
    pub id: i64,
    /// Kept as text so unknown kinds from the backend still list
    pub tipo: String,
    #[serde(deserialize_with = "number_or_string")]
    pub monto: f64,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub producto: Option<i64>,
    #[serde(default)]
    pub cantidad: Option<i64>,
    #[serde(default)]
    pub fecha: Option<String>,
}

/// Body for recording a transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NuevaTransaccion {
    pub tipo: TipoTransaccion,
    pub monto: f64,
    pub descripcion: String,
    pub producto: i64,
    pub cantidad: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_producto_accepts_string_decimals() {
        let json = r#"{"id": 3, "nombre": "Pod X", "precio": "12.50", "stock": "4"}"#;
        let p: Producto = serde_json::from_str(json).unwrap();
        assert_eq!(p.precio, 12.5);
        assert_eq!(p.stock, 4);
        assert_eq!(p.imagen, None);
    }

    #[test]
    fn test_producto_rejects_garbage_price() {
        let json = r#"{"id": 3, "nombre": "Pod X", "precio": "doce", "stock": 4}"#;
        assert!(serde_json::from_str::<Producto>(json).is_err());
    }

    #[test]
    fn test_token_pair_without_refresh() {
        let pair: TokenPair = serde_json::from_str(r#"{"access": "tok123"}"#).unwrap();
        assert_eq!(pair.access, "tok123");
        assert!(pair.refresh.is_none());
    }

    #[test]
    fn test_nueva_transaccion_wire_shape() {
        let body = NuevaTransaccion {
            tipo: TipoTransaccion::Inversion,
            monto: 100.0,
            descripcion: "Reposición".into(),
            producto: 7,
            cantidad: 2,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["tipo"], "inversion");
        assert_eq!(value["producto"], 7);
    }

    #[test]
    fn test_resumen_mixed_number_formats() {
        let json = r#"{"total_ingresos": "150.00", "total_inversiones": 50, "total_ganancias": 100.0}"#;
        let r: ResumenContable = serde_json::from_str(json).unwrap();
        assert_eq!(r.total_ganancias, 100.0);
        assert_eq!(r.total_inversiones, 50.0);
    }
}
