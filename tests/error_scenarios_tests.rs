//! Error scenario and edge case tests
//!
//! Run with: cargo test --test error_scenarios_tests
//! Covers the user-facing error taxonomy:
//! - Validation errors raised before any request
//! - Not-found lookups
//! - Retryable request failures
//! - Session-ending authorization failures

use vaporzone::api::{Producto, TipoTransaccion};
use vaporzone::error::Error;
use vaporzone::shop::{check_stock, format_precio, ProductForm, ProductPatch, TransactionForm};

fn producto(stock: i64) -> Producto {
    Producto {
        id: 7,
        nombre: "Vaper Classic".to_string(),
        precio: 30.0,
        stock,
        descripcion: None,
        imagen: None,
    }
}

// ============================================================================
// Validation Error Tests
// ============================================================================

#[test]
fn test_error_product_form_all_blank() {
    let err = ProductForm::default().validate().unwrap_err();
    assert_eq!(err.to_string(), "Todos los campos son obligatorios");
}

#[test]
fn test_error_product_form_non_numeric_price() {
    let form = ProductForm {
        nombre: "Vaper".into(),
        precio: "treinta".into(),
        stock: "1".into(),
        descripcion: None,
    };
    assert!(matches!(form.validate(), Err(Error::Validation(_))));
}

#[test]
fn test_error_patch_blank_name() {
    let patch = ProductPatch {
        nombre: Some("   ".into()),
        ..Default::default()
    };
    assert!(matches!(patch.apply(&producto(1)), Err(Error::Validation(_))));
}

#[test]
fn test_error_transaction_negative_amount() {
    let form = TransactionForm {
        tipo: TipoTransaccion::Inversion,
        monto: "-5".into(),
        descripcion: "Compra".into(),
        producto: 7,
        cantidad: "1".into(),
    };
    assert!(matches!(form.validate(), Err(Error::Validation(_))));
}

#[test]
fn test_error_stock_exhausted_product() {
    let form = TransactionForm {
        tipo: TipoTransaccion::Ingreso,
        monto: "30".into(),
        descripcion: "Venta".into(),
        producto: 7,
        cantidad: "1".into(),
    };
    let nueva = form.validate().unwrap();
    let err = check_stock(&nueva, &producto(0)).unwrap_err();
    assert_eq!(err.to_string(), "No hay suficiente stock disponible");
}

// ============================================================================
// Taxonomy Tests
// ============================================================================

#[test]
fn test_error_retryability() {
    assert!(Error::RequestFailed("Error 502 del servidor".into()).is_retryable());
    assert!(!Error::Validation("x".into()).is_retryable());
    assert!(!Error::InvalidCredentials.is_retryable());
    assert!(!Error::Unauthorized.is_retryable());
}

#[test]
fn test_error_not_authenticated_names_path() {
    let err = Error::NotAuthenticated("/contabilidad".into());
    assert!(err.to_string().contains("/contabilidad"));
}

#[test]
fn test_error_config_not_found_names_path() {
    let err = Error::ConfigNotFound("/etc/vaporzone.toml".into());
    assert!(err.to_string().contains("/etc/vaporzone.toml"));
}

// ============================================================================
// Display Edge Cases
// ============================================================================

#[test]
fn test_format_precio_edge_cases() {
    assert_eq!(format_precio(""), "0.00");
    assert_eq!(format_precio("NaN"), "0.00");
    assert_eq!(format_precio(" 7 "), "7.00");
}
