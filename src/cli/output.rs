//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::api::{Producto, ResumenContable, Transaccion};
use crate::shop::{format_precio, resolve_image_url};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

fn header(names: &[&str]) -> Vec<Cell> {
    names.iter().map(|n| Cell::new(n).fg(Color::Cyan)).collect()
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn stock_cell(stock: i64) -> Cell {
    let color = if stock > 0 { Color::Green } else { Color::Red };
    Cell::new(stock).fg(color)
}

fn money(amount: f64) -> String {
    format!("${}", format_precio(&amount.to_string()))
}

/// Print the inventory table
pub fn print_productos_table(productos: &[Producto]) {
    if productos.is_empty() {
        info("No hay vapers en el inventario");
        return;
    }

    let mut table = new_table();
    table.set_header(header(&["ID", "Nombre", "Precio", "Stock"]));

    for p in productos {
        table.add_row(vec![
            Cell::new(p.id),
            Cell::new(&p.nombre),
            Cell::new(money(p.precio)),
            stock_cell(p.stock),
        ]);
    }

    println!("{table}");
}

/// Print the public showcase
pub fn print_catalogo(productos: &[Producto], base_url: &str) {
    if productos.is_empty() {
        info("No hay productos disponibles por el momento");
        return;
    }

    let mut table = new_table();
    table.set_header(header(&["Producto", "Precio", "Disponibilidad", "Imagen"]));

    for p in productos {
        let nombre = match p.descripcion.as_deref().filter(|d| !d.is_empty()) {
            Some(d) => format!("{}\n{}", p.nombre, d),
            None => p.nombre.clone(),
        };
        let disponibilidad = if p.in_stock() {
            Cell::new("En stock").fg(Color::Green)
        } else {
            Cell::new("Agotado").fg(Color::Red)
        };

        table.add_row(vec![
            Cell::new(nombre),
            Cell::new(money(p.precio)),
            disponibilidad,
            Cell::new(resolve_image_url(base_url, p.imagen.as_deref())),
        ]);
    }

    println!("{table}");
}

/// Print the accounting summary
pub fn print_resumen(resumen: &ResumenContable) {
    println!("{}", "Contabilidad".bold().underline());
    println!();
    println!("  {} {}", "Ingresos:".bold(), money(resumen.total_ingresos).green());
    println!(
        "  {} {}",
        "Inversiones:".bold(),
        money(resumen.total_inversiones).yellow()
    );

    let ganancias = money(resumen.total_ganancias);
    let ganancias = if resumen.total_ganancias >= 0.0 {
        ganancias.green()
    } else {
        ganancias.red()
    };
    println!("  {} {}", "Ganancias:".bold(), ganancias);
}

/// Render an ISO timestamp for humans, passing through anything unparseable
pub fn format_fecha(fecha: Option<&str>) -> String {
    let Some(fecha) = fecha else {
        return "-".to_string();
    };
    chrono::DateTime::parse_from_rfc3339(fecha)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| fecha.to_string())
}

/// Print the transaction list
pub fn print_transacciones_table(transacciones: &[Transaccion]) {
    if transacciones.is_empty() {
        info("No hay transacciones registradas");
        return;
    }

    let mut table = new_table();
    table.set_header(header(&[
        "ID",
        "Tipo",
        "Monto",
        "Descripción",
        "Producto",
        "Cantidad",
        "Fecha",
    ]));

    for t in transacciones {
        let tipo_color = if t.tipo == "ingreso" {
            Color::Green
        } else {
            Color::Yellow
        };

        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(&t.tipo).fg(tipo_color),
            Cell::new(money(t.monto)),
            Cell::new(&t.descripcion),
            Cell::new(t.producto.map(|p| p.to_string()).unwrap_or_else(|| "-".into())),
            Cell::new(t.cantidad.map(|c| c.to_string()).unwrap_or_else(|| "-".into())),
            Cell::new(format_fecha(t.fecha.as_deref())),
        ]);
    }

    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fecha() {
        assert_eq!(format_fecha(Some("2025-03-01T12:30:00Z")), "2025-03-01 12:30");
        assert_eq!(format_fecha(Some("2025-03-01")), "2025-03-01");
        assert_eq!(format_fecha(None), "-");
    }

    #[test]
    fn test_money() {
        assert_eq!(money(12.5), "$12.50");
    }
}
