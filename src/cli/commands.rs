//! CLI command implementations

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password};
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::{self, TipoTransaccion};
use crate::app::App;
use crate::cli::{
    error, info, print_catalogo, print_productos_table, print_resumen,
    print_transacciones_table, success, warn, InventarioAction, OutputFormat,
    TransaccionesAction,
};
use crate::config::{self, loader::CONFIG_FILENAME, Config};
use crate::error::Error;
use crate::routes::{NavigationDecision, View};
use crate::shop::{self, ProductForm, ProductPatch, TransactionForm};

/// Error already shown to the user; `main` only sets the exit code for it
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct Reported(pub Error);

/// Resolve configuration from an explicit path, discovery, and CLI overrides
pub fn load_config(path: Option<&Path>, api_url: Option<String>) -> crate::error::Result<Config> {
    let mut config = match path {
        Some(path) => config::load_config_from_path(path)?,
        None => config::load_config()?,
    };
    if let Some(url) = api_url {
        config.api.base_url = url;
    }
    Ok(config)
}

/// Load configuration and start the app, reporting failures
pub fn open_app(path: Option<&Path>, api_url: Option<String>) -> Result<App> {
    load_config(path, api_url)
        .and_then(App::bootstrap)
        .map_err(|e| report("Configuración", e))
}

/// Headline for a failed operation.
///
/// Domain errors already read as complete messages and are shown alone;
/// anything else is prefixed with what was being attempted.
pub fn notice(context: &str, err: &Error) -> String {
    match err {
        Error::Unauthorized
        | Error::InvalidCredentials
        | Error::NotAuthenticated(_)
        | Error::Validation(_)
        | Error::NotFound(_)
        | Error::RequestFailed(_) => err.to_string(),
        _ => format!("{}: {}", context, err),
    }
}

/// Follow-up line printed under the headline, if any
pub fn hint(context: &str, err: &Error) -> Option<String> {
    match err {
        Error::Unauthorized | Error::NotAuthenticated(_) => {
            Some("Inicia sesión con 'vaporzone login'".to_string())
        }
        Error::RequestFailed(_) => Some(format!("{}. Puedes reintentar la operación", context)),
        _ => None,
    }
}

/// Show a library error to the user once and pass it on as already reported
fn report(context: &str, err: Error) -> anyhow::Error {
    let headline = notice(context, &err);
    match &err {
        Error::Validation(_) | Error::NotFound(_) => warn(&headline),
        _ => error(&headline),
    }
    if let Some(hint) = hint(context, &err) {
        info(&hint);
    }
    Reported(err).into()
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Write a default vaporzone.toml
pub async fn init() -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILENAME);

    if config_path.exists() {
        warn(&format!("{} already exists", CONFIG_FILENAME));
        return Ok(());
    }

    fs::write(&config_path, config::loader::default_config_content())?;

    success(&format!("Created {}", CONFIG_FILENAME));
    info("Run 'vaporzone login' to sign in");

    Ok(())
}

/// Sign in, prompting for missing credentials
pub async fn login(app: &App, username: Option<String>, password: Option<String>) -> Result<()> {
    app.enter_view(View::Login).map_err(|e| report("Login", e))?;
    let theme = ColorfulTheme::default();

    let username = match username {
        Some(u) => u,
        None => Input::<String>::with_theme(&theme)
            .with_prompt("Usuario")
            .interact_text()?,
    };
    let password = match password {
        Some(p) => p,
        None => Password::with_theme(&theme)
            .with_prompt("Contraseña")
            .interact()?,
    };

    info("Iniciando sesión...");
    match api::auth::login(&app.api, &username, &password).await {
        Ok(_) => {
            success("¡Login exitoso!");
            // Same landing screen the web client redirects to
            app.enter_view(View::Inventario)
                .map_err(|e| report("Login", e))?;
            Ok(())
        }
        Err(e) => Err(report("No se pudo iniciar sesión", e)),
    }
}

pub async fn logout(app: &App) -> Result<()> {
    let was_authenticated = app.session.is_authenticated();
    api::auth::logout(&app.api);

    if was_authenticated {
        success("Sesión cerrada");
    } else {
        info("No había ninguna sesión activa");
    }
    Ok(())
}

pub async fn whoami(app: &App) -> Result<()> {
    let session = app.session.current();
    if session.is_authenticated() {
        let user = session.user.as_deref().unwrap_or("(usuario desconocido)");
        success(&format!("Sesión activa como {}", user));
    } else {
        info("No has iniciado sesión");
    }
    Ok(())
}

/// Report the guard's decision for a path
pub async fn open(app: &App, path: &str) -> Result<()> {
    let decision = app.navigator.navigate(path);
    let landed = app.navigator.location();

    match decision {
        NavigationDecision::Render(view) => success(&format!("{} → {}", path, view)),
        NavigationDecision::RedirectLogin => {
            warn(&format!("{} requiere sesión, redirigiendo a {}", path, landed.path))
        }
        NavigationDecision::RedirectHome => {
            info(&format!("{} no existe, redirigiendo a {}", path, landed.path))
        }
    }
    Ok(())
}

/// Public showcase; works without a session
pub async fn catalogo(app: &App, format: OutputFormat) -> Result<()> {
    app.enter_view(View::Home).map_err(|e| report("Catálogo", e))?;

    let productos = api::productos::list_public(&app.api).await.map_err(|e| {
        report("No se pudieron cargar los productos", e)
    })?;

    match format {
        OutputFormat::Table => print_catalogo(&productos, app.api.base_url()),
        OutputFormat::Json => print_json(&productos)?,
    }
    Ok(())
}

pub async fn inventario(app: &App, action: InventarioAction) -> Result<()> {
    app.enter_view(View::Inventario)
        .map_err(|e| report("Inventario", e))?;

    match action {
        InventarioAction::List { format } => {
            let productos = api::productos::list(&app.api)
                .await
                .map_err(|e| report("Error al cargar los productos", e))?;
            match format {
                OutputFormat::Table => print_productos_table(&productos),
                OutputFormat::Json => print_json(&productos)?,
            }
        }
        InventarioAction::Add {
            nombre,
            precio,
            stock,
            descripcion,
        } => {
            let form = ProductForm {
                nombre,
                precio,
                stock,
                descripcion,
            };
            let input = form.validate().map_err(|e| report("Producto", e))?;
            let producto = api::productos::create(&app.api, &input)
                .await
                .map_err(|e| report("Error al agregar el producto", e))?;
            success(&format!("Producto agregado: {} (id {})", producto.nombre, producto.id));
        }
        InventarioAction::Edit {
            id,
            nombre,
            precio,
            stock,
            descripcion,
        } => {
            let patch = ProductPatch {
                nombre,
                precio,
                stock,
                descripcion,
            };
            if patch.is_empty() {
                return Err(report(
                    "Producto",
                    Error::Validation("No hay cambios que guardar".to_string()),
                ));
            }
            let current = api::productos::get(&app.api, id)
                .await
                .map_err(|e| report("Error al actualizar el producto", e))?;
            let input = patch.apply(&current).map_err(|e| report("Producto", e))?;
            let producto = api::productos::update(&app.api, id, &input)
                .await
                .map_err(|e| report("Error al actualizar el producto", e))?;
            success(&format!("Producto actualizado: {}", producto.nombre));
        }
        InventarioAction::Delete { id, force } => {
            if !force {
                let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(format!("¿Eliminar el producto {}?", id))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    info("Cancelado");
                    return Ok(());
                }
            }
            api::productos::delete(&app.api, id)
                .await
                .map_err(|e| report("Error al eliminar el producto", e))?;
            success(&format!("Producto {} eliminado", id));
        }
        InventarioAction::Imagen { id, file } => {
            let subida = api::productos::upload_image(&app.api, id, &file)
                .await
                .map_err(|e| report("Error al subir la imagen", e))?;
            success(&format!(
                "Imagen subida: {}",
                shop::resolve_image_url(app.api.base_url(), Some(subida.imagen_url.as_str()))
            ));
        }
    }

    Ok(())
}

pub async fn contabilidad(app: &App, format: OutputFormat) -> Result<()> {
    app.enter_view(View::Contabilidad)
        .map_err(|e| report("Contabilidad", e))?;

    let resumen = api::contabilidad::resumen(&app.api)
        .await
        .map_err(|e| report("Error al obtener datos", e))?;

    match format {
        OutputFormat::Table => print_resumen(&resumen),
        OutputFormat::Json => print_json(&resumen)?,
    }
    Ok(())
}

pub async fn transacciones(app: &App, action: TransaccionesAction) -> Result<()> {
    app.enter_view(View::Transacciones)
        .map_err(|e| report("Transacciones", e))?;

    match action {
        TransaccionesAction::List { format } => {
            let transacciones = api::transacciones::list(&app.api)
                .await
                .map_err(|e| report("Error al obtener transacciones", e))?;
            match format {
                OutputFormat::Table => print_transacciones_table(&transacciones),
                OutputFormat::Json => print_json(&transacciones)?,
            }
        }
        TransaccionesAction::Add {
            tipo,
            monto,
            descripcion,
            producto,
            cantidad,
        } => {
            add_transaccion(app, tipo, monto, descripcion, producto, cantidad).await?;
        }
    }

    Ok(())
}

async fn add_transaccion(
    app: &App,
    tipo: TipoTransaccion,
    monto: String,
    descripcion: String,
    producto: i64,
    cantidad: String,
) -> Result<()> {
    let form = TransactionForm {
        tipo,
        monto,
        descripcion,
        producto,
        cantidad,
    };

    info("Buscando producto...");
    let (transaccion, producto) = shop::record(&app.api, &form)
        .await
        .map_err(|e| report("Error al enviar transacción", e))?;

    success(&format!("Transacción creada (id {})", transaccion.id));
    info(&format!(
        "{}: stock previo {}",
        producto.nombre, producto.stock
    ));
    Ok(())
}
