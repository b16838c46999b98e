use std::sync::Mutex;

use actix_web::{
    error::ErrorInternalServerError,
    get,
    http::header,
    post,
    web,
    App,
    HttpRequest,
    HttpResponse,
    HttpServer,
};
use anyhow::{Context, Result};
use reqwest::Client;
use tracing::info;

use crate::config::Config;
use crate::loader::{Outcome, PolicyLoader};
use crate::page;
use crate::source;
use crate::theme::{PreferenceStore, Theme};

/// Client hint carrying the reader's OS light/dark preference.
const COLOR_SCHEME_HINT: &str = "Sec-CH-Prefers-Color-Scheme";

pub struct AppState {
    config: Config,
    client: Client,
    store: Mutex<PreferenceStore>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let store = PreferenceStore::open(config.preferences.clone())?;

        Ok(Self {
            config,
            client: source::http_client()?,
            store: Mutex::new(store),
        })
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(toggle_theme);
}

fn system_theme(req: &HttpRequest) -> Option<Theme> {
    req.headers()
        .get(COLOR_SCHEME_HINT)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

#[get("/")]
async fn index(state: web::Data<AppState>, req: HttpRequest) -> actix_web::Result<HttpResponse> {
    let outcome = PolicyLoader::from_config(&state.config, &state.client).load().await;

    if let Outcome::Redirect(url) = &outcome {
        return Ok(HttpResponse::Found()
            .insert_header((header::LOCATION, url.as_str()))
            .finish());
    }

    let theme = state
        .store
        .lock()
        .map_err(|_| ErrorInternalServerError("Preference store is poisoned"))?
        .resolve_theme(system_theme(&req));

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .insert_header(("Accept-CH", COLOR_SCHEME_HINT))
        .body(page::render(&state.config, theme, &outcome)))
}

#[post("/theme")]
async fn toggle_theme(state: web::Data<AppState>, req: HttpRequest) -> actix_web::Result<HttpResponse> {
    let theme = state
        .store
        .lock()
        .map_err(|_| ErrorInternalServerError("Preference store is poisoned"))?
        .toggle_theme(system_theme(&req))
        .map_err(ErrorInternalServerError)?;

    info!("Theme changed to {}", theme);

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish())
}

pub async fn serve(config: Config, addr: &str) -> Result<()> {
    let state = web::Data::new(AppState::new(config)?);

    info!("Serving privacy policy on http://{}", addr);

    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind(addr)
        .with_context(|| format!("Failed to bind {}", addr))?
        .run()
        .await?;

    Ok(())
}
