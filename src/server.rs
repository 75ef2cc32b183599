//! The HTTP face of the renderer: a single GET route that reads its
//! parameters from the query string and answers with a PNG.  Bad
//! parameters are never fatal; each one is logged and replaced by its
//! default.

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use log::{debug, error, info, warn};
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::str::FromStr;
use tokio::net::TcpListener;

use crate::color::ColorScheme;
use crate::config::RenderConfig;
use crate::errors::MandelError;
use crate::planes::{Raster, Region};
use crate::png::encode_png;
use crate::render::Renderer;

/// Values substituted for missing or unparseable query parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QueryDefaults {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Region sampled when no bounds are given.
    pub region: Region,
    /// Raw color scheme selector.
    pub color_scheme: i64,
    /// Largest image, in pixels, a request may ask for.
    pub max_pixels: usize,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        QueryDefaults {
            width: 1024,
            height: 1024,
            region: Region::new(-2.0, -2.0, 2.0, 2.0),
            color_scheme: 2,
            max_pixels: 8192 * 8192,
        }
    }
}

/// One fully resolved image request.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ImageRequest {
    /// Size of the image.
    pub raster: Raster,
    /// Part of the complex plane to draw.
    pub region: Region,
    /// Coloring to apply.
    pub scheme: ColorScheme,
}

// Reads one parameter.  None when it is absent or does not parse; the
// latter is logged.
fn param<T: FromStr>(query: &HashMap<String, String>, name: &str) -> Option<T> {
    let raw = query.get(name)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Invalid {} given: {}", name, raw);
            None
        }
    }
}

impl ImageRequest {
    /// Resolves the recognised query parameters (`width`, `height`,
    /// `xmin`, `ymin`, `xmax`, `ymax`, `colorScheme`), substituting
    /// defaults for anything missing or malformed.  A size larger than
    /// `max_pixels` falls back to the default size.  Unknown parameters
    /// are ignored.
    pub fn from_query(query: &HashMap<String, String>, defaults: &QueryDefaults) -> Self {
        let width = param(query, "width").map_or(defaults.width, NonZeroU32::get);
        let height = param(query, "height").map_or(defaults.height, NonZeroU32::get);
        let mut raster = Raster(width, height);
        if raster.len() > defaults.max_pixels {
            warn!(
                "Image of {}x{} exceeds {} pixels, using {}x{}",
                width, height, defaults.max_pixels, defaults.width, defaults.height
            );
            raster = Raster(defaults.width, defaults.height);
        }
        let region = Region::new(
            param(query, "xmin").unwrap_or(defaults.region.xmin),
            param(query, "ymin").unwrap_or(defaults.region.ymin),
            param(query, "xmax").unwrap_or(defaults.region.xmax),
            param(query, "ymax").unwrap_or(defaults.region.ymax),
        );
        let selector = param(query, "colorScheme").unwrap_or(defaults.color_scheme);
        ImageRequest {
            raster,
            region,
            scheme: ColorScheme::from_selector(selector),
        }
    }
}

/// Shared, read-only settings for every request.
#[derive(Copy, Clone, Debug)]
pub struct ServerState {
    /// Query parameter defaults.
    pub defaults: QueryDefaults,
    /// Render parameters.
    pub config: RenderConfig,
    /// Worker threads per render.
    pub threads: usize,
}

impl Default for ServerState {
    fn default() -> Self {
        ServerState {
            defaults: QueryDefaults::default(),
            config: RenderConfig::default(),
            threads: num_cpus::get(),
        }
    }
}

/// Renders the request and encodes the result.  Blocking; runs on the
/// runtime's blocking pool.
fn render_png(request: ImageRequest, state: ServerState) -> Result<Vec<u8>, MandelError> {
    let renderer = Renderer::new(request.raster, request.region, request.scheme, state.config);
    encode_png(&renderer.render(state.threads))
}

/// Handler for `GET /`.
pub async fn mandelbrot(
    State(state): State<ServerState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let request = ImageRequest::from_query(&query, &state.defaults);
    debug!("Rendering {:?}", request);

    match tokio::task::spawn_blocking(move || render_png(request, state)).await {
        Ok(Ok(bytes)) => ([(header::CONTENT_TYPE, "image/png")], bytes).into_response(),
        Ok(Err(err)) => {
            error!("{}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
        Err(err) => {
            error!("Render task did not complete: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// The application's routes.
pub fn router(state: ServerState) -> Router {
    Router::new().route("/", get(mandelbrot)).with_state(state)
}

/// Binds to `port` on every interface and serves until the process is
/// stopped.
pub async fn serve(port: u16, state: ServerState) -> Result<(), MandelError> {
    let listener = TcpListener::bind(("0.0.0.0", port))
        .await
        .map_err(|cause| MandelError::Serve { port, cause })?;
    info!("Listening on port {}", port);
    axum::serve(listener, router(state))
        .await
        .map_err(|cause| MandelError::Serve { port, cause })
}
