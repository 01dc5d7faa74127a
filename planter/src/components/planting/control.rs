use crate::{
    components::planting::state::PlantingState,
    errors::{ApiError, PlanterError, PlanterResult},
    messages::control::planting::{
        MessageResponse, PlantingParameters, PlantingStatusResponse, ProgressResponse,
        StartPlantingResponse,
    },
};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::{ffi::OsStr, future::Future, path::Path, sync::Arc};
use tokio::{net::TcpListener, sync::Mutex};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Message returned when progress is requested with no run in progress.
pub const NO_PLANTING_MESSAGE: &str = "No planting in progress";

/// Planting state guarded by the component lock. Every handler holds the
/// lock for its whole read-modify-write.
pub type SharedPlantingState = Arc<Mutex<PlantingState>>;

/// Configuration for the planting control component that the HMI talks to.
#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone)]
pub struct PlantingControlConfig {
    /// Interface to listen on, all interfaces by default.
    #[serde(default = "default_bind_address")]
    bind_address: String,
    /// Port the HMI sends requests to.
    #[serde(default = "default_port")]
    port: u16,
    /// Tracing filter used when `PLANTER_LOG` is not set.
    #[serde(default = "default_log_filter")]
    log_filter: String,
}

fn default_bind_address() -> String {
    String::from("0.0.0.0")
}

fn default_port() -> u16 {
    5000
}

fn default_log_filter() -> String {
    String::from("info")
}

impl Default for PlantingControlConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            log_filter: default_log_filter(),
        }
    }
}

impl PlantingControlConfig {
    /// Planting control configuration.
    ///
    /// * `bind_address`: interface to bind, i.e. 0.0.0.0.
    /// * `port`: port to listen on.
    pub fn new(bind_address: String, port: u16) -> Self {
        Self {
            bind_address,
            port,
            log_filter: default_log_filter(),
        }
    }

    /// Set the default tracing filter for the component.
    ///
    /// * `log_filter`: filter directive, i.e. "info,planter=debug".
    pub fn with_log_filter<S: Into<String>>(mut self, log_filter: S) -> Self {
        self.log_filter = log_filter.into();
        self
    }

    /// Build the config by reading a yaml file. Fields missing from the
    /// file take their defaults.
    ///
    /// * `filepath`: path to config.
    pub fn from_file<F: AsRef<OsStr>>(filepath: F) -> PlanterResult<Self> {
        let file = Path::new(&filepath);
        if !file.is_file() {
            return Err(PlanterError::MissingConfigFile(file.to_path_buf()));
        }

        let config_file = config::Config::builder()
            .add_source(config::File::new(
                &file.to_string_lossy(),
                config::FileFormat::Yaml,
            ))
            .build()?;

        Ok(config_file.try_deserialize::<PlantingControlConfig>()?)
    }

    /// Socket address the component binds to.
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }
}

/// Component that owns the planting state and exposes it to the HMI.
pub struct PlantingControl {
    /// Unique id of the component.
    uuid: Uuid,
    /// Config the component was built from.
    config: PlantingControlConfig,
    /// State shared with the request handlers.
    state: SharedPlantingState,
}

impl PlantingControl {
    /// Generate a new component by consuming a config. Each component holds
    /// its own state, starting with no run in progress.
    ///
    /// * `config`: `PlantingControlConfig`
    pub fn new(config: PlantingControlConfig) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            config,
            state: Arc::new(Mutex::new(PlantingState::new())),
        }
    }

    /// Generate a new component from the config stored in a file.
    ///
    /// * `filepath`: filepath to a config.
    pub fn from_config_file<F: AsRef<OsStr>>(filepath: F) -> PlanterResult<Self> {
        Ok(Self::new(PlantingControlConfig::from_file(filepath)?))
    }

    pub fn get_uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn config(&self) -> &PlantingControlConfig {
        &self.config
    }

    /// Handle to the shared state.
    pub fn state(&self) -> SharedPlantingState {
        self.state.clone()
    }

    /// Parameters of the run in progress, for the instruction executor.
    pub async fn parameters(&self) -> Option<PlantingParameters> {
        self.state.lock().await.parameters().cloned()
    }
}

/// Unit struct for controlling the planting component.
pub struct PlantingControlController;

impl PlantingControlController {
    /// Routes the HMI uses, cross origin requests are allowed from anywhere.
    ///
    /// * `state`: state the handlers share.
    pub fn router(state: SharedPlantingState) -> Router {
        Router::new()
            .route("/api/start_planting", post(start_planting))
            .route("/api/stop_planting", post(stop_planting))
            .route("/api/target_progress", get(get_progress))
            .route("/api/is_planting", get(is_planting))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    /// Bind the configured address and serve until Ctrl-C.
    ///
    /// * `planting_control`: component to serve.
    pub async fn start(planting_control: PlantingControl) -> PlanterResult<()> {
        let address = planting_control.config.address();
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|source| PlanterError::Bind {
                address: address.clone(),
                source,
            })?;
        info!(
            %address,
            uuid = %planting_control.uuid,
            "Planting control listening"
        );

        Self::serve(listener, planting_control, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    ///
    /// * `listener`: bound listener.
    /// * `planting_control`: component to serve.
    /// * `shutdown`: future that ends the server once it completes.
    pub async fn serve<F>(
        listener: TcpListener,
        planting_control: PlantingControl,
        shutdown: F,
    ) -> PlanterResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = Self::router(planting_control.state());
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(PlanterError::Serve)?;
        info!("Planting control stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler the server runs until killed.
        warn!("Failed to listen for Ctrl-C {:?}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

/// Start a run. A body with planting parameters is optional, a missing or
/// malformed body still starts the run.
async fn start_planting(
    State(state): State<SharedPlantingState>,
    parameters: Option<Json<PlantingParameters>>,
) -> Json<StartPlantingResponse> {
    let target_progress = state
        .lock()
        .await
        .start(parameters.map(|Json(params)| params));

    Json(StartPlantingResponse {
        message: String::from("Planting started"),
        target_progress,
    })
}

async fn stop_planting(State(state): State<SharedPlantingState>) -> Json<MessageResponse> {
    state.lock().await.stop();

    Json(MessageResponse {
        message: String::from("Planting stopped"),
    })
}

/// Progress of the current run, 404 when nothing is being planted.
async fn get_progress(
    State(state): State<SharedPlantingState>,
) -> Result<Json<ProgressResponse>, ApiError> {
    let progress = state.lock().await.progress();

    match progress {
        Some(progress) => {
            debug!(?progress, "Progress requested");
            Ok(Json(progress))
        }
        None => {
            warn!("Progress requested with no planting in progress");
            Err(ApiError::NotFound(String::from(NO_PLANTING_MESSAGE)))
        }
    }
}

async fn is_planting(State(state): State<SharedPlantingState>) -> Json<PlantingStatusResponse> {
    let planting_active = state.lock().await.is_active();
    debug!(planting_active, "Planting status requested");

    Json(PlantingStatusResponse { planting_active })
}
