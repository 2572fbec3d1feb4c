//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::time::Duration;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use backend::ApiDoc;
use backend::Trace;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::liqueurs;
use backend::inbound::http::root::welcome;
use backend::inbound::http::state::HttpState;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(welcome)
        .configure(liqueurs::configure)
        .service(ready)
        .service(live)
        .service(SwaggerUi::new("/api-doc/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()))
}

/// Bind the listener and build the server.
///
/// Marks `health_state` ready once the socket is bound. The returned
/// [`Server`] must be awaited to serve traffic.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let bind_addr = config.bind_addr();
    let http_state = web::Data::new(HttpState::new(config.liqueurs));

    // Shutdown goes through `drain` so liveness can fail before the
    // listener closes.
    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(bind_addr)?
        .disable_signals()
        .run();

    health_state.mark_ready();
    Ok(server)
}

/// Fail liveness probes, wait `grace` so probes can observe it, then stop
/// accepting connections and let in-flight requests finish.
pub async fn drain(handle: ServerHandle, health_state: web::Data<HealthState>, grace: Duration) {
    health_state.mark_unhealthy();
    info!(grace_ms = grace.as_millis(), "draining liqueur service");
    tokio::time::sleep(grace).await;
    handle.stop(true).await;
}
