use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{get, HttpResponse, Responder};
use actix_web::{web, App, HttpServer};

use tracing_actix_web::TracingLogger;

use crate::client::EmailClient;
use crate::controller;
use crate::error::IntakeError;
use crate::repo::CommunicationRepo;
use crate::settings::IntakeSettings;

/// Simple health-check endpoint
#[tracing::instrument(name = "Health check")]
#[get("/health_check")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().finish()
}

/// Reject bodies that are not valid JSON the same way as invalid fields
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        tracing::warn!(error = %err, "Rejected request body");
        IntakeError::Validation("Invalid request body".into()).into()
    })
}

/// Run the application on a specified TCP listener
pub fn run(
    listener: TcpListener,
    repo: Arc<dyn CommunicationRepo>,
    email_client: EmailClient,
    intake: IntakeSettings,
) -> anyhow::Result<Server> {
    // Wrap application data
    let repo: web::Data<dyn CommunicationRepo> = web::Data::from(repo);
    let email_client = web::Data::new(email_client);
    let intake = web::Data::new(intake);

    // Start the server
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(json_config())
            .app_data(repo.clone())
            .app_data(email_client.clone())
            .app_data(intake.clone())
            .service(health_check)
            .service(controller::scope())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
