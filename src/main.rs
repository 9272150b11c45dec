use std::net::TcpListener;
use std::sync::Arc;

use anyhow::Context;

use campusconnect::app;
use campusconnect::client::{EmailClient, SmtpTransport};
use campusconnect::repo::MongoCommunicationRepo;
use campusconnect::settings::Settings;
use campusconnect::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("Failed to load settings")?;

    let subscriber = telemetry::create_subscriber(settings.app.log_level(), std::io::stdout);
    telemetry::set_subscriber(subscriber)?;

    let repo = MongoCommunicationRepo::connect(&settings.database)
        .await
        .context("Failed to connect to MongoDB")?;

    let email_client = {
        let transport =
            SmtpTransport::from_settings(&settings.email).context("Failed to set up SMTP")?;
        let admin = settings.email.admin()?;
        let site = settings.site.details(&settings.email)?;

        EmailClient::new(Arc::new(transport), admin, site)
    };

    let listener = TcpListener::bind(settings.app.addr())?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    app::run(listener, Arc::new(repo), email_client, settings.intake)?
        .await
        .context("Failed to run app")
}
