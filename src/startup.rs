use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::middleware::{Condition, from_fn};
use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use crate::configuration::{ProviderCredentials, Settings, SubscriptionPolicy};
use crate::mail_client::MailClient;
use crate::middleware::cors;
use crate::routes::{health_check, subscribe};

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let mail_client = config.mail_provider.client()?;
        let credentials = config.mail_provider.credentials();

        let address = format!("{}:{}", config.application.host, config.application.port);
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let server = run(listener, mail_client, credentials, config.subscription)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    mail_client: MailClient,
    credentials: ProviderCredentials,
    policy: SubscriptionPolicy,
) -> Result<Server, anyhow::Error> {
    let mail_client = web::Data::new(mail_client);
    let credentials = web::Data::new(credentials);
    let subscription_policy = web::Data::new(policy);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Condition::new(policy.handle_preflight, from_fn(cors)))
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .route("/subscriptions", web::post().to(subscribe))
            .app_data(mail_client.clone())
            .app_data(credentials.clone())
            .app_data(subscription_policy.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
