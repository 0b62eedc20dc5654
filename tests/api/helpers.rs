use std::collections::HashMap;

use list_signup::{
    configuration::{Settings, SubscriptionPolicy, get_configuration},
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};
use once_cell::sync::Lazy;
use secrecy::SecretString;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub const DOMAIN: &str = "mg.example.com";

pub struct TestApp {
    pub address: String,
    pub mail_server: MockServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_subscription(&self, body: String) -> reqwest::Response {
        self.api_client
            .post(format!("{}/subscriptions", self.address))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_subscription_without_body(&self) -> reqwest::Response {
        self.api_client
            .post(format!("{}/subscriptions", self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_multipart_subscription(
        &self,
        form: reqwest::multipart::Form,
    ) -> reqwest::Response {
        self.api_client
            .post(format!("{}/subscriptions", self.address))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn mock_address_validation(&self, is_valid: bool) {
        Mock::given(path("/address/validate"))
            .and(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "is_valid": is_valid })),
            )
            .mount(&self.mail_server)
            .await;
    }

    /// Paths hit on the mail provider, in the order they were requested.
    pub async fn mail_api_calls(&self) -> Vec<String> {
        self.mail_server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|r| r.url.path().to_string())
            .collect()
    }

    /// Form body of the first request sent to `endpoint`.
    pub async fn form_sent_to(&self, endpoint: &str) -> HashMap<String, String> {
        let requests = self.mail_server.received_requests().await.unwrap();
        let request = requests
            .iter()
            .find(|r| r.url.path() == endpoint)
            .unwrap_or_else(|| panic!("No request was sent to {endpoint}."));

        serde_urlencoded::from_bytes(&request.body).expect("Body is not form encoded.")
    }
}

pub fn subscription_body(mailing_list: &str, recipient: &str) -> String {
    serde_urlencoded::to_string([
        ("domain", DOMAIN),
        ("mailingList", mailing_list),
        ("recipientAddress", recipient),
    ])
    .unwrap()
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

pub async fn spawn_app_with(customise: impl FnOnce(&mut Settings)) -> TestApp {
    Lazy::force(&TRACING);

    let mail_server = MockServer::start().await;

    let config = {
        let mut c = get_configuration().expect("Failed to read configuration");
        c.application.port = 0;
        c.mail_provider.base_url = mail_server.uri();
        c.mail_provider.public_key = Some(SecretString::from("pubkey-test".to_string()));
        c.mail_provider.private_key = Some(SecretString::from("key-test".to_string()));
        c.subscription = SubscriptionPolicy::default();
        customise(&mut c);
        c
    };

    let application = Application::build(config)
        .await
        .expect("Failed to build application.");
    let address = format!("http://127.0.0.1:{}", application.port());
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address,
        mail_server,
        api_client: reqwest::Client::new(),
    }
}

pub fn lenient(c: &mut Settings) {
    c.subscription.enforce_required_fields = false;
}
