use std::time::Duration;

use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::{ConfirmationMessage, ListMember};

// Every key-authenticated call uses this basic auth user name.
const API_USER: &str = "api";

/// HTTP client for a Mailgun-compatible mail provider API.
#[derive(Clone, Debug)]
pub struct MailClient {
    http_client: Client,
    base_url: Url,
}

#[derive(Serialize)]
struct AddressQuery<'a> {
    address: &'a str,
}

#[derive(Deserialize)]
struct AddressValidation {
    is_valid: bool,
}

impl MailClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, anyhow::Error> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("{base_url} cannot be used as a mail API base url.");
        }

        Ok(Self {
            http_client: Client::builder().timeout(timeout).build()?,
            base_url,
        })
    }

    /// Asks the provider whether `address` can receive mail.
    #[tracing::instrument(name = "Validating recipient address", skip(self, public_key))]
    pub async fn validate_address(
        &self,
        public_key: &SecretString,
        address: &str,
    ) -> Result<bool, reqwest::Error> {
        let validation = self
            .http_client
            .get(self.endpoint(&["address", "validate"]))
            .basic_auth(API_USER, Some(public_key.expose_secret()))
            .query(&AddressQuery { address })
            .send()
            .await?
            .error_for_status()?
            .json::<AddressValidation>()
            .await?;

        Ok(validation.is_valid)
    }

    #[tracing::instrument(
        name = "Sending confirmation message",
        skip(self, private_key, message),
        fields(recipient = %message.to)
    )]
    pub async fn send_message(
        &self,
        private_key: &SecretString,
        domain: &str,
        message: &ConfirmationMessage<'_>,
    ) -> Result<(), reqwest::Error> {
        self.http_client
            .post(self.endpoint(&[domain, "messages"]))
            .basic_auth(API_USER, Some(private_key.expose_secret()))
            .form(message)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    /// Adds the member to `mailing_list`, or updates it if the address is
    /// already there.
    #[tracing::instrument(
        name = "Upserting mailing list member",
        skip(self, private_key, member),
        fields(address = %member.address)
    )]
    pub async fn upsert_list_member(
        &self,
        private_key: &SecretString,
        mailing_list: &str,
        member: &ListMember<'_>,
    ) -> Result<(), reqwest::Error> {
        self.http_client
            .post(self.endpoint(&["lists", mailing_list, "members"]))
            .basic_auth(API_USER, Some(private_key.expose_secret()))
            .form(member)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    // Each segment is percent-encoded on its own, so a list or domain name
    // can never escape its position in the path.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}
