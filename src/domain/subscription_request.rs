use secrecy::{ExposeSecret, SecretString};

use crate::configuration::ProviderCredentials;

use super::{ConfirmationMessage, ListMember};

/// Fields as submitted by the signup form. Any of them may be absent.
#[derive(serde::Deserialize, Debug, Default)]
pub struct SubscriptionForm {
    pub domain: Option<String>,
    #[serde(rename = "mailingList")]
    pub mailing_list: Option<String>,
    #[serde(rename = "recipientAddress")]
    pub recipient_address: Option<String>,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RequestError {
    #[error("Missing API credentials: {}.", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),
    #[error("Missing required fields: {}.", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

/// Everything a single subscription needs, resolved once per request.
#[derive(Debug)]
pub struct SubscriptionRequest {
    pub public_key: SecretString,
    pub private_key: SecretString,
    pub domain: String,
    pub mailing_list: String,
    pub recipient_address: String,
}

impl SubscriptionRequest {
    /// Requires every credential and form field to be non-empty.
    pub fn parse(
        form: SubscriptionForm,
        credentials: &ProviderCredentials,
    ) -> Result<Self, RequestError> {
        let public_key = present_secret(&credentials.public_key);
        let private_key = present_secret(&credentials.private_key);
        let domain = present(form.domain);
        let mailing_list = present(form.mailing_list);
        let recipient_address = present(form.recipient_address);

        let missing_credentials: Vec<&'static str> = [
            ("public key", public_key.is_none()),
            ("private key", private_key.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, missing)| missing.then_some(name))
        .collect();
        if !missing_credentials.is_empty() {
            return Err(RequestError::MissingCredentials(missing_credentials));
        }

        match (public_key, private_key, domain, mailing_list, recipient_address) {
            (
                Some(public_key),
                Some(private_key),
                Some(domain),
                Some(mailing_list),
                Some(recipient_address),
            ) => Ok(Self {
                public_key,
                private_key,
                domain,
                mailing_list,
                recipient_address,
            }),
            (_, _, domain, mailing_list, recipient_address) => {
                let missing = [
                    ("domain", domain.is_none()),
                    ("mailingList", mailing_list.is_none()),
                    ("recipientAddress", recipient_address.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, missing)| missing.then_some(name))
                .collect();
                Err(RequestError::MissingFields(missing))
            }
        }
    }

    /// Never fails: absent values become empty strings and are left for the
    /// mail provider to reject.
    pub fn parse_lenient(form: SubscriptionForm, credentials: &ProviderCredentials) -> Self {
        let key_or_empty = |key: &Option<SecretString>| {
            key.clone()
                .unwrap_or_else(|| SecretString::from(String::new()))
        };

        Self {
            public_key: key_or_empty(&credentials.public_key),
            private_key: key_or_empty(&credentials.private_key),
            domain: form.domain.unwrap_or_default(),
            mailing_list: form.mailing_list.unwrap_or_default(),
            recipient_address: form.recipient_address.unwrap_or_default(),
        }
    }

    pub fn confirmation_message(&self) -> ConfirmationMessage<'_> {
        ConfirmationMessage::new(&self.mailing_list, &self.recipient_address)
    }

    pub fn list_member(&self) -> ListMember<'_> {
        ListMember::subscribed(&self.recipient_address)
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn present_secret(value: &Option<SecretString>) -> Option<SecretString> {
    value
        .as_ref()
        .filter(|v| !v.expose_secret().is_empty())
        .cloned()
}
