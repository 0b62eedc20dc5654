use actix_web::{HttpResponse, http::header::ContentType, web};

use crate::{
    configuration::{ProviderCredentials, SubscriptionPolicy},
    domain::SubscriptionRequest,
    mail_client::MailClient,
};

use super::errors::SubscribeError;
use super::form::{SubmittedForm, into_subscription_form};

/// Validates the recipient with the mail provider and, if the address is
/// valid, sends the confirmation message and adds the recipient to the list.
/// Answers `OK` whether or not the address turned out to be valid.
#[tracing::instrument(
    name = "Subscribing a recipient to a mailing list",
    skip(form, mail_client, credentials, policy),
    fields(
        domain = tracing::field::Empty,
        mailing_list = tracing::field::Empty,
        recipient_address = tracing::field::Empty,
        recipient_is_valid = tracing::field::Empty
    )
)]
pub async fn subscribe(
    form: SubmittedForm,
    mail_client: web::Data<MailClient>,
    credentials: web::Data<ProviderCredentials>,
    policy: web::Data<SubscriptionPolicy>,
) -> Result<HttpResponse, SubscribeError> {
    let form = into_subscription_form(form);
    let span = tracing::Span::current();
    span.record("domain", tracing::field::debug(&form.domain));
    span.record("mailing_list", tracing::field::debug(&form.mailing_list));
    span.record("recipient_address", tracing::field::debug(&form.recipient_address));

    let request = if policy.enforce_required_fields {
        SubscriptionRequest::parse(form, &credentials).map_err(SubscribeError::ConfigError)?
    } else {
        SubscriptionRequest::parse_lenient(form, &credentials)
    };

    let is_valid = mail_client
        .validate_address(&request.public_key, &request.recipient_address)
        .await
        .map_err(SubscribeError::AddressValidationFailed)?;
    span.record("recipient_is_valid", is_valid);

    if is_valid {
        mail_client
            .send_message(
                &request.private_key,
                &request.domain,
                &request.confirmation_message(),
            )
            .await
            .map_err(SubscribeError::SendFailed)?;

        // No rollback: the confirmation is already out if this fails.
        mail_client
            .upsert_list_member(
                &request.private_key,
                &request.mailing_list,
                &request.list_member(),
            )
            .await
            .map_err(SubscribeError::UpsertFailed)?;
    } else {
        tracing::info!("Recipient address is not valid. Skipping the subscription.");
    }

    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body("OK"))
}
