use actix_multipart::form::{MultipartForm, text::Text};
use actix_web::{Either, web};

use crate::domain::SubscriptionForm;

/// The signup form as sent by `new FormData(form)` in a browser.
#[derive(MultipartForm, Debug)]
pub struct MultipartSubscriptionForm {
    domain: Option<Text<String>>,
    #[multipart(rename = "mailingList")]
    mailing_list: Option<Text<String>>,
    #[multipart(rename = "recipientAddress")]
    recipient_address: Option<Text<String>>,
}

impl From<MultipartSubscriptionForm> for SubscriptionForm {
    fn from(value: MultipartSubscriptionForm) -> Self {
        Self {
            domain: value.domain.map(Text::into_inner),
            mailing_list: value.mailing_list.map(Text::into_inner),
            recipient_address: value.recipient_address.map(Text::into_inner),
        }
    }
}

/// Url-encoded or multipart body. `None` when the body is neither, so that
/// missing fields are judged by the subscription policy rather than the extractor.
pub type SubmittedForm =
    Option<Either<web::Form<SubscriptionForm>, MultipartForm<MultipartSubscriptionForm>>>;

pub fn into_subscription_form(submitted: SubmittedForm) -> SubscriptionForm {
    match submitted {
        Some(Either::Left(form)) => form.into_inner(),
        Some(Either::Right(multipart)) => multipart.into_inner().into(),
        None => {
            tracing::debug!("Request body is not a form. Treating every field as missing.");
            SubscriptionForm::default()
        }
    }
}
