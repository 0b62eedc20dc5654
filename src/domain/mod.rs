mod confirmation_message;
mod list_member;
mod subscription_request;

pub use confirmation_message::ConfirmationMessage;
pub use list_member::ListMember;
pub use subscription_request::{RequestError, SubscriptionForm, SubscriptionRequest};
