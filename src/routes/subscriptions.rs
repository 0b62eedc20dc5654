mod errors;
mod form;
mod subscriptions;

pub use errors::SubscribeError;
pub use subscriptions::subscribe;
