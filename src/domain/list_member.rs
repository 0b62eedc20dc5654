use serde::Serialize;

/// Mailing list membership, created or updated in place.
#[derive(Serialize, Debug, PartialEq)]
pub struct ListMember<'a> {
    pub address: &'a str,
    pub subscribed: &'static str,
    pub upsert: &'static str,
}

impl<'a> ListMember<'a> {
    pub fn subscribed(address: &'a str) -> Self {
        Self {
            address,
            subscribed: "yes",
            upsert: "yes",
        }
    }
}
