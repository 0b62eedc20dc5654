use serde::Serialize;

const SUBJECT: &str = "Thank You!";

/// Thank-you email sent to a newly validated subscriber. The mailing list name
/// doubles as the sender.
#[derive(Serialize, Debug, PartialEq)]
pub struct ConfirmationMessage<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub subject: &'static str,
    pub html: String,
}

impl<'a> ConfirmationMessage<'a> {
    pub fn new(mailing_list: &'a str, recipient: &'a str) -> Self {
        Self {
            from: mailing_list,
            to: recipient,
            subject: SUBJECT,
            html: confirmation_html(mailing_list),
        }
    }
}

fn confirmation_html(mailing_list: &str) -> String {
    format!(
        "<html><body>Hello,<br><br>Thank you for subscribing to the {mailing_list} mailing list. \
        We will let you know about any updates.</body></html>"
    )
}
