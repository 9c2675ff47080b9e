pub mod mailchimp;
pub mod mailgun;

pub use mailchimp::MailchimpMailingList;
pub use mailgun::MailgunMailer;
