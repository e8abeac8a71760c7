//! Email outbound adapters.

mod http_email_notifier;

pub use http_email_notifier::HttpEmailNotifier;
