mod log_sender;
mod twilio;

pub use log_sender::LogSmsSender;
pub use twilio::TwilioSmsSender;

use crate::config::TwilioConfig;
use crate::domain::SmsSenderPtr;
use std::sync::Arc;

/// Creates an SMS sender that only writes codes to the log.
pub fn create_log_sms() -> SmsSenderPtr {
    Arc::new(LogSmsSender)
}

/// Creates a Twilio-backed SMS sender.
pub fn create_twilio_sms(config: TwilioConfig) -> SmsSenderPtr {
    Arc::new(TwilioSmsSender::new(config))
}
