pub mod request_logger;
pub mod webhook_signature;
