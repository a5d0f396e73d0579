pub mod logging;
pub mod request_log;
