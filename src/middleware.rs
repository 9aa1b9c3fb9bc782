pub mod request_timeout;
