pub mod auth;
pub mod client_ip;
pub mod error_handling;
pub mod extract;
