pub mod relay;
pub mod response;
pub mod server;
