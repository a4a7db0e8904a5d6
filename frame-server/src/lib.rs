// Library exports for frame-server
pub mod config;
pub mod server;
