use chrono::Local;
use hyper::{Method, Uri};
use std::net::SocketAddr;

use crate::config::Config;

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("Customer API server started");
    println!("Listening on: http://{addr}");
    println!("Log level: {}", config.logging.level);
    println!("Max body size: {} bytes", config.http.max_body_size);
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    if let Some(max) = config.performance.max_connections {
        println!("Max connections: {max}");
    }
    println!("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[Error] Failed to serve connection: {err:?}");
}

pub fn log_request(method: &Method, uri: &Uri, status: u16) {
    let time = Local::now().format("%Y-%m-%d %H:%M:%S");
    println!("[Request] {time} {method} {} - {status}", uri.path());
}

pub fn log_warning(message: &str) {
    eprintln!("[Warning] {message}");
}

pub fn log_error(message: &str) {
    eprintln!("[Error] {message}");
}
