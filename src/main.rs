//! # SWS - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor: parsea y valida la configuración,
//! selecciona el planificador y cede el control al loop de accept.

use sws::config::Config;
use sws::server::Server;

fn usage(error: &str) -> ! {
    println!("❌ {}", error);
    println!("usage: sws <port> <scheduler> <thread_count>");
    println!("   scheduler: [SJF|RR|MLQF]");
    std::process::exit(1);
}

fn main() {
    let config = Config::new();

    if let Err(e) = config.validate() {
        usage(&e);
    }

    let algorithm = match config.algorithm() {
        Some(algorithm) => algorithm,
        None => usage(&format!("Scheduler no reconocido: {}", config.scheduler)),
    };

    config.print_summary();

    let mut server = Server::new(config, algorithm);
    if let Err(e) = server.run() {
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}
