//! # SWS - Static Web Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo de archivos estáticos cuyo núcleo es un
//! planificador de requests intercambiable: ante muchos GETs
//! simultáneos decide cuál petición pendiente se sirve a continuación y
//! por cuánto tiempo antes de ser interrumpida.
//!
//! ## Arquitectura
//!
//! - `http`: fracción mínima del protocolo (request line y líneas de estado)
//! - `scheduler`: el núcleo: RCB, colas por política (SJF/RR/MLQF) y el
//!   dispatcher productor/consumidor sobre mutex + condition variable
//! - `server`: loop de accept y pool de worker threads
//! - `config`: argumentos CLI y validación de arranque
//!
//! ## Ejemplo de uso
//!
//! ```ignore
//! use sws::config::Config;
//! use sws::server::Server;
//!
//! let config = Config::new();
//! let algorithm = config.algorithm().expect("scheduler válido");
//! let mut server = Server::new(config, algorithm);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod http;
pub mod scheduler;
pub mod server;
