//! # Módulo del Servidor
//!
//! Implementa el loop de accept y el pool de workers alrededor del
//! dispatcher del planificador.

pub mod tcp;

pub use tcp::Server;
