//! # Módulo HTTP
//!
//! Implementa la fracción mínima de HTTP/1.1 que el servidor necesita:
//! parsear la request line de un GET y emitir una de tres líneas de
//! estado. No hay headers, ni Content-Length, ni conexiones
//! persistentes: el socket se cierra después del último byte.

pub mod request;
pub mod status;

pub use request::{ParseError, Request};
pub use status::StatusCode;
