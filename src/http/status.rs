//! # Códigos de Estado HTTP
//!
//! El servidor responde con un conjunto mínimo de códigos. La línea de
//! estado es el único encabezado del protocolo: no hay Content-Length ni
//! ningún otro header, y el cierre del socket delimita la respuesta.

/// Códigos de estado que el servidor puede emitir
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK - El archivo existe y se sirve a continuación
    Ok = 200,

    /// 400 Bad request - Request no parseable como `GET <path>`
    BadRequest = 400,

    /// 404 File not found - El path no corresponde a un archivo abrible
    NotFound = 404,
}

impl StatusCode {
    /// Convierte el código a su valor numérico
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Texto de razón que acompaña al código en la línea de estado
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad request",
            StatusCode::NotFound => "File not found",
        }
    }

    /// Línea de estado completa, byte a byte como viaja por el socket.
    ///
    /// El doble `\n` separa la línea del contenido del archivo (si lo
    /// hay); no se emite ningún header.
    pub fn status_line(&self) -> &'static str {
        match self {
            StatusCode::Ok => "HTTP/1.1 200 OK\n\n",
            StatusCode::BadRequest => "HTTP/1.1 400 Bad request\n\n",
            StatusCode::NotFound => "HTTP/1.1 404 File not found\n\n",
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}
