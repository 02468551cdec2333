//! # Parsing de Requests
//! src/http/request.rs
//!
//! Parser mínimo de la request line: solo importan el método y el primer
//! token después de él. Cualquier desviación se responde con `400`.
//!
//! ```text
//! GET /index.html HTTP/1.1\r\n
//! ...headers ignorados...
//! ```

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Request vacío o solo espacios
    EmptyRequest,

    /// La request line no tiene la forma `GET <path> ...`
    InvalidRequestLine,

    /// El método no es GET
    UnsupportedMethod(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyRequest => write!(f, "Empty request"),
            ParseError::InvalidRequestLine => write!(f, "Invalid request line format"),
            ParseError::UnsupportedMethod(m) => write!(f, "Unsupported HTTP method: {}", m),
        }
    }
}

impl std::error::Error for ParseError {}

/// Un GET validado: lo único que el planificador necesita es el path
#[derive(Debug, Clone)]
pub struct Request {
    path: String,
}

impl Request {
    /// Parsea un request desde los bytes leídos del socket.
    ///
    /// Separa la primera línea por espacios en blanco y valida
    /// `GET <path>`; la versión HTTP y los headers se ignoran.
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use sws::http::Request;
    ///
    /// let raw = b"GET /index.html HTTP/1.1\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.path(), "/index.html");
    /// assert_eq!(request.file_path(), "index.html");
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let request_str =
            std::str::from_utf8(buffer).map_err(|_| ParseError::InvalidRequestLine)?;

        if request_str.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        // Solo interesa la primera línea
        let line = request_str.lines().next().unwrap_or("");
        let mut parts = line.split_whitespace();

        let method = parts.next().ok_or(ParseError::InvalidRequestLine)?;
        if method != "GET" {
            return Err(ParseError::UnsupportedMethod(method.to_string()));
        }

        let path = parts.next().ok_or(ParseError::InvalidRequestLine)?;

        Ok(Request {
            path: path.to_string(),
        })
    }

    /// Path tal como llegó en el request
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path listo para abrir: sin el `/` inicial, relativo al directorio
    /// de trabajo del servidor
    pub fn file_path(&self) -> &str {
        self.path.strip_prefix('/').unwrap_or(&self.path)
    }
}
