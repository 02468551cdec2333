//! # Configuración del Servidor
//! src/config.rs
//!
//! Define la configuración del servidor y su parsing desde la línea de
//! comandos:
//!
//! ```bash
//! ./sws 8080 SJF 4
//! ```
//!
//! Los tres argumentos son posicionales y obligatorios. Un argumento
//! faltante o malformado termina el proceso con estado distinto de cero
//! antes de aceptar conexiones.

use crate::scheduler::SchedulingAlgorithm;
use clap::Parser;

/// Configuración del servidor web estático
#[derive(Debug, Clone, Parser)]
#[command(name = "sws")]
#[command(about = "Servidor web estático con planificador de requests configurable")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    pub port: u16,

    /// Algoritmo de planificación: SJF, RR o MLQF
    pub scheduler: String,

    /// Número de worker threads que sirven requests
    pub threads: usize,
}

impl Config {
    /// Crea la configuración parseando los argumentos CLI.
    ///
    /// Un argumento faltante o malformado imprime el error y el modo de
    /// uso por salida estándar y termina con estado distinto de cero.
    pub fn new() -> Self {
        match Config::try_parse() {
            Ok(config) => config,
            Err(e) => {
                println!("{}", e);
                println!("usage: sws <port> <scheduler> <thread_count>");
                println!("   scheduler: [SJF|RR|MLQF]");
                std::process::exit(1);
            }
        }
    }

    /// Dirección completa para bind
    ///
    /// # Ejemplo
    /// ```
    /// use clap::Parser;
    /// use sws::config::Config;
    ///
    /// let config = Config::parse_from(["sws", "8080", "SJF", "4"]);
    /// assert_eq!(config.address(), "0.0.0.0:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Algoritmo de planificación seleccionado, si el nombre es válido
    pub fn algorithm(&self) -> Option<SchedulingAlgorithm> {
        SchedulingAlgorithm::from_name(&self.scheduler)
    }

    /// Valida la configuración antes de arrancar.
    ///
    /// Cualquier error acá es fatal: el servidor no debe aceptar
    /// conexiones con una configuración inválida.
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Port must be a positive integer".to_string());
        }

        if self.threads == 0 {
            return Err("Thread count must be >= 1".to_string());
        }

        if self.algorithm().is_none() {
            return Err(format!(
                "Unknown scheduler '{}' (expected SJF, RR or MLQF)",
                self.scheduler
            ));
        }

        Ok(())
    }

    /// Imprime un resumen de la configuración al arrancar
    pub fn print_summary(&self) {
        println!("╔══════════════════════════════════════╗");
        println!("║        SWS Server Configuration      ║");
        println!("╚══════════════════════════════════════╝");
        println!();
        println!("🌐 Address:    {}", self.address());
        println!("📋 Scheduler:  {}", self.scheduler);
        println!("👷 Workers:    {}", self.threads);
        println!();
    }
}
