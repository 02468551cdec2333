//! # Request Control Block
//! src/scheduler/rcb.rs
//!
//! Representa una petición aceptada y parseada que espera ser servida.
//! El RCB es dueño exclusivo del socket del cliente y del archivo
//! solicitado durante toda su vida; ambos se cierran exactamente una vez
//! cuando el RCB se destruye (drop).

use crate::http::StatusCode;
use crate::scheduler::MAX_HTTP_SIZE;
use std::fs::File;
use std::io::{Read, Write};
use std::net::TcpStream;

/// Nivel de prioridad dentro del planificador MLQF.
///
/// Un RCB nuevo siempre entra en el nivel de quantum más corto. Cada vez
/// que agota su quantum sin terminar desciende un nivel; nunca vuelve a
/// subir. SJF y RR ignoran este campo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    /// Quantum de 1 ciclo de 8 KiB
    Quantum8k = 0,

    /// Quantum de 8 ciclos de 8 KiB (64 KiB)
    Quantum64k = 1,

    /// Round-robin entre los flujos de larga vida (quantum de 64 KiB)
    RoundRobin = 2,
}

impl Tier {
    /// Índice de la cola FIFO que corresponde a este nivel
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Cantidad de ciclos de lectura/escritura de 8 KiB por quantum
    pub fn quantum_cycles(&self) -> usize {
        match self {
            Tier::Quantum8k => 1,
            Tier::Quantum64k => 8,
            Tier::RoundRobin => 8,
        }
    }

    /// El nivel al que desciende un RCB que agotó su quantum.
    ///
    /// El último nivel no desciende más: ahí los flujos rotan entre sí.
    pub fn demoted(&self) -> Tier {
        match self {
            Tier::Quantum8k => Tier::Quantum64k,
            Tier::Quantum64k => Tier::RoundRobin,
            Tier::RoundRobin => Tier::RoundRobin,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Quantum8k => "8k",
            Tier::Quantum64k => "64k",
            Tier::RoundRobin => "rr",
        }
    }
}

/// Request Control Block: el estado por-petición que viaja por las colas
/// del planificador.
#[derive(Debug)]
pub struct Rcb {
    /// Identidad monótona, única durante la vida del proceso
    seq_num: u64,

    /// Socket del cliente (cerrado al destruir el RCB)
    stream: TcpStream,

    /// Path solicitado, relativo al directorio de trabajo
    path: String,

    /// Archivo abierto en modo lectura
    file: File,

    /// Tamaño total del archivo al momento de encolar
    tot_bytes: u64,

    /// Bytes ya escritos al cliente (nunca decrece)
    snt_bytes: u64,

    /// Nivel actual dentro de MLQF
    tier: Tier,
}

impl Rcb {
    pub fn new(seq_num: u64, stream: TcpStream, path: String, file: File, tot_bytes: u64) -> Self {
        Self {
            seq_num,
            stream,
            path,
            file,
            tot_bytes,
            snt_bytes: 0,
            tier: Tier::Quantum8k,
        }
    }

    pub fn seq_num(&self) -> u64 {
        self.seq_num
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn tot_bytes(&self) -> u64 {
        self.tot_bytes
    }

    pub fn snt_bytes(&self) -> u64 {
        self.snt_bytes
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Desciende el RCB un nivel de prioridad
    pub fn demote(&mut self) {
        self.tier = self.tier.demoted();
    }

    /// Verifica si ya se envió el archivo completo
    pub fn is_done(&self) -> bool {
        self.snt_bytes == self.tot_bytes
    }

    /// Escribe la línea de estado HTTP al cliente.
    ///
    /// Se invoca una única vez por RCB, antes del primer byte del
    /// archivo; las re-encoladas de RR/MLQF no deben re-emitirla.
    pub fn write_status_line(&mut self, status: StatusCode) -> std::io::Result<()> {
        self.stream.write_all(status.status_line().as_bytes())?;
        Ok(())
    }

    /// Ejecuta un ciclo de servicio: lee hasta 8 KiB del archivo y los
    /// escribe al socket del cliente.
    ///
    /// # Retorna
    ///
    /// * `Ok(n)` - Cantidad de bytes transferidos (0 en fin de archivo)
    /// * `Err(e)` - Falla de lectura del archivo o de escritura al socket
    pub fn send_chunk(&mut self, buffer: &mut [u8; MAX_HTTP_SIZE]) -> std::io::Result<usize> {
        let n = self.file.read(buffer)?;
        if n > 0 {
            self.stream.write_all(&buffer[..n])?;
            self.snt_bytes += n as u64;
        }
        Ok(n)
    }
}
