//! # Subsistema de Planificación
//!
//! El corazón del servidor: decide cuál petición pendiente se sirve a
//! continuación y por cuánto tiempo antes de ser interrumpida. Las tres
//! políticas comparten un mismo contrato (`insert` / `dequeue` /
//! `serve`) y se seleccionan una única vez al arrancar:
//!
//! - **SJF**: min-heap por tamaño de archivo; sirve sin preempción.
//! - **RR**: una FIFO; quantum fijo de 8 KiB y re-encolado al final.
//! - **MLQF**: tres FIFOs con prioridad estricta y descenso de nivel al
//!   agotar el quantum sin terminar.

pub mod dispatcher;
pub mod queue;
pub mod rcb;

pub use dispatcher::Dispatcher;
pub use queue::PolicyQueue;
pub use rcb::{Rcb, Tier};

/// Tamaño del buffer de I/O y unidad del quantum: un ciclo de servicio
/// transfiere a lo sumo esta cantidad de bytes
pub const MAX_HTTP_SIZE: usize = 8192;

/// Algoritmo de planificación seleccionado por línea de comandos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulingAlgorithm {
    /// Shortest Job First: minimiza el tiempo medio de respuesta cuando
    /// los tamaños se conocen de antemano
    ShortestJobFirst,

    /// Round-Robin: equidad estricta en unidades de 8 KiB
    RoundRobin,

    /// Multi-Level Queue with Feedback: aproxima SJF sin conocer los
    /// tamaños, favoreciendo los archivos cortos
    MultiLevelFeedback,
}

impl SchedulingAlgorithm {
    /// Parsea el nombre recibido por CLI.
    ///
    /// Retorna `None` si el nombre no corresponde a ninguna política;
    /// el arranque debe tratarlo como error fatal.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "SJF" => Some(SchedulingAlgorithm::ShortestJobFirst),
            "RR" => Some(SchedulingAlgorithm::RoundRobin),
            "MLQF" => Some(SchedulingAlgorithm::MultiLevelFeedback),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SchedulingAlgorithm::ShortestJobFirst => "SJF",
            SchedulingAlgorithm::RoundRobin => "RR",
            SchedulingAlgorithm::MultiLevelFeedback => "MLQF",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_known_schedulers() {
        assert_eq!(
            SchedulingAlgorithm::from_name("SJF"),
            Some(SchedulingAlgorithm::ShortestJobFirst)
        );
        assert_eq!(
            SchedulingAlgorithm::from_name("RR"),
            Some(SchedulingAlgorithm::RoundRobin)
        );
        assert_eq!(
            SchedulingAlgorithm::from_name("MLQF"),
            Some(SchedulingAlgorithm::MultiLevelFeedback)
        );
    }

    #[test]
    fn test_from_name_rejects_unknown() {
        assert_eq!(SchedulingAlgorithm::from_name("FIFO"), None);
        assert_eq!(SchedulingAlgorithm::from_name("sjf"), None);
        assert_eq!(SchedulingAlgorithm::from_name(""), None);
    }

    #[test]
    fn test_as_str_round_trips() {
        for name in ["SJF", "RR", "MLQF"] {
            let algorithm = SchedulingAlgorithm::from_name(name).unwrap();
            assert_eq!(algorithm.as_str(), name);
        }
    }
}
