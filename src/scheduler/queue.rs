//! # Colas de Planificación
//! src/scheduler/queue.rs
//!
//! Implementa el almacenamiento interno de cada política detrás de un
//! contrato uniforme: `insert` coloca un RCB según el orden de la
//! política y `dequeue` retira el de mayor prioridad. Las tres políticas
//! son un conjunto cerrado, así que se representan como una variante
//! etiquetada con un `match` por operación.

use crate::scheduler::rcb::Rcb;
use crate::scheduler::SchedulingAlgorithm;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

/// Capacidad inicial del heap de SJF; crece duplicándose al llenarse
const SJF_INITIAL_CAPACITY: usize = 100;

/// Cantidad de niveles de prioridad en MLQF
const MLQF_TIERS: usize = 3;

/// Wrapper para ordenar RCBs en el heap de SJF.
///
/// `BinaryHeap` es un max-heap, así que la comparación se invierte para
/// que el archivo más corto quede en la raíz. Los empates en tamaño se
/// resuelven de forma arbitraria.
pub struct ShortestFirst(Rcb);

impl PartialEq for ShortestFirst {
    fn eq(&self, other: &Self) -> bool {
        self.0.tot_bytes() == other.0.tot_bytes()
    }
}

impl Eq for ShortestFirst {}

impl PartialOrd for ShortestFirst {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ShortestFirst {
    fn cmp(&self, other: &Self) -> Ordering {
        // Invertimos para que el heap entregue el menor tamaño primero
        other.0.tot_bytes().cmp(&self.0.tot_bytes())
    }
}

/// Almacenamiento de RCBs pendientes de la política activa.
///
/// Toda mutación ocurre con el mutex del dispatcher tomado; ninguna
/// operación bloquea ni falla para entradas admisibles en memoria.
pub enum PolicyQueue {
    /// Min-heap por tamaño total del archivo
    ShortestJobFirst(BinaryHeap<ShortestFirst>),

    /// Una única FIFO; el quantum rota los flujos no terminados
    RoundRobin(VecDeque<Rcb>),

    /// Tres FIFOs con prioridad estricta entre niveles
    MultiLevelFeedback([VecDeque<Rcb>; MLQF_TIERS]),
}

impl PolicyQueue {
    /// Crea la cola vacía que corresponde al algoritmo seleccionado
    pub fn new(algorithm: SchedulingAlgorithm) -> Self {
        match algorithm {
            SchedulingAlgorithm::ShortestJobFirst => {
                PolicyQueue::ShortestJobFirst(BinaryHeap::with_capacity(SJF_INITIAL_CAPACITY))
            }
            SchedulingAlgorithm::RoundRobin => PolicyQueue::RoundRobin(VecDeque::new()),
            SchedulingAlgorithm::MultiLevelFeedback => PolicyQueue::MultiLevelFeedback(
                [VecDeque::new(), VecDeque::new(), VecDeque::new()],
            ),
        }
    }

    /// Coloca un RCB en la estructura interna de la política.
    ///
    /// - SJF: inserción en el heap con sift-up.
    /// - RR: al final de la FIFO.
    /// - MLQF: al final de la FIFO del nivel actual del RCB.
    pub fn insert(&mut self, rcb: Rcb) {
        match self {
            PolicyQueue::ShortestJobFirst(heap) => heap.push(ShortestFirst(rcb)),
            PolicyQueue::RoundRobin(fifo) => fifo.push_back(rcb),
            PolicyQueue::MultiLevelFeedback(tiers) => {
                tiers[rcb.tier().index()].push_back(rcb);
            }
        }
    }

    /// Retira y retorna el RCB de mayor prioridad según la política.
    ///
    /// - SJF: la raíz del heap (archivo más corto).
    /// - RR: la cabeza de la FIFO.
    /// - MLQF: la cabeza de la primera FIFO no vacía, en orden de nivel.
    ///
    /// Retorna `None` únicamente cuando no hay ningún RCB encolado.
    pub fn dequeue(&mut self) -> Option<Rcb> {
        match self {
            PolicyQueue::ShortestJobFirst(heap) => heap.pop().map(|wrapped| wrapped.0),
            PolicyQueue::RoundRobin(fifo) => fifo.pop_front(),
            PolicyQueue::MultiLevelFeedback(tiers) => {
                tiers.iter_mut().find_map(|fifo| fifo.pop_front())
            }
        }
    }

    /// Cantidad total de RCBs encolados
    pub fn len(&self) -> usize {
        match self {
            PolicyQueue::ShortestJobFirst(heap) => heap.len(),
            PolicyQueue::RoundRobin(fifo) => fifo.len(),
            PolicyQueue::MultiLevelFeedback(tiers) => tiers.iter().map(VecDeque::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::rcb::test_support::rcb_with_file;
    use crate::scheduler::rcb::Tier;

    #[test]
    fn test_sjf_dequeues_shortest_first() {
        let mut queue = PolicyQueue::new(SchedulingAlgorithm::ShortestJobFirst);

        let (big, _c1, _) = rcb_with_file(1, 100_000);
        let (small, _c2, _) = rcb_with_file(2, 100);
        let (medium, _c3, _) = rcb_with_file(3, 5_000);

        queue.insert(big);
        queue.insert(small);
        queue.insert(medium);

        assert_eq!(queue.dequeue().unwrap().seq_num(), 2);
        assert_eq!(queue.dequeue().unwrap().seq_num(), 3);
        assert_eq!(queue.dequeue().unwrap().seq_num(), 1);
        assert!(queue.dequeue().is_none());
    }

    #[test]
    fn test_sjf_grows_past_initial_capacity() {
        let mut queue = PolicyQueue::new(SchedulingAlgorithm::ShortestJobFirst);
        let mut clients = Vec::new();

        for seq in 1..=120 {
            let (rcb, client, _) = rcb_with_file(seq, seq as usize);
            clients.push(client);
            queue.insert(rcb);
        }

        assert_eq!(queue.len(), 120);

        // Siguen saliendo en orden de tamaño
        let mut previous = 0;
        while let Some(rcb) = queue.dequeue() {
            assert!(rcb.tot_bytes() >= previous);
            previous = rcb.tot_bytes();
        }
    }

    #[test]
    fn test_rr_preserves_fifo_order() {
        let mut queue = PolicyQueue::new(SchedulingAlgorithm::RoundRobin);

        let (first, _c1, _) = rcb_with_file(1, 100_000);
        let (second, _c2, _) = rcb_with_file(2, 100);

        queue.insert(first);
        queue.insert(second);

        // A diferencia de SJF, el orden de llegada manda
        assert_eq!(queue.dequeue().unwrap().seq_num(), 1);
        assert_eq!(queue.dequeue().unwrap().seq_num(), 2);
    }

    #[test]
    fn test_rr_reenqueue_goes_to_tail() {
        let mut queue = PolicyQueue::new(SchedulingAlgorithm::RoundRobin);

        let (first, _c1, _) = rcb_with_file(1, 100);
        let (second, _c2, _) = rcb_with_file(2, 100);

        queue.insert(first);
        queue.insert(second);

        let unfinished = queue.dequeue().unwrap();
        assert_eq!(unfinished.seq_num(), 1);
        queue.insert(unfinished);

        // El re-encolado espera detrás del que ya estaba
        assert_eq!(queue.dequeue().unwrap().seq_num(), 2);
        assert_eq!(queue.dequeue().unwrap().seq_num(), 1);
    }

    #[test]
    fn test_mlqf_new_rcbs_enter_top_tier() {
        let mut queue = PolicyQueue::new(SchedulingAlgorithm::MultiLevelFeedback);

        let (rcb, _client, _) = rcb_with_file(1, 100_000);
        assert_eq!(rcb.tier(), Tier::Quantum8k);
        queue.insert(rcb);

        let out = queue.dequeue().unwrap();
        assert_eq!(out.tier(), Tier::Quantum8k);
    }

    #[test]
    fn test_mlqf_strict_priority_between_tiers() {
        let mut queue = PolicyQueue::new(SchedulingAlgorithm::MultiLevelFeedback);

        let (mut demoted_twice, _c1, _) = rcb_with_file(1, 100);
        demoted_twice.demote();
        demoted_twice.demote();
        assert_eq!(demoted_twice.tier(), Tier::RoundRobin);

        let (mut demoted_once, _c2, _) = rcb_with_file(2, 100);
        demoted_once.demote();

        let (fresh, _c3, _) = rcb_with_file(3, 100);

        queue.insert(demoted_twice);
        queue.insert(demoted_once);
        queue.insert(fresh);

        // Mientras haya RCBs en un nivel superior, los inferiores esperan
        assert_eq!(queue.dequeue().unwrap().seq_num(), 3);
        assert_eq!(queue.dequeue().unwrap().seq_num(), 2);
        assert_eq!(queue.dequeue().unwrap().seq_num(), 1);
    }

    #[test]
    fn test_mlqf_fifo_within_a_tier() {
        let mut queue = PolicyQueue::new(SchedulingAlgorithm::MultiLevelFeedback);

        let (first, _c1, _) = rcb_with_file(1, 100);
        let (second, _c2, _) = rcb_with_file(2, 100);

        queue.insert(first);
        queue.insert(second);

        assert_eq!(queue.dequeue().unwrap().seq_num(), 1);
        assert_eq!(queue.dequeue().unwrap().seq_num(), 2);
    }

    #[test]
    fn test_len_counts_every_tier() {
        let mut queue = PolicyQueue::new(SchedulingAlgorithm::MultiLevelFeedback);
        assert!(queue.is_empty());

        let (mut bottom, _c1, _) = rcb_with_file(1, 100);
        bottom.demote();
        bottom.demote();
        let (top, _c2, _) = rcb_with_file(2, 100);

        queue.insert(bottom);
        queue.insert(top);

        assert_eq!(queue.len(), 2);
        assert!(!queue.is_empty());
    }
}
