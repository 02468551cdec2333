//! # Dispatcher del Planificador
//! src/scheduler/dispatcher.rs
//!
//! Coordina al productor (el hilo de accept) con los consumidores (los
//! workers) alrededor de la política activa. Un único mutex protege todo
//! el estado de colas; una condition variable despierta a los workers
//! cuando el productor encola.
//!
//! Disciplina de locking: `insert` y `dequeue` corren con el mutex
//! tomado; `serve` corre sin él, porque el I/O domina el costo y debe
//! poder paralelizarse entre workers. El camino de re-encolado vuelve a
//! tomar el mutex y señala la condición.

use crate::http::{Request, StatusCode};
use crate::scheduler::queue::PolicyQueue;
use crate::scheduler::rcb::Rcb;
use crate::scheduler::{SchedulingAlgorithm, MAX_HTTP_SIZE};
use std::fs::File;
use std::io::{Read, Write};
use std::net::TcpStream;
use std::sync::{Condvar, Mutex};

/// Estado compartido protegido por el mutex del dispatcher
struct SchedulerState {
    /// Cola(s) de la política activa
    queue: PolicyQueue,

    /// Siguiente número de secuencia a asignar (arranca en 1)
    next_seq: u64,
}

/// Punto de encuentro entre el accept loop y el pool de workers
pub struct Dispatcher {
    state: Mutex<SchedulerState>,
    ready: Condvar,
    algorithm: SchedulingAlgorithm,
}

impl Dispatcher {
    /// Crea un dispatcher con la política seleccionada y sin RCBs
    pub fn new(algorithm: SchedulingAlgorithm) -> Self {
        Self {
            state: Mutex::new(SchedulerState {
                queue: PolicyQueue::new(algorithm),
                next_seq: 1,
            }),
            ready: Condvar::new(),
            algorithm,
        }
    }

    pub fn algorithm(&self) -> SchedulingAlgorithm {
        self.algorithm
    }

    /// Cantidad de RCBs actualmente encolados
    pub fn queued(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.queue.len()
    }

    /// Recibe una conexión aceptada: lee y valida el request, abre el
    /// archivo y encola el RCB resultante.
    ///
    /// Los errores por-petición se responden y descartan acá mismo; el
    /// servidor nunca termina por una petición inválida:
    /// - request no parseable: `400 Bad request` y cierre del socket
    /// - archivo inexistente o no abrible: `404 File not found` y cierre
    /// - el peer cerró sin enviar nada: se registra y se descarta
    pub fn submit(&self, mut stream: TcpStream) {
        let mut buffer = [0u8; MAX_HTTP_SIZE];

        let bytes_read = match stream.read(&mut buffer) {
            Ok(n) => n,
            Err(e) => {
                eprintln!("   ❌ Error while reading request: {}", e);
                return;
            }
        };

        if bytes_read == 0 {
            // El cliente conectó y cerró sin mandar datos
            eprintln!("   ⚠️  Conexión cerrada sin request");
            return;
        }

        let request = match Request::parse(&buffer[..bytes_read]) {
            Ok(request) => request,
            Err(e) => {
                Self::reply_and_close(stream, StatusCode::BadRequest, &e);
                return;
            }
        };

        // El path se usa tal cual, relativo al directorio de trabajo
        let file = match File::open(request.file_path()) {
            Ok(file) => file,
            Err(e) => {
                Self::reply_and_close(stream, StatusCode::NotFound, &e);
                return;
            }
        };

        let tot_bytes = match file.metadata() {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                Self::reply_and_close(stream, StatusCode::NotFound, &e);
                return;
            }
        };

        // seq_num se asigna bajo el mutex: totalmente ordenado y monótono
        let mut state = self.state.lock().unwrap();
        let seq_num = state.next_seq;
        state.next_seq += 1;

        let rcb = Rcb::new(
            seq_num,
            stream,
            request.file_path().to_string(),
            file,
            tot_bytes,
        );
        state.queue.insert(rcb);

        self.ready.notify_one();
    }

    /// Retira el siguiente RCB según la política activa.
    ///
    /// Bloquea en la condition variable mientras todas las colas estén
    /// vacías, re-verificando el predicado en cada despertar (los
    /// despertares espurios se toleran). Retorna con el mutex liberado.
    pub fn next(&self) -> Rcb {
        let mut state = self.state.lock().unwrap();

        loop {
            if let Some(rcb) = state.queue.dequeue() {
                return rcb;
            }

            state = self.ready.wait(state).unwrap();
        }
    }

    /// Devuelve a la cola un RCB que no terminó su quantum.
    ///
    /// Se invoca desde `serve`, que corre sin el mutex; acá se vuelve a
    /// tomar y se señala la condición para el próximo worker.
    fn reinsert(&self, rcb: Rcb) {
        let mut state = self.state.lock().unwrap();
        state.queue.insert(rcb);
        self.ready.notify_one();
    }

    /// Ejecuta una unidad de planificación sobre el RCB, según la
    /// política activa. Corre sin el mutex tomado.
    pub fn serve(&self, rcb: Rcb, buffer: &mut [u8; MAX_HTTP_SIZE]) {
        match self.algorithm {
            SchedulingAlgorithm::ShortestJobFirst => Self::serve_to_completion(rcb, buffer),
            SchedulingAlgorithm::RoundRobin => self.serve_round_robin(rcb, buffer),
            SchedulingAlgorithm::MultiLevelFeedback => self.serve_multilevel(rcb, buffer),
        }
    }

    /// SJF: sirve el archivo completo sin preempción.
    ///
    /// La clave del heap (el tamaño) nunca cambia, así que interrumpir
    /// no aporta nada: el RCB corre hasta terminar o fallar.
    fn serve_to_completion(mut rcb: Rcb, buffer: &mut [u8; MAX_HTTP_SIZE]) {
        while !rcb.is_done() {
            match rcb.send_chunk(buffer) {
                Ok(0) => {
                    // El archivo se achicó desde el stat inicial
                    eprintln!(
                        "   ❌ Request <{}> aborted: file truncated mid-stream",
                        rcb.seq_num()
                    );
                    return;
                }
                Ok(_) => {}
                Err(e) => {
                    eprintln!("   ❌ Request <{}> aborted: {}", rcb.seq_num(), e);
                    return;
                }
            }
        }

        println!("Request <{}> completed", rcb.seq_num());
    }

    /// RR: un quantum = un ciclo de 8 KiB; si no terminó vuelve al final
    /// de la FIFO.
    fn serve_round_robin(&self, mut rcb: Rcb, buffer: &mut [u8; MAX_HTTP_SIZE]) {
        if !rcb.is_done() {
            match rcb.send_chunk(buffer) {
                Ok(0) => {
                    eprintln!(
                        "   ❌ Request <{}> aborted: file truncated mid-stream",
                        rcb.seq_num()
                    );
                    return;
                }
                Ok(_) => {}
                Err(e) => {
                    eprintln!("   ❌ Request <{}> aborted: {}", rcb.seq_num(), e);
                    return;
                }
            }
        }

        if rcb.is_done() {
            println!("Request <{}> completed", rcb.seq_num());
        } else {
            self.reinsert(rcb);
        }
    }

    /// MLQF: quantum del nivel actual (1 u 8 ciclos de 8 KiB); si no
    /// terminó, desciende un nivel y vuelve a encolarse.
    ///
    /// El quantum cuenta ciclos intentados, no bytes efectivos; un read
    /// corto que completa el archivo sale del loop de inmediato.
    fn serve_multilevel(&self, mut rcb: Rcb, buffer: &mut [u8; MAX_HTTP_SIZE]) {
        for _ in 0..rcb.tier().quantum_cycles() {
            if rcb.is_done() {
                break;
            }

            match rcb.send_chunk(buffer) {
                Ok(0) => {
                    eprintln!(
                        "   ❌ Request <{}> aborted: file truncated mid-stream",
                        rcb.seq_num()
                    );
                    return;
                }
                Ok(_) => {}
                Err(e) => {
                    eprintln!("   ❌ Request <{}> aborted: {}", rcb.seq_num(), e);
                    return;
                }
            }
        }

        if rcb.is_done() {
            println!("Request <{}> completed", rcb.seq_num());
        } else {
            rcb.demote();
            self.reinsert(rcb);
        }
    }

    /// Responde una línea de estado de error y cierra la conexión.
    ///
    /// Si la escritura falla el cliente ya se fue; solo se registra.
    fn reply_and_close(mut stream: TcpStream, status: StatusCode, cause: &dyn std::fmt::Display) {
        eprintln!("   ❌ {}: {}", status, cause);
        if let Err(e) = stream.write_all(status.status_line().as_bytes()) {
            eprintln!("   ❌ Error while replying {}: {}", status.as_u16(), e);
        }
        // El drop de `stream` cierra el socket
    }
}
