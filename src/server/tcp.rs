//! # Servidor TCP
//! src/server/tcp.rs
//!
//! Arma las piezas: un hilo de accept (el productor) que encola cada
//! conexión en el dispatcher, y un pool de N workers (los consumidores)
//! que desencolan y sirven. Los workers no terminan por sí solos; el
//! proceso muere por señal externa.

use crate::config::Config;
use crate::http::StatusCode;
use crate::scheduler::{Dispatcher, SchedulingAlgorithm, MAX_HTTP_SIZE};
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::thread;

/// Servidor web estático con planificador de requests
pub struct Server {
    config: Config,
    dispatcher: Arc<Dispatcher>,
    listener: Option<TcpListener>,
}

impl Server {
    pub fn new(config: Config, algorithm: SchedulingAlgorithm) -> Self {
        Self {
            config,
            dispatcher: Arc::new(Dispatcher::new(algorithm)),
            listener: None,
        }
    }

    /// Abre el socket de escucha sin empezar a aceptar conexiones.
    ///
    /// Separado de `run` para poder conocer el puerto efectivo cuando se
    /// configura el puerto 0 (efímero).
    pub fn bind(&mut self) -> std::io::Result<SocketAddr> {
        let listener = TcpListener::bind(self.config.address())?;
        let addr = listener.local_addr()?;
        self.listener = Some(listener);
        Ok(addr)
    }

    /// Arranca los workers y entra al loop de accept.
    ///
    /// Solo retorna con error; los fallos de arranque (bind o creación
    /// de threads) son fatales para el proceso.
    pub fn run(&mut self) -> std::io::Result<()> {
        if self.listener.is_none() {
            self.bind()?;
        }

        self.spawn_workers()?;

        let listener = self.listener.as_ref().unwrap();
        println!(
            "[+] Servidor escuchando en {} (scheduler: {}, workers: {})",
            listener.local_addr()?,
            self.dispatcher.algorithm().as_str(),
            self.config.threads
        );

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => self.dispatcher.submit(stream),
                Err(e) => eprintln!("   ❌ Error al aceptar conexión: {}", e),
            }
        }

        Ok(())
    }

    /// Lanza los N worker threads del pool
    fn spawn_workers(&self) -> std::io::Result<()> {
        for i in 0..self.config.threads {
            let dispatcher = Arc::clone(&self.dispatcher);

            thread::Builder::new()
                .name(format!("worker-{}", i))
                .spawn(move || worker_loop(dispatcher))?;
        }

        Ok(())
    }
}

/// Loop de un worker: desencolar, emitir la línea de estado, servir.
///
/// El buffer de 8 KiB vive en el stack del worker; nunca se comparte
/// entre threads. La línea `200 OK` se emite una sola vez por RCB: las
/// re-encoladas de RR/MLQF vuelven con `snt_bytes > 0` y la saltan.
fn worker_loop(dispatcher: Arc<Dispatcher>) {
    let mut buffer = [0u8; MAX_HTTP_SIZE];

    loop {
        let mut rcb = dispatcher.next();

        if rcb.snt_bytes() == 0 {
            if let Err(e) = rcb.write_status_line(StatusCode::Ok) {
                eprintln!("   ❌ Request <{}> aborted: {}", rcb.seq_num(), e);
                continue; // el drop del RCB cierra socket y archivo
            }
        }

        dispatcher.serve(rcb, &mut buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpStream;

    fn test_config(threads: usize) -> Config {
        Config {
            port: 0, // puerto efímero
            scheduler: "RR".to_string(),
            threads,
        }
    }

    #[test]
    fn test_bind_reports_ephemeral_port() {
        let mut server = Server::new(test_config(1), SchedulingAlgorithm::RoundRobin);
        let addr = server.bind().expect("bind");
        assert_ne!(addr.port(), 0);
    }

    #[test]
    fn test_server_serves_a_file_end_to_end() {
        std::fs::create_dir_all("target/sws-test-data").expect("create data dir");
        let contents: Vec<u8> = (0..12_000).map(|i| (i % 240) as u8).collect();
        let local = format!("target/sws-test-data/tcp-smoke-{}", std::process::id());
        std::fs::write(&local, &contents).expect("write file");

        let mut server = Server::new(test_config(2), SchedulingAlgorithm::RoundRobin);
        let addr = server.bind().expect("bind");
        thread::spawn(move || {
            let _ = server.run();
        });

        let mut client = TcpStream::connect(("127.0.0.1", addr.port())).expect("connect");
        client
            .write_all(format!("GET /{} HTTP/1.1\r\n\r\n", local).as_bytes())
            .unwrap();

        let mut response = Vec::new();
        client.read_to_end(&mut response).unwrap();

        let header = b"HTTP/1.1 200 OK\n\n";
        assert_eq!(&response[..header.len()], header);
        assert_eq!(&response[header.len()..], &contents[..]);
    }
}
