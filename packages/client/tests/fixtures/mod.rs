//! Test fixtures: an in-process relay server on an ephemeral port.

use std::{net::SocketAddr, time::Duration};

use parley_client::TransportOptions;
use tokio::{net::TcpListener, task::JoinHandle};

pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let handle = tokio::spawn(async move {
            parley_server::serve(listener, std::future::pending())
                .await
                .expect("Test server failed");
        });
        Self { addr, handle }
    }

    pub fn transport_options(&self) -> TransportOptions {
        TransportOptions {
            url: format!("ws://{}/ws", self.addr),
            reconnect_delay: Duration::from_millis(50),
            max_reconnect_attempts: Some(20),
            ..TransportOptions::default()
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
