use rocket::fairing::{Fairing, Info, Kind};
use rocket::{Orbit, Rocket};
use tokio::sync::watch;

/// Returns a fairing that publishes the port Rocket actually bound to, and the
/// handle that reads it. Needed when the server is configured with port `0`.
pub fn bound_port_pair() -> (PortReporter, BoundPort) {
    let (tx, rx) = watch::channel(None);
    (PortReporter { sender: tx }, BoundPort { receiver: rx })
}

pub struct BoundPort {
    receiver: watch::Receiver<Option<u16>>,
}

impl BoundPort {
    /// Waits for liftoff. Returns `None` if the server was dropped before it
    /// ever bound a port.
    pub async fn get(&self) -> Option<u16> {
        let mut receiver = self.receiver.clone();
        loop {
            if let Some(port) = *receiver.borrow() {
                return Some(port);
            }
            if receiver.changed().await.is_err() {
                return *receiver.borrow();
            }
        }
    }
}

pub struct PortReporter {
    sender: watch::Sender<Option<u16>>,
}

#[rocket::async_trait]
impl Fairing for PortReporter {
    fn info(&self) -> Info {
        Info {
            name: "Bound Port Reporter",
            kind: Kind::Liftoff,
        }
    }

    async fn on_liftoff(&self, rocket: &Rocket<Orbit>) {
        let port = rocket.config().port;
        tracing::info!(port, "Server is listening");
        if self.sender.send(Some(port)).is_err() {
            tracing::debug!("Nobody is waiting for the bound port");
        }
    }
}
