use std::sync::mpsc::{self, Sender};
use std::thread;

use image::RgbaImage;
use tokio::sync::oneshot;

use crate::{Bridge, BridgeConfig, Error, Renderer, Resource, Result};

enum Command {
    Convert(
        serde_json::Value,
        Option<Resource>,
        oneshot::Sender<Result<RgbaImage>>,
    ),
    Close(oneshot::Sender<()>),
}

/// An async-friendly bridge backed by a dedicated worker thread.
///
/// The worker thread owns a synchronous [`Bridge`] and executes commands sent
/// from async tasks, so the blocking render and fetch steps never run on a
/// shared event loop. Cloning the handle shares the same worker.
#[derive(Clone)]
pub struct AsyncBridge {
    cmd_tx: Sender<Command>,
}

impl AsyncBridge {
    /// Create a new async bridge (spawns a background thread that owns the
    /// synchronous bridge).
    pub async fn new<R>(renderer: R, config: Option<BridgeConfig>) -> Result<Self>
    where
        R: Renderer + Send + 'static,
    {
        let config = config.unwrap_or_default();

        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (init_tx, init_rx): (oneshot::Sender<Result<()>>, oneshot::Receiver<Result<()>>) =
            oneshot::channel();

        thread::spawn(move || {
            // Initialize the bridge on the worker thread
            let bridge = match Bridge::with_config(renderer, config) {
                Ok(b) => b,
                Err(err) => {
                    let _ = init_tx.send(Err(err));
                    return;
                }
            };

            let _ = init_tx.send(Ok(()));

            // Command loop
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::Convert(plot, resource, resp) => {
                        let res = bridge.convert(&plot, resource.as_ref());
                        let _ = resp.send(res);
                    }
                    Command::Close(resp) => {
                        let _ = resp.send(());
                        break;
                    }
                }
            }
        });

        // Wait for the worker to report initialization success or failure
        let init_res = init_rx
            .await
            .map_err(|e| Error::Other(format!("Worker init canceled: {}", e)))?;
        init_res?;

        Ok(Self { cmd_tx })
    }

    /// Convert a plot description into a decoded image on the worker thread
    pub async fn convert(
        &self,
        plot: serde_json::Value,
        resource: Option<Resource>,
    ) -> Result<RgbaImage> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Convert(plot, resource, tx));
        rx.await
            .map_err(|e| Error::Other(format!("Convert canceled: {}", e)))?
    }

    /// Shut down the background worker
    pub async fn close(self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Close(tx));
        rx.await
            .map_err(|e| Error::Other(format!("Close canceled: {}", e)))?;
        Ok(())
    }
}
