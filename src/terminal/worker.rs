use anyhow::{Result, anyhow};
use log::debug;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use crate::api::{MailApi, Reply, Request};

/// Runs backend calls off the UI thread, one at a time, in submission order.
pub struct Worker {
    requests: Sender<Request>,
    replies: Receiver<Reply>,
}

impl Worker {
    pub fn spawn(api: Box<dyn MailApi>) -> Result<Self> {
        let (req_tx, req_rx) = mpsc::channel::<Request>();
        let (rep_tx, rep_rx) = mpsc::channel::<Reply>();

        thread::Builder::new()
            .name("webmail-worker".into())
            .spawn(move || {
                for req in req_rx {
                    debug!("worker executing {req:?}");
                    let reply = req.execute(api.as_ref());
                    if rep_tx.send(reply).is_err() {
                        break;
                    }
                }
            })?;

        Ok(Self {
            requests: req_tx,
            replies: rep_rx,
        })
    }

    pub fn submit(&self, req: Request) -> Result<()> {
        self.requests
            .send(req)
            .map_err(|_| anyhow!("request worker has stopped"))
    }

    pub fn try_recv(&self) -> Result<Option<Reply>> {
        match self.replies.try_recv() {
            Ok(r) => Ok(Some(r)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(anyhow!("request worker has stopped")),
        }
    }
}
