use crossbeam_channel::{Receiver, Sender, TryRecvError};
use tracing::warn;

use crate::data::error::StorageError;
use crate::data::model::{BoxId, BoxRecord, BoxUpdate, NewBox, Warehouse};

/// Work sent from the ECS to a storage worker.
#[derive(Clone, Debug)]
pub enum StorageRequest {
    /// Fetch the hierarchy and the box list. `seq` orders the responses.
    Refresh { seq: u64 },
    CreateBox(NewBox),
    UpdateBox { id: BoxId, update: BoxUpdate },
    DeleteBox(BoxId),
}

/// Which mutation a worker finished.
#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
    Created(BoxRecord),
    Updated(BoxId),
    Deleted(BoxId),
}

/// Results flowing back from a storage worker.
#[derive(Debug)]
pub enum StorageEvent {
    Warehouse { seq: u64, warehouse: Warehouse },
    Boxes { seq: u64, boxes: Vec<BoxRecord> },
    FetchFailed { seq: u64, error: StorageError },
    Mutated(Mutation),
    MutationFailed { action: &'static str, error: StorageError },
}

/// Bevy resource pairing the request sender with the event receiver of one
/// storage worker. Systems drain events in `ingest_inventory`.
#[derive(bevy::prelude::Resource)]
pub struct InventoryChannel {
    requests: Sender<StorageRequest>,
    events: Receiver<StorageEvent>,
    next_seq: u64,
}

impl InventoryChannel {
    pub fn new(requests: Sender<StorageRequest>, events: Receiver<StorageEvent>) -> Self {
        Self {
            requests,
            events,
            next_seq: 0,
        }
    }

    /// Queues a fetch of both resources and returns its sequence number.
    pub fn refresh(&mut self) -> u64 {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.send(StorageRequest::Refresh { seq });
        seq
    }

    pub fn create_box(&self, draft: NewBox) {
        self.send(StorageRequest::CreateBox(draft));
    }

    pub fn update_box(&self, id: BoxId, update: BoxUpdate) {
        self.send(StorageRequest::UpdateBox { id, update });
    }

    pub fn delete_box(&self, id: BoxId) {
        self.send(StorageRequest::DeleteBox(id));
    }

    /// Next pending event, if any. A disconnected worker reads as empty.
    pub fn try_recv(&self) -> Option<StorageEvent> {
        match self.events.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Blocking receive with a timeout, for tests and tools.
    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<StorageEvent> {
        self.events.recv_timeout(timeout).ok()
    }

    fn send(&self, request: StorageRequest) {
        if self.requests.send(request).is_err() {
            warn!("storage: worker is gone, request dropped");
        }
    }
}

/// Runs `handle` for every request until either side hangs up.
pub(crate) fn serve_requests<F>(
    requests: Receiver<StorageRequest>,
    events: Sender<StorageEvent>,
    mut handle: F,
) where
    F: FnMut(StorageRequest) -> Vec<StorageEvent>,
{
    while let Ok(request) = requests.recv() {
        for event in handle(request) {
            if events.send(event).is_err() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_sequence_numbers_increase() {
        let (req_tx, req_rx) = crossbeam_channel::unbounded();
        let (_evt_tx, evt_rx) = crossbeam_channel::bounded(4);
        let mut channel = InventoryChannel::new(req_tx, evt_rx);

        assert_eq!(channel.refresh(), 1);
        assert_eq!(channel.refresh(), 2);

        let seqs: Vec<u64> = req_rx
            .try_iter()
            .map(|req| match req {
                StorageRequest::Refresh { seq } => seq,
                other => panic!("unexpected request {other:?}"),
            })
            .collect();
        assert_eq!(seqs, vec![1, 2]);
    }

    #[test]
    fn disconnected_worker_reads_as_empty() {
        let (req_tx, _req_rx) = crossbeam_channel::unbounded();
        let (evt_tx, evt_rx) = crossbeam_channel::bounded(4);
        drop(evt_tx);
        let channel = InventoryChannel::new(req_tx, evt_rx);
        assert!(channel.try_recv().is_none());
    }
}
