// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! In-process transport.
//!
//! Published samples go through a bounded channel to a single dispatcher
//! thread, which hands each payload to every subscriber whose key
//! expression matches. Delivery order per publisher is preserved. When the
//! queue is full the sample is dropped, matching the "drop" congestion
//! policy of a real data space.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use tracing::{debug, trace, warn};

use super::{keyexpr, SampleCallback, SubscriptionId, Transport, TransportError};

/// Default queue capacity (samples buffered before new ones are dropped).
const DEFAULT_CAPACITY: usize = 256;

struct Sample {
    key: String,
    payload: Vec<u8>,
}

struct Subscriber {
    id: SubscriptionId,
    key_expr: String,
    callback: Arc<SampleCallback>,
}

#[derive(Default)]
struct Registry {
    subscribers: Mutex<Vec<Subscriber>>,
    next_id: AtomicU64,
}

impl Registry {
    fn lock(&self) -> Result<MutexGuard<'_, Vec<Subscriber>>, TransportError> {
        self.subscribers
            .lock()
            .map_err(|_| TransportError::Dispatch("subscriber table poisoned".to_string()))
    }

    /// Snapshot the callbacks for `key` so none run under the lock.
    fn matching(&self, key: &str) -> Vec<Arc<SampleCallback>> {
        match self.subscribers.lock() {
            Ok(subscribers) => subscribers
                .iter()
                .filter(|s| keyexpr::key_matches(&s.key_expr, key))
                .map(|s| Arc::clone(&s.callback))
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// In-process [`Transport`] with a background dispatcher.
pub struct LoopbackTransport {
    sender: Mutex<Option<Sender<Sample>>>,
    registry: Arc<Registry>,
    dispatcher: Mutex<Option<JoinHandle<()>>>,
}

impl LoopbackTransport {
    /// Create a transport with the default queue capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a transport whose queue holds `capacity` samples.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity.max(1));
        let registry = Arc::new(Registry::default());
        let dispatcher = {
            let registry = Arc::clone(&registry);
            std::thread::Builder::new()
                .name("loopback-dispatch".to_string())
                .spawn(move || dispatch(receiver, registry))
                .ok()
        };
        if dispatcher.is_none() {
            warn!("failed to spawn loopback dispatcher thread");
        }

        Self {
            sender: Mutex::new(Some(sender)),
            registry,
            dispatcher: Mutex::new(dispatcher),
        }
    }

    fn shutdown(&self) {
        if let Ok(mut sender) = self.sender.lock() {
            sender.take();
        }
        let handle = match self.dispatcher.lock() {
            Ok(mut dispatcher) => dispatcher.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(handle) = handle {
            if handle.join().is_err() {
                warn!("loopback dispatcher panicked");
            }
        }
    }
}

impl Default for LoopbackTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LoopbackTransport {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn dispatch(receiver: Receiver<Sample>, registry: Arc<Registry>) {
    for sample in receiver.iter() {
        let callbacks = registry.matching(&sample.key);
        trace!(
            key = %sample.key,
            bytes = sample.payload.len(),
            subscribers = callbacks.len(),
            "dispatching sample"
        );
        for callback in callbacks {
            callback(&sample.key, &sample.payload);
        }
    }
    debug!("loopback dispatcher stopped");
}

impl Transport for LoopbackTransport {
    fn publish(&self, key: &str, payload: &[u8]) -> Result<(), TransportError> {
        if !keyexpr::is_valid(key) || key.contains('*') {
            return Err(TransportError::InvalidKey(key.to_string()));
        }
        let sender = self
            .sender
            .lock()
            .map_err(|_| TransportError::Dispatch("sender poisoned".to_string()))?
            .clone()
            .ok_or(TransportError::Closed)?;

        let sample = Sample {
            key: key.to_string(),
            payload: payload.to_vec(),
        };
        match sender.try_send(sample) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(sample)) => {
                warn!(key = %sample.key, "loopback queue full, dropping sample");
                Ok(())
            }
            Err(TrySendError::Disconnected(_)) => Err(TransportError::Closed),
        }
    }

    fn subscribe(
        &self,
        key_expr: &str,
        callback: SampleCallback,
    ) -> Result<SubscriptionId, TransportError> {
        if !keyexpr::is_valid(key_expr) {
            return Err(TransportError::InvalidKey(key_expr.to_string()));
        }
        let id = SubscriptionId(self.registry.next_id.fetch_add(1, Ordering::Relaxed));
        self.registry.lock()?.push(Subscriber {
            id,
            key_expr: key_expr.to_string(),
            callback: Arc::new(callback),
        });
        debug!(key_expr, id = id.0, "subscribed");
        Ok(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> Result<(), TransportError> {
        let mut subscribers = self.registry.lock()?;
        let before = subscribers.len();
        subscribers.retain(|s| s.id != id);
        if subscribers.len() == before {
            return Err(TransportError::UnknownSubscription(id));
        }
        Ok(())
    }

    fn close(&self) -> Result<(), TransportError> {
        self.shutdown();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const WAIT: Duration = Duration::from_secs(5);

    fn forwarding(tx: Sender<(String, Vec<u8>)>) -> SampleCallback {
        Box::new(move |key, payload| {
            let _ = tx.send((key.to_string(), payload.to_vec()));
        })
    }

    #[test]
    fn test_publish_reaches_matching_subscriber() {
        let transport = LoopbackTransport::new();
        let (tx, rx) = crossbeam_channel::unbounded();
        transport.subscribe("/rt/rosout", forwarding(tx)).unwrap();

        transport.publish("/rt/other", b"ignored").unwrap();
        transport.publish("/rt/rosout", b"hello").unwrap();

        let (key, payload) = rx.recv_timeout(WAIT).unwrap();
        assert_eq!(key, "/rt/rosout");
        assert_eq!(payload, b"hello");
    }

    #[test]
    fn test_wildcard_subscription() {
        let transport = LoopbackTransport::new();
        let (tx, rx) = crossbeam_channel::unbounded();
        transport.subscribe("/rt/**", forwarding(tx)).unwrap();

        transport.publish("/rt/turtle1/cmd_vel", &[1, 2, 3]).unwrap();
        let (key, _) = rx.recv_timeout(WAIT).unwrap();
        assert_eq!(key, "/rt/turtle1/cmd_vel");
    }

    #[test]
    fn test_order_preserved() {
        let transport = LoopbackTransport::new();
        let (tx, rx) = crossbeam_channel::unbounded();
        transport.subscribe("/k", forwarding(tx)).unwrap();
        for i in 0..10u8 {
            transport.publish("/k", &[i]).unwrap();
        }
        for i in 0..10u8 {
            assert_eq!(rx.recv_timeout(WAIT).unwrap().1, vec![i]);
        }
    }

    #[test]
    fn test_unsubscribe() {
        let transport = LoopbackTransport::new();
        let (tx, rx) = crossbeam_channel::unbounded();
        let id = transport.subscribe("/k", forwarding(tx)).unwrap();
        transport.unsubscribe(id).unwrap();
        assert!(matches!(
            transport.unsubscribe(id),
            Err(TransportError::UnknownSubscription(_))
        ));

        transport.publish("/k", b"x").unwrap();
        transport.close().unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_close_drains_then_rejects() {
        let transport = LoopbackTransport::new();
        let (tx, rx) = crossbeam_channel::unbounded();
        transport.subscribe("/k", forwarding(tx)).unwrap();
        transport.publish("/k", b"last").unwrap();
        transport.close().unwrap();

        assert_eq!(rx.try_recv().unwrap().1, b"last");
        assert!(matches!(
            transport.publish("/k", b"late"),
            Err(TransportError::Closed)
        ));
    }

    #[test]
    fn test_invalid_keys() {
        let transport = LoopbackTransport::new();
        assert!(matches!(
            transport.publish("/rt/*", b"x"),
            Err(TransportError::InvalidKey(_))
        ));
        assert!(matches!(
            transport.subscribe("", Box::new(|_, _| {})),
            Err(TransportError::InvalidKey(_))
        ));
    }
}
