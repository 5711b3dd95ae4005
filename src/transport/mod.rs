// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Publish/subscribe transport seam.
//!
//! The bridge only needs two things from the data space: publish a byte
//! payload under a key, and receive byte payloads for a key through a
//! callback. [`Transport`] captures exactly that. [`LoopbackTransport`] is
//! the in-process implementation used by the CLI and the tests; it has no
//! peers and never leaves the process.

pub mod keyexpr;
pub mod loopback;

pub use keyexpr::key_matches;
pub use loopback::LoopbackTransport;

/// Callback invoked with the raw payload of each matching sample.
///
/// Callbacks may run on a transport-owned thread.
pub type SampleCallback = Box<dyn Fn(&str, &[u8]) + Send + Sync + 'static>;

/// Handle returned by [`Transport::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

/// Errors raised by a transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The transport was closed
    #[error("transport is closed")]
    Closed,

    /// No subscription has this id
    #[error("unknown subscription {0:?}")]
    UnknownSubscription(SubscriptionId),

    /// Malformed key, or a wildcard where a concrete key is required
    #[error("invalid key expression '{0}'")]
    InvalidKey(String),

    /// Internal delivery state is unusable
    #[error("dispatch failed: {0}")]
    Dispatch(String),
}

/// A publish/subscribe data space.
pub trait Transport: Send + Sync {
    /// Publish `payload` under `key`.
    fn publish(&self, key: &str, payload: &[u8]) -> Result<(), TransportError>;

    /// Register `callback` for samples whose key matches `key_expr`.
    fn subscribe(
        &self,
        key_expr: &str,
        callback: SampleCallback,
    ) -> Result<SubscriptionId, TransportError>;

    /// Remove a subscription.
    fn unsubscribe(&self, id: SubscriptionId) -> Result<(), TransportError>;

    /// Stop accepting samples and wait for in-flight deliveries.
    fn close(&self) -> Result<(), TransportError> {
        Ok(())
    }
}
