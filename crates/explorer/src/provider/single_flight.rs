//! In-flight lookup coalescing.
//!
//! Wrapping a provider in [`SingleFlight`] guarantees at most one upstream
//! lookup per identifier at any time: concurrent callers asking for the same
//! identifier share the first caller's request. Nothing is retained once
//! the request completes, so later calls always go upstream again.
//!
//! The flight table only holds weak handles. When every caller of a flight
//! has gone away (timed out or cancelled) the upstream request is dropped
//! with them and the next caller starts a fresh one.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared, WeakShared};
use log::{debug, warn};

use crate::errors::ExplorerError;
use crate::identifier::AccountIdentifier;
use crate::models::ProviderLookup;
use crate::provider::MetricProvider;

type LookupFuture = BoxFuture<'static, Result<ProviderLookup, ExplorerError>>;
type SharedLookup = Shared<LookupFuture>;

/// An in-flight lookup and the generation that created it.
struct Flight {
    generation: u64,
    lookup: WeakShared<LookupFuture>,
}

#[derive(Default)]
struct Flights {
    next_generation: u64,
    by_identifier: HashMap<AccountIdentifier, Flight>,
}

impl Flights {
    /// Drop flights nobody is waiting on anymore.
    fn prune(&mut self) {
        self.by_identifier.retain(|identifier, flight| {
            let alive = flight.lookup.upgrade().is_some();
            if !alive {
                debug!("Dropping abandoned lookup for {}", identifier);
            }
            alive
        });
    }
}

/// Provider wrapper that coalesces concurrent lookups of the same identifier.
pub struct SingleFlight<P> {
    inner: Arc<P>,
    flights: Arc<Mutex<Flights>>,
}

/// Lock the flight table, recovering from poison if necessary.
fn lock_flights(flights: &Mutex<Flights>) -> MutexGuard<'_, Flights> {
    flights.lock().unwrap_or_else(|poisoned| {
        warn!("Single-flight mutex was poisoned, recovering");
        poisoned.into_inner()
    })
}

impl<P: MetricProvider + 'static> SingleFlight<P> {
    pub fn new(inner: P) -> Self {
        Self::from_arc(Arc::new(inner))
    }

    pub fn from_arc(inner: Arc<P>) -> Self {
        Self {
            inner,
            flights: Arc::new(Mutex::new(Flights::default())),
        }
    }

    /// Number of lookups currently in flight.
    pub fn in_flight(&self) -> usize {
        let mut flights = lock_flights(&self.flights);
        flights.prune();
        flights.by_identifier.len()
    }

    /// Join the flight for `identifier`, starting one if needed.
    ///
    /// Callers hold the only strong handles. A flight whose callers all
    /// went away is dropped, and the next caller starts a new one. A
    /// completed flight removes itself from the table.
    fn join(&self, identifier: &AccountIdentifier) -> SharedLookup {
        let mut flights = lock_flights(&self.flights);
        flights.prune();

        if let Some(lookup) = flights
            .by_identifier
            .get(identifier)
            .and_then(|flight| flight.lookup.upgrade())
        {
            debug!(
                "Joining in-flight '{}' lookup for {}",
                self.inner.id(),
                identifier
            );
            return lookup;
        }

        let generation = flights.next_generation;
        flights.next_generation += 1;

        let inner = Arc::clone(&self.inner);
        let table = Arc::clone(&self.flights);
        let owned = identifier.clone();
        let lookup = async move {
            let result = inner.lookup(&owned).await;

            let mut flights = lock_flights(&table);
            if flights
                .by_identifier
                .get(&owned)
                .is_some_and(|flight| flight.generation == generation)
            {
                flights.by_identifier.remove(&owned);
            }
            result
        }
        .boxed()
        .shared();

        if let Some(weak) = lookup.downgrade() {
            flights.by_identifier.insert(
                identifier.clone(),
                Flight {
                    generation,
                    lookup: weak,
                },
            );
        }
        lookup
    }
}

#[async_trait]
impl<P: MetricProvider + 'static> MetricProvider for SingleFlight<P> {
    fn id(&self) -> &'static str {
        self.inner.id()
    }

    fn priority(&self) -> u8 {
        self.inner.priority()
    }

    fn timeout(&self) -> Option<Duration> {
        self.inner.timeout()
    }

    async fn lookup(
        &self,
        identifier: &AccountIdentifier,
    ) -> Result<ProviderLookup, ExplorerError> {
        self.join(identifier).await
    }
}
