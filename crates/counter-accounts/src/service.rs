//! # Counter Service
//!
//! Application service implementing [`CounterApi`]. It owns the outbound
//! adapters and runs each request as a single sequence against one record:
//!
//! 1. **Initialize**: verify the target is the requester's derived address,
//!    then create (allocation fails if the record exists).
//! 2. **Increment / Reset**: fetch, verify the target is the stored owner's
//!    derived address, authorize, transition, then a compare-and-write
//!    against the fetched bytes. If another request committed in between,
//!    the whole sequence runs again on the new record.
//!
//! A failure at any step returns before the write, so the stored record is
//! either fully updated or untouched. A rejected request is never retried;
//! only a lost compare-and-write race re-runs the sequence.

use crate::domain::{
    authorize, transitions, Address, AddressDeriver, CounterConfig, CounterError, CounterRecord,
    ErrorKind, LedgerError, Mutation, Operation, Pubkey,
};
use crate::events::{
    CounterEvent, CounterIncrementedPayload, CounterInitializedPayload, CounterResetPayload,
};
use crate::lifecycle::{AccountLifecycleManager, RecordHandle};
use crate::ports::{Clock, CounterApi, EventSink, Ledger};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// Statistics for the counter service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Records created.
    pub initialized: u64,
    /// Successful increments.
    pub incremented: u64,
    /// Successful resets.
    pub reset: u64,
    /// Rejected requests of any operation, Initialize included.
    pub rejected: u64,
    /// Rejections broken down by kind.
    pub rejected_by_kind: HashMap<ErrorKind, u64>,
}

impl ServiceStats {
    /// Rejections of one kind.
    pub fn rejections(&self, kind: ErrorKind) -> u64 {
        self.rejected_by_kind.get(&kind).copied().unwrap_or(0)
    }
}

/// The counter service.
pub struct CounterService<L: Ledger, C: Clock, E: EventSink> {
    config: CounterConfig,
    deriver: AddressDeriver,
    ledger: L,
    clock: C,
    events: E,
    stats: Mutex<ServiceStats>,
}

impl<L: Ledger, C: Clock, E: EventSink> CounterService<L, C, E> {
    /// Create a new counter service.
    ///
    /// # Errors
    ///
    /// `InvalidNamespace` if the configured namespace tag is unusable.
    pub fn new(config: CounterConfig, ledger: L, clock: C, events: E) -> Result<Self, CounterError> {
        config.validate()?;
        let deriver = AddressDeriver::new(config.program_id);

        let program_id = hex::encode(config.program_id);
        let namespace = String::from_utf8_lossy(&config.namespace);
        info!(%program_id, %namespace, "Counter service ready");

        Ok(Self {
            config,
            deriver,
            ledger,
            clock,
            events,
            stats: Mutex::new(ServiceStats::default()),
        })
    }

    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    pub fn deriver(&self) -> &AddressDeriver {
        &self.deriver
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Get current service statistics.
    pub fn stats(&self) -> ServiceStats {
        self.stats.lock().clone()
    }

    fn lifecycle(&self) -> AccountLifecycleManager<'_, L> {
        AccountLifecycleManager::new(&self.ledger)
    }

    fn mutate(
        &self,
        mutation: Mutation,
        requester: &Pubkey,
        target: &Address,
    ) -> Result<(RecordHandle, RecordHandle), CounterError> {
        let lifecycle = self.lifecycle();

        loop {
            let current = lifecycle.fetch(target)?;
            self.deriver
                .verify(&self.config.namespace, &current.record.owner, target)?;
            authorize(requester, &current.record)?;

            let next = transitions::apply(mutation, &current.record)?;
            match lifecycle.commit(&current, next) {
                Ok(committed) => return Ok((current, committed)),
                // Another request committed first; re-run against its result
                Err(CounterError::Ledger(LedgerError::Conflict { .. })) => {
                    debug!(target = %target, "Counter changed concurrently, re-reading");
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn emit(&self, event: CounterEvent) {
        if let Err(e) = self.events.publish(event) {
            warn!(error = %e, "Counter event not delivered");
        }
    }

    fn record_outcome(&self, operation: Operation, result: &Result<CounterRecord, CounterError>) {
        let mut stats = self.stats.lock();
        match result {
            Ok(_) => match operation {
                Operation::Initialize => stats.initialized += 1,
                Operation::Increment => stats.incremented += 1,
                Operation::Reset => stats.reset += 1,
            },
            Err(e) => {
                stats.rejected += 1;
                *stats.rejected_by_kind.entry(e.kind()).or_insert(0) += 1;
                warn!(
                    operation = %operation,
                    kind = e.kind().as_str(),
                    error = %e,
                    "Counter request rejected"
                );
            }
        }
    }

    fn do_initialize(&self, requester: &Pubkey, target: &Address) -> Result<CounterRecord, CounterError> {
        self.deriver.verify(&self.config.namespace, requester, target)?;

        let created_at = self.clock.unix_timestamp();
        let handle = self.lifecycle().create(target, *requester, created_at)?;

        info!(owner = %handle.record.owner, "Counter initialized");
        self.emit(CounterEvent::Initialized(CounterInitializedPayload {
            address: handle.address,
            owner: handle.record.owner,
            created_at,
        }));
        Ok(handle.record)
    }

    fn do_increment(&self, requester: &Pubkey, target: &Address) -> Result<CounterRecord, CounterError> {
        let (previous, committed) = self.mutate(Mutation::Increment, requester, target)?;

        info!(
            previous = previous.record.count,
            count = committed.record.count,
            total_increments = committed.record.total_increments,
            "Counter incremented"
        );
        self.emit(CounterEvent::Incremented(CounterIncrementedPayload {
            address: committed.address,
            owner: committed.record.owner,
            previous_count: previous.record.count,
            count: committed.record.count,
            total_increments: committed.record.total_increments,
            timestamp: self.clock.unix_timestamp(),
        }));
        Ok(committed.record)
    }

    fn do_reset(&self, requester: &Pubkey, target: &Address) -> Result<CounterRecord, CounterError> {
        let (previous, committed) = self.mutate(Mutation::Reset, requester, target)?;

        info!(
            previous = previous.record.count,
            total_increments = committed.record.total_increments,
            "Counter reset"
        );
        self.emit(CounterEvent::Reset(CounterResetPayload {
            address: committed.address,
            owner: committed.record.owner,
            previous_count: previous.record.count,
            total_increments: committed.record.total_increments,
            timestamp: self.clock.unix_timestamp(),
        }));
        Ok(committed.record)
    }
}

impl<L: Ledger, C: Clock, E: EventSink> CounterApi for CounterService<L, C, E> {
    fn counter_address(&self, owner: &Pubkey) -> Result<Address, CounterError> {
        let (address, _) = self.deriver.derive(&self.config.namespace, owner)?;
        Ok(address)
    }

    #[instrument(skip_all, fields(requester = %requester, target = %target))]
    fn initialize(&self, requester: &Pubkey, target: &Address) -> Result<CounterRecord, CounterError> {
        let result = self.do_initialize(requester, target);
        self.record_outcome(Operation::Initialize, &result);
        result
    }

    #[instrument(skip_all, fields(requester = %requester, target = %target))]
    fn increment(&self, requester: &Pubkey, target: &Address) -> Result<CounterRecord, CounterError> {
        let result = self.do_increment(requester, target);
        self.record_outcome(Operation::Increment, &result);
        result
    }

    #[instrument(skip_all, fields(requester = %requester, target = %target))]
    fn reset(&self, requester: &Pubkey, target: &Address) -> Result<CounterRecord, CounterError> {
        let result = self.do_reset(requester, target);
        self.record_outcome(Operation::Reset, &result);
        result
    }

    fn fetch(&self, target: &Address) -> Result<CounterRecord, CounterError> {
        let handle = self.lifecycle().fetch(target)?;
        self.deriver
            .verify(&self.config.namespace, &handle.record.owner, target)?;

        debug!(target = %target, count = handle.record.count, "Counter fetched");
        Ok(handle.record)
    }

    fn exists(&self, target: &Address) -> Result<bool, CounterError> {
        self.lifecycle().exists(target)
    }
}
