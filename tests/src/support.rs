//! Shared test harness.

use std::sync::Arc;

use counter_accounts::{
    Address, CounterApi, CounterConfig, CounterService, FixedClock, InMemoryEventLog,
    InMemoryLedger, Ledger, Pubkey,
};
use rand::Rng;

/// Program id used by every harness unless overridden.
pub const PROGRAM_ID: [u8; 32] = [0x5A; 32];

/// Clock value at harness creation.
pub const START_TIME: i64 = 1_700_000_000;

pub type TestService =
    CounterService<Arc<InMemoryLedger>, Arc<FixedClock>, Arc<InMemoryEventLog>>;

/// A counter service over in-memory adapters, with handles kept for
/// inspection.
pub struct Harness {
    pub service: Arc<TestService>,
    pub ledger: Arc<InMemoryLedger>,
    pub clock: Arc<FixedClock>,
    pub events: Arc<InMemoryEventLog>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(CounterConfig::default().with_program_id(PROGRAM_ID))
    }

    pub fn with_config(config: CounterConfig) -> Self {
        Self::on_ledger(config, Arc::new(InMemoryLedger::new()))
    }

    /// A second service sharing an existing ledger.
    pub fn on_ledger(config: CounterConfig, ledger: Arc<InMemoryLedger>) -> Self {
        let clock = Arc::new(FixedClock::new(START_TIME));
        let events = Arc::new(InMemoryEventLog::new());
        let service = CounterService::new(
            config,
            Arc::clone(&ledger),
            Arc::clone(&clock),
            Arc::clone(&events),
        )
        .expect("harness config is valid");

        Self {
            service: Arc::new(service),
            ledger,
            clock,
            events,
        }
    }

    pub fn address_of(&self, owner: &Pubkey) -> Address {
        self.service
            .counter_address(owner)
            .expect("derivation succeeds")
    }

    /// Create `owner`'s record and return its address.
    pub fn initialized(&self, owner: &Pubkey) -> Address {
        let address = self.address_of(owner);
        self.service
            .initialize(owner, &address)
            .expect("first initialize succeeds");
        address
    }

    /// Raw stored bytes, if any.
    pub fn raw(&self, address: &Address) -> Option<Vec<u8>> {
        self.ledger.read(address).ok()
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

pub fn random_owner<R: Rng>(rng: &mut R) -> Pubkey {
    Pubkey::new(rng.gen())
}
