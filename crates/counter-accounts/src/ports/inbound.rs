//! # Inbound Ports (Driving Ports / API)

use crate::domain::{Address, CounterError, CounterRecord, CounterRequest, Operation, Pubkey};

/// Primary counter API.
///
/// `requester` arguments must already be authenticated; this API decides
/// only whether that identity may act on the target record.
pub trait CounterApi: Send + Sync {
    /// Canonical record address for `owner`.
    fn counter_address(&self, owner: &Pubkey) -> Result<Address, CounterError>;

    /// Create the requester's record at `target`.
    ///
    /// # Errors
    /// - `InvalidAddress` if `target` is not the requester's derived address
    /// - `AlreadyExists` if the record exists
    fn initialize(&self, requester: &Pubkey, target: &Address) -> Result<CounterRecord, CounterError>;

    /// Increment the record at `target`.
    ///
    /// # Errors
    /// - `NotFound` if no record exists (nothing is allocated)
    /// - `InvalidAddress` if the stored owner does not derive `target`
    /// - `Unauthorized` if the requester is not the owner
    /// - `Overflow` if either field is at `u64::MAX`
    fn increment(&self, requester: &Pubkey, target: &Address) -> Result<CounterRecord, CounterError>;

    /// Reset the record at `target` to zero. Same failures as `increment`
    /// except `Overflow`.
    fn reset(&self, requester: &Pubkey, target: &Address) -> Result<CounterRecord, CounterError>;

    /// Read the record at `target`. No authorization.
    fn fetch(&self, target: &Address) -> Result<CounterRecord, CounterError>;

    /// Whether a record exists at `target`.
    fn exists(&self, target: &Address) -> Result<bool, CounterError>;

    /// Dispatch a request to the matching operation.
    fn execute(&self, request: &CounterRequest) -> Result<CounterRecord, CounterError> {
        match request.operation {
            Operation::Initialize => self.initialize(&request.requester, &request.target),
            Operation::Increment => self.increment(&request.requester, &request.target),
            Operation::Reset => self.reset(&request.requester, &request.target),
        }
    }
}
