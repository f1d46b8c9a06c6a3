use crate::domain::{Address, LedgerError};
use crate::ports::{Ledger, StorageHandle};
use parking_lot::RwLock;
use std::collections::HashMap;

/// In-memory implementation of [`Ledger`].
///
/// One lock guards the whole map, so every call is atomic and calls against
/// the same address are totally ordered.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    accounts: RwLock<HashMap<Address, Vec<u8>>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of allocated addresses.
    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }

    /// Store raw bytes, bypassing the allocate-once rule. Used to seed
    /// fixtures and simulate corrupted storage.
    pub fn insert_raw(&self, address: Address, data: Vec<u8>) {
        self.accounts.write().insert(address, data);
    }
}

impl Ledger for InMemoryLedger {
    fn allocate(&self, address: &Address, size: usize) -> Result<StorageHandle, LedgerError> {
        self.allocate_with(address, &vec![0u8; size])
    }

    fn allocate_with(
        &self,
        address: &Address,
        initial: &[u8],
    ) -> Result<StorageHandle, LedgerError> {
        let mut accounts = self.accounts.write();
        if accounts.contains_key(address) {
            return Err(LedgerError::Occupied { address: *address });
        }
        accounts.insert(*address, initial.to_vec());
        Ok(StorageHandle {
            address: *address,
            size: initial.len(),
        })
    }

    fn read(&self, address: &Address) -> Result<Vec<u8>, LedgerError> {
        self.accounts
            .read()
            .get(address)
            .cloned()
            .ok_or(LedgerError::NotFound { address: *address })
    }

    fn write(&self, address: &Address, data: &[u8]) -> Result<(), LedgerError> {
        let mut accounts = self.accounts.write();
        let slot = accounts
            .get_mut(address)
            .ok_or(LedgerError::NotFound { address: *address })?;
        if slot.len() != data.len() {
            return Err(LedgerError::SizeMismatch {
                address: *address,
                expected: slot.len(),
                actual: data.len(),
            });
        }
        slot.copy_from_slice(data);
        Ok(())
    }

    fn compare_and_write(
        &self,
        address: &Address,
        expected: &[u8],
        data: &[u8],
    ) -> Result<(), LedgerError> {
        let mut accounts = self.accounts.write();
        let slot = accounts
            .get_mut(address)
            .ok_or(LedgerError::NotFound { address: *address })?;
        if slot.as_slice() != expected {
            return Err(LedgerError::Conflict { address: *address });
        }
        if slot.len() != data.len() {
            return Err(LedgerError::SizeMismatch {
                address: *address,
                expected: slot.len(),
                actual: data.len(),
            });
        }
        slot.copy_from_slice(data);
        Ok(())
    }

    fn exists(&self, address: &Address) -> Result<bool, LedgerError> {
        Ok(self.accounts.read().contains_key(address))
    }
}
