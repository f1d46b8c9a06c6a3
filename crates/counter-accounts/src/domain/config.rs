use super::errors::CounterError;

/// Namespace tag used when none is configured.
pub const DEFAULT_NAMESPACE: &[u8] = b"counter";

/// Longest accepted namespace tag, in bytes.
pub const MAX_NAMESPACE_LEN: usize = 32;

/// Configuration for the counter core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterConfig {
    /// Deployment identifier mixed into every derived address.
    pub program_id: [u8; 32],
    /// Namespace tag separating counter records from other record types.
    pub namespace: Vec<u8>,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            program_id: [0u8; 32],
            namespace: DEFAULT_NAMESPACE.to_vec(),
        }
    }
}

impl CounterConfig {
    /// Builder method to set the program id.
    pub fn with_program_id(mut self, program_id: [u8; 32]) -> Self {
        self.program_id = program_id;
        self
    }

    /// Builder method to set the namespace tag.
    pub fn with_namespace(mut self, namespace: impl Into<Vec<u8>>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Reject namespace tags that are empty or longer than
    /// [`MAX_NAMESPACE_LEN`].
    pub fn validate(&self) -> Result<(), CounterError> {
        validate_namespace(&self.namespace)
    }
}

pub(crate) fn validate_namespace(namespace: &[u8]) -> Result<(), CounterError> {
    if namespace.is_empty() || namespace.len() > MAX_NAMESPACE_LEN {
        return Err(CounterError::InvalidNamespace {
            len: namespace.len(),
            max: MAX_NAMESPACE_LEN,
        });
    }
    Ok(())
}
