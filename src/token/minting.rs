//! Minting latch

use crate::error::LedgerError;
use serde::{Deserialize, Serialize};

/// One-way latch: minting stays `Open` until the owner finishes it
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MintingState {
    #[default]
    Open,
    Finished,
}

impl MintingState {
    pub fn is_finished(&self) -> bool {
        matches!(self, MintingState::Finished)
    }

    /// Fail with `AlreadyFinished` once the latch is set
    pub fn ensure_open(&self) -> Result<(), LedgerError> {
        if self.is_finished() {
            return Err(LedgerError::AlreadyFinished);
        }
        Ok(())
    }

    pub fn finish(&mut self) -> Result<(), LedgerError> {
        self.ensure_open()?;
        *self = MintingState::Finished;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_once() {
        let mut state = MintingState::default();
        assert!(state.ensure_open().is_ok());

        state.finish().unwrap();
        assert!(state.is_finished());
        assert!(matches!(state.finish(), Err(LedgerError::AlreadyFinished)));
        assert!(matches!(
            state.ensure_open(),
            Err(LedgerError::AlreadyFinished)
        ));
    }
}
