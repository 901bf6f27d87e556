//! Shared ledger handle for concurrent hosts
//!
//! All mutations run one at a time under the write lock; queries take the
//! read lock and always observe a fully committed state. Committed
//! notifications are published to subscribers.

use crate::error::LedgerError;
use crate::event::LedgerEvent;
use crate::token::ledger::BaseToken;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// Maximum number of notifications buffered per subscriber
const BROADCAST_CAPACITY: usize = 100;

/// Cloneable handle to a single ledger
#[derive(Clone)]
pub struct SharedLedger {
    inner: Arc<RwLock<BaseToken>>,
    sender: broadcast::Sender<LedgerEvent>,
}

impl SharedLedger {
    pub fn new(ledger: BaseToken) -> Self {
        let (sender, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            inner: Arc::new(RwLock::new(ledger)),
            sender,
        }
    }

    /// Receive every notification committed after this call
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Apply an operation and publish its notification
    ///
    /// `op` runs against a staged copy that replaces the committed state only
    /// when it returns `Ok`, so a closure chaining several calls commits all
    /// of them or none.
    pub async fn apply<F>(&self, op: F) -> Result<LedgerEvent, LedgerError>
    where
        F: FnOnce(&mut BaseToken) -> Result<LedgerEvent, LedgerError>,
    {
        let mut ledger = self.inner.write().await;
        let mut staged = ledger.clone();
        let event = op(&mut staged)?;
        *ledger = staged;
        // Ignore send errors (no subscribers)
        let _ = self.sender.send(event.clone());
        Ok(event)
    }

    /// Run a query against the committed state
    pub async fn read<R>(&self, query: impl FnOnce(&BaseToken) -> R) -> R {
        let ledger = self.inner.read().await;
        query(&*ledger)
    }

    /// Clone of the committed state
    pub async fn snapshot(&self) -> BaseToken {
        self.inner.read().await.clone()
    }

    pub async fn balance_of(&self, address: &str) -> u128 {
        self.read(|ledger| ledger.balance_of(address)).await
    }

    pub async fn total_supply(&self) -> u128 {
        self.read(|ledger| ledger.total_supply()).await
    }

    pub async fn transfer(
        &self,
        caller: &str,
        to: &str,
        amount: u128,
    ) -> Result<LedgerEvent, LedgerError> {
        self.apply(|ledger| ledger.transfer(caller, to, amount)).await
    }

    pub async fn mint(
        &self,
        caller: &str,
        to: &str,
        amount: u128,
    ) -> Result<LedgerEvent, LedgerError> {
        self.apply(|ledger| ledger.mint(caller, to, amount)).await
    }
}
