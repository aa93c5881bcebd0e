#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

mod config;

use std::sync::{Mutex, MutexGuard, PoisonError};

use ballot_modules_api::{Context, Event, Genesis, Module, ModuleError, Spec, Storage, WorkingSet};
use borsh::BorshDeserialize;
pub use config::{from_toml_path, init_tracing, LedgerConfig, TracingConfig};
use tracing::{debug, error, info};

type StorageOf<M> = <<M as Module>::Context as Spec>::Storage;
type AddressOf<M> = <<M as Module>::Context as Spec>::Address;

/// Hosts a single module over committed storage.
///
/// Calls are applied one at a time: each holds the ledger lock from the first read of its
/// working set until its writes are committed.
pub struct Ledger<M: Module> {
    storage: StorageOf<M>,
    module: M,
    lock: Mutex<()>,
}

impl<M: Module> Ledger<M> {
    /// Creates a ledger over `storage`. Genesis is not applied.
    pub fn new(storage: StorageOf<M>, module: M) -> Self {
        Self {
            storage,
            module,
            lock: Mutex::new(()),
        }
    }

    /// The hosted module.
    pub fn module(&self) -> &M {
        &self.module
    }

    /// The committed storage.
    pub fn storage(&self) -> &StorageOf<M> {
        &self.storage
    }

    /// Runs the module genesis and commits its writes. Nothing is committed if it fails.
    pub fn genesis(&self, config: &M::Config) -> Result<(), ModuleError> {
        let _guard = self.lock();
        let mut working_set = WorkingSet::new(self.storage.clone());
        Genesis::genesis(&self.module, config, &mut working_set)?;

        let mut checkpoint = working_set.checkpoint();
        let writes = checkpoint.freeze();
        self.storage.commit(&writes);

        info!(writes = writes.ordered_writes.len(), "Genesis applied");
        Ok(())
    }

    /// Applies `msg` on behalf of `sender`.
    ///
    /// On success the writes are committed and the events recorded by the call are returned.
    /// On failure the writes are discarded and the module error is returned.
    pub fn apply_call(
        &self,
        sender: AddressOf<M>,
        msg: M::CallMessage,
    ) -> Result<Vec<Event>, ModuleError> {
        debug!(%sender, ?msg, "Applying call");

        let context = <M::Context as Context>::new(sender);
        let _guard = self.lock();
        let mut working_set = WorkingSet::new(self.storage.clone());

        match self.module.call(msg, &context, &mut working_set) {
            Ok(_) => {
                let events = working_set.take_events();
                let mut checkpoint = working_set.checkpoint();
                let writes = checkpoint.freeze();
                self.storage.commit(&writes);

                debug!(
                    sender = %context.sender(),
                    events = events.len(),
                    writes = writes.ordered_writes.len(),
                    "Call committed"
                );
                Ok(events)
            }
            Err(e) => {
                working_set.revert();
                error!(sender = %context.sender(), "Call was reverted: {}", e);
                Err(e)
            }
        }
    }

    /// Decodes a borsh-encoded call message and applies it.
    pub fn apply_raw_call(
        &self,
        sender: AddressOf<M>,
        raw_msg: &[u8],
    ) -> Result<Vec<Event>, ModuleError> {
        let msg = match M::CallMessage::try_from_slice(raw_msg) {
            Ok(msg) => msg,
            Err(e) => {
                error!(%sender, "Call decoding error: {}", e);
                return Err(anyhow::anyhow!("Failed to decode call message: {e}").into());
            }
        };
        self.apply_call(sender, msg)
    }

    /// Runs a read-only closure against the committed state. Writes made by `query` are
    /// discarded.
    pub fn query<T>(&self, query: impl FnOnce(&M, &mut WorkingSet<StorageOf<M>>) -> T) -> T {
        let _guard = self.lock();
        let mut working_set = WorkingSet::new(self.storage.clone());
        let result = query(&self.module, &mut working_set);
        working_set.revert();
        result
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
