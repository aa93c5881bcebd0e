//! Module definitions.

use std::fmt::Debug;

use ballot_state::{Storage, WorkingSet};
use borsh::{BorshDeserialize, BorshSerialize};
use digest::typenum::U32;
use digest::Digest;

use crate::address::BasicAddress;
use crate::{ModuleError, ModulePrefix};

/// The `Spec` trait configures the key primitives used by a particular deployment of the
/// module system: the identity type, the storage behind working sets and the hasher used to
/// derive addresses and prefixes.
pub trait Spec {
    /// The address type used to identify callers, modules and election instances.
    type Address: BasicAddress + schemars::JsonSchema;

    /// State storage read and written through working sets.
    type Storage: Storage + Send + Sync;

    /// The hasher used to derive addresses.
    type Hasher: Digest<OutputSize = U32>;
}

/// A context contains information which is passed to modules during
/// call execution. Currently, context includes the already authenticated sender.
///
/// Context objects also implement the [`Spec`] trait, which specifies the types to be used by
/// the modules generic over it.
pub trait Context: Spec + Clone + Debug + PartialEq + 'static {
    /// Sender of the call.
    fn sender(&self) -> &Self::Address;

    /// Constructor for the Context.
    fn new(sender: Self::Address) -> Self;
}

/// Response type for the `Module::call` method.
#[derive(Default, Debug, PartialEq, Eq)]
pub struct CallResponse {}

/// The core trait implemented by all modules. This trait defines how a module is initialized at genesis,
/// and how it handles calls.
pub trait Module {
    /// Execution context.
    type Context: Context;

    /// Configuration for the genesis method.
    type Config;

    /// Module defined argument to the call method.
    type CallMessage: Debug + BorshSerialize + BorshDeserialize;

    /// Genesis is called once when the ledger is created and can be used to set initial state values in the module.
    fn genesis(
        &self,
        _config: &Self::Config,
        _working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<(), ModuleError> {
        Ok(())
    }

    /// Call allows interaction with the module and invokes state changes.
    /// It takes a module defined type and a context as parameters.
    fn call(
        &self,
        message: Self::CallMessage,
        context: &Self::Context,
        working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<CallResponse, ModuleError>;
}

/// A [`Module`] that has a well-defined and known [JSON
/// Schema](https://json-schema.org/) for its [`Module::CallMessage`].
pub trait ModuleCallJsonSchema: Module {
    /// Returns the JSON schema for [`Module::CallMessage`].
    fn json_schema() -> String;
}

/// Every module has to implement this trait.
pub trait ModuleInfo {
    /// Execution context.
    type Context: Context;

    /// Returns address of the module.
    fn address(&self) -> &<Self::Context as Spec>::Address;

    /// Returns the prefix of the module.
    fn prefix(&self) -> ModulePrefix;
}

/// Methods from this trait should be called only once, when the ledger is created.
pub trait Genesis {
    /// Execution context of the module.
    type Context: Context;

    /// Initial configuration for the module.
    type Config;

    /// Initializes the state of the module.
    fn genesis(
        &self,
        config: &Self::Config,
        working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<(), ModuleError>;
}

impl<T> Genesis for T
where
    T: Module,
{
    type Context = <Self as Module>::Context;

    type Config = <Self as Module>::Config;

    fn genesis(
        &self,
        config: &Self::Config,
        working_set: &mut WorkingSet<<Self::Context as Spec>::Storage>,
    ) -> Result<(), ModuleError> {
        <Self as Module>::genesis(self, config, working_set)
    }
}
