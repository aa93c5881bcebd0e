/// General error type in the module system.
#[derive(Debug, thiserror::Error)]
pub enum ModuleError {
    /// Custom error thrown by a module.
    #[error(transparent)]
    ModuleError(#[from] anyhow::Error),
}

impl ModuleError {
    /// Returns the typed error a module raised, if it is of type `E`.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
    {
        match self {
            ModuleError::ModuleError(err) => err.downcast_ref::<E>(),
        }
    }
}
