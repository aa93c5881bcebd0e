use ballot_election::ElectionSettings;
use ballot_modules_api::{Context, WorkingSet};
use serde::{Deserialize, Serialize};

use crate::ElectionRegistry;

/// Genesis configuration of the [`ElectionRegistry`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionRegistryConfig {
    /// Settings given to every election the registry creates.
    #[serde(default)]
    pub election_settings: ElectionSettings,
}

impl<C: Context> ElectionRegistry<C> {
    pub(crate) fn init_module(
        &self,
        config: &ElectionRegistryConfig,
        working_set: &mut WorkingSet<C::Storage>,
    ) {
        self.election_settings
            .set(&config.election_settings, working_set);
        self.number_of_elections.set(&0, working_set);
    }
}
