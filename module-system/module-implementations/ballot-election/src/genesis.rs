use ballot_modules_api::{Context, WorkingSet};
use serde::{Deserialize, Serialize};

use crate::{Election, ElectionError, ElectionSettings, Phase};

/// Initial state of an [`Election`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectionConfig<C: Context> {
    /// The identity allowed to administer the election.
    pub authority: C::Address,
    /// Election name.
    pub name: String,
    /// Election description.
    pub description: String,
    /// Candidate numbering and ballot rules.
    #[serde(default)]
    pub settings: ElectionSettings,
}

impl<C: Context> Election<C> {
    /// Writes the initial state: the authority and metadata, phase `NotStarted`,
    /// empty rolls and zeroed counters. Fails if the election already exists.
    pub fn init_election(
        &self,
        config: &ElectionConfig<C>,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<(), ElectionError> {
        if self.authority.get(working_set).is_some() {
            return Err(ElectionError::ElectionAlreadyInitialized);
        }

        self.authority.set(&config.authority, working_set);
        self.name.set(&config.name, working_set);
        self.description.set(&config.description, working_set);
        self.settings.set(&config.settings, working_set);
        self.phase.set(&Phase::NotStarted, working_set);
        self.number_of_voters.set(&0, working_set);
        self.number_of_votes.set(&0, working_set);

        working_set.add_event(
            "Election: init_election",
            &format!("Election {} was created by {}", config.name, config.authority),
        );

        Ok(())
    }
}
