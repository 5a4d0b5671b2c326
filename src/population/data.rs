use crate::agent::{Agent, HealthState, Role};

/// Backing store for the population plugin. All mutation goes through the
/// methods below so that the counters always equal a full rescan of `agents`.
#[derive(Default)]
pub(super) struct PopulationData {
    agents: Vec<Agent>,
    state_counts: [usize; HealthState::ALL.len()],
    police: usize,
    health_workers: usize,
    deceased_total: usize,
}

impl PopulationData {
    pub(super) fn new() -> Self {
        PopulationData::default()
    }

    pub(super) fn population(&self) -> usize {
        self.agents.len()
    }

    /// Returns the agent at `index`. Panics if the index is out of bounds.
    pub(super) fn agent(&self, index: usize) -> Agent {
        self.agents[index]
    }

    pub(super) fn add_agent(&mut self, agent: Agent) {
        self.state_counts[agent.health_state() as usize] += 1;
        if let Some(counter) = self.role_counter(agent.role()) {
            *counter += 1;
        }
        self.agents.push(agent);
    }

    pub(super) fn set_health_state(&mut self, index: usize, state: HealthState) {
        let agent = &mut self.agents[index];
        self.state_counts[agent.health_state() as usize] -= 1;
        self.state_counts[state as usize] += 1;
        agent.set_health_state(state);
    }

    /// Removes and returns the agent at `index`, swapping the last agent into
    /// the vacated slot. Removing a deceased agent adds it to the cumulative
    /// deceased tally.
    pub(super) fn remove_agent(&mut self, index: usize) -> Agent {
        let agent = self.agents.swap_remove(index);
        self.state_counts[agent.health_state() as usize] -= 1;
        if let Some(counter) = self.role_counter(agent.role()) {
            *counter -= 1;
        }
        if agent.health_state() == HealthState::Deceased {
            self.deceased_total += 1;
        }
        agent
    }

    /// Replaces the agent at `index` with a new variant for `role` carrying
    /// `health_state`, preserving position. Panics if the agent already holds
    /// a privileged role; callers are expected to skip those and resample.
    pub(super) fn reassign_role(&mut self, index: usize, role: Role, health_state: HealthState) {
        let old = self.agents[index];
        assert!(
            !old.is_privileged(),
            "cannot reassign an agent that already holds a privileged role"
        );
        self.agents[index] = Agent::new(role, health_state);
        self.state_counts[old.health_state() as usize] -= 1;
        self.state_counts[health_state as usize] += 1;
        // The old role is Citizen by the assert above, so only the new
        // role's counter moves.
        if let Some(counter) = self.role_counter(role) {
            *counter += 1;
        }
    }

    pub(super) fn count_in_state(&self, state: HealthState) -> usize {
        self.state_counts[state as usize]
    }

    pub(super) fn police_count(&self) -> usize {
        self.police
    }

    pub(super) fn health_worker_count(&self) -> usize {
        self.health_workers
    }

    pub(super) fn deceased_total(&self) -> usize {
        self.deceased_total
    }

    /// Agents holding no privileged role, available for reassignment.
    pub(super) fn eligible_count(&self) -> usize {
        self.agents.len() - self.police - self.health_workers
    }

    pub(super) fn count_agents(&self, predicate: impl Fn(&Agent) -> bool) -> usize {
        self.agents.iter().filter(|agent| predicate(agent)).count()
    }

    fn role_counter(&mut self, role: Role) -> Option<&mut usize> {
        match role {
            Role::Citizen => None,
            Role::Police => Some(&mut self.police),
            Role::HealthWorker => Some(&mut self.health_workers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::HealthState::{Cure, Deceased, Healthy, Infected, UnknowinglyInfected};

    #[test]
    fn counters_track_mixed_mutations() {
        let mut data = PopulationData::new();
        data.add_agent(Agent::Citizen(Healthy));
        data.add_agent(Agent::Citizen(Healthy));
        data.add_agent(Agent::Police(Healthy));

        assert_eq!(data.population(), 3);
        assert_eq!(data.count_in_state(Healthy), 3);
        assert_eq!(data.police_count(), 1);
        assert_eq!(data.eligible_count(), 2);

        data.set_health_state(0, UnknowinglyInfected);
        data.set_health_state(1, Infected);
        assert_eq!(data.count_in_state(Healthy), 1);
        assert_eq!(data.count_in_state(UnknowinglyInfected), 1);
        assert_eq!(data.count_in_state(Infected), 1);

        data.reassign_role(1, Role::HealthWorker, Cure);
        assert_eq!(data.health_worker_count(), 1);
        assert_eq!(data.count_in_state(Infected), 0);
        assert_eq!(data.count_in_state(Cure), 1);
        assert_eq!(data.eligible_count(), 1);

        // Counters must agree with a full rescan after every mutation.
        for state in HealthState::ALL {
            assert_eq!(
                data.count_in_state(state),
                data.count_agents(|agent| agent.health_state() == state)
            );
        }
    }

    #[test]
    fn remove_preserves_other_identities() {
        let mut data = PopulationData::new();
        data.add_agent(Agent::Citizen(Healthy));
        data.add_agent(Agent::Police(Infected));
        data.add_agent(Agent::HealthWorker(Cure));

        let removed = data.remove_agent(0);
        assert_eq!(removed, Agent::Citizen(Healthy));
        assert_eq!(data.population(), 2);
        // The last agent fills the vacated slot.
        assert_eq!(data.agent(0), Agent::HealthWorker(Cure));
        assert_eq!(data.agent(1), Agent::Police(Infected));
        assert_eq!(data.count_in_state(Healthy), 0);
    }

    #[test]
    fn deceased_tally_counts_only_deceased_removals() {
        let mut data = PopulationData::new();
        data.add_agent(Agent::Citizen(Healthy));
        data.add_agent(Agent::Citizen(Healthy));
        data.set_health_state(0, Deceased);

        data.remove_agent(0);
        assert_eq!(data.deceased_total(), 1);

        data.remove_agent(0);
        assert_eq!(data.deceased_total(), 1);
        assert_eq!(data.population(), 0);
    }

    #[test]
    #[should_panic(expected = "privileged role")]
    fn reassigning_privileged_agent_panics() {
        let mut data = PopulationData::new();
        data.add_agent(Agent::Police(Healthy));
        data.reassign_role(0, Role::HealthWorker, Cure);
    }
}
