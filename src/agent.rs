//! The agent state model: health states, role tags, and the tagged-variant
//! agent type stored in the population. Agents are anonymous; nothing in the
//! simulation distinguishes two agents with the same variant and state.

/// The health of a single agent. Closed set; after initial seeding, states
/// change only through transition-rule application or upgrade-driven
/// reassignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HealthState {
    Healthy,
    /// A known, visible infection.
    Infected,
    /// An infectious carrier not yet surfaced in the displayed statistics.
    UnknowinglyInfected,
    Deceased,
    Immune,
    /// Transitional state carried by health workers administering the cure.
    Cure,
}

impl HealthState {
    /// Every health state, in declaration order.
    pub const ALL: [HealthState; 6] = [
        HealthState::Healthy,
        HealthState::Infected,
        HealthState::UnknowinglyInfected,
        HealthState::Deceased,
        HealthState::Immune,
        HealthState::Cure,
    ];
}

/// Agent role tag. Police and health workers hold privileged roles and are
/// not eligible for further reassignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Citizen,
    Police,
    HealthWorker,
}

impl Role {
    #[must_use]
    pub fn is_privileged(self) -> bool {
        matches!(self, Role::Police | Role::HealthWorker)
    }
}

/// A single member of the population. The variant carries the role; the
/// payload is the agent's current health state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Agent {
    Citizen(HealthState),
    Police(HealthState),
    HealthWorker(HealthState),
}

impl Agent {
    #[must_use]
    pub fn new(role: Role, health_state: HealthState) -> Agent {
        match role {
            Role::Citizen => Agent::Citizen(health_state),
            Role::Police => Agent::Police(health_state),
            Role::HealthWorker => Agent::HealthWorker(health_state),
        }
    }

    #[must_use]
    pub fn health_state(&self) -> HealthState {
        match self {
            Agent::Citizen(state) | Agent::Police(state) | Agent::HealthWorker(state) => *state,
        }
    }

    pub fn set_health_state(&mut self, state: HealthState) {
        match self {
            Agent::Citizen(s) | Agent::Police(s) | Agent::HealthWorker(s) => *s = state,
        }
    }

    #[must_use]
    pub fn role(&self) -> Role {
        match self {
            Agent::Citizen(_) => Role::Citizen,
            Agent::Police(_) => Role::Police,
            Agent::HealthWorker(_) => Role::HealthWorker,
        }
    }

    /// Whether this agent already holds a privileged role and is therefore
    /// ineligible for upgrade-driven reassignment.
    #[must_use]
    pub fn is_privileged(&self) -> bool {
        self.role().is_privileged()
    }
}
