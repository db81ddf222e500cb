use {
    serde::{Serialize, Deserialize},
    std::fmt
};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Copy)]
#[derive(Serialize, Deserialize)]
pub enum InfectionState{
    #[serde(rename = "S")]
    Susceptible,
    #[serde(rename = "I")]
    Infected,
    #[serde(rename = "R")]
    Recovered,
    /// reserved, no transition leads here yet (see `death_rate`)
    #[serde(rename = "D")]
    Dead,
}
impl InfectionState{
    pub fn sus_check(&self) -> bool{
        matches!(self,InfectionState::Susceptible)
    }
    pub fn inf_check(&self) -> bool{
        matches!(self,InfectionState::Infected)
    }

    /// Counted in C, the number of nodes that were ever infected
    pub fn is_or_was_infected(&self) -> bool
    {
        matches!(self, Self::Infected | Self::Recovered | Self::Dead)
    }

    /// single character tag used in the snapshot log
    pub fn tag(&self) -> char
    {
        match self{
            Self::Susceptible => 'S',
            Self::Infected => 'I',
            Self::Recovered => 'R',
            Self::Dead => 'D'
        }
    }

    /// S -> I -> R, everything else is illegal. R (and D) are terminal.
    pub fn can_become(&self, next: InfectionState) -> bool
    {
        matches!(
            (self, next),
            (Self::Susceptible, Self::Infected) | (Self::Infected, Self::Recovered)
        )
    }
}

impl Default for InfectionState{
    fn default() -> Self{
        InfectionState::Susceptible
    }
}

impl fmt::Display for InfectionState{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_match_serialized_form() {
        for state in [
            InfectionState::Susceptible,
            InfectionState::Infected,
            InfectionState::Recovered,
            InfectionState::Dead
        ]{
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{}\"", state.tag()));
        }
    }

    #[test]
    fn only_forward_transitions() {
        use InfectionState::*;
        assert!(Susceptible.can_become(Infected));
        assert!(Infected.can_become(Recovered));
        assert!(!Susceptible.can_become(Recovered));
        assert!(!Recovered.can_become(Susceptible));
        assert!(!Recovered.can_become(Infected));
        assert!(!Infected.can_become(Susceptible));
        assert!(!Infected.can_become(Dead));
    }
}
