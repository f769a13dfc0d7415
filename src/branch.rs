use crate::error::ValidationError;
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum County {
    Mercer,
    Middlesex,
    Somerset,
}

impl fmt::Display for County {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            County::Mercer => "Mercer",
            County::Middlesex => "Middlesex",
            County::Somerset => "Somerset",
        };

        f.write_str(name)
    }
}

/// Bank locations. Declared in city name order, which is the natural
/// ordering used inside a county when reporting by branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Branch {
    Bridgewater,
    Edison,
    Piscataway,
    Princeton,
    Warren,
}

impl Branch {
    pub const ALL: [Branch; 5] = [
        Branch::Bridgewater,
        Branch::Edison,
        Branch::Piscataway,
        Branch::Princeton,
        Branch::Warren,
    ];

    /// Three digit code leading every account number opened at the branch.
    pub fn code(&self) -> u16 {
        match self {
            Branch::Edison => 100,
            Branch::Bridgewater => 200,
            Branch::Princeton => 300,
            Branch::Piscataway => 400,
            Branch::Warren => 500,
        }
    }

    pub fn from_code(code: u16) -> Option<Branch> {
        Self::ALL.into_iter().find(|branch| branch.code() == code)
    }

    pub fn county(&self) -> County {
        match self {
            Branch::Edison | Branch::Piscataway => County::Middlesex,
            Branch::Bridgewater | Branch::Warren => County::Somerset,
            Branch::Princeton => County::Mercer,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Branch::Bridgewater => "BRIDGEWATER",
            Branch::Edison => "EDISON",
            Branch::Piscataway => "PISCATAWAY",
            Branch::Princeton => "PRINCETON",
            Branch::Warren => "WARREN",
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Branch {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();

        Self::ALL
            .into_iter()
            .find(|branch| branch.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ValidationError::InvalidBranch(name.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Campus {
    NewBrunswick,
    Newark,
    Camden,
}

impl Campus {
    pub fn code(&self) -> &'static str {
        match self {
            Campus::NewBrunswick => "1",
            Campus::Newark => "2",
            Campus::Camden => "3",
        }
    }
}

impl fmt::Display for Campus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Campus::NewBrunswick => "NEW_BRUNSWICK",
            Campus::Newark => "NEWARK",
            Campus::Camden => "CAMDEN",
        };

        f.write_str(name)
    }
}

impl FromStr for Campus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Campus::NewBrunswick),
            "2" => Ok(Campus::Newark),
            "3" => Ok(Campus::Camden),
            other => Err(ValidationError::InvalidCampus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_branch_ignores_case() {
        assert_eq!("edison".parse(), Ok(Branch::Edison));
        assert_eq!(" Warren ".parse(), Ok(Branch::Warren));
        assert_eq!(
            "newyork".parse::<Branch>(),
            Err(ValidationError::InvalidBranch("newyork".to_string()))
        );
    }

    #[test]
    fn codes_round_trip() {
        for branch in Branch::ALL {
            assert_eq!(Branch::from_code(branch.code()), Some(branch));
        }
        assert_eq!(Branch::from_code(999), None);
    }

    #[test]
    fn counties() {
        assert_eq!(Branch::Edison.county(), County::Middlesex);
        assert_eq!(Branch::Piscataway.county(), County::Middlesex);
        assert_eq!(Branch::Warren.county(), County::Somerset);
        assert_eq!(Branch::Princeton.county(), County::Mercer);
    }

    #[test]
    fn campus_codes() {
        assert_eq!("2".parse(), Ok(Campus::Newark));
        assert!("4".parse::<Campus>().is_err());
        assert_eq!(Campus::Camden.code(), "3");
    }
}
