use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::FactoryError;

/// Kind of part travelling on the conveyor belt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentType {
    MainUnit,
    Broom,
    Mop,
}

impl ComponentType {
    /// Every component kind, in declaration order
    pub const ALL: [ComponentType; 3] = [
        ComponentType::MainUnit,
        ComponentType::Broom,
        ComponentType::Mop,
    ];

    /// Upper-case name used in logs and belt dumps
    pub fn name(&self) -> &'static str {
        match self {
            ComponentType::MainUnit => "MAIN_UNIT",
            ComponentType::Broom => "BROOM",
            ComponentType::Mop => "MOP",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Robot variant a worker is able to assemble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RobotType {
    /// Sweeping robot: one main unit and two brooms
    Dry2000,
    /// Mopping robot: one main unit and two mops
    Wet2000,
}

impl RobotType {
    pub fn name(&self) -> &'static str {
        match self {
            RobotType::Dry2000 => "DRY2000",
            RobotType::Wet2000 => "WET2000",
        }
    }
}

impl fmt::Display for RobotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RobotType {
    type Err = FactoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DRY2000" => Ok(RobotType::Dry2000),
            "WET2000" => Ok(RobotType::Wet2000),
            _ => Err(FactoryError::InvalidRobotType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_robot_type_parsing_is_case_insensitive() {
        assert_eq!("DRY2000".parse::<RobotType>().unwrap(), RobotType::Dry2000);
        assert_eq!("wet2000".parse::<RobotType>().unwrap(), RobotType::Wet2000);
        assert_eq!(" Dry2000 ".parse::<RobotType>().unwrap(), RobotType::Dry2000);
    }

    #[test]
    fn test_unknown_robot_type_is_rejected() {
        let err = "VACUUM3000".parse::<RobotType>().unwrap_err();
        assert!(matches!(err, FactoryError::InvalidRobotType(ref s) if s == "VACUUM3000"));

        assert!("".parse::<RobotType>().is_err());
    }

    #[test]
    fn test_component_names() {
        assert_eq!(ComponentType::MainUnit.to_string(), "MAIN_UNIT");
        assert_eq!(ComponentType::Broom.to_string(), "BROOM");
        assert_eq!(ComponentType::Mop.to_string(), "MOP");
        assert_eq!(ComponentType::ALL.len(), 3);
    }
}
