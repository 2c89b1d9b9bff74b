//! Path addressing for both tree kinds.
//!
//! A binary path is a string over `{L, R}` ("LR" = left, then right).
//! A general path is a dot-separated list of zero-based child indices ("0.2");
//! the empty string addresses the root.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn from_char(token: char, position: usize) -> DomainResult<Self> {
        match token {
            'L' => Ok(Direction::Left),
            'R' => Ok(Direction::Right),
            _ => Err(DomainError::InvalidDirection { token, position }),
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Direction::Left => 'L',
            Direction::Right => 'R',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Walk from the root of a binary tree.
///
/// The last step names the slot to create; every earlier step must resolve
/// to an existing node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BinaryPath(Vec<Direction>);

impl BinaryPath {
    pub fn new(steps: Vec<Direction>) -> Self {
        Self(steps)
    }

    pub fn steps(&self) -> &[Direction] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Splits into the walk to the parent and the final slot.
    pub fn split_last(&self) -> Option<(Direction, &[Direction])> {
        self.0.split_last().map(|(last, prefix)| (*last, prefix))
    }
}

impl FromStr for BinaryPath {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(position, token)| Direction::from_char(token, position))
            .collect::<DomainResult<Vec<_>>>()
            .map(Self)
    }
}

impl fmt::Display for BinaryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.0 {
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

impl From<Vec<Direction>> for BinaryPath {
    fn from(steps: Vec<Direction>) -> Self {
        Self(steps)
    }
}

/// Sequence of child indices from the root of a general tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct GeneralPath(Vec<usize>);

impl GeneralPath {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// Path addressing the root itself.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for GeneralPath {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::root());
        }
        s.split('.')
            .enumerate()
            .map(|(level, token)| {
                token.trim().parse::<usize>().map_err(|_| DomainError::InvalidIndex {
                    token: token.to_string(),
                    level,
                })
            })
            .collect::<DomainResult<Vec<_>>>()
            .map(Self)
    }
}

impl fmt::Display for GeneralPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

impl From<Vec<usize>> for GeneralPath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_binary_path() {
        let path: BinaryPath = "LRL".parse().unwrap();
        assert_eq!(
            path.steps(),
            &[Direction::Left, Direction::Right, Direction::Left]
        );
        assert_eq!(path.to_string(), "LRL");
    }

    #[test]
    fn rejects_unknown_direction_with_position() {
        let err = "LXR".parse::<BinaryPath>().unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidDirection {
                token: 'X',
                position: 1
            }
        );
    }

    #[test]
    fn lowercase_direction_is_rejected() {
        assert!("l".parse::<BinaryPath>().is_err());
    }

    #[test]
    fn empty_string_is_empty_binary_path() {
        let path: BinaryPath = "".parse().unwrap();
        assert!(path.is_empty());
        assert!(path.split_last().is_none());
    }

    #[test]
    fn parses_general_path() {
        let path: GeneralPath = "0.2.1".parse().unwrap();
        assert_eq!(path.indices(), &[0, 2, 1]);
        assert_eq!(path.to_string(), "0.2.1");
        assert!("".parse::<GeneralPath>().unwrap().is_root());
    }

    #[test]
    fn rejects_negative_index() {
        let err = "0.-1".parse::<GeneralPath>().unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidIndex {
                token: "-1".to_string(),
                level: 1
            }
        );
    }
}
