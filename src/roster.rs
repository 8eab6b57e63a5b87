use serde::Deserialize;

use crate::error::ConfigError;

/// A placeable model: what the user sees, and which node in the asset scene to clone.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetDescriptor {
    pub display_name: String,
    pub scene_node_id: String,
}

impl AssetDescriptor {
    pub fn new(display_name: impl Into<String>, scene_node_id: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            scene_node_id: scene_node_id.into(),
        }
    }
}

/// Cyclable list of assets. Never empty, so `current` cannot fail.
#[derive(Debug, Clone)]
pub struct AssetRoster {
    items: Vec<AssetDescriptor>,
    cursor: usize,
}

impl AssetRoster {
    pub fn new(items: Vec<AssetDescriptor>) -> Result<Self, ConfigError> {
        if items.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }

        Ok(Self { items, cursor: 0 })
    }

    pub fn current(&self) -> &AssetDescriptor {
        &self.items[self.cursor]
    }

    /// Moves to the next asset, wrapping to the first after the last.
    pub fn advance(&mut self) -> &AssetDescriptor {
        self.cursor = (self.cursor + 1) % self.items.len();
        self.current()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(names: &[&str]) -> AssetRoster {
        AssetRoster::new(
            names
                .iter()
                .map(|name| AssetDescriptor::new(*name, name.to_lowercase()))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn empty_roster_is_rejected() {
        assert!(matches!(
            AssetRoster::new(Vec::new()),
            Err(ConfigError::EmptyRoster)
        ));
    }

    #[test]
    fn advancing_len_times_returns_to_start() {
        for len in 1..=6 {
            let names: Vec<String> = (0..len).map(|i| format!("Asset{i}")).collect();
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            let mut roster = roster(&names);
            let start = roster.current().clone();

            for _ in 0..len {
                roster.advance();
            }

            assert_eq!(roster.current(), &start);
            assert_eq!(roster.cursor(), 0);
        }
    }

    #[test]
    fn advance_wraps_after_last() {
        let mut roster = roster(&["Box", "Ship", "Orange", "Plane"]);
        roster.advance();
        roster.advance();
        assert_eq!(roster.advance().display_name, "Plane");
        assert_eq!(roster.cursor(), 3);
        assert_eq!(roster.advance().display_name, "Box");
        assert_eq!(roster.cursor(), 0);
    }

    #[test]
    fn single_item_roster_stays_put() {
        let mut roster = roster(&["Box"]);
        assert_eq!(roster.advance().display_name, "Box");
        assert_eq!(roster.cursor(), 0);
    }
}
