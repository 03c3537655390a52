/// Split policy shared by every node of a tree.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// A leaf holding more than this many objects splits, unless it sits at `max_level`.
    pub max_objects: usize,
    /// Leaves at this level never split and grow without bound.
    pub max_level: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_objects: 64,
            max_level: 8,
        }
    }
}

impl Config {
    pub fn new(max_objects: usize, max_level: u32) -> Self {
        Self {
            max_objects,
            max_level,
        }
    }

    pub fn with_max_objects(mut self, max_objects: usize) -> Self {
        self.max_objects = max_objects;
        self
    }

    pub fn with_max_level(mut self, max_level: u32) -> Self {
        self.max_level = max_level;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = Config::default().with_max_objects(4).with_max_level(2);
        assert_eq!(config, Config::new(4, 2));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn loads_partial_toml() {
        let config: Config = toml::from_str("max_level = 3").unwrap();
        assert_eq!(config, Config::default().with_max_level(3));
    }
}
