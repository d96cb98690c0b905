/// Capacity a [`ContiguousList`](crate::ContiguousList) starts with and returns to when cleared.
pub const DEFAULT_CAPACITY: usize = 10;

/// Storage settings for a [`ContiguousList`](crate::ContiguousList).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct ListConfig {
    /// Capacity of a freshly created or cleared buffer.
    pub initial_capacity: usize,
}

impl ListConfig {
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        ListConfig {
            initial_capacity: DEFAULT_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_defaults_to_the_default_capacity() {
        assert_eq!(ListConfig::default().initial_capacity, DEFAULT_CAPACITY);
        assert_eq!(
            ListConfig::default()
                .with_initial_capacity(64)
                .initial_capacity,
            64
        );
    }

    #[cfg(feature = "serde-derive")]
    #[test]
    fn it_fills_missing_fields_with_defaults() {
        let config: ListConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ListConfig::default());

        let config: ListConfig = serde_json::from_str(r#"{"initialCapacity": 3}"#).unwrap();
        assert_eq!(config.initial_capacity, 3);
    }
}
