use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Settings for one fragmentation run.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentationConfig {
    /// Largest allowed fragment, in atoms, before capping.
    pub max_fragment_size: usize,
    /// Overrides the bond factor carried by the input molecule when set.
    pub bond_factor: Option<f64>,
    /// Scale capping bond lengths by the bond factor. When off, caps sit at the plain
    /// sum of covalent radii.
    pub scale_cap_length: bool,
    pub cap_bonds: bool,
    pub center_first: bool,
    pub group_by_size: bool,
}

#[derive(Default)]
pub struct FragmentationConfigBuilder {
    max_fragment_size: Option<usize>,
    bond_factor: Option<f64>,
    scale_cap_length: Option<bool>,
    cap_bonds: Option<bool>,
    center_first: Option<bool>,
    group_by_size: Option<bool>,
}

impl FragmentationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_fragment_size(mut self, size: usize) -> Self {
        self.max_fragment_size = Some(size);
        self
    }
    pub fn bond_factor(mut self, factor: f64) -> Self {
        self.bond_factor = Some(factor);
        self
    }
    pub fn scale_cap_length(mut self, enabled: bool) -> Self {
        self.scale_cap_length = Some(enabled);
        self
    }
    pub fn cap_bonds(mut self, enabled: bool) -> Self {
        self.cap_bonds = Some(enabled);
        self
    }
    pub fn center_first(mut self, enabled: bool) -> Self {
        self.center_first = Some(enabled);
        self
    }
    pub fn group_by_size(mut self, enabled: bool) -> Self {
        self.group_by_size = Some(enabled);
        self
    }

    pub fn build(self) -> Result<FragmentationConfig, ConfigError> {
        let max_fragment_size = self
            .max_fragment_size
            .ok_or(ConfigError::MissingParameter("max_fragment_size"))?;
        if max_fragment_size == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "max_fragment_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if let Some(factor) = self.bond_factor {
            if !(factor.is_finite() && factor > 0.0) {
                return Err(ConfigError::InvalidParameter {
                    name: "bond_factor",
                    reason: format!("must be a positive finite number (got {})", factor),
                });
            }
        }

        Ok(FragmentationConfig {
            max_fragment_size,
            bond_factor: self.bond_factor,
            scale_cap_length: self.scale_cap_length.unwrap_or(true),
            cap_bonds: self.cap_bonds.unwrap_or(true),
            center_first: self.center_first.unwrap_or(false),
            group_by_size: self.group_by_size.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_applies_defaults_for_optional_flags() {
        let config = FragmentationConfigBuilder::new()
            .max_fragment_size(10)
            .build()
            .unwrap();
        assert_eq!(
            config,
            FragmentationConfig {
                max_fragment_size: 10,
                bond_factor: None,
                scale_cap_length: true,
                cap_bonds: true,
                center_first: false,
                group_by_size: false,
            }
        );
    }

    #[test]
    fn build_keeps_explicit_values() {
        let config = FragmentationConfigBuilder::new()
            .max_fragment_size(3)
            .bond_factor(1.1)
            .scale_cap_length(false)
            .cap_bonds(false)
            .center_first(true)
            .group_by_size(true)
            .build()
            .unwrap();
        assert_eq!(config.bond_factor, Some(1.1));
        assert!(!config.scale_cap_length);
        assert!(!config.cap_bonds);
        assert!(config.center_first);
        assert!(config.group_by_size);
    }

    #[test]
    fn build_fails_without_max_fragment_size() {
        let result = FragmentationConfigBuilder::new().bond_factor(1.2).build();
        assert_eq!(
            result,
            Err(ConfigError::MissingParameter("max_fragment_size"))
        );
    }

    #[test]
    fn build_rejects_zero_max_fragment_size() {
        let result = FragmentationConfigBuilder::new()
            .max_fragment_size(0)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "max_fragment_size",
                ..
            })
        ));
    }

    #[test]
    fn build_rejects_non_positive_bond_factor() {
        for factor in [0.0, -1.3, f64::INFINITY] {
            let result = FragmentationConfigBuilder::new()
                .max_fragment_size(5)
                .bond_factor(factor)
                .build();
            assert!(matches!(
                result,
                Err(ConfigError::InvalidParameter {
                    name: "bond_factor",
                    ..
                })
            ));
        }
    }
}
