use fragmentino::core::models::molecule::DEFAULT_BOND_FACTOR;

/// Built-in values used when neither the command line nor the config file sets an option.
///
/// The maximum fragment size has no default.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultsConfig {
    pub bond_factor: f64,
    pub cap_bonds: bool,
    pub scale_cap_length: bool,
    pub center_first: bool,
    pub group_by_size: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            bond_factor: DEFAULT_BOND_FACTOR,
            cap_bonds: true,
            scale_cap_length: true,
            center_first: false,
            group_by_size: false,
        }
    }
}
