/// Game configuration constants.
///
/// Compile-time caps shared by the state types; tunable runtime knobs live
/// in the runtime crate's own config.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameConfig;

impl GameConfig {
    /// Maximum number of concurrently active effects per entity.
    pub const MAX_ACTIVE_EFFECTS: usize = 32;
    /// Maximum attribute value after fortification.
    pub const MAX_ATTRIBUTE: i32 = 100;
    /// Minimum attribute value after draining.
    pub const MIN_ATTRIBUTE: i32 = 0;
}
