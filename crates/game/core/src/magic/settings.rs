//! Per-cast numeric parameters.

/// Numeric parameters resolved once at cast time.
///
/// The external casting system computes these from caster stats and the
/// effect's cost tables; the core only consumes the resolved values and
/// never re-runs the computation, including on the save/restore path.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize,
)]
pub struct EffectSettings {
    /// Duration in rounds for duration-based effects.
    pub duration: u32,
    /// Resolved magnitude for magnitude-based effects.
    pub magnitude: i32,
    /// Success chance in percent for chance-based effects.
    pub chance: i32,
}

impl EffectSettings {
    pub fn new(duration: u32, magnitude: i32, chance: i32) -> Self {
        Self {
            duration,
            magnitude,
            chance,
        }
    }
}
