use gs_core::GameState;

use crate::error::BootstrapError;
use crate::validate::bootstrap;

/// Raw JSON of the bundled Ashgrove Manor case.
pub const MANOR_JSON: &str = include_str!("../scenarios/manor.json");

/// The bundled case, validated like any generated scenario.
pub fn manor() -> Result<GameState, BootstrapError> {
    bootstrap(MANOR_JSON)
}
