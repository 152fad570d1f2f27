/// Tunables for the revision engine.
///
/// Passed explicitly at construction; there are no process-wide defaults.
#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    /// Unchanged lines attached to each hunk as display context.
    pub context_lines: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { context_lines: 3 }
    }
}

impl EngineConfig {
    pub fn new(context_lines: usize) -> Self {
        Self { context_lines }
    }
}
