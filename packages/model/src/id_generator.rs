use uuid::Uuid;

/// Source of synthetic container ids.
///
/// The builder draws one fresh id per conversion for the synthetic root.
/// Injecting the generator keeps conversions deterministic under test while
/// production draws random UUIDs.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Production generator: a random UUID v4 per id.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic generator: a fixed seed plus a sequential counter.
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    seed: String,
    count: u32,
}

impl SequentialIdGenerator {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }
}
