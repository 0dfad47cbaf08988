use crate::error::GeneratorError;
use crate::{base62, Generator};
use rand::Rng;
use shortest_core::ShortCode;
use typed_builder::TypedBuilder;

/// Size of the default numeric code space: `0..10^12`.
pub const DEFAULT_UPPER_BOUND: u64 = 1_000_000_000_000;

/// Configures a [`RandomGenerator`].
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct RandomGeneratorSettings {
    /// Exclusive upper bound of the numbers drawn.
    #[builder(default = DEFAULT_UPPER_BOUND)]
    pub upper_bound: u64,
}

impl Default for RandomGeneratorSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Draws a uniformly random number from the code space and encodes it in base62.
///
/// Two draws can collide; uniqueness is enforced against the repository,
/// not here.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    upper_bound: u64,
}

impl RandomGenerator {
    pub fn new(settings: RandomGeneratorSettings) -> Result<Self, GeneratorError> {
        if settings.upper_bound == 0 {
            return Err(GeneratorError::EmptyRange);
        }

        Ok(Self {
            upper_bound: settings.upper_bound,
        })
    }

    pub fn upper_bound(&self) -> u64 {
        self.upper_bound
    }

    /// Draws the next number of the code space.
    pub fn draw(&self) -> u64 {
        rand::rng().random_range(0..self.upper_bound)
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self {
            upper_bound: DEFAULT_UPPER_BOUND,
        }
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        ShortCode::new_unchecked(base62::encode(self.draw()))
    }
}
