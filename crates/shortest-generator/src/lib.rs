pub mod base62;
pub mod error;
pub mod random;
pub mod seq;

pub use error::GeneratorError;
pub use random::{RandomGenerator, RandomGeneratorSettings, DEFAULT_UPPER_BOUND};
pub use seq::SeqGenerator;

use shortest_core::ShortCode;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// Candidates may collide with codes already issued; the caller checks the
/// repository and draws again.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;
    /// Produces the next candidate code.
    fn generate(&self) -> Self::Output;
}
