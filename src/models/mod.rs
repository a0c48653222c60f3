pub mod deck;
pub mod holdings;
pub mod lenient;
pub mod position;
pub mod reconcile;

pub use deck::*;
pub use holdings::*;
pub use position::*;
pub use reconcile::*;
