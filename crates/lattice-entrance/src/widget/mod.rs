//! Widget adapters that compose entrance animations onto a child.

mod entrance;

pub use entrance::{AnimatedEntrance, Composed, EntranceVersion, transform_for};
