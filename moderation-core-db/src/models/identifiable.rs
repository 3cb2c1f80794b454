/// Trait for entities keyed by a store-assigned numeric identifier
pub trait Identifiable {
    /// Returns the unique identifier of the entity
    fn id(&self) -> i64;
}
