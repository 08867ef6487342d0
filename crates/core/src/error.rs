use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// The vehicle exists but has no research cost, so there is nothing to
    /// grind towards (premium and collector vehicles).
    #[error("Vehicle {id} has no RP cost defined")]
    MissingRpCost { id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl CoreError {
    /// Shorthand for the vehicle lookup failure used across the estimator.
    pub fn vehicle_not_found(id: DbId) -> Self {
        Self::NotFound {
            entity: "Vehicle",
            id,
        }
    }
}
