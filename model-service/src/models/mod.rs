//! Domain models for model-service.

mod call;
mod individual;
mod variant;

pub use call::{Call, CreateCall, UpdateCall};
pub use individual::{CreateIndividual, Individual, UpdateIndividual};
pub use variant::{CreateVariant, UpdateVariant, Variant, VariantFilter};
