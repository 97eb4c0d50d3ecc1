pub mod calls;
pub mod health;
pub mod individuals;
pub mod variants;

pub use calls::{create_call, delete_call, get_call, list_calls, replace_call};
pub use health::{health_check, metrics_endpoint, readiness_check};
pub use individuals::{
    create_individual, delete_individual, get_individual, list_individuals,
    list_variants_by_individual, replace_individual,
};
pub use variants::{
    create_variant, delete_variant, get_variant, list_individuals_by_variant, list_variants,
    replace_variant,
};
