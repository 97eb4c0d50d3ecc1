pub mod calls;
pub mod individuals;
pub mod variants;

pub use calls::{CallResponse, CreateCallRequest, ReplaceCallRequest};
pub use individuals::{CreateIndividualRequest, IndividualResponse, ReplaceIndividualRequest};
pub use variants::{
    CreateVariantRequest, ReplaceVariantRequest, VariantListParams, VariantResponse,
};
