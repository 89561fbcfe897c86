pub mod form;
pub mod infer;
pub mod inspect;
pub mod normalize;

pub use form::FormArgs;
pub use infer::InferArgs;
pub use inspect::InspectArgs;
pub use normalize::NormalizeArgs;
