pub mod api;
pub mod generation;
pub mod traits;

pub use api::FusionApi;
pub use generation::GenerationClient;
pub use traits::GenerationService;
