pub mod create;
pub mod edit;
pub mod state;
pub mod submission;

pub use create::CreateProductForm;
pub use edit::EditProductForm;
pub use state::FormState;
pub use submission::{LoadError, Navigation, SubmitError, SubmitTarget, Submission};
