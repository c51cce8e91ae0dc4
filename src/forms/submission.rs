use tracing::info;

use crate::models::form::FieldErrorMap;
use crate::services::product_store::{ApiError, ProductPayload, ProductStoreClient};

/// Notice shown after a successful save.
pub const SAVED_NOTICE: &str = "Product saved successfully";

/// Which backend call a submission makes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitTarget {
    Create,
    Update { product_id: String },
}

impl SubmitTarget {
    pub fn kind(&self) -> &'static str {
        match self {
            SubmitTarget::Create => "create",
            SubmitTarget::Update { .. } => "update",
        }
    }
}

/// A validated save, detached from the form so the host can drive it on
/// whatever executor it runs. Hand the result back through the screen's
/// `complete_submission`.
#[derive(Debug)]
pub struct Submission {
    store: ProductStoreClient,
    target: SubmitTarget,
    payload: ProductPayload,
}

impl Submission {
    pub(crate) fn new(store: ProductStoreClient, target: SubmitTarget, payload: ProductPayload) -> Self {
        Self {
            store,
            target,
            payload,
        }
    }

    pub fn target(&self) -> &SubmitTarget {
        &self.target
    }

    pub fn payload(&self) -> &ProductPayload {
        &self.payload
    }

    /// Issue the create or update request.
    pub async fn send(self) -> Result<(), ApiError> {
        metrics::counter!("product_submissions_total", "kind" => self.target.kind()).increment(1);

        match self.target {
            SubmitTarget::Create => {
                info!(name = %self.payload.name, "Creating product");
                self.store.create_product(self.payload).await
            }
            SubmitTarget::Update { product_id } => {
                info!(%product_id, "Updating product");
                self.store.update_product(&product_id, self.payload).await
            }
        }
    }
}

/// Where the host should go after a successful save, and what to tell the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub route: String,
    pub notice: &'static str,
}

/// Why a submit attempt did not end in navigation. Display strings are
/// user-facing; transport detail stays in `source`.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Please ensure all fields are filled correctly and select a valid image file.")]
    Invalid(FieldErrorMap),

    #[error("A save is already in progress")]
    InFlight,

    #[error("No save is in progress")]
    NotInFlight,

    #[error("This product has already been saved")]
    Closed,

    #[error("Error saving product")]
    Failed(#[source] ApiError),
}

/// A screen could not load its reference data.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Product {product_id} was not found")]
    NotFound { product_id: String },

    #[error("Error loading product form")]
    Api(#[from] ApiError),
}
