use tracing::{error, info};

use crate::context::FormContext;
use crate::forms::state::FormState;
use crate::forms::submission::{LoadError, Navigation, SubmitError, SubmitTarget, Submission};
use crate::models::product::{Category, ProductDraft};
use crate::services::product_store::ApiError;

/// The "add product" screen.
#[derive(Debug)]
pub struct CreateProductForm {
    context: FormContext,
    categories: Vec<Category>,
    state: FormState,
}

impl CreateProductForm {
    /// Fetch the category list and start from an empty draft.
    pub async fn mount(context: FormContext) -> Result<Self, LoadError> {
        let categories = context.store.fetch_categories().await.map_err(|e| {
            error!(error = %e, "Failed to load categories");
            LoadError::from(e)
        })?;

        info!(categories = categories.len(), "Create product form mounted");
        let draft = ProductDraft::new(context.session.seller_id.clone());

        Ok(Self {
            context,
            categories,
            state: FormState::new(draft, true),
        })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn form(&self) -> &FormState {
        &self.state
    }

    /// Input, blur and image handlers live on [`FormState`].
    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.state
    }

    pub fn prepare_submission(&mut self) -> Result<Submission, SubmitError> {
        let payload = self.state.begin_submission()?;
        Ok(Submission::new(
            self.context.store.clone(),
            SubmitTarget::Create,
            payload,
        ))
    }

    pub fn complete_submission(
        &mut self,
        outcome: Result<(), ApiError>,
    ) -> Result<Navigation, SubmitError> {
        self.state
            .finish_submission(&SubmitTarget::Create, outcome, &self.context.listing_route)
    }

    pub fn cancel_submission(&mut self) {
        self.state.cancel_submission();
    }

    /// Validate, send the create request and settle the form.
    pub async fn submit(&mut self) -> Result<Navigation, SubmitError> {
        let submission = self.prepare_submission()?;
        let outcome = submission.send().await;
        self.complete_submission(outcome)
    }
}
