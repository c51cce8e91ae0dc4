use reqwest::Url;
use tracing::{error, info};

use crate::context::FormContext;
use crate::forms::state::FormState;
use crate::forms::submission::{LoadError, Navigation, SubmitError, SubmitTarget, Submission};
use crate::models::image::ImagePreview;
use crate::models::product::{Category, ProductDraft, ProductRecord};
use crate::services::product_store::ApiError;

/// The "edit product" screen.
///
/// Replacing the image is optional: with no new file the stored image is
/// kept and never re-checked.
#[derive(Debug)]
pub struct EditProductForm {
    context: FormContext,
    product_id: String,
    categories: Vec<Category>,
    stored_image: Option<Url>,
    state: FormState,
}

impl EditProductForm {
    /// Fetch categories and the record concurrently, then pre-populate the draft.
    pub async fn mount(context: FormContext, product_id: impl Into<String>) -> Result<Self, LoadError> {
        let product_id = product_id.into();
        let store = &context.store;

        let (categories, record) =
            futures::try_join!(store.fetch_categories(), store.fetch_product(&product_id))
                .map_err(|e| {
                    error!(%product_id, error = %e, "Failed to load product for editing");
                    match e {
                        ApiError::Status { status: 404, .. } => LoadError::NotFound {
                            product_id: product_id.clone(),
                        },
                        other => LoadError::from(other),
                    }
                })?;

        let stored_image = stored_image_url(&context, &record)?;
        let draft = ProductDraft::from_record(&record, context.session.seller_id.clone());
        info!(%product_id, categories = categories.len(), "Edit product form mounted");

        Ok(Self {
            context,
            product_id,
            categories,
            stored_image,
            state: FormState::new(draft, false),
        })
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
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

    /// The newly selected file if there is one, else the stored image.
    pub fn preview(&self) -> Option<ImagePreview> {
        match &self.state.draft().image {
            Some(file) => Some(ImagePreview::Local {
                file_name: file.file_name.clone(),
            }),
            None => self.stored_image.clone().map(ImagePreview::Remote),
        }
    }

    /// Go back to the stored image, dropping any selected or rejected file.
    pub fn discard_selected_image(&mut self) {
        self.state.clear_image_selection();
    }

    fn target(&self) -> SubmitTarget {
        SubmitTarget::Update {
            product_id: self.product_id.clone(),
        }
    }

    pub fn prepare_submission(&mut self) -> Result<Submission, SubmitError> {
        let payload = self.state.begin_submission()?;
        Ok(Submission::new(self.context.store.clone(), self.target(), payload))
    }

    pub fn complete_submission(
        &mut self,
        outcome: Result<(), ApiError>,
    ) -> Result<Navigation, SubmitError> {
        let target = self.target();
        self.state
            .finish_submission(&target, outcome, &self.context.listing_route)
    }

    pub fn cancel_submission(&mut self) {
        self.state.cancel_submission();
    }

    /// Validate, send the update request and settle the form.
    pub async fn submit(&mut self) -> Result<Navigation, SubmitError> {
        let submission = self.prepare_submission()?;
        let outcome = submission.send().await;
        self.complete_submission(outcome)
    }
}

fn stored_image_url(context: &FormContext, record: &ProductRecord) -> Result<Option<Url>, LoadError> {
    match record.photo.as_deref() {
        Some(photo) if !photo.is_empty() => Ok(Some(context.store.image_url(photo)?)),
        _ => Ok(None),
    }
}
