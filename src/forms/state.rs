use tracing::{debug, error, info, warn};

use crate::forms::submission::{Navigation, SubmitError, SubmitTarget, SAVED_NOTICE};
use crate::models::form::{FieldErrorMap, FormPhase, TouchedSet};
use crate::models::image::ImageFile;
use crate::models::product::{ProductDraft, ProductField};
use crate::services::image::{check_image, ImageError};
use crate::services::product_store::{ApiError, ProductPayload};
use crate::services::validation::{validate_field, validate_product};

/// Local state of one product screen: the draft, its errors, which
/// fields were touched, image validity and the submit phase.
///
/// Handlers run synchronously to completion; only the network call of a
/// submission happens outside this type.
#[derive(Debug, Clone)]
pub struct FormState {
    draft: ProductDraft,
    errors: FieldErrorMap,
    touched: TouchedSet,
    image_error: Option<ImageError>,
    image_required: bool,
    phase: FormPhase,
}

impl FormState {
    /// `image_required` is true on the create screen, where a product
    /// cannot be saved without a picture.
    pub fn new(draft: ProductDraft, image_required: bool) -> Self {
        Self {
            draft,
            errors: FieldErrorMap::new(),
            touched: TouchedSet::default(),
            image_error: None,
            image_required,
            phase: FormPhase::Editing,
        }
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrorMap {
        &self.errors
    }

    pub fn touched(&self) -> &TouchedSet {
        &self.touched
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_image_valid(&self) -> bool {
        self.image_error.is_none()
    }

    /// Error to render under `field`: only once the user has touched it.
    pub fn visible_error(&self, field: ProductField) -> Option<&str> {
        if self.touched.is_touched(field) {
            self.errors.get(field)
        } else {
            None
        }
    }

    /// Keystroke or select change. Stores the raw value and refreshes this
    /// field's error: cleared when the field now passes, updated when it
    /// already had one. No other key is affected.
    pub fn handle_input(&mut self, field: ProductField, value: impl Into<String>) {
        if !self.draft.set(field, value.into()) {
            debug!(%field, "Ignoring text input for non-text field");
            return;
        }

        match validate_field(&self.draft, field) {
            None => {
                self.errors.remove(field);
            }
            Some(message) if self.errors.contains(field) => self.errors.insert(field, message),
            Some(_) => {}
        }
    }

    /// Focus left `field`. Normalizes whitespace, marks it touched and
    /// merges a full validation into the error map.
    pub fn handle_blur(&mut self, field: ProductField, value: &str) {
        self.touched.mark(field);
        if !field.is_text() {
            return;
        }

        self.draft.set(field, normalize_whitespace(value));

        let errors = validate_product(&self.draft);
        if !errors.contains(field) {
            self.errors.remove(field);
        }
        self.errors.merge(errors);
    }

    /// Mark a field touched without changing its value (e.g. the file input losing focus).
    pub fn touch(&mut self, field: ProductField) {
        self.touched.mark(field);
    }

    /// A file was picked (or the picker was dismissed with nothing).
    ///
    /// A rejected file never replaces the stored image; the form is
    /// blocked until a valid file is chosen.
    pub fn select_image(&mut self, file: Option<ImageFile>) -> Result<(), ImageError> {
        let Some(file) = file else {
            if self.image_required {
                self.reject_image(ImageError::Missing);
                return Err(ImageError::Missing);
            }
            return Ok(());
        };

        if let Err(err) = check_image(&file) {
            warn!(
                file_name = %file.file_name,
                mime = %file.mime_type,
                size = file.size(),
                reason = err.reason(),
                "Rejected product image"
            );
            metrics::counter!("product_image_rejections_total", "reason" => err.reason())
                .increment(1);
            self.reject_image(err.clone());
            return Err(err);
        }

        debug!(file_name = %file.file_name, size = file.size(), "Accepted product image");
        self.draft.image = Some(file);
        self.image_error = None;
        self.errors.remove(ProductField::Image);
        Ok(())
    }

    fn reject_image(&mut self, err: ImageError) {
        self.errors.insert(ProductField::Image, err.to_string());
        self.image_error = Some(err);
    }

    /// Drop any newly selected file and its error.
    pub(crate) fn clear_image_selection(&mut self) {
        self.draft.image = None;
        self.image_error = None;
        self.errors.remove(ProductField::Image);
    }

    /// Submit-time validation: touches every required field and every field
    /// with an error, and replaces the error map with a full validation plus
    /// any image problem.
    pub fn validate_for_submit(&mut self) -> Result<(), FieldErrorMap> {
        self.touched.mark_all(&ProductField::REQUIRED);

        let mut errors = validate_product(&self.draft);
        if let Some(err) = self.image_problem() {
            errors.insert(ProductField::Image, err.to_string());
        }
        // Anything that blocks the save must be visible, required or not.
        let failing: Vec<ProductField> = errors.fields().collect();
        self.touched.mark_all(&failing);
        self.errors = errors;

        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors.clone())
        }
    }

    fn image_problem(&self) -> Option<ImageError> {
        if let Some(err) = &self.image_error {
            return Some(err.clone());
        }
        if self.image_required && self.draft.image.is_none() {
            return Some(ImageError::Missing);
        }
        None
    }

    /// Editing -> Submitting, yielding the payload to send.
    pub(crate) fn begin_submission(&mut self) -> Result<ProductPayload, SubmitError> {
        match self.phase {
            FormPhase::Submitting => return Err(SubmitError::InFlight),
            FormPhase::Navigated => return Err(SubmitError::Closed),
            FormPhase::Editing => {}
        }

        if let Err(errors) = self.validate_for_submit() {
            debug!(fields = errors.len(), "Submission blocked by validation errors");
            return Err(SubmitError::Invalid(errors));
        }

        self.phase = FormPhase::Submitting;
        Ok(ProductPayload::from_draft(&self.draft))
    }

    /// Submitting -> Navigated on success, back to Editing on failure.
    pub(crate) fn finish_submission(
        &mut self,
        target: &SubmitTarget,
        outcome: Result<(), ApiError>,
        listing_route: &str,
    ) -> Result<Navigation, SubmitError> {
        if self.phase != FormPhase::Submitting {
            warn!(phase = ?self.phase, "Submission result arrived with no save in progress");
            return Err(SubmitError::NotInFlight);
        }

        match outcome {
            Ok(()) => {
                info!(kind = target.kind(), "Product saved");
                self.phase = FormPhase::Navigated;
                Ok(Navigation {
                    route: listing_route.to_string(),
                    notice: SAVED_NOTICE,
                })
            }
            Err(e) => {
                error!(kind = target.kind(), error = %e, "Error saving product");
                metrics::counter!("product_submissions_failed", "kind" => target.kind())
                    .increment(1);
                self.phase = FormPhase::Editing;
                Err(SubmitError::Failed(e))
            }
        }
    }

    /// Abandon an in-flight submission whose future was dropped.
    pub(crate) fn cancel_submission(&mut self) {
        if self.phase == FormPhase::Submitting {
            warn!("In-flight submission abandoned");
            self.phase = FormPhase::Editing;
        }
    }
}

/// Trim and collapse runs of whitespace to a single space.
pub fn normalize_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
