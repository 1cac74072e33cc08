//! # Add-Item Form
//!
//! Local checks run before anything is uploaded:
//!
//! - a signed-in user
//! - every text field is filled in
//! - category, size and condition come from the catalog pickers
//! - 1 to [`MAX_IMAGES`] images
//! - a purchase bill for `swap` listings (optional for `donation`)
//!
//! A successful submission hands back [`Route::Dashboard`]; the form is then
//! abandoned.

use shared::catalog::{estimate_item_points, CATEGORIES, CONDITIONS, SIZES};
use shared::ListingType;
use thiserror::Error;

use super::notifications::Notifier;
use super::session::Session;
use super::Route;
use crate::core::error::{AppError, Result};
use crate::core::service::MarketplaceApi;
use crate::services::api::{ItemSubmission, UploadFile};

pub const MAX_IMAGES: usize = 5;

/// Why a submission was blocked locally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill in the {0} field.")]
    MissingField(&'static str),

    #[error("\"{value}\" is not a valid {field}.")]
    UnknownChoice { field: &'static str, value: String },

    #[error("Please upload at least one image of your item.")]
    ImagesRequired,

    #[error("You can upload maximum 5 images.")]
    TooManyImages,

    #[error("Please upload the purchase bill for verification.")]
    BillRequired,
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        AppError::Validation(err.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct AddItemForm {
    pub title: String,
    pub description: String,
    pub category: String,
    pub item_type: String,
    pub size: String,
    pub condition: String,
    pub listing_type: ListingType,
    tags: Vec<String>,
    images: Vec<UploadFile>,
    bill: Option<UploadFile>,
    submitting: bool,
}

impl AddItemForm {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== IMAGES ====================

    /// Add a picked batch. A batch that would push the total past
    /// [`MAX_IMAGES`] is refused as a whole.
    pub fn add_images(
        &mut self,
        batch: Vec<UploadFile>,
    ) -> std::result::Result<usize, FormError> {
        if self.images.len() + batch.len() > MAX_IMAGES {
            return Err(FormError::TooManyImages);
        }
        self.images.extend(batch);
        Ok(self.images.len())
    }

    pub fn remove_image(&mut self, index: usize) -> Option<UploadFile> {
        (index < self.images.len()).then(|| self.images.remove(index))
    }

    pub fn images(&self) -> &[UploadFile] {
        &self.images
    }

    pub fn set_bill(&mut self, bill: UploadFile) {
        self.bill = Some(bill);
    }

    pub fn clear_bill(&mut self) {
        self.bill = None;
    }

    pub fn bill(&self) -> Option<&UploadFile> {
        self.bill.as_ref()
    }

    // ==================== TAGS ====================

    /// Add a trimmed tag. Blank and exact duplicates are ignored.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|existing| existing == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|existing| existing != tag);
        self.tags.len() != before
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    // ==================== SUBMISSION ====================

    /// Points the backend will most likely assign, once category and condition are picked.
    pub fn estimated_points(&self) -> Option<u32> {
        if self.category.trim().is_empty() || self.condition.trim().is_empty() {
            return None;
        }
        Some(estimate_item_points(&self.category, &self.condition))
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn validate(&self) -> std::result::Result<(), FormError> {
        let required = [
            ("title", &self.title),
            ("description", &self.description),
            ("category", &self.category),
            ("type", &self.item_type),
            ("size", &self.size),
            ("condition", &self.condition),
        ];
        if let Some((name, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(FormError::MissingField(*name));
        }

        let pickers: [(&'static str, &String, &[&str]); 3] = [
            ("category", &self.category, &CATEGORIES[..]),
            ("size", &self.size, &SIZES[..]),
            ("condition", &self.condition, &CONDITIONS[..]),
        ];
        for (field, value, choices) in pickers {
            if !choices.contains(&value.trim()) {
                return Err(FormError::UnknownChoice {
                    field,
                    value: value.trim().to_string(),
                });
            }
        }

        if self.images.is_empty() {
            return Err(FormError::ImagesRequired);
        }
        if self.images.len() > MAX_IMAGES {
            return Err(FormError::TooManyImages);
        }
        if self.listing_type.requires_bill() && self.bill.is_none() {
            return Err(FormError::BillRequired);
        }
        Ok(())
    }

    /// The multipart payload, if the form passes [`AddItemForm::validate`].
    pub fn submission(&self) -> std::result::Result<ItemSubmission, FormError> {
        self.validate()?;
        Ok(ItemSubmission {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category.trim().to_string(),
            item_type: self.item_type.trim().to_string(),
            size: self.size.trim().to_string(),
            condition: self.condition.trim().to_string(),
            listing_type: self.listing_type,
            tags: self.tags.clone(),
            images: self.images.clone(),
            bill: self.bill.clone(),
        })
    }

    /// Validate and upload. On success the caller navigates to the returned route.
    ///
    /// Nothing is packaged or sent unless `session` has a signed-in user.
    pub async fn submit(
        &mut self,
        api: &dyn MarketplaceApi,
        session: &Session,
        notifier: &Notifier,
    ) -> Result<Route> {
        if !session.is_authenticated() {
            return Err(AppError::Access("Please sign in to list an item.".to_string()));
        }
        if self.submitting {
            return Err(AppError::State("Submission already in progress.".to_string()));
        }
        let submission = match self.submission() {
            Ok(submission) => submission,
            Err(err) => {
                notifier.error("Error", err.to_string());
                return Err(err.into());
            }
        };

        self.submitting = true;
        let result = api.create_item(submission).await;
        self.submitting = false;

        match result {
            Ok(reply) => {
                tracing::info!(item_id = reply.data.id, "Item listed");
                notifier.info(
                    "Success",
                    reply.message.unwrap_or_else(|| {
                        "Item submitted successfully! It will be reviewed by our team.".to_string()
                    }),
                );
                Ok(Route::Dashboard)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Item submission failed");
                notifier.error(
                    "Error",
                    e.user_message("Failed to submit item. Please try again."),
                );
                Err(e.into())
            }
        }
    }
}
