use crate::config::FormsConfig;
use crate::services::product_store::{ApiError, ProductStoreClient};

/// Identity of the signed-in seller, supplied by the hosting shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub seller_id: String,
}

impl Session {
    pub fn new(seller_id: impl Into<String>) -> Self {
        Self {
            seller_id: seller_id.into(),
        }
    }
}

/// Everything a product screen needs from its host, passed at mount.
#[derive(Debug, Clone)]
pub struct FormContext {
    pub store: ProductStoreClient,
    pub session: Session,
    pub listing_route: String,
}

impl FormContext {
    pub fn new(store: ProductStoreClient, session: Session, listing_route: impl Into<String>) -> Self {
        Self {
            store,
            session,
            listing_route: listing_route.into(),
        }
    }

    pub fn from_config(config: &FormsConfig, session: Session) -> Result<Self, ApiError> {
        let store = ProductStoreClient::from_config(config)?;
        Ok(Self::new(store, session, config.listing_route.clone()))
    }
}
