use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::resources::{
    contacts::ContactsResource, docs::DocsResource, gallery::GalleryResource,
    services::ServicesResource,
};
use service::storage::file_store::FileStore;

/// Shared handles injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub services: ServicesResource,
    pub gallery: Arc<GalleryResource>,
    pub docs: Arc<DocsResource>,
    pub contacts: ContactsResource,
    pub files: Arc<FileStore>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, files: FileStore) -> Self {
        let files = Arc::new(files);
        Self {
            services: ServicesResource::new(db.clone()),
            gallery: Arc::new(GalleryResource::new(db.clone(), Arc::clone(&files))),
            docs: Arc::new(DocsResource::new(db.clone(), Arc::clone(&files))),
            contacts: ContactsResource::new(db),
            files,
        }
    }
}
