use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ServiceDoc {
    pub id: i32,
    pub eng: String,
    pub title: String,
    pub src: String,
    pub prices: String,
    pub text: String,
}

/// All five fields are required on create.
#[derive(ToSchema)]
pub struct ServiceInputDoc {
    pub eng: String,
    pub title: String,
    pub src: String,
    pub prices: String,
    pub text: String,
}

#[derive(ToSchema)]
pub struct GalleryItemDoc {
    pub id: i32,
    /// Public path under `/uploads/`.
    pub filename: String,
    pub hidden: bool,
}

#[derive(ToSchema)]
pub struct HiddenInputDoc { pub hidden: Option<bool> }

#[derive(ToSchema)]
pub struct DocumentDoc {
    pub id: i32,
    pub name: String,
    pub file: String,
}

/// Address, phone and email are required.
#[derive(ToSchema)]
pub struct ContactsDoc {
    pub address: String,
    pub phone: String,
    pub email: String,
    pub website: Option<String>,
    pub work_schedule: Option<String>,
    pub social_media_vk: Option<String>,
    pub social_media_ya: Option<String>,
    pub social_media_two_gis: Option<String>,
}

/// Repeated `files` (or `files[]`) parts.
#[derive(ToSchema)]
pub struct UploadFilesForm {
    #[schema(value_type = Vec<String>, format = Binary)]
    pub files: Vec<Vec<u8>>,
}

#[derive(ToSchema)]
pub struct ReplaceFileForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Declares the `Authorization` header scheme. Requests are not checked
/// against it.
pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "ApiKeyAuth",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("Authorization"))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::services::list,
        crate::routes::services::create,
        crate::routes::services::update,
        crate::routes::gallery::list,
        crate::routes::gallery::upload,
        crate::routes::gallery::update,
        crate::routes::gallery::delete,
        crate::routes::contacts::list,
        crate::routes::contacts::update,
        crate::routes::docs::list,
        crate::routes::docs::upload,
        crate::routes::docs::update,
        crate::routes::docs::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ServiceDoc,
            ServiceInputDoc,
            GalleryItemDoc,
            HiddenInputDoc,
            DocumentDoc,
            ContactsDoc,
            UploadFilesForm,
            ReplaceFileForm,
        )
    ),
    modifiers(&SecurityAddon),
    security(("ApiKeyAuth" = [])),
    tags(
        (name = "health"),
        (name = "services"),
        (name = "gallery"),
        (name = "contacts"),
        (name = "docs")
    )
)]
pub struct ApiDoc;
