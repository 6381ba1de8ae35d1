use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct WelcomeDoc { pub message: String }

#[derive(ToSchema)]
pub struct ItemDoc { pub text: String, pub is_done: bool }

#[derive(ToSchema)]
pub struct NewItemDoc {
    pub text: String,
    /// defaults to `false`
    pub is_done: Option<bool>,
}

#[derive(ToSchema)]
pub struct NotFoundDoc {
    /// `Item {item_id} not found`
    pub detail: String,
}

#[derive(Serialize, ToSchema)]
pub struct FieldErrorDoc {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(ToSchema)]
pub struct ValidationErrorDoc { pub detail: Vec<FieldErrorDoc> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::root,
        crate::routes::health,
        crate::routes::items::create_item,
        crate::routes::items::list_items,
        crate::routes::items::read_item,
    ),
    components(
        schemas(
            HealthResponse,
            WelcomeDoc,
            ItemDoc,
            NewItemDoc,
            NotFoundDoc,
            FieldErrorDoc,
            ValidationErrorDoc,
        )
    ),
    tags(
        (name = "root"),
        (name = "health"),
        (name = "items")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_item_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();
        for p in ["/", "/health", "/items", "/items/{item_id}"] {
            assert!(paths.iter().any(|k| k == p), "missing path {p}");
        }
    }
}
