use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::join::{JoinModal, ModalCountdown};
use crate::models::{ClassRecord, DifficultyLevel, Instructor};
use crate::time_status::{ClassStatus, TimeStatus};
use crate::view::{
    ButtonTone, ClassSummary, ClassViewResponse, FeaturedClass, JoinButton, SimilarClassCard,
};

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
        components.add_security_scheme(
            "query_token",
            SecurityScheme::ApiKey(ApiKey::Query(ApiKeyValue::new("token"))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz_live,
        crate::handlers::healthz_ready,
        crate::handlers::list_classes,
        crate::handlers::class_view,
        crate::handlers::join_class,
        crate::handlers::countdown,
        crate::handlers::get_ical
    ),
    components(schemas(
        ClassRecord,
        Instructor,
        DifficultyLevel,
        TimeStatus,
        ClassStatus,
        ClassSummary,
        FeaturedClass,
        SimilarClassCard,
        ClassViewResponse,
        JoinButton,
        ButtonTone,
        JoinModal,
        ModalCountdown
    )),
    tags(
        (name = "classes", description = "Live fitness class operations")
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;
