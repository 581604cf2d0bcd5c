use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::auth::login,
        api::users::list_users,
        api::users::create_user,
        api::users::get_user,
        api::books::list_books,
        api::books::create_book,
        api::books::get_book,
        api::matching::run_matching,
        api::matches::list_matches,
        api::matches::school_matches,
        api::matches::donor_matches,
        api::matches::update_match_status,
    ),
    components(
        schemas(
            crate::models::User,
            crate::models::UserRole,
            crate::models::Book,
            crate::models::Match,
            crate::models::MatchStatus,
            crate::domain::CreateUserInput,
            crate::domain::CreateBookInput,
            api::auth::LoginRequest,
            api::auth::LoginResponse,
            api::matching::MatchingRunResponse,
            api::matches::StatusUpdate,
            crate::services::matching_service::CreatedMatch,
            crate::services::match_service::SchoolMatchView,
            crate::services::match_service::DonorMatchView,
        )
    ),
    tags(
        (name = "books4all", description = "Books4All donation matching API")
    )
)]
pub struct ApiDoc;
