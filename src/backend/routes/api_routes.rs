/**
 * API Routes
 *
 * # Routes
 *
 * ## Accounts
 * - `POST /accounts/register` - Multipart registration (body capped at `max_upload_bytes`)
 * - `POST /accounts/login` - Login, returns a token
 * - `GET /accounts` - Paginated account list (requires authentication)
 *
 * ## Courses
 * - `GET /courses` - Paginated course list
 * - `POST /courses` - Create (requires authentication)
 * - `GET /courses/{course_id}` - Fetch one
 * - `PATCH /courses/{course_id}` - Partial update (requires authentication)
 * - `DELETE /courses/{course_id}` - Delete (requires authentication and an ADMIN or MANAGER role)
 *
 * Gates are attached with `route_layer`, so they only run for matched
 * methods. The auth layer is added last and therefore runs first.
 */

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post},
    Router,
};

use crate::backend::auth::handlers::{list_accounts, login, register};
use crate::backend::courses::handlers::{add_course, delete_course, get_course, list_courses, update_course};
use crate::backend::middleware::{auth_middleware, role_middleware, COURSE_ADMINS};
use crate::backend::server::state::AppState;

/// Configure the `/accounts` routes
pub fn configure_account_routes(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    let auth = from_fn_with_state(state.tokens.clone(), auth_middleware);

    router
        .route(
            "/accounts/register",
            post(register).layer(DefaultBodyLimit::max(state.max_upload_bytes)),
        )
        .route("/accounts/login", post(login))
        .route("/accounts", get(list_accounts).route_layer(auth))
}

/// Configure the `/courses` routes
pub fn configure_course_routes(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    let auth = from_fn_with_state(state.tokens.clone(), auth_middleware);
    let admins = from_fn_with_state(COURSE_ADMINS, role_middleware);

    router
        .route(
            "/courses",
            get(list_courses).merge(post(add_course).route_layer(auth.clone())),
        )
        .route(
            "/courses/{course_id}",
            get(get_course)
                .merge(patch(update_course).route_layer(auth.clone()))
                .merge(delete(delete_course).route_layer(admins).route_layer(auth)),
        )
}

/// Configure every API route
pub fn configure_api_routes(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    let router = configure_account_routes(router, state);
    configure_course_routes(router, state)
}
