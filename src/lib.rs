//! # Foodgram 백엔드 라이브러리
//!
//! 레시피 공유 서비스의 HTTP API입니다. 사용자는 레시피를 올리고,
//! 다른 사람의 레시피를 즐겨찾기/장바구니에 담고, 작성자를 구독할 수 있습니다.
//! 장바구니에 담긴 레시피들의 재료는 하나의 쇼핑 목록으로 합산해 내려받습니다.
//!
//! 실행 파일(main.rs)과 통합 테스트(tests/)가 같은 라우터를 쓰도록
//! 라우터 구성은 이 크레이트의 `build_router`에 모여 있습니다.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use routes::{auth, AppState};

/// `/api` 아래에 모든 엔드포인트를 연결한 라우터를 만듭니다.
///
/// `download_shopping_cart`, `me`, `subscriptions`, `set_password` 같은 고정 경로는
/// `{id}` 경로 파라미터보다 우선해서 매칭됩니다.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // 로그인 (토큰 발급)
        .route("/auth/token/login", post(auth::login))
        // 사용자와 구독
        .route("/users", get(routes::list_users).post(routes::sign_up))
        .route("/users/me", get(routes::me))
        .route("/users/set_password", post(routes::set_password))
        .route("/users/subscriptions", get(routes::list_subscriptions))
        .route("/users/{id}", get(routes::get_user))
        .route(
            "/users/{id}/subscribe",
            post(routes::subscribe).delete(routes::unsubscribe),
        )
        // 태그/재료 (읽기 전용)
        .route("/tags", get(routes::list_tags))
        .route("/tags/{id}", get(routes::get_tag))
        .route("/ingredients", get(routes::list_ingredients))
        .route("/ingredients/{id}", get(routes::get_ingredient))
        // 레시피, 즐겨찾기, 장바구니
        .route(
            "/recipes",
            get(routes::list_recipes).post(routes::create_recipe),
        )
        .route(
            "/recipes/download_shopping_cart",
            get(routes::download_shopping_cart),
        )
        .route(
            "/recipes/{id}",
            get(routes::get_recipe)
                .patch(routes::update_recipe)
                .delete(routes::delete_recipe),
        )
        .route(
            "/recipes/{id}/favorite",
            post(routes::add_favorite).delete(routes::remove_favorite),
        )
        .route(
            "/recipes/{id}/shopping_cart",
            post(routes::add_to_shopping_cart).delete(routes::remove_from_shopping_cart),
        )
        // 헬스체크
        .route("/health", get(routes::health_check))
        .with_state(state);

    // 개발 환경 기준으로 모든 출처/메서드/헤더를 허용합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
