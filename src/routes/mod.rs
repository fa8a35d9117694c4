//! 라우트 구성
//!
//! 공개 라우트와 인가 미들웨어로 감싼 라우트를 한곳에서 등록합니다.
//! 같은 경로라도 메서드별로 요구 역할이 다르면 리소스를 나눠 감쌉니다.

use crate::handlers;
use crate::middlewares::AuthMiddleware;
use actix_web::{guard, web};
use serde_json::json;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    configure_auth_routes(cfg);
    configure_record_routes(cfg);
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            // 공개
            .route("/register", web::post().to(handlers::auth::register))
            .route("/login", web::post().to(handlers::auth::login))
            .route("/refresh", web::post().to(handlers::auth::refresh))
            // 관리자
            .service(
                web::resource("/principals")
                    .wrap(AuthMiddleware::required_with_role("admin"))
                    .route(web::post().to(handlers::auth::provision))
            )
            // 인증된 주체
            .service(
                web::resource("/me")
                    .wrap(AuthMiddleware::authenticated())
                    .route(web::get().to(handlers::auth::me))
            )
            .service(
                web::resource("/credential")
                    .wrap(AuthMiddleware::authenticated())
                    .route(web::put().to(handlers::auth::change_credential))
            )
    );
}

fn configure_record_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/records")
            .service(
                web::resource("")
                    .guard(guard::Get())
                    .route(web::get().to(handlers::records::list_records))
            )
            .service(
                web::resource("")
                    .guard(guard::Post())
                    .wrap(AuthMiddleware::required_with_roles(vec!["admin", "faculty"]))
                    .route(web::post().to(handlers::records::create_record))
            )
    );
}

#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "lab_records_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use actix_web::{http::StatusCode, test, web, App};
    use chrono::Utc;
    use serde_json::{json, Value};
    use crate::core::clock::ManualClock;
    use crate::services::test_support::memory_state;
    use super::configure_all_routes;

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state.clone()))
                    .configure(configure_all_routes),
            )
            .await
        };
    }

    macro_rules! post_json {
        ($app:expr, $uri:expr, $body:expr) => {
            test::call_service(
                &$app,
                test::TestRequest::post().uri($uri).set_json($body).to_request(),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_health_check() {
        let (state, _) = memory_state(Arc::new(ManualClock::starting_at(Utc::now())));
        let app = app!(state);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_register_login_refresh_flow() {
        let (state, _) = memory_state(Arc::new(ManualClock::starting_at(Utc::now())));
        let app = app!(state);

        let register = json!({ "identifier": "S100", "secret": "pw1-long", "role": "student" });
        assert_eq!(post_json!(app, "/api/v1/auth/register", &register).status(), StatusCode::CREATED);
        assert_eq!(post_json!(app, "/api/v1/auth/register", &register).status(), StatusCode::CONFLICT);

        let resp = post_json!(app, "/api/v1/auth/login", &json!({ "identifier": "S999", "secret": "x" }));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = post_json!(app, "/api/v1/auth/login", &json!({ "identifier": "S100", "secret": "wrong" }));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = post_json!(app, "/api/v1/auth/login", &json!({ "identifier": "S100", "secret": "pw1-long" }));
        assert_eq!(resp.status(), StatusCode::OK);
        let tokens: Value = test::read_body_json(resp).await;
        assert_eq!(tokens["token_type"], "Bearer");

        let resp = post_json!(app, "/api/v1/auth/refresh", &json!({ "refresh_token": tokens["access_token"] }));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "invalid_refresh_token");

        let resp = post_json!(app, "/api/v1/auth/refresh", &json!({ "refresh_token": tokens["refresh_token"] }));
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .insert_header(("Authorization", format!("Bearer {}", tokens["access_token"].as_str().unwrap())))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let me: Value = test::read_body_json(resp).await;
        assert_eq!(me["identifier"], "S100");
        assert!(me.get("credential_hash").is_none());
    }

    #[actix_web::test]
    async fn test_public_registration_cannot_claim_staff_role() {
        let (state, _) = memory_state(Arc::new(ManualClock::starting_at(Utc::now())));
        let app = app!(state);

        let body = json!({ "identifier": "EVIL", "secret": "secret-pw", "role": "admin" });
        let resp = post_json!(app, "/api/v1/auth/register", &body);
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let error: Value = test::read_body_json(resp).await;
        assert_eq!(error["error"], "insufficient_role");

        let resp = post_json!(app, "/api/v1/auth/login", &json!({ "identifier": "EVIL", "secret": "secret-pw" }));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post()
            .uri("/api/v1/records")
            .insert_header(("Authorization", "Bearer not.a.token"))
            .set_json(json!({ "title": "Titration" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_provisioning_requires_admin() {
        let (state, _) = memory_state(Arc::new(ManualClock::starting_at(Utc::now())));
        let app = app!(state);

        let body = json!({ "identifier": "S100", "secret": "secret-pw" });
        assert_eq!(post_json!(app, "/api/v1/auth/register", &body).status(), StatusCode::CREATED);
        let student = state.auth.login("S100", "secret-pw").await.unwrap();

        let faculty = json!({ "identifier": "F200", "secret": "secret-pw", "role": "faculty" });
        assert_eq!(post_json!(app, "/api/v1/auth/principals", &faculty).status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/principals")
            .insert_header(("Authorization", format!("Bearer {}", student.access_token)))
            .set_json(&faculty)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_record_creation_requires_staff_role() {
        let (state, _) = memory_state(Arc::new(ManualClock::starting_at(Utc::now())));
        let app = app!(state);

        state.auth.ensure_admin("A001", "admin-secret").await.unwrap();
        let admin = state.auth.login("A001", "admin-secret").await.unwrap();

        let body = json!({ "identifier": "S100", "secret": "secret-pw" });
        assert_eq!(post_json!(app, "/api/v1/auth/register", &body).status(), StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/principals")
            .insert_header(("Authorization", format!("Bearer {}", admin.access_token)))
            .set_json(json!({ "identifier": "F200", "secret": "secret-pw", "role": "faculty" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        let student = state.auth.login("S100", "secret-pw").await.unwrap();
        let faculty = state.auth.login("F200", "secret-pw").await.unwrap();
        let record = json!({ "title": "Titration", "description": "acid/base" });

        let req = test::TestRequest::post()
            .uri("/api/v1/records")
            .insert_header(("Authorization", format!("Bearer {}", student.access_token)))
            .set_json(&record)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let resp = post_json!(app, "/api/v1/records", &record);
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/v1/records")
            .insert_header(("Authorization", format!("Bearer {}", faculty.access_token)))
            .set_json(&record)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/records").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let records: Value = test::read_body_json(resp).await;
        assert_eq!(records.as_array().map(Vec::len), Some(1));
        assert_eq!(records[0]["created_by"], "F200");

        let req = test::TestRequest::get().uri("/api/v1/records?created_by=S100").to_request();
        let records: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(records.as_array().map(Vec::len), Some(0));
    }
}
