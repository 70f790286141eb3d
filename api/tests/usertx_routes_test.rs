//! Integration tests for the transactional account routes

mod common;

#[cfg(test)]
mod tests {
    use actix_web::test;
    use serde_json::{json, Value};
    use uuid::Uuid;
    use ww_api::create_app;
    use ww_core::domain::entities::{ROLE_ADMIN, ROLE_USER};
    use ww_core::repositories::RecordStore;
    use ww_core::services::TokenMaker;

    use crate::common::{bearer, registration_body, seed_account, test_state, token_for};

    #[actix_web::test]
    async fn test_register_creates_account_profile_and_role() {
        let state = test_state();
        let app = test::init_service(create_app(state.clone())).await;
        let body = registration_body();

        let req = test::TestRequest::post()
            .uri("/usertx")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);

        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["email"], body["email"]);
        assert_eq!(created["city"], "Victoria");
        assert_eq!(created["role_id"], ROLE_USER);
        assert!(created.get("password").is_none());
        assert!(created.get("password_hash").is_none());

        assert_eq!(state.store.account_count().await, 1);
        assert_eq!(state.store.profile_count().await, 1);
        assert_eq!(state.store.role_count().await, 1);
    }

    #[actix_web::test]
    async fn test_register_duplicate_email_is_conflict() {
        let state = test_state();
        let app = test::init_service(create_app(state.clone())).await;
        let body = registration_body();

        let req = test::TestRequest::post().uri("/usertx").set_json(&body).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 201);

        let mut duplicate = registration_body();
        duplicate["email"] = body["email"].clone();
        let req = test::TestRequest::post()
            .uri("/usertx")
            .set_json(&duplicate)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 409);

        let error: Value = test::read_body_json(resp).await;
        assert_eq!(error["error"], "CONFLICT");
        assert_eq!(state.store.account_count().await, 1);
        assert_eq!(state.store.profile_count().await, 1);
        assert_eq!(state.store.role_count().await, 1);
    }

    #[actix_web::test]
    async fn test_register_validation_failure() {
        let state = test_state();
        let app = test::init_service(create_app(state.clone())).await;

        let mut body = registration_body();
        body["password"] = json!("short");
        body["email"] = json!("not-an-email");

        let req = test::TestRequest::post().uri("/usertx").set_json(&body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let error: Value = test::read_body_json(resp).await;
        assert_eq!(error["error"], "VALIDATION_ERROR");
        assert!(error["details"]["password"].is_array());
        assert!(error["details"]["email"].is_array());
        assert_eq!(state.store.account_count().await, 0);
    }

    #[actix_web::test]
    async fn test_register_malformed_json_is_bad_request() {
        let state = test_state();
        let app = test::init_service(create_app(state)).await;

        let req = test::TestRequest::post()
            .uri("/usertx")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{\"username\":")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let error: Value = test::read_body_json(resp).await;
        assert_eq!(error["error"], "BAD_REQUEST");
    }

    #[actix_web::test]
    async fn test_get_self_and_admin_but_not_other() {
        let state = test_state();
        let app = test::init_service(create_app(state.clone())).await;
        let owner = seed_account(&state, ROLE_USER).await;
        let other = seed_account(&state, ROLE_USER).await;
        let admin = seed_account(&state, ROLE_ADMIN).await;

        let uri = format!("/usertx/{}", owner.id());

        let req = test::TestRequest::get()
            .uri(&uri)
            .insert_header(bearer(&token_for(&state, owner.id(), ROLE_USER)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["id"], owner.id().to_string());

        let req = test::TestRequest::get()
            .uri(&uri)
            .insert_header(bearer(&token_for(&state, admin.id(), ROLE_ADMIN)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 200);

        let req = test::TestRequest::get()
            .uri(&uri)
            .insert_header(bearer(&token_for(&state, other.id(), ROLE_USER)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 403);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "FORBIDDEN");
    }

    #[actix_web::test]
    async fn test_get_requires_token() {
        let state = test_state();
        let app = test::init_service(create_app(state.clone())).await;
        let owner = seed_account(&state, ROLE_USER).await;

        let req = test::TestRequest::get()
            .uri(&format!("/usertx/{}", owner.id()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 401);
    }

    #[actix_web::test]
    async fn test_get_with_expired_or_garbage_token_is_indistinguishable() {
        let state = test_state();
        let app = test::init_service(create_app(state.clone())).await;
        let owner = seed_account(&state, ROLE_USER).await;
        let (expired, _) = state
            .tokens
            .create_token(owner.id(), ROLE_USER, chrono::Duration::seconds(-1))
            .unwrap();

        let mut codes = Vec::new();
        for token in [expired.as_str(), "v4.local.garbage"] {
            let req = test::TestRequest::get()
                .uri(&format!("/usertx/{}", owner.id()))
                .insert_header(bearer(token))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 401);

            let body: Value = test::read_body_json(resp).await;
            codes.push(body["error"].clone());
        }

        assert_eq!(codes[0], codes[1]);
        assert_eq!(codes[0], "UNAUTHORIZED");
    }

    #[actix_web::test]
    async fn test_get_with_malformed_id_is_bad_request() {
        let state = test_state();
        let app = test::init_service(create_app(state.clone())).await;
        let admin_token = token_for(&state, Uuid::new_v4(), ROLE_ADMIN);

        let req = test::TestRequest::get()
            .uri("/usertx/not-a-uuid")
            .insert_header(bearer(&admin_token))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 400);
    }

    #[actix_web::test]
    async fn test_update_partial_fields() {
        let state = test_state();
        let app = test::init_service(create_app(state.clone())).await;
        let owner = seed_account(&state, ROLE_USER).await;

        let req = test::TestRequest::put()
            .uri("/usertx")
            .insert_header(bearer(&token_for(&state, owner.id(), ROLE_USER)))
            .set_json(json!({ "id": owner.id(), "city": "Tofino" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["city"], "Tofino");
        assert_eq!(body["email"], owner.email());
        assert_eq!(body["last_name"], owner.result.profile.last_name.as_str());
        assert_eq!(body["role_id"], ROLE_USER);
    }

    #[actix_web::test]
    async fn test_update_password_allows_login_with_new_password() {
        let state = test_state();
        let app = test::init_service(create_app(state.clone())).await;
        let owner = seed_account(&state, ROLE_USER).await;

        let req = test::TestRequest::put()
            .uri("/usertx")
            .insert_header(bearer(&token_for(&state, owner.id(), ROLE_USER)))
            .set_json(json!({ "id": owner.id(), "password": "brand-new-secret" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 200);

        let req = test::TestRequest::post()
            .uri("/users/login")
            .set_json(json!({ "email": owner.email(), "password": "brand-new-secret" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 200);

        let req = test::TestRequest::post()
            .uri("/users/login")
            .set_json(json!({ "email": owner.email(), "password": owner.password }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 401);
    }

    #[actix_web::test]
    async fn test_standard_user_cannot_promote_self() {
        let state = test_state();
        let app = test::init_service(create_app(state.clone())).await;
        let owner = seed_account(&state, ROLE_USER).await;

        let req = test::TestRequest::put()
            .uri("/usertx")
            .insert_header(bearer(&token_for(&state, owner.id(), ROLE_USER)))
            .set_json(json!({ "id": owner.id(), "role_id": ROLE_ADMIN }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 403);

        let role = state.store.get_role(owner.id()).await.unwrap();
        assert_eq!(role.role_id, ROLE_USER);
    }

    #[actix_web::test]
    async fn test_admin_can_change_role() {
        let state = test_state();
        let app = test::init_service(create_app(state.clone())).await;
        let owner = seed_account(&state, ROLE_USER).await;
        let admin = seed_account(&state, ROLE_ADMIN).await;

        let req = test::TestRequest::put()
            .uri("/usertx")
            .insert_header(bearer(&token_for(&state, admin.id(), ROLE_ADMIN)))
            .set_json(json!({ "id": owner.id(), "role_id": ROLE_ADMIN }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["role_id"], ROLE_ADMIN);
    }

    #[actix_web::test]
    async fn test_delete_is_admin_only_and_removes_everything() {
        let state = test_state();
        let app = test::init_service(create_app(state.clone())).await;
        let owner = seed_account(&state, ROLE_USER).await;
        let admin = seed_account(&state, ROLE_ADMIN).await;
        let uri = format!("/usertx/{}", owner.id());

        let req = test::TestRequest::delete()
            .uri(&uri)
            .insert_header(bearer(&token_for(&state, owner.id(), ROLE_USER)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 403);
        assert_eq!(state.store.account_count().await, 2);

        let admin_token = token_for(&state, admin.id(), ROLE_ADMIN);
        let req = test::TestRequest::delete()
            .uri(&uri)
            .insert_header(bearer(&admin_token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["id"], owner.id().to_string());

        assert_eq!(state.store.account_count().await, 1);
        assert_eq!(state.store.profile_count().await, 1);
        assert_eq!(state.store.role_count().await, 1);

        let req = test::TestRequest::get()
            .uri(&uri)
            .insert_header(bearer(&admin_token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "NOT_FOUND");
    }

    #[actix_web::test]
    async fn test_failed_step_leaves_nothing_behind() {
        use ww_core::repositories::FailPoint;

        let state = test_state();
        let app = test::init_service(create_app(state.clone())).await;
        state.store.fail_at(FailPoint::CreateRole);

        let req = test::TestRequest::post()
            .uri("/usertx")
            .set_json(&registration_body())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 500);

        assert_eq!(state.store.account_count().await, 0);
        assert_eq!(state.store.profile_count().await, 0);
        assert_eq!(state.store.role_count().await, 0);
    }
}
