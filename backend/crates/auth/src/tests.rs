//! Unit and handler tests for the auth crate

#[cfg(test)]
mod token_tests {
    use chrono::{Duration, Utc};

    use crate::application::config::AuthConfig;
    use crate::application::token::TokenService;
    use crate::domain::value_object::{UserId, user_role::UserRole};
    use crate::error::AuthError;

    #[test]
    fn test_issue_verify_roundtrip() {
        let config = AuthConfig::development();
        let service = TokenService::new(&config);
        let user_id = UserId::new();

        let token = service.issue(&user_id, UserRole::Admin);
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.subject().unwrap(), user_id);
        assert_eq!(claims.user_role().unwrap(), UserRole::Admin);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let config = AuthConfig::development();
        let service = TokenService::new(&config);

        let token = service.issue(&UserId::new(), UserRole::Sales);
        let (payload, signature) = token.split_once('.').unwrap();

        // Flip one character of the payload, keep the signature
        let mut chars: Vec<char> = payload.chars().collect();
        chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
        let tampered: String = chars.into_iter().collect();

        let result = service.verify(&format!("{}.{}", tampered, signature));
        assert!(matches!(result, Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service_a = TokenService::new(&AuthConfig::development());
        let service_b = TokenService::new(&AuthConfig::development());

        let token = service_a.issue(&UserId::new(), UserRole::Sales);
        let result = service_b.verify(&token);

        assert!(matches!(result, Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        let config = AuthConfig::development();
        let service = TokenService::new(&config);

        for token in ["", "no-dot-here", "a.b.c", "%%%.%%%"] {
            let result = service.verify(token);
            assert!(
                matches!(result, Err(AuthError::TokenInvalid)),
                "token {:?} should be invalid",
                token
            );
        }
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = AuthConfig::development();
        let service = TokenService::new(&config);
        let user_id = UserId::new();

        let issued = Utc::now();
        let token = service.issue_at(&user_id, UserRole::Sales, issued);

        // Exactly at expiry the token is already dead
        let at_expiry = issued + Duration::seconds(3600);
        assert!(matches!(
            service.verify_at(&token, at_expiry),
            Err(AuthError::TokenExpired)
        ));

        // Just before expiry it still verifies
        let just_before = issued + Duration::seconds(3599);
        assert!(service.verify_at(&token, just_before).is_ok());
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use argon2::password_hash::{PasswordHasher, SaltString};
    use argon2::{Algorithm, Argon2, Params, Version};

    use crate::application::config::AuthConfig;
    use crate::application::{
        ChangePasswordInput, ChangePasswordUseCase, LoginInput, LoginUseCase, RegisterInput,
        RegisterUseCase,
    };
    use crate::domain::entity::user::User;
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::{
        email::Email,
        user_password::{RawPassword, UserPassword},
        user_role::UserRole,
    };
    use crate::error::AuthError;
    use crate::infra::memory::InMemoryUserRepository;

    fn setup() -> (Arc<InMemoryUserRepository>, Arc<AuthConfig>) {
        (
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(AuthConfig::development()),
        )
    }

    fn register_input(email: &str, password: &str) -> RegisterInput {
        RegisterInput {
            email: email.to_string(),
            password: password.to_string(),
            role: None,
        }
    }

    fn login_input(email: &str, password: &str) -> LoginInput {
        LoginInput {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let (repo, config) = setup();
        let register = RegisterUseCase::new(repo.clone(), config.clone());
        let login = LoginUseCase::new(repo.clone(), config.clone());

        let user = register
            .execute(register_input("alice@example.com", "Sup3rSecret"))
            .await
            .unwrap();

        assert_eq!(user.email.as_str(), "alice@example.com");
        assert_eq!(user.role, UserRole::Sales);
        assert!(user.active);
        assert!(user.last_login_at.is_none());

        let output = login
            .execute(login_input("alice@example.com", "Sup3rSecret"))
            .await
            .unwrap();

        assert!(!output.token.is_empty());
        assert!(output.user.last_login_at.is_some());
    }

    #[tokio::test]
    async fn test_register_normalizes_email() {
        let (repo, config) = setup();
        let register = RegisterUseCase::new(repo.clone(), config.clone());
        let login = LoginUseCase::new(repo.clone(), config.clone());

        register
            .execute(register_input("  Bob@Example.COM ", "Sup3rSecret"))
            .await
            .unwrap();

        // Login with a differently-cased spelling of the same address
        let output = login
            .execute(login_input("bob@example.com", "Sup3rSecret"))
            .await
            .unwrap();
        assert_eq!(output.user.email.as_str(), "bob@example.com");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let (repo, config) = setup();
        let register = RegisterUseCase::new(repo.clone(), config.clone());

        register
            .execute(register_input("alice@example.com", "Sup3rSecret"))
            .await
            .unwrap();

        let result = register
            .execute(register_input("ALICE@example.com", "An0therSecret"))
            .await;
        assert!(matches!(result, Err(AuthError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_store_rejects_concurrent_duplicate_email() {
        // Two registrations can both pass the existence check before
        // either inserts; the store rejects the loser as a duplicate
        let repo = InMemoryUserRepository::new();

        let raw = RawPassword::new("Sup3rSecret".to_string()).unwrap();
        let password_hash = UserPassword::from_raw(&raw, None).unwrap();

        let email = Email::new("alice@example.com".to_string()).unwrap();
        let first = User::new(email.clone(), password_hash.clone(), UserRole::Sales);
        repo.create(&first).await.unwrap();

        let second = User::new(email, password_hash, UserRole::Sales);
        let result = repo.create(&second).await;
        assert!(matches!(result, Err(AuthError::DuplicateEmail)));

        // Rewriting the winner under its own id is not a conflict
        repo.update(&first).await.unwrap();
    }

    #[tokio::test]
    async fn test_register_rejects_weak_passwords() {
        let (repo, config) = setup();
        let register = RegisterUseCase::new(repo.clone(), config.clone());

        // Too short, missing uppercase, missing digit
        for password in ["Ab1", "alllowercase1", "NoDigitsHere"] {
            let result = register
                .execute(register_input("weak@example.com", password))
                .await;
            assert!(
                matches!(result, Err(AuthError::WeakPassword(_))),
                "password {:?} should be rejected",
                password
            );
        }
    }

    #[tokio::test]
    async fn test_register_rejects_unknown_role() {
        let (repo, config) = setup();
        let register = RegisterUseCase::new(repo.clone(), config.clone());

        let result = register
            .execute(RegisterInput {
                email: "carol@example.com".to_string(),
                password: "Sup3rSecret".to_string(),
                role: Some("root".to_string()),
            })
            .await;
        assert!(matches!(result, Err(AuthError::Validation(_))));
    }

    #[tokio::test]
    async fn test_login_failures_are_uniform() {
        let (repo, config) = setup();
        let register = RegisterUseCase::new(repo.clone(), config.clone());
        let login = LoginUseCase::new(repo.clone(), config.clone());

        register
            .execute(register_input("alice@example.com", "Sup3rSecret"))
            .await
            .unwrap();

        // Unknown email and wrong password produce the same variant
        let unknown = login
            .execute(login_input("nobody@example.com", "Sup3rSecret"))
            .await;
        assert!(matches!(unknown, Err(AuthError::InvalidCredentials)));

        let wrong = login
            .execute(login_input("alice@example.com", "WrongSecret1"))
            .await;
        assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_deactivated_user_cannot_login() {
        let (repo, config) = setup();
        let register = RegisterUseCase::new(repo.clone(), config.clone());
        let login = LoginUseCase::new(repo.clone(), config.clone());

        let mut user = register
            .execute(register_input("alice@example.com", "Sup3rSecret"))
            .await
            .unwrap();

        user.deactivate();
        repo.update(&user).await.unwrap();

        // Same variant as wrong credentials, not a dedicated error
        let result = login
            .execute(login_input("alice@example.com", "Sup3rSecret"))
            .await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_change_password() {
        let (repo, config) = setup();
        let register = RegisterUseCase::new(repo.clone(), config.clone());
        let login = LoginUseCase::new(repo.clone(), config.clone());
        let change = ChangePasswordUseCase::new(repo.clone(), config.clone());

        let user = register
            .execute(register_input("alice@example.com", "Sup3rSecret"))
            .await
            .unwrap();

        // Wrong current password
        let result = change
            .execute(
                &user.user_id,
                ChangePasswordInput {
                    current_password: "WrongSecret1".to_string(),
                    new_password: "N3wSecretValue".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(AuthError::IncorrectPassword)));

        // Weak new password
        let result = change
            .execute(
                &user.user_id,
                ChangePasswordInput {
                    current_password: "Sup3rSecret".to_string(),
                    new_password: "short".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(AuthError::WeakPassword(_))));

        // Successful change
        change
            .execute(
                &user.user_id,
                ChangePasswordInput {
                    current_password: "Sup3rSecret".to_string(),
                    new_password: "N3wSecretValue".to_string(),
                },
            )
            .await
            .unwrap();

        let old = login
            .execute(login_input("alice@example.com", "Sup3rSecret"))
            .await;
        assert!(matches!(old, Err(AuthError::InvalidCredentials)));

        login
            .execute(login_input("alice@example.com", "N3wSecretValue"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_login_upgrades_weak_hash() {
        let (repo, config) = setup();
        let login = LoginUseCase::new(repo.clone(), config.clone());

        // Store a hash produced with below-current cost parameters
        let weak_params = Params::new(4096, 2, 1, None).unwrap();
        let weak_argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, weak_params);
        let salt = SaltString::encode_b64(b"staticsalt123456").unwrap();
        let weak_phc = weak_argon2
            .hash_password("Sup3rSecret".as_bytes(), &salt)
            .unwrap()
            .to_string();

        let password_hash = UserPassword::from_phc_string(weak_phc).unwrap();
        assert!(password_hash.needs_rehash());

        let email = Email::new("legacy@example.com".to_string()).unwrap();
        let user = User::new(email.clone(), password_hash, UserRole::Sales);
        repo.create(&user).await.unwrap();

        // Login succeeds and transparently rewrites the stored hash
        login
            .execute(login_input("legacy@example.com", "Sup3rSecret"))
            .await
            .unwrap();

        let stored = repo.find_by_email(&email).await.unwrap().unwrap();
        assert!(!stored.password_hash.needs_rehash());

        // The upgraded hash still verifies the same password
        login
            .execute(login_input("legacy@example.com", "Sup3rSecret"))
            .await
            .unwrap();
    }
}

#[cfg(test)]
mod handler_tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use chrono::{Duration, Utc};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::config::AuthConfig;
    use crate::application::token::TokenService;
    use crate::domain::value_object::{UserId, user_role::UserRole};
    use crate::infra::memory::InMemoryUserRepository;
    use crate::presentation::router::{auth_router_generic, users_router_generic};

    fn app() -> (Router, Arc<InMemoryUserRepository>, Arc<AuthConfig>) {
        let repo = Arc::new(InMemoryUserRepository::new());
        let config = Arc::new(AuthConfig::development());

        let router = Router::new()
            .nest("/api/v1/auth", auth_router_generic(repo.clone(), config.clone()))
            .nest("/api/v1/users", users_router_generic(repo.clone(), config.clone()));

        (router, repo, config)
    }

    fn json_request(method: &str, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn refresh_request(token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri("/api/v1/auth/refresh");

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        builder.body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn register(app: &Router, email: &str, password: &str, role: Option<&str>) -> Value {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/auth/register",
                json!({ "email": email, "password": password, "role": role }),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    async fn login_token(app: &Router, email: &str, password: &str) -> String {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/auth/login",
                json!({ "email": email, "password": password }),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_register_response_shape() {
        let (app, _repo, _config) = app();

        let body = register(&app, "alice@example.com", "Sup3rSecret", None).await;

        assert_eq!(body["user"]["email"], "alice@example.com");
        assert_eq!(body["user"]["role"], "sales");
        assert_eq!(body["user"]["active"], true);

        // The credential hash never leaves the server
        let raw = body.to_string();
        assert!(!raw.contains("password"));
        assert!(!raw.contains("argon2"));
    }

    #[tokio::test]
    async fn test_register_duplicate_is_bad_request() {
        let (app, _repo, _config) = app();

        register(&app, "alice@example.com", "Sup3rSecret", None).await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/auth/register",
                json!({ "email": "alice@example.com", "password": "An0therSecret" }),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_and_refresh() {
        let (app, _repo, _config) = app();

        register(&app, "alice@example.com", "Sup3rSecret", None).await;
        let token = login_token(&app, "alice@example.com", "Sup3rSecret").await;

        let response = app
            .clone()
            .oneshot(refresh_request(Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
        assert_eq!(body["user"]["email"], "alice@example.com");
    }

    #[tokio::test]
    async fn test_login_wrong_password_unauthorized() {
        let (app, _repo, _config) = app();

        register(&app, "alice@example.com", "Sup3rSecret", None).await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/auth/login",
                json!({ "email": "alice@example.com", "password": "WrongSecret1" }),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_protected_route_requires_token() {
        let (app, _repo, _config) = app();

        let missing = app
            .clone()
            .oneshot(refresh_request(None))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

        let garbage = app
            .clone()
            .oneshot(refresh_request(Some("garbage")))
            .await
            .unwrap();
        assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthorized() {
        let (app, _repo, config) = app();

        let body = register(&app, "alice@example.com", "Sup3rSecret", None).await;
        let user_id: UserId = body["user"]["id"].as_str().unwrap().parse().unwrap();

        let issued = Utc::now() - Duration::hours(2);
        let token = TokenService::new(&config).issue_at(&user_id, UserRole::Sales, issued);

        let response = app
            .clone()
            .oneshot(refresh_request(Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_change_password_over_http() {
        let (app, _repo, _config) = app();

        register(&app, "alice@example.com", "Sup3rSecret", None).await;
        let token = login_token(&app, "alice@example.com", "Sup3rSecret").await;

        let response = app
            .clone()
            .oneshot(json_request(
                "PATCH",
                "/api/v1/auth/change-password",
                json!({ "currentPassword": "Sup3rSecret", "newPassword": "N3wSecretValue" }),
                Some(&token),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Old password is no longer accepted
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/auth/login",
                json!({ "email": "alice@example.com", "password": "Sup3rSecret" }),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        login_token(&app, "alice@example.com", "N3wSecretValue").await;
    }

    #[tokio::test]
    async fn test_deactivate_requires_admin() {
        let (app, _repo, _config) = app();

        let target = register(&app, "target@example.com", "Sup3rSecret", None).await;
        let target_id = target["user"]["id"].as_str().unwrap().to_string();

        register(&app, "sales@example.com", "Sup3rSecret", None).await;
        register(&app, "admin@example.com", "Sup3rSecret", Some("admin")).await;

        let sales_token = login_token(&app, "sales@example.com", "Sup3rSecret").await;
        let admin_token = login_token(&app, "admin@example.com", "Sup3rSecret").await;

        // Sales role is rejected
        let response = app
            .clone()
            .oneshot(json_request(
                "PATCH",
                &format!("/api/v1/users/{}/deactivate", target_id),
                json!({}),
                Some(&sales_token),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        // Admin succeeds
        let response = app
            .clone()
            .oneshot(json_request(
                "PATCH",
                &format!("/api/v1/users/{}/deactivate", target_id),
                json!({}),
                Some(&admin_token),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        // The deactivated account is locked out immediately
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/auth/login",
                json!({ "email": "target@example.com", "password": "Sup3rSecret" }),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_deactivated_user_token_stops_working() {
        let (app, _repo, _config) = app();

        let target = register(&app, "target@example.com", "Sup3rSecret", None).await;
        let target_id = target["user"]["id"].as_str().unwrap().to_string();
        let target_token = login_token(&app, "target@example.com", "Sup3rSecret").await;

        register(&app, "admin@example.com", "Sup3rSecret", Some("admin")).await;
        let admin_token = login_token(&app, "admin@example.com", "Sup3rSecret").await;

        let response = app
            .clone()
            .oneshot(json_request(
                "PATCH",
                &format!("/api/v1/users/{}/deactivate", target_id),
                json!({}),
                Some(&admin_token),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        // The still-unexpired token no longer passes the gate
        let response = app
            .clone()
            .oneshot(refresh_request(Some(&target_token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_deactivate_unknown_user_not_found() {
        let (app, _repo, _config) = app();

        register(&app, "admin@example.com", "Sup3rSecret", Some("admin")).await;
        let admin_token = login_token(&app, "admin@example.com", "Sup3rSecret").await;

        let response = app
            .clone()
            .oneshot(json_request(
                "PATCH",
                &format!("/api/v1/users/{}/deactivate", uuid::Uuid::nil()),
                json!({}),
                Some(&admin_token),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

#[cfg(test)]
mod error_tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use crate::error::AuthError;

    #[test]
    fn test_error_status_codes() {
        let cases: Vec<(AuthError, StatusCode)> = vec![
            (AuthError::DuplicateEmail, StatusCode::BAD_REQUEST),
            (
                AuthError::WeakPassword("too short".into()),
                StatusCode::BAD_REQUEST,
            ),
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::IncorrectPassword, StatusCode::UNAUTHORIZED),
            (AuthError::TokenInvalid, StatusCode::UNAUTHORIZED),
            (AuthError::TokenExpired, StatusCode::UNAUTHORIZED),
            (AuthError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (AuthError::Forbidden, StatusCode::FORBIDDEN),
            (AuthError::UserNotFound, StatusCode::NOT_FOUND),
            (
                AuthError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_internal_detail_not_exposed() {
        let error = AuthError::Internal("connection string leaked".into());
        let app_error = error.to_app_error();
        assert_eq!(app_error.message(), "Internal server error");
    }
}

#[cfg(test)]
mod dto_tests {
    use crate::presentation::dto::{ChangePasswordRequest, RegisterRequest, UserView};

    #[test]
    fn test_change_password_request_camel_case() {
        let json = r#"{"currentPassword":"old","newPassword":"new"}"#;
        let request: ChangePasswordRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.current_password, "old");
        assert_eq!(request.new_password, "new");
    }

    #[test]
    fn test_register_request_role_optional() {
        let json = r#"{"email":"a@b.example","password":"Sup3rSecret"}"#;
        let request: RegisterRequest = serde_json::from_str(json).unwrap();
        assert!(request.role.is_none());
    }

    #[test]
    fn test_user_view_serialization() {
        let view = UserView {
            id: "00000000-0000-0000-0000-000000000000".to_string(),
            email: "a@b.example".to_string(),
            role: "sales".to_string(),
            active: true,
            last_login_at: Some(1_700_000_000_000),
        };

        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("lastLoginAt"));
        assert!(!json.contains("password"));
    }
}
