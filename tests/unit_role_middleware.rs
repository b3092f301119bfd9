use classroll::middleware::auth::AuthUser;
use classroll::middleware::role::{check_any_role, check_role};
use classroll_auth::{Claims, Role};
use classroll_core::ErrorKind;

fn create_test_auth_user(role: Role) -> AuthUser {
    let claims = Claims {
        sub: "12".to_string(),
        email: "test@example.com".to_string(),
        role,
        iss: "classroll".to_string(),
        aud: "classroll-web".to_string(),
        exp: 9999999999,
        iat: 1234567890,
    };
    AuthUser(claims)
}

#[test]
fn test_auth_user_accessors() {
    let auth_user = create_test_auth_user(Role::Student);
    assert_eq!(auth_user.student_id().unwrap(), 12);
    assert_eq!(auth_user.email(), "test@example.com");
    assert_eq!(auth_user.role(), Role::Student);
    assert!(!auth_user.is_administrator());
}

#[test]
fn test_non_numeric_subject_is_unauthorized() {
    let mut auth_user = create_test_auth_user(Role::Student);
    auth_user.0.sub = "not-a-number".to_string();
    let err = auth_user.student_id().unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);
}

#[test]
fn test_check_role_exact_match() {
    let admin = create_test_auth_user(Role::Administrator);
    assert!(check_role(&admin, Role::Administrator).is_ok());

    let student = create_test_auth_user(Role::Student);
    assert!(check_role(&student, Role::Student).is_ok());
}

#[test]
fn test_check_role_no_match_is_forbidden() {
    let student = create_test_auth_user(Role::Student);
    let err = check_role(&student, Role::Administrator).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);

    let admin = create_test_auth_user(Role::Administrator);
    assert!(check_role(&admin, Role::Student).is_err());
}

#[test]
fn test_check_any_role() {
    let allowed = [Role::Administrator, Role::Student];
    assert!(check_any_role(&create_test_auth_user(Role::Student), &allowed).is_ok());
    assert!(check_any_role(&create_test_auth_user(Role::Administrator), &allowed).is_ok());

    let admins_only = [Role::Administrator];
    assert!(check_any_role(&create_test_auth_user(Role::Student), &admins_only).is_err());
}

#[test]
fn test_check_any_role_empty() {
    assert!(check_any_role(&create_test_auth_user(Role::Administrator), &[]).is_err());
}
