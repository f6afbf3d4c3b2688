//! 会话与资源查询集成测试

use std::sync::Arc;

use dify_adapter_fixture::FixtureDataSource;
use dify_adapter_storage::MemorySessionStore;
use dify_auth_core::{Actor, GuardDecision, SessionKind};
use dify_common::Resource;
use dify_errors::AppError;
use dify_ports::SessionStore;
use licensing_console::application::{ResourceService, SessionService, required_role};
use serde_json::json;

fn session() -> SessionService {
    let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
    SessionService::new(store)
}

fn resources() -> ResourceService {
    let fixtures = FixtureDataSource::from_json(json!({
        "licenses": [
            {"LicenseId": "L-1", "LicenseType": "STANDARD"},
            {"LicenseId": "L-2", "LicenseType": "BASIC"},
            {"LicenseId": "L-3", "LicenseType": "ENTERPRISE"}
        ],
        "sales-reps": [{"id": 1, "name": "Li"}]
    }))
    .unwrap();
    ResourceService::new(Arc::new(fixtures), 2)
}

#[test]
fn test_whoami_without_session() {
    let me = session().whoami();
    assert!(!me.logged_in);
    assert_eq!(me.kind, SessionKind::Staff);
    assert!(me.actor.is_none());
    assert!(!me.is_admin);
}

#[test]
fn test_staff_login_then_whoami() {
    let session = session();
    let actor = session
        .login_staff(
            "tok",
            r#"{"UserID": 12, "FullName": "Zhang San", "Role": "sales_rep", "sales_rep_id": "SR-9"}"#,
        )
        .unwrap();
    assert!(matches!(actor, Actor::Staff(_)));

    let me = session.whoami();
    assert!(me.logged_in);
    assert!(!me.is_admin);
    assert_eq!(me.user_id.as_deref(), Some("12"));
    assert_eq!(me.sales_rep_id.as_deref(), Some("SR-9"));
    assert!(me.partner_id.is_none());

    assert_eq!(session.guard(Some("sales_rep")), GuardDecision::Allow);
    assert_eq!(session.guard(Some("engineer")), GuardDecision::ShowForbidden);
}

#[test]
fn test_partner_login_switches_kind() {
    let session = session();
    session
        .login_staff("tok", r#"{"UserID": 1, "Role": "admin"}"#)
        .unwrap();
    session
        .login_partner("ptok", r#"{"PartnerID": "P-7", "PartnerName": "Acme"}"#)
        .unwrap();

    let me = session.whoami();
    assert_eq!(me.kind, SessionKind::Partner);
    assert_eq!(me.partner_id.as_deref(), Some("P-7"));
    assert!(me.user_id.is_none());

    session.logout().unwrap();
    assert_eq!(session.guard(None), GuardDecision::RedirectToLogin);
}

#[tokio::test]
async fn test_list_requires_login() {
    let err = resources()
        .list(&session(), Resource::Licenses, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[tokio::test]
async fn test_list_paginates_with_configured_page_size() {
    let session = session();
    session
        .login_staff("tok", r#"{"UserID": 1, "Role": "engineer"}"#)
        .unwrap();

    let page = resources()
        .list(&session, Resource::Licenses, 2)
        .await
        .unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0]["LicenseId"], "L-3");
}

#[tokio::test]
async fn test_admin_only_resources() {
    assert_eq!(required_role(Resource::SalesReps), Some("admin"));
    assert_eq!(required_role(Resource::Licenses), None);

    let session = session();
    session
        .login_staff("tok", r#"{"UserID": 1, "Role": "engineer"}"#)
        .unwrap();
    let err = resources()
        .list(&session, Resource::SalesReps, 1)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    session
        .login_staff("tok", r#"{"UserID": 2, "Role": "admin"}"#)
        .unwrap();
    let rep = resources()
        .get(&session, Resource::SalesReps, "1")
        .await
        .unwrap();
    assert_eq!(rep["name"], "Li");

    let err = resources()
        .get(&session, Resource::SalesReps, "99")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
