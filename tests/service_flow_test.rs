//! Account and product service behaviour over an in-memory store.

mod common;

use product_api::domain::{NewProduct, ProductPatch};
use product_api::errors::AppError;
use product_api::services::{AccountService, ProductService};

use common::test_services;

#[tokio::test]
async fn test_register_then_login_yields_token_for_same_account() {
    let services = test_services();

    let account = services
        .accounts
        .register("jdoe".into(), "jdoe@example.com".into(), "secret1".into())
        .await
        .unwrap();
    let issued = services
        .accounts
        .login("jdoe@example.com".into(), "secret1".into())
        .await
        .unwrap();

    let claims = services.tokens.validate(&issued.access_token).unwrap();
    assert_eq!(claims.sub, account.id.to_string());
    assert_eq!(issued.token_type, "Bearer");
}

#[tokio::test]
async fn test_register_duplicate_email_creates_nothing() {
    let services = test_services();
    services
        .accounts
        .register("jdoe".into(), "jdoe@example.com".into(), "secret1".into())
        .await
        .unwrap();

    let result = services
        .accounts
        .register("other".into(), "jdoe@example.com".into(), "secret2".into())
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert_eq!(services.gateway.account_count(), 1);
}

#[tokio::test]
async fn test_register_duplicate_username_is_conflict() {
    let services = test_services();
    services
        .accounts
        .register("jdoe".into(), "jdoe@example.com".into(), "secret1".into())
        .await
        .unwrap();

    let result = services
        .accounts
        .register("jdoe".into(), "other@example.com".into(), "secret1".into())
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let services = test_services();
    services
        .accounts
        .register("jdoe".into(), "jdoe@example.com".into(), "secret1".into())
        .await
        .unwrap();

    let wrong_password = services
        .accounts
        .login("jdoe@example.com".into(), "wrong-password".into())
        .await
        .unwrap_err();
    let unknown_email = services
        .accounts
        .login("nobody@example.com".into(), "secret1".into())
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, AppError::InvalidCredentials));
    assert!(matches!(unknown_email, AppError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
async fn test_get_profile() {
    let services = test_services();
    let account = services
        .accounts
        .register("jdoe".into(), "jdoe@example.com".into(), "secret1".into())
        .await
        .unwrap();

    let profile = services.accounts.get_profile(account.id).await.unwrap();
    assert_eq!(profile.email, "jdoe@example.com");

    let missing = services.accounts.get_profile(account.id + 100).await;
    assert!(matches!(missing, Err(AppError::NotFound)));
}

async fn two_owners(services: &common::TestServices) -> (i64, i64) {
    let a = services
        .accounts
        .register("alice".into(), "alice@example.com".into(), "secret1".into())
        .await
        .unwrap();
    let b = services
        .accounts
        .register("bob".into(), "bob@example.com".into(), "secret1".into())
        .await
        .unwrap();
    (a.id, b.id)
}

#[tokio::test]
async fn test_non_owner_update_is_forbidden_and_price_unchanged() {
    let services = test_services();
    let (alice, bob) = two_owners(&services).await;

    let product = services
        .products
        .create(alice, NewProduct::new("widget", Some(String::new()), 9.99))
        .await
        .unwrap();
    assert_eq!(product.description, None);

    let result = services
        .products
        .update(
            product.id,
            bob,
            ProductPatch {
                price: Some(19.99),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::Forbidden)));

    let stored = services.products.get(product.id).await.unwrap();
    assert_eq!(stored.price, 9.99);
}

#[tokio::test]
async fn test_price_only_update_keeps_name_and_description() {
    let services = test_services();
    let (alice, _) = two_owners(&services).await;

    let product = services
        .products
        .create(
            alice,
            NewProduct::new("widget", Some("small".to_string()), 9.99),
        )
        .await
        .unwrap();

    let updated = services
        .products
        .update(
            product.id,
            alice,
            ProductPatch {
                price: Some(19.99),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.price, 19.99);
    assert_eq!(updated.name, "widget");
    assert_eq!(updated.description.as_deref(), Some("small"));
    assert_eq!(updated.owner_id, alice);
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let services = test_services();
    let (alice, bob) = two_owners(&services).await;

    let product = services
        .products
        .create(alice, NewProduct::new("widget", None, 9.99))
        .await
        .unwrap();

    let denied = services.products.delete(product.id, bob).await;
    assert!(matches!(denied, Err(AppError::Forbidden)));

    services.products.delete(product.id, alice).await.unwrap();

    let result = services.products.get(product.id).await;
    assert!(matches!(result, Err(AppError::NotFound)));
    let again = services.products.delete(product.id, alice).await;
    assert!(matches!(again, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_create_with_non_positive_price_stores_nothing() {
    let services = test_services();
    let (alice, _) = two_owners(&services).await;

    for price in [0.0, -0.01, f64::INFINITY] {
        let result = services
            .products
            .create(alice, NewProduct::new("widget", None, price))
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
    assert_eq!(services.gateway.product_count(), 0);
}

#[tokio::test]
async fn test_create_for_unknown_owner_is_unauthorized() {
    let services = test_services();

    let result = services
        .products
        .create(404, NewProduct::new("widget", None, 1.0))
        .await;

    assert!(matches!(result, Err(AppError::Unauthorized)));
}

#[tokio::test]
async fn test_list_by_owner_only_returns_own_products() {
    let services = test_services();
    let (alice, bob) = two_owners(&services).await;

    for name in ["a", "b"] {
        services
            .products
            .create(alice, NewProduct::new(name, None, 1.0))
            .await
            .unwrap();
    }
    services
        .products
        .create(bob, NewProduct::new("c", None, 1.0))
        .await
        .unwrap();

    let mut names: Vec<_> = services
        .products
        .list_by_owner(alice)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    names.sort();

    assert_eq!(names, vec!["a", "b"]);
    assert!(services.products.list_by_owner(999).await.unwrap().is_empty());
}
