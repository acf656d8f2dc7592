mod common;

use axum::http::{Method, StatusCode};
use common::*;
use foodgram::{
    error::AppError,
    services::{
        cart::{aggregate_cart, render_text},
        toggle::ToggleGuard,
    },
};

#[tokio::test]
async fn sums_ingredients_across_recipes_in_cart() {
    let pool = setup_pool().await;
    let author = create_user(&pool, "baker").await;
    let shopper = create_user(&pool, "shopper").await;
    let flour = create_ingredient(&pool, "flour", "g").await;
    let sugar = create_ingredient(&pool, "sugar", "g").await;
    let egg = create_ingredient(&pool, "egg", "pcs").await;

    let cake = create_recipe(
        &pool,
        &author,
        "Cake",
        &[(&flour.id, 200), (&sugar.id, 50)],
        &[],
    )
    .await;
    let pancakes = create_recipe(
        &pool,
        &author,
        "Pancakes",
        &[(&flour.id, 100), (&egg.id, 2)],
        &[],
    )
    .await;

    for recipe in [&cake, &pancakes] {
        ToggleGuard::SHOPPING_CART
            .add(&pool, &shopper.id, &recipe.id)
            .await
            .unwrap();
    }

    let list = aggregate_cart(&pool, &shopper.id).await.unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list["flour"], 300);
    assert_eq!(list["sugar"], 50);
    assert_eq!(list["egg"], 2);

    assert_eq!(
        render_text(&list),
        "Ingredient amount\negg 2\nflour 300\nsugar 50\n"
    );
}

#[tokio::test]
async fn empty_cart_gives_empty_list() {
    let pool = setup_pool().await;
    let shopper = create_user(&pool, "shopper").await;

    let list = aggregate_cart(&pool, &shopper.id).await.unwrap();
    assert!(list.is_empty());
}

#[tokio::test]
async fn repeated_ingredient_lines_in_one_recipe_are_all_counted() {
    let pool = setup_pool().await;
    let author = create_user(&pool, "baker").await;
    let salt = create_ingredient(&pool, "salt", "g").await;
    let recipe = create_recipe(
        &pool,
        &author,
        "Brine",
        &[(&salt.id, 10), (&salt.id, 5)],
        &[],
    )
    .await;

    ToggleGuard::SHOPPING_CART
        .add(&pool, &author.id, &recipe.id)
        .await
        .unwrap();

    let list = aggregate_cart(&pool, &author.id).await.unwrap();
    assert_eq!(list["salt"], 15);
}

#[tokio::test]
async fn cart_reflects_removal_and_other_users_carts_are_separate() {
    let pool = setup_pool().await;
    let author = create_user(&pool, "baker").await;
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;
    let flour = create_ingredient(&pool, "flour", "g").await;
    let milk = create_ingredient(&pool, "milk", "ml").await;
    let bread = create_recipe(&pool, &author, "Bread", &[(&flour.id, 500)], &[]).await;
    let latte = create_recipe(&pool, &author, "Latte", &[(&milk.id, 200)], &[]).await;

    ToggleGuard::SHOPPING_CART.add(&pool, &alice.id, &bread.id).await.unwrap();
    ToggleGuard::SHOPPING_CART.add(&pool, &alice.id, &latte.id).await.unwrap();
    ToggleGuard::SHOPPING_CART.add(&pool, &bob.id, &latte.id).await.unwrap();

    ToggleGuard::SHOPPING_CART
        .remove(&pool, &alice.id, &latte.id)
        .await
        .unwrap();

    let alice_list = aggregate_cart(&pool, &alice.id).await.unwrap();
    assert_eq!(alice_list.len(), 1);
    assert_eq!(alice_list["flour"], 500);

    let bob_list = aggregate_cart(&pool, &bob.id).await.unwrap();
    assert_eq!(bob_list.len(), 1);
    assert_eq!(bob_list["milk"], 200);
}

#[tokio::test]
async fn overflowing_total_is_an_error_not_a_panic() {
    let pool = setup_pool().await;
    let author = create_user(&pool, "baker").await;
    let flour = create_ingredient(&pool, "flour", "g").await;
    let huge = create_recipe(&pool, &author, "Silo", &[(&flour.id, i64::MAX)], &[]).await;
    let pinch = create_recipe(&pool, &author, "Pinch", &[(&flour.id, 1)], &[]).await;

    for recipe in [&huge, &pinch] {
        ToggleGuard::SHOPPING_CART
            .add(&pool, &author.id, &recipe.id)
            .await
            .unwrap();
    }

    let err = aggregate_cart(&pool, &author.id).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let (status, body) = send_json(
        &app(&pool),
        Method::GET,
        "/api/recipes/download_shopping_cart",
        Some(&token_for(&author)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
}
