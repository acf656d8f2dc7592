mod common;

use common::*;
use foodgram::{
    db,
    error::AppError,
    models::{CreateIngredient, CreateTag, TagColor},
};

fn tag(name: &str, slug: Option<&str>) -> CreateTag {
    CreateTag {
        name: name.to_string(),
        color: None,
        slug: slug.map(str::to_string),
    }
}

#[tokio::test]
async fn slug_is_derived_from_cyrillic_name() {
    let pool = setup_pool().await;

    let created = db::create_tag(
        &pool,
        &CreateTag {
            name: "Завтрак".to_string(),
            color: Some(TagColor::Ginger),
            slug: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(created.slug, "zavtrak");
    assert_eq!(created.color, Some(TagColor::Ginger));
}

#[tokio::test]
async fn explicit_slug_with_disallowed_characters_is_rejected() {
    let pool = setup_pool().await;

    let err = db::create_tag(&pool, &tag("Lunch", Some("has space!")))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(db::list_tags(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn name_without_sluggable_characters_is_rejected() {
    let pool = setup_pool().await;

    let err = db::create_tag(&pool, &tag("!!!", None)).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert!(db::list_tags(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_tag_slug_conflicts() {
    let pool = setup_pool().await;
    create_tag(&pool, "Dinner", "dinner").await;

    let err = db::create_tag(&pool, &tag("Supper", Some("dinner")))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn ingredient_with_empty_unit_is_rejected() {
    let pool = setup_pool().await;

    let err = db::create_ingredient(
        &pool,
        &CreateIngredient {
            name: "salt".to_string(),
            measurement_unit: String::new(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(db::list_ingredients(&pool, None).await.unwrap().is_empty());
}
