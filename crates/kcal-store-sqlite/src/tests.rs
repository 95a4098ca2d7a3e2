//! Integration tests for `SqliteStore` against an in-memory database.

use kcal_core::{
  ValidationError,
  food::{NewFood, daily_total},
  store::DiaryStore,
  user::{NewUser, UserPatch},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn ana() -> NewUser {
  NewUser {
    name:     "Ana".into(),
    email:    "ana@x.com".into(),
    password: "secret1".into(),
  }
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_find_user_roundtrip() {
  let s = store().await;

  let id = s.create_user(ana()).await.unwrap();

  let user = s.find_user_by_email("ana@x.com").await.unwrap().unwrap();
  assert_eq!(user.id, id);
  assert_eq!(user.name, "Ana");
  assert_eq!(user.email, "ana@x.com");
  assert_eq!(user.password, "secret1");
  assert_eq!(user.calorie_goal, None);

  // The assigned id is stable across reads.
  let again = s.find_user_by_email("ana@x.com").await.unwrap().unwrap();
  assert_eq!(again.id, id);
}

#[tokio::test]
async fn find_user_missing_returns_none() {
  let s = store().await;
  let result = s.find_user_by_email("nobody@x.com").await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn find_user_email_is_case_sensitive() {
  let s = store().await;
  s.create_user(ana()).await.unwrap();

  assert!(s.find_user_by_email("Ana@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_emails_first_row_wins() {
  let s = store().await;

  let first = s.create_user(ana()).await.unwrap();
  s.create_user(NewUser {
    name:     "Other Ana".into(),
    email:    "ana@x.com".into(),
    password: "different".into(),
  })
  .await
  .unwrap();

  let found = s.find_user_by_email("ana@x.com").await.unwrap().unwrap();
  assert_eq!(found.id, first);
  assert_eq!(found.password, "secret1");
}

#[tokio::test]
async fn update_user_partial_fields() {
  let s = store().await;
  let id = s.create_user(ana()).await.unwrap();

  s.update_user(id, UserPatch { name: Some("Ana Maria".into()), ..Default::default() })
    .await
    .unwrap();

  let user = s.find_user_by_email("ana@x.com").await.unwrap().unwrap();
  assert_eq!(user.name, "Ana Maria");
  // Untouched columns survive.
  assert_eq!(user.email, "ana@x.com");
  assert_eq!(user.password, "secret1");
}

#[tokio::test]
async fn update_user_all_fields() {
  let s = store().await;
  let id = s.create_user(ana()).await.unwrap();

  s.update_user(
    id,
    UserPatch {
      name:     Some("Ana B".into()),
      email:    Some("ana.b@x.com".into()),
      password: Some("secret2".into()),
    },
  )
  .await
  .unwrap();

  assert!(s.find_user_by_email("ana@x.com").await.unwrap().is_none());
  let user = s.find_user_by_email("ana.b@x.com").await.unwrap().unwrap();
  assert_eq!(user.name, "Ana B");
  assert_eq!(user.password, "secret2");
}

#[tokio::test]
async fn update_user_empty_patch_is_noop() {
  let s = store().await;

  // Even a nonexistent id succeeds: the store is never reached.
  s.update_user(9999, UserPatch::default()).await.unwrap();
}

#[tokio::test]
async fn update_user_unknown_id_errors() {
  let s = store().await;

  let err = s
    .update_user(9999, UserPatch { name: Some("Ghost".into()), ..Default::default() })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::UserNotFound(9999)));
}

#[tokio::test]
async fn update_password_by_email_reports_rows_affected() {
  let s = store().await;
  s.create_user(ana()).await.unwrap();

  let changed = s.update_password_by_email("ana@x.com", "reset1").await.unwrap();
  assert_eq!(changed, 1);

  let user = s.find_user_by_email("ana@x.com").await.unwrap().unwrap();
  assert_eq!(user.password, "reset1");

  let none = s.update_password_by_email("nobody@x.com", "reset1").await.unwrap();
  assert_eq!(none, 0);
}

#[tokio::test]
async fn update_password_by_email_hits_every_duplicate() {
  let s = store().await;
  s.create_user(ana()).await.unwrap();
  s.create_user(NewUser {
    name:     "Other Ana".into(),
    email:    "ana@x.com".into(),
    password: "different".into(),
  })
  .await
  .unwrap();

  let changed = s.update_password_by_email("ana@x.com", "reset1").await.unwrap();
  assert_eq!(changed, 2);
}

#[tokio::test]
async fn update_calorie_goal_roundtrip() {
  let s = store().await;
  let id = s.create_user(ana()).await.unwrap();

  assert!(s.update_calorie_goal(id, 1800).await.unwrap());

  let user = s.find_user_by_email("ana@x.com").await.unwrap().unwrap();
  assert_eq!(user.calorie_goal, Some(1800));

  assert!(!s.update_calorie_goal(9999, 1800).await.unwrap());
}

#[tokio::test]
async fn search_user_rejects_empty_credentials() {
  let s = store().await;

  let err = s.search_user("", "secret1").await.unwrap_err();
  assert!(matches!(
    err,
    Error::Validation(ValidationError::MissingCredentials)
  ));

  let err = s.search_user("ana@x.com", "").await.unwrap_err();
  assert!(matches!(
    err,
    Error::Validation(ValidationError::MissingCredentials)
  ));
}

#[tokio::test]
async fn search_user_matches_on_both_fields() {
  let s = store().await;
  s.create_user(ana()).await.unwrap();

  let hits = s.search_user("ana@x.com", "secret1").await.unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].name, "Ana");

  // Wrong password: empty result, not an error.
  let misses = s.search_user("ana@x.com", "wrong").await.unwrap();
  assert!(misses.is_empty());
}

// ─── Foods ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_food_and_list_today() {
  let s = store().await;
  let owner = s.create_user(ana()).await.unwrap();

  let id = s
    .create_food(NewFood { name: "Apple".into(), calories: 52, owner_id: owner })
    .await
    .unwrap();

  let foods = s.list_foods_for_today(owner).await.unwrap();
  assert_eq!(foods.len(), 1);
  assert_eq!(foods[0].id, id);
  assert_eq!(foods[0].name, "Apple");
  assert_eq!(foods[0].calories, 52);
  assert_eq!(foods[0].owner_id, owner);
}

#[tokio::test]
async fn create_food_rejects_non_positive_calories() {
  let s = store().await;
  let owner = s.create_user(ana()).await.unwrap();

  for bad in [0, -52] {
    let err = s
      .create_food(NewFood { name: "Apple".into(), calories: bad, owner_id: owner })
      .await
      .unwrap_err();
    assert!(matches!(
      err,
      Error::Validation(ValidationError::NonPositiveCalories(c)) if c == bad
    ));
  }

  assert!(s.list_foods_for_today(owner).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_foods_is_scoped_to_owner() {
  let s = store().await;
  let ana_id = s.create_user(ana()).await.unwrap();
  let bob_id = s
    .create_user(NewUser {
      name:     "Bob".into(),
      email:    "bob@x.com".into(),
      password: "hunter2".into(),
    })
    .await
    .unwrap();

  s.create_food(NewFood { name: "Apple".into(), calories: 52, owner_id: ana_id })
    .await
    .unwrap();
  s.create_food(NewFood { name: "Burger".into(), calories: 540, owner_id: bob_id })
    .await
    .unwrap();

  let anas = s.list_foods_for_today(ana_id).await.unwrap();
  assert_eq!(anas.len(), 1);
  assert_eq!(anas[0].name, "Apple");

  let bobs = s.list_foods_for_today(bob_id).await.unwrap();
  assert_eq!(bobs.len(), 1);
  assert_eq!(bobs[0].name, "Burger");
}

#[tokio::test]
async fn list_foods_preserves_insertion_order() {
  let s = store().await;
  let owner = s.create_user(ana()).await.unwrap();

  for (name, calories) in [("Apple", 52), ("Rice", 206), ("Banana", 89)] {
    s.create_food(NewFood { name: name.into(), calories, owner_id: owner })
      .await
      .unwrap();
  }

  let foods = s.list_foods_for_today(owner).await.unwrap();
  let names: Vec<_> = foods.iter().map(|f| f.name.as_str()).collect();
  assert_eq!(names, ["Apple", "Rice", "Banana"]);
  assert_eq!(daily_total(&foods), 347);
}

#[tokio::test]
async fn delete_food_removes_entry() {
  let s = store().await;
  let owner = s.create_user(ana()).await.unwrap();

  let id = s
    .create_food(NewFood { name: "Apple".into(), calories: 52, owner_id: owner })
    .await
    .unwrap();

  assert!(s.delete_food(id).await.unwrap());
  assert!(s.list_foods_for_today(owner).await.unwrap().is_empty());

  // Deleting again: no row, no error.
  assert!(!s.delete_food(id).await.unwrap());
}
