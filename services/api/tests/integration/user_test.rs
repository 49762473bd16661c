use snooze_api::error::ApiError;
use snooze_api::usecase::user::{
    CreateUserInput, CreateUserUseCase, DeleteUserUseCase, GetUserUseCase, UpdateUserInput,
    UpdateUserUseCase,
};

use crate::helpers::{FakeHasher, MockStoryRepo, MockUserRepo, test_story, test_user};

fn update(
    users: MockUserRepo,
    stories: MockStoryRepo,
) -> UpdateUserUseCase<MockUserRepo, MockStoryRepo, FakeHasher> {
    UpdateUserUseCase {
        users,
        stories,
        hasher: FakeHasher,
    }
}

fn patch(name: Option<&str>, password: Option<&str>, phone: Option<&str>) -> UpdateUserInput {
    UpdateUserInput {
        name: name.map(str::to_owned),
        password: password.map(str::to_owned),
        phone: phone.map(str::to_owned),
    }
}

#[tokio::test]
async fn name_change_cascades_to_authored_stories() {
    let users = MockUserRepo::new(vec![
        test_user("bob", "Bobby", None),
        test_user("jas", "Jason", None),
    ]);
    let stories = MockStoryRepo::new(vec![
        test_story(1, "How to eat cookies.", "Bobby", "bob"),
        test_story(2, "Badminton? What is that?", "Jason", "jas"),
        test_story(3, "How to eat fruit.", "Bobby", "bob"),
    ]);
    let stories_handle = stories.stories_handle();

    let detail = update(users, stories)
        .execute("bob", patch(Some("Bobby-O"), None, None))
        .await
        .unwrap();

    // The response re-fetches, so the cascade is visible immediately.
    assert_eq!(detail.user.name, "Bobby-O");
    assert_eq!(detail.stories.len(), 2);
    assert!(detail.stories.iter().all(|s| s.author == "Bobby-O"));

    // Only bob's stories were touched.
    let all = stories_handle.lock().unwrap();
    assert!(all.iter().filter(|s| s.username == "bob").all(|s| s.author == "Bobby-O"));
    assert_eq!(
        all.iter().find(|s| s.username == "jas").unwrap().author,
        "Jason"
    );
}

#[tokio::test]
async fn phone_only_patch_does_not_touch_story_authors() {
    let users = MockUserRepo::new(vec![test_user("bob", "Bobby", None)]);
    let stories = MockStoryRepo::new(vec![test_story(1, "A story", "Bobby", "bob")]);
    let stories_handle = stories.stories_handle();

    update(users, stories)
        .execute("bob", patch(None, None, Some("(415) 123-1234")))
        .await
        .unwrap();

    assert_eq!(stories_handle.lock().unwrap()[0].author, "Bobby");
}

#[tokio::test]
async fn patch_normalizes_phone_to_e164() {
    let users = MockUserRepo::new(vec![test_user("bob", "Bobby", None)]);

    let detail = update(users, MockStoryRepo::empty())
        .execute("bob", patch(None, None, Some("(415) 123-1234")))
        .await
        .unwrap();

    assert_eq!(detail.user.phone.as_deref(), Some("+14151231234"));
}

#[tokio::test]
async fn patch_with_invalid_phone_fails() {
    let users = MockUserRepo::new(vec![test_user("bob", "Bobby", None)]);

    let result = update(users, MockStoryRepo::empty())
        .execute("bob", patch(None, None, Some("not a phone")))
        .await;

    assert!(matches!(result, Err(ApiError::InvalidPhone)));
}

#[tokio::test]
async fn patch_hashes_password_before_storing() {
    let users = MockUserRepo::new(vec![test_user("bob", "Bobby", None)]);
    let hashes = users.hashes_handle();

    update(users, MockStoryRepo::empty())
        .execute("bob", patch(None, Some("hunter2"), None))
        .await
        .unwrap();

    assert_eq!(
        hashes.lock().unwrap().get("bob").map(String::as_str),
        Some("$fake$hunter2")
    );
}

#[tokio::test]
async fn empty_patch_returns_missing_data() {
    let users = MockUserRepo::new(vec![test_user("bob", "Bobby", None)]);

    let result = update(users, MockStoryRepo::empty())
        .execute("bob", patch(None, None, None))
        .await;

    assert!(matches!(result, Err(ApiError::MissingData)));
}

#[tokio::test]
async fn patch_of_unknown_user_returns_not_found() {
    let result = update(MockUserRepo::empty(), MockStoryRepo::empty())
        .execute("jeremy", patch(Some("x"), None, None))
        .await;

    assert!(matches!(result, Err(ApiError::UserNotFound)));
}

#[tokio::test]
async fn create_rejects_duplicate_username() {
    let users = MockUserRepo::new(vec![test_user("bob", "Bobby", None)]);
    let uc = CreateUserUseCase {
        users,
        hasher: FakeHasher,
    };

    let result = uc
        .execute(CreateUserInput {
            username: "bob".into(),
            name: "Other Bob".into(),
            password: "123456".into(),
            phone: None,
        })
        .await;

    assert!(matches!(result, Err(ApiError::UserExists)));
}

#[tokio::test]
async fn create_normalizes_phone_and_hashes_password() {
    let users = MockUserRepo::empty();
    let hashes = users.hashes_handle();
    let uc = CreateUserUseCase {
        users,
        hasher: FakeHasher,
    };

    let detail = uc
        .execute(CreateUserInput {
            username: "jim".into(),
            name: "Jimmy".into(),
            password: "123456".into(),
            phone: Some("415.123.1234".into()),
        })
        .await
        .unwrap();

    assert_eq!(detail.user.phone.as_deref(), Some("+14151231234"));
    assert!(detail.stories.is_empty());
    assert!(detail.favorites.is_empty());
    assert_eq!(
        hashes.lock().unwrap().get("jim").map(String::as_str),
        Some("$fake$123456")
    );
}

#[tokio::test]
async fn get_user_includes_authored_stories() {
    let users = MockUserRepo::new(vec![test_user("bob", "Bobby", None)]);
    let stories = MockStoryRepo::new(vec![
        test_story(1, "A story", "Bobby", "bob"),
        test_story(2, "Not bob's", "Jason", "jas"),
    ]);

    let detail = GetUserUseCase { users, stories }.execute("bob").await.unwrap();

    assert_eq!(detail.user.username, "bob");
    assert_eq!(detail.stories.len(), 1);
}

#[tokio::test]
async fn get_unknown_user_returns_not_found() {
    let result = GetUserUseCase {
        users: MockUserRepo::empty(),
        stories: MockStoryRepo::empty(),
    }
    .execute("jim")
    .await;

    assert!(matches!(result, Err(ApiError::UserNotFound)));
}

#[tokio::test]
async fn delete_unknown_user_returns_not_found() {
    let result = DeleteUserUseCase {
        users: MockUserRepo::empty(),
    }
    .execute("jim")
    .await;

    assert!(matches!(result, Err(ApiError::UserNotFound)));
}
