// tests/store_test.rs


use concierge::store::{run_migrations, ChatStore, CourseStore, SessionStore};

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let pool = test_helpers::test_pool().await;
    run_migrations(&pool).await.expect("Second run failed");
}

#[tokio::test]
async fn test_chat_and_message_roundtrip() {
    let pool = test_helpers::test_pool().await;
    let store = ChatStore::new(pool);

    store
        .create_chat("chat-1", "user-1", "Vegas CME trip")
        .await
        .expect("Failed to create chat");

    let chat = store
        .get_chat("chat-1")
        .await
        .expect("Failed to load chat")
        .expect("Chat missing");
    assert_eq!(chat.user_id, "user-1");
    assert_eq!(chat.title, "Vegas CME trip");

    store
        .save_message("m1", "chat-1", "user", "Find me a hotel", None)
        .await
        .expect("Failed to save user message");
    store
        .save_message("m2", "chat-1", "assistant", "Here are some options", Some("thinking"))
        .await
        .expect("Failed to save assistant message");

    let messages = store
        .list_messages("chat-1", 100)
        .await
        .expect("Failed to list messages");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, "user");
    assert_eq!(messages[1].reasoning.as_deref(), Some("thinking"));
}

#[tokio::test]
async fn test_delete_chat_cascades() {
    let pool = test_helpers::test_pool().await;
    let store = ChatStore::new(pool.clone());

    store
        .create_chat("chat-1", "user-1", "title")
        .await
        .expect("create failed");
    store
        .save_message("m1", "chat-1", "user", "hi", None)
        .await
        .expect("save failed");
    store
        .set_vote("chat-1", "m1", true)
        .await
        .expect("vote failed");

    store.delete_chat("chat-1").await.expect("delete failed");

    assert!(store.get_chat("chat-1").await.expect("get failed").is_none());
    assert_eq!(
        store.message_count("chat-1").await.expect("count failed"),
        0
    );
    let votes = store
        .votes_for_chat("chat-1")
        .await
        .expect("votes failed");
    assert!(votes.is_empty());
}

#[tokio::test]
async fn test_vote_upsert_flips_value() {
    let pool = test_helpers::test_pool().await;
    let store = ChatStore::new(pool);

    store
        .create_chat("chat-1", "user-1", "title")
        .await
        .expect("create failed");

    store.set_vote("chat-1", "m1", true).await.expect("up failed");
    store
        .set_vote("chat-1", "m1", false)
        .await
        .expect("down failed");

    let votes = store.votes_for_chat("chat-1").await.expect("votes failed");
    assert_eq!(votes.len(), 1);
    assert!(!votes[0].is_upvoted);
}

#[tokio::test]
async fn test_latest_course_wins() {
    let pool = test_helpers::test_pool().await;
    let store = CourseStore::new(pool.clone());

    store
        .insert("c1", "user-1", "Older Course", "Venue A", "Addr A", 1000, 2000)
        .await
        .expect("insert failed");
    store
        .insert("c2", "user-1", "Newer Course", "Venue B", "Addr B", 3000, 4000)
        .await
        .expect("insert failed");

    // Backdate the first booking so recency is unambiguous.
    sqlx::query("UPDATE courses SET created_at = created_at - 3600 WHERE id = 'c1'")
        .execute(&pool)
        .await
        .expect("backdate failed");

    let latest = store
        .latest_for_user("user-1")
        .await
        .expect("query failed")
        .expect("no course");
    assert_eq!(latest.id, "c2");
    assert_eq!(latest.title, "Newer Course");

    assert!(store
        .latest_for_user("someone-else")
        .await
        .expect("query failed")
        .is_none());
}

#[tokio::test]
async fn test_session_token_lookup() {
    let pool = test_helpers::test_pool().await;
    let sessions = SessionStore::new(pool);

    sessions
        .create("tok-abc", "user-9")
        .await
        .expect("create failed");

    assert_eq!(
        sessions
            .user_for_token("tok-abc")
            .await
            .expect("lookup failed"),
        Some("user-9".to_string())
    );
    assert_eq!(
        sessions
            .user_for_token("tok-missing")
            .await
            .expect("lookup failed"),
        None
    );
}
