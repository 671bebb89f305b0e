//! Repository Integration Tests
//!
//! Tests for the board, list and card repositories and the cascade
//! orchestrator with an in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::domain::{BoardPatch, CardPatch, DomainError, ListPatch, NewBoard, NewCard, NewList, RecordId};
    use crate::repository::{
        init_db, BoardRepository, CardRepository, CascadeReport, ChildRepository, DbState, ListRepository, Repository,
    };
    use std::path::PathBuf;

    struct Repos {
        state: DbState,
        boards: BoardRepository,
        lists: ListRepository,
        cards: CardRepository,
    }

    async fn setup_test_db() -> Repos {
        // Use in-memory database for tests
        let db_path = PathBuf::from(":memory:");
        let state = init_db(&db_path).await.expect("Failed to init test DB");
        Repos {
            boards: BoardRepository::new(state.conn.clone()),
            lists: ListRepository::new(state.conn.clone()),
            cards: CardRepository::new(state.conn.clone()),
            state,
        }
    }

    async fn count(repos: &Repos, table: &str) -> i64 {
        let guard = repos.state.conn.lock().await;
        let conn = guard.as_ref().unwrap();
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find_board() {
        let repos = setup_test_db().await;

        let created = repos.boards.create(&NewBoard::new("Launch")).await.expect("Failed to create");
        assert_eq!(created.name, "Launch");

        let found = repos.boards.find_by_id(created.id).await.expect("Find failed");
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn test_list_boards_in_insertion_order() {
        let repos = setup_test_db().await;

        for name in ["Zeta", "Alpha", "Mid"] {
            repos.boards.create(&NewBoard::new(name)).await.unwrap();
        }

        let names: Vec<String> = repos.boards.list().await.unwrap().into_iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected_without_writing() {
        let repos = setup_test_db().await;

        let err = repos.boards.create(&NewBoard::new("")).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(count(&repos, "boards").await, 0);
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected_by_schema() {
        let repos = setup_test_db().await;
        let guard = repos.state.conn.lock().await;
        let conn = guard.as_ref().unwrap();

        let err: DomainError = conn
            .execute("INSERT INTO boards (id, name, updated_at) VALUES (x'01', '', 0)", [])
            .unwrap_err()
            .into();
        assert!(matches!(err, DomainError::Validation(_)));
        conn.execute("INSERT INTO boards (id, name, updated_at) VALUES (x'02', ' ', 0)", [])
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_then_list_by_parent() {
        let repos = setup_test_db().await;
        let board = repos.boards.create(&NewBoard::new("Launch")).await.unwrap();
        let other = repos.boards.create(&NewBoard::new("Other")).await.unwrap();

        let todo = repos.lists.create(&NewList::new(board.id, "Todo")).await.unwrap();
        repos.lists.create(&NewList::new(other.id, "Elsewhere")).await.unwrap();

        let lists = repos.lists.list_by_parent(board.id).await.unwrap();
        assert_eq!(lists, vec![todo.clone()]);
        assert_eq!(lists[0].board_id, board.id);

        let card = repos
            .cards
            .create(&NewCard::new(todo.id, "Draft roadmap", "First draft"))
            .await
            .unwrap();
        let cards = repos.cards.list_by_parent(todo.id).await.unwrap();
        assert_eq!(cards, vec![card]);
    }

    #[tokio::test]
    async fn test_list_by_unknown_parent_is_empty() {
        let repos = setup_test_db().await;
        assert!(repos.lists.list_by_parent(RecordId::generate()).await.unwrap().is_empty());
        assert!(repos.cards.list_by_parent(RecordId::generate()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_board_and_list() {
        let repos = setup_test_db().await;
        let board = repos.boards.create(&NewBoard::new("Launch")).await.unwrap();
        let list = repos.lists.create(&NewList::new(board.id, "Todo")).await.unwrap();

        let renamed = repos
            .boards
            .update(board.id, &BoardPatch { name: "Liftoff".to_string() })
            .await
            .expect("Update failed");
        assert_eq!(renamed.name, "Liftoff");

        let updated = repos
            .lists
            .update(list.id, &ListPatch { name: "Doing".to_string() })
            .await
            .unwrap();
        assert_eq!(updated.name, "Doing");
        assert_eq!(updated.board_id, board.id);
    }

    #[tokio::test]
    async fn test_update_card_keeps_list_id() {
        let repos = setup_test_db().await;
        let list_id = RecordId::generate();
        let card = repos
            .cards
            .create(&NewCard::new(list_id, "Old Name", "Old Desc"))
            .await
            .unwrap();

        let patch = CardPatch {
            name: "New Name".to_string(),
            description: "New Desc".to_string(),
        };
        let updated = repos.cards.update(card.id, &patch).await.unwrap();

        assert_eq!(updated.id, card.id);
        assert_eq!(updated.list_id, list_id);
        assert_eq!(updated.name, "New Name");
        assert_eq!(updated.description, "New Desc");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repos = setup_test_db().await;
        let err = repos
            .boards
            .update(RecordId::generate(), &BoardPatch { name: "X".to_string() })
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = repos
            .cards
            .update(
                RecordId::generate(),
                &CardPatch { name: "X".to_string(), description: "Y".to_string() },
            )
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_card() {
        let repos = setup_test_db().await;
        let list_id = RecordId::generate();
        let card = repos.cards.create(&NewCard::new(list_id, "A", "a")).await.unwrap();
        let keep = repos.cards.create(&NewCard::new(list_id, "B", "b")).await.unwrap();

        repos.cards.delete(card.id).await.expect("Delete failed");

        assert!(repos.cards.find_by_id(card.id).await.unwrap().is_none());
        assert_eq!(repos.cards.list_by_parent(list_id).await.unwrap(), vec![keep]);
        assert!(repos.cards.delete(card.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_board_cascades_to_lists_and_cards() {
        let repos = setup_test_db().await;
        let board = repos.boards.create(&NewBoard::new("Launch")).await.unwrap();
        let other = repos.boards.create(&NewBoard::new("Other")).await.unwrap();

        let mut list_ids = Vec::new();
        for name in ["Todo", "Doing", "Done"] {
            let list = repos.lists.create(&NewList::new(board.id, name)).await.unwrap();
            for i in 0..2 {
                repos
                    .cards
                    .create(&NewCard::new(list.id, format!("{} {}", name, i), "task"))
                    .await
                    .unwrap();
            }
            list_ids.push(list.id);
        }
        let survivor = repos.lists.create(&NewList::new(other.id, "Keep")).await.unwrap();
        repos.cards.create(&NewCard::new(survivor.id, "Stay", "here")).await.unwrap();

        let report = repos.boards.delete_cascade(board.id).await.unwrap();
        assert_eq!(report.lists_deleted, 3);
        assert_eq!(report.cards_deleted, 6);

        assert!(repos.boards.find_by_id(board.id).await.unwrap().is_none());
        assert!(repos.lists.list_by_parent(board.id).await.unwrap().is_empty());
        for id in list_ids {
            assert!(repos.cards.list_by_parent(id).await.unwrap().is_empty());
        }

        assert_eq!(repos.lists.list_by_parent(other.id).await.unwrap().len(), 1);
        assert_eq!(repos.cards.list_by_parent(survivor.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_board_with_many_lists() {
        let repos = setup_test_db().await;
        let board = repos.boards.create(&NewBoard::new("Backlog")).await.unwrap();

        let mut list_ids = Vec::new();
        for i in 0..1001 {
            let list = repos.lists.create(&NewList::new(board.id, format!("List {}", i))).await.unwrap();
            list_ids.push(list.id);
        }
        for i in [0, 499, 500, 999, 1000] {
            repos.cards.create(&NewCard::new(list_ids[i], "Task", "task")).await.unwrap();
        }

        let report = repos.boards.delete_cascade(board.id).await.unwrap();
        assert_eq!(report, CascadeReport { lists_deleted: 1001, cards_deleted: 5 });
        assert_eq!(count(&repos, "lists").await, 0);
        assert_eq!(count(&repos, "cards").await, 0);
    }

    #[tokio::test]
    async fn test_delete_empty_board() {
        let repos = setup_test_db().await;
        let board = repos.boards.create(&NewBoard::new("Empty")).await.unwrap();

        let report = repos.boards.delete_cascade(board.id).await.unwrap();
        assert_eq!(report, CascadeReport::default());
        assert_eq!(count(&repos, "boards").await, 0);
    }

    #[tokio::test]
    async fn test_delete_list_cascades_to_cards() {
        let repos = setup_test_db().await;
        let board = repos.boards.create(&NewBoard::new("Launch")).await.unwrap();
        let todo = repos.lists.create(&NewList::new(board.id, "Todo")).await.unwrap();
        let done = repos.lists.create(&NewList::new(board.id, "Done")).await.unwrap();
        repos.cards.create(&NewCard::new(todo.id, "A", "a")).await.unwrap();
        repos.cards.create(&NewCard::new(todo.id, "B", "b")).await.unwrap();
        repos.cards.create(&NewCard::new(done.id, "C", "c")).await.unwrap();

        let report = repos.lists.delete_cascade(todo.id).await.unwrap();
        assert_eq!(report.cards_deleted, 2);

        assert!(repos.cards.list_by_parent(todo.id).await.unwrap().is_empty());
        assert_eq!(repos.cards.list_by_parent(done.id).await.unwrap().len(), 1);
        assert_eq!(repos.lists.list_by_parent(board.id).await.unwrap(), vec![done]);
    }

    #[tokio::test]
    async fn test_bulk_delete_by_list_is_idempotent() {
        let repos = setup_test_db().await;
        let list_id = RecordId::generate();
        repos.cards.create(&NewCard::new(list_id, "A", "a")).await.unwrap();
        repos.cards.create(&NewCard::new(list_id, "B", "b")).await.unwrap();

        assert_eq!(repos.cards.delete_by_list(list_id).await.unwrap(), 2);
        assert_eq!(repos.cards.delete_by_list(list_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_board_cascade_steps_are_idempotent() {
        use crate::repository::card_repo::delete_cards_for_lists;
        use crate::repository::list_repo::{delete_lists_for_board, list_ids_for_board};

        let repos = setup_test_db().await;
        let board = repos.boards.create(&NewBoard::new("Launch")).await.unwrap();
        let list = repos.lists.create(&NewList::new(board.id, "Todo")).await.unwrap();
        repos.cards.create(&NewCard::new(list.id, "A", "a")).await.unwrap();

        let guard = repos.state.conn.lock().await;
        let conn = guard.as_ref().unwrap();

        let ids = list_ids_for_board(conn, board.id).unwrap();
        assert_eq!(delete_cards_for_lists(conn, &ids).unwrap(), 1);
        assert_eq!(delete_cards_for_lists(conn, &ids).unwrap(), 0);
        assert_eq!(delete_lists_for_board(conn, board.id).unwrap(), 1);
        assert_eq!(delete_lists_for_board(conn, board.id).unwrap(), 0);
        assert_eq!(delete_cards_for_lists(conn, &[]).unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_missing_board_leaves_store_unchanged() {
        let repos = setup_test_db().await;
        let missing = RecordId::generate();

        // Orphans referencing a board that was never created
        let orphan = repos.lists.create(&NewList::new(missing, "Orphan")).await.unwrap();
        repos.cards.create(&NewCard::new(orphan.id, "A", "a")).await.unwrap();

        let err = repos.boards.delete(missing).await.unwrap_err();
        assert_eq!(err, DomainError::not_found("board", missing));

        assert_eq!(count(&repos, "lists").await, 1);
        assert_eq!(count(&repos, "cards").await, 1);
    }

    #[tokio::test]
    async fn test_delete_missing_list_leaves_store_unchanged() {
        let repos = setup_test_db().await;
        let missing = RecordId::generate();
        repos.cards.create(&NewCard::new(missing, "A", "a")).await.unwrap();

        assert!(repos.lists.delete(missing).await.unwrap_err().is_not_found());
        assert_eq!(count(&repos, "cards").await, 1);
    }

    #[tokio::test]
    async fn test_retry_after_cascade_is_not_found() {
        let repos = setup_test_db().await;
        let board = repos.boards.create(&NewBoard::new("Launch")).await.unwrap();
        repos.lists.create(&NewList::new(board.id, "Todo")).await.unwrap();

        repos.boards.delete(board.id).await.unwrap();
        assert!(repos.boards.delete(board.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_parent_check_rejects_dangling_references() {
        let repos = setup_test_db().await;
        let lists = ListRepository::new(repos.state.conn.clone()).with_parent_check(true);
        let cards = CardRepository::new(repos.state.conn.clone()).with_parent_check(true);

        let err = lists.create(&NewList::new(RecordId::generate(), "Todo")).await.unwrap_err();
        assert!(err.is_not_found());
        let err = cards.create(&NewCard::new(RecordId::generate(), "A", "a")).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(count(&repos, "lists").await, 0);

        let board = repos.boards.create(&NewBoard::new("Launch")).await.unwrap();
        let list = lists.create(&NewList::new(board.id, "Todo")).await.unwrap();
        cards.create(&NewCard::new(list.id, "A", "a")).await.unwrap();
    }

    #[tokio::test]
    async fn test_closed_database_is_connection_error() {
        let repos = setup_test_db().await;
        repos.state.close().await.unwrap();

        let err = repos.boards.list().await.unwrap_err();
        assert!(matches!(err, DomainError::Connection(_)));
        let err = repos.lists.delete(RecordId::generate()).await.unwrap_err();
        assert!(matches!(err, DomainError::Connection(_)));
    }

    #[tokio::test]
    async fn test_launch_scenario() {
        let repos = setup_test_db().await;
        let board = repos.boards.create(&NewBoard::new("Launch")).await.unwrap();
        let list = repos.lists.create(&NewList::new(board.id, "Todo")).await.unwrap();
        repos
            .cards
            .create(&NewCard::new(list.id, "Draft roadmap", "Outline the data model"))
            .await
            .unwrap();

        repos.boards.delete(board.id).await.unwrap();

        assert!(repos.lists.list_by_parent(board.id).await.unwrap().is_empty());
        assert!(repos.cards.list_by_parent(list.id).await.unwrap().is_empty());
    }
}
