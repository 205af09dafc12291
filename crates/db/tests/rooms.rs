//! Integration tests for rooms and their placement sets.
//!
//! Covers:
//! - room create with an initial furniture list
//! - partial updates and the replace-set semantics of `furniture_list`
//! - delete cascading to placements
//! - batch atomicity of placement inserts
//! - filtered, sorted, paginated listing

use assert_matches::assert_matches;
use ehome_core::filters::{Filters, PageQuery, ROOM_SORT_SAFELIST};
use ehome_db::models::placement::{NewPlacement, Placement};
use ehome_db::models::room::{CreateRoom, RoomSearch, UpdateRoom};
use ehome_db::repositories::{PlacementRepo, RoomRepo};
use sqlx::PgPool;

const OWNER: i64 = 11;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_room(title: &str, width: i64, height: i64) -> CreateRoom {
    CreateRoom {
        title: title.to_string(),
        description: Some("test room".to_string()),
        width,
        height,
        furniture_list: vec![],
    }
}

fn at(furniture_id: i64, x: i64, y: i64) -> NewPlacement {
    NewPlacement { furniture_id, x, y }
}

fn page(page: i64, page_size: i64, sort: &str) -> PageQuery {
    Filters {
        page,
        page_size,
        sort: sort.to_string(),
    }
    .resolve(ROOM_SORT_SAFELIST)
    .expect("filters should be valid")
}

fn set_placements(list: Vec<NewPlacement>) -> UpdateRoom {
    UpdateRoom {
        furniture_list: Some(list),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Test: create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_room_with_placements(pool: PgPool) {
    let mut input = new_room("Living room", 500, 400);
    input.furniture_list = vec![at(3, 10, 20), at(1, 0, 0)];

    let created = RoomRepo::create(&pool, OWNER, &input).await.unwrap();
    assert!(created.room.id > 0);
    assert_eq!(created.room.owner_id, OWNER);
    assert_eq!(created.room.title, "Living room");
    assert_eq!(created.room.width, 500);
    assert_eq!(created.room.height, 400);

    let ids: Vec<i64> = created.furniture_list.iter().map(|p| p.furniture_id).collect();
    assert_eq!(ids, vec![1, 3], "placements come back ordered by furniture id");
    assert!(created.furniture_list.iter().all(|p| p.room_id == created.room.id));

    let stored = RoomRepo::find_by_id_with_placements(&pool, created.room.id)
        .await
        .unwrap()
        .expect("room should exist");
    assert_eq!(stored, created);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_missing_room(pool: PgPool) {
    assert!(RoomRepo::find_by_id(&pool, 777).await.unwrap().is_none());
    assert!(RoomRepo::find_by_id(&pool, 0).await.unwrap().is_none());
    assert!(RoomRepo::find_by_id_with_placements(&pool, -1)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Test: update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_title_only_keeps_placements(pool: PgPool) {
    let mut input = new_room("Kitchen", 300, 300);
    input.furniture_list = vec![at(2, 5, 5)];
    let created = RoomRepo::create(&pool, OWNER, &input).await.unwrap();

    let updated = RoomRepo::update(
        &pool,
        created.room.id,
        &UpdateRoom {
            title: Some("Big kitchen".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("room should exist");

    assert_eq!(updated.room.title, "Big kitchen");
    assert_eq!(updated.room.width, 300); // unchanged
    assert_eq!(updated.room.description, created.room.description); // unchanged
    assert_eq!(updated.furniture_list, created.furniture_list);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replace_set_is_idempotent(pool: PgPool) {
    let mut input = new_room("Bedroom", 400, 350);
    input.furniture_list = vec![at(1, 0, 0), at(2, 1, 1)];
    let created = RoomRepo::create(&pool, OWNER, &input).await.unwrap();
    let room_id = created.room.id;

    let patch = set_placements(vec![at(4, 40, 40), at(2, 20, 20)]);
    let first = RoomRepo::update(&pool, room_id, &patch).await.unwrap().unwrap();
    let second = RoomRepo::update(&pool, room_id, &patch).await.unwrap().unwrap();

    let expected = vec![
        Placement {
            furniture_id: 2,
            room_id,
            x: 20,
            y: 20,
        },
        Placement {
            furniture_id: 4,
            room_id,
            x: 40,
            y: 40,
        },
    ];
    assert_eq!(first.furniture_list, expected);
    assert_eq!(second.furniture_list, expected);

    let stored = PlacementRepo::list_for_room(&pool, room_id).await.unwrap();
    assert_eq!(stored, expected, "old placement 1 must be gone");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_replace_rolls_back_title_change(pool: PgPool) {
    let mut input = new_room("Studio", 400, 400);
    input.furniture_list = vec![at(1, 0, 0), at(2, 0, 0)];
    let created = RoomRepo::create(&pool, OWNER, &input).await.unwrap();
    let room_id = created.room.id;

    // The repeated furniture id fails the insert after the title UPDATE ran.
    let patch = UpdateRoom {
        title: Some("Loft".to_string()),
        furniture_list: Some(vec![at(3, 0, 0), at(3, 1, 1)]),
        ..Default::default()
    };
    let result = RoomRepo::update(&pool, room_id, &patch).await;
    assert!(result.is_err());

    let stored = RoomRepo::find_by_id_with_placements(&pool, room_id)
        .await
        .unwrap()
        .expect("room should still exist");
    assert_eq!(stored.room.title, "Studio");
    let ids: Vec<i64> = stored.furniture_list.iter().map(|p| p.furniture_id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_list_clears_placements(pool: PgPool) {
    let mut input = new_room("Hall", 200, 600);
    input.furniture_list = vec![at(1, 0, 0), at(2, 0, 0)];
    let created = RoomRepo::create(&pool, OWNER, &input).await.unwrap();

    let updated = RoomRepo::update(&pool, created.room.id, &set_placements(vec![]))
        .await
        .unwrap()
        .unwrap();
    assert!(updated.furniture_list.is_empty());
    assert!(PlacementRepo::list_for_room(&pool, created.room.id)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_room_returns_none(pool: PgPool) {
    let result = RoomRepo::update(&pool, 9_999, &set_placements(vec![at(1, 0, 0)]))
        .await
        .unwrap();
    assert!(result.is_none());

    // The rolled-back transaction must not have left a stray placement.
    assert!(PlacementRepo::list_for_room(&pool, 9_999)
        .await
        .unwrap()
        .is_empty());
}

// ---------------------------------------------------------------------------
// Test: delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_removes_room_and_placements(pool: PgPool) {
    let mut input = new_room("Garage", 600, 600);
    input.furniture_list = vec![at(5, 1, 2), at(6, 3, 4)];
    let created = RoomRepo::create(&pool, OWNER, &input).await.unwrap();
    let room_id = created.room.id;

    assert!(RoomRepo::delete(&pool, room_id).await.unwrap());
    assert!(RoomRepo::find_by_id(&pool, room_id).await.unwrap().is_none());
    assert!(PlacementRepo::list_for_room(&pool, room_id)
        .await
        .unwrap()
        .is_empty());

    assert!(!RoomRepo::delete(&pool, room_id).await.unwrap());
    assert!(!RoomRepo::delete(&pool, 0).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_for_room_rejects_non_positive_id(pool: PgPool) {
    let result = PlacementRepo::delete_for_room(&pool, 0).await;
    assert_matches!(result, Err(sqlx::Error::RowNotFound));
}

// ---------------------------------------------------------------------------
// Test: placement batches
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_batch_is_all_or_nothing(pool: PgPool) {
    let room = RoomRepo::create(&pool, OWNER, &new_room("Attic", 300, 200))
        .await
        .unwrap();
    let room_id = room.room.id;

    // Same furniture twice violates the (room_id, furniture_id) key.
    let batch = vec![
        at(1, 0, 0).in_room(room_id),
        at(2, 0, 0).in_room(room_id),
        at(1, 9, 9).in_room(room_id),
    ];
    let result = PlacementRepo::create_batch(&pool, &batch).await;
    assert!(result.is_err());
    assert!(PlacementRepo::list_for_room(&pool, room_id)
        .await
        .unwrap()
        .is_empty());

    PlacementRepo::create(&pool, &at(7, 3, 3).in_room(room_id))
        .await
        .unwrap();
    let removed = PlacementRepo::delete_for_room(&pool, room_id).await.unwrap();
    assert_eq!(removed, 1);
}

// ---------------------------------------------------------------------------
// Test: listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_by_title_and_dimensions(pool: PgPool) {
    RoomRepo::create(&pool, OWNER, &new_room("Blue kitchen", 300, 300))
        .await
        .unwrap();
    RoomRepo::create(&pool, OWNER, &new_room("Red kitchen", 800, 300))
        .await
        .unwrap();
    RoomRepo::create(&pool, OWNER, &new_room("Blue bedroom", 300, 900))
        .await
        .unwrap();

    let search = RoomSearch {
        title: "kitchen".to_string(),
        ..Default::default()
    };
    let (rooms, meta) = RoomRepo::list_filtered(&pool, &search, &page(1, 20, "id"))
        .await
        .unwrap();
    assert_eq!(rooms.len(), 2);
    assert_eq!(meta.total_records, 2);

    let search = RoomSearch {
        title: "blue".to_string(),
        max_width: 0,
        max_height: 500,
    };
    let (rooms, _) = RoomRepo::list_filtered(&pool, &search, &page(1, 20, "id"))
        .await
        .unwrap();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].title, "Blue kitchen");

    let search = RoomSearch {
        max_width: 500,
        ..Default::default()
    };
    let (rooms, _) = RoomRepo::list_filtered(&pool, &search, &page(1, 20, "id"))
        .await
        .unwrap();
    assert_eq!(rooms.len(), 2);
    assert!(rooms.iter().all(|r| r.width <= 500));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_sorts_descending(pool: PgPool) {
    for (title, width) in [("A", 100), ("B", 300), ("C", 200)] {
        RoomRepo::create(&pool, OWNER, &new_room(title, width, 100))
            .await
            .unwrap();
    }

    let (rooms, _) = RoomRepo::list_filtered(
        &pool,
        &RoomSearch::default(),
        &page(1, 20, "-room_width"),
    )
    .await
    .unwrap();
    let widths: Vec<i64> = rooms.iter().map(|r| r.width).collect();
    assert_eq!(widths, vec![300, 200, 100]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_pagination_metadata(pool: PgPool) {
    let mut ids = Vec::new();
    for i in 1..=45 {
        let room = RoomRepo::create(&pool, OWNER, &new_room(&format!("Room {i}"), 100, 100))
            .await
            .unwrap();
        ids.push(room.room.id);
    }

    let (rooms, meta) = RoomRepo::list_filtered(&pool, &RoomSearch::default(), &page(3, 20, "id"))
        .await
        .unwrap();
    let got: Vec<i64> = rooms.iter().map(|r| r.id).collect();
    assert_eq!(got, ids[40..45].to_vec());
    assert_eq!(meta.current_page, 3);
    assert_eq!(meta.page_size, 20);
    assert_eq!(meta.first_page, 1);
    assert_eq!(meta.last_page, 3);
    assert_eq!(meta.total_records, 45);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_empty_result_has_zero_metadata(pool: PgPool) {
    RoomRepo::create(&pool, OWNER, &new_room("Porch", 100, 100))
        .await
        .unwrap();

    let search = RoomSearch {
        title: "nonexistent".to_string(),
        ..Default::default()
    };
    let (rooms, meta) = RoomRepo::list_filtered(&pool, &search, &page(1, 20, "id"))
        .await
        .unwrap();
    assert!(rooms.is_empty());
    assert_eq!(meta, Default::default());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_with_placements(pool: PgPool) {
    let mut input = new_room("Office", 300, 300);
    input.furniture_list = vec![at(8, 1, 1)];
    RoomRepo::create(&pool, OWNER, &input).await.unwrap();
    RoomRepo::create(&pool, OWNER, &new_room("Closet", 100, 100))
        .await
        .unwrap();

    let (rooms, meta) =
        RoomRepo::list_filtered_with_placements(&pool, &RoomSearch::default(), &page(1, 20, "title"))
            .await
            .unwrap();
    assert_eq!(meta.total_records, 2);
    assert_eq!(rooms[0].room.title, "Closet");
    assert!(rooms[0].furniture_list.is_empty());
    assert_eq!(rooms[1].furniture_list.len(), 1);
}
