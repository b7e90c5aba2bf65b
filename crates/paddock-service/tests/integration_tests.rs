//! End-to-end tests through the async services over real SQLite stores.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use paddock_core::clock::{FixedClock, SteppingClock};
use paddock_core::error::PaddockError;
use paddock_core::types::{EntityStatus, ListFilter, OrderBy, OrderByField, Race};
use paddock_service::{
    GetRaceRequest, GetSportRequest, ListEventsRequest, ListRacesRequest, Racing, RacingService,
    Services, Sports,
};
use paddock_storage::{Database, RacesRepository};

fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-11-04T03:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn insert_race(db: &Database, id: i64, meeting_id: i64, visible: bool, start: &str) {
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO races (id, meeting_id, name, number, visible, advertised_start_time)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![id, meeting_id, format!("Race {}", id), id % 12 + 1, visible, start],
        )
        .map_err(|e| PaddockError::Storage(e.to_string()))?;
        Ok(())
    })
    .unwrap();
}

fn racing_over(db: Arc<Database>) -> RacingService<RacesRepository> {
    let repo = RacesRepository::races(db).with_clock(Arc::new(FixedClock(now())));
    RacingService::new(Arc::new(repo))
}

fn ids(races: &[Race]) -> Vec<i64> {
    races.iter().map(|r| r.id).collect()
}

#[tokio::test]
async fn empty_request_returns_all_in_insertion_order() {
    let db = Arc::new(Database::in_memory().unwrap());
    for id in [5, 2, 9] {
        insert_race(&db, id, 1, true, "2025-11-04T04:00:00Z");
    }
    let svc = racing_over(db);
    let resp = svc.list_races(ListRacesRequest::default()).await.unwrap();
    // INTEGER PRIMARY KEY tables scan in rowid order.
    assert_eq!(ids(&resp.races), vec![2, 5, 9]);
}

#[tokio::test]
async fn seeded_listing_honours_membership_and_visibility() {
    let services = Services::in_memory(120).unwrap();
    let all = services
        .racing
        .list_races(ListRacesRequest::default())
        .await
        .unwrap()
        .races;
    assert_eq!(all.len(), 120);

    let wanted: HashSet<i64> = [2, 5, 8].into_iter().collect();
    let filter = ListFilter::meetings(vec![2, 5, 8]).with_visible(false);
    let resp = services
        .racing
        .list_races(ListRacesRequest {
            filter: Some(filter),
            order_by: None,
        })
        .await
        .unwrap();

    for race in &resp.races {
        assert!(wanted.contains(&race.meeting_id));
        assert!(!race.visible);
    }
    let expected = all
        .iter()
        .filter(|r| wanted.contains(&r.meeting_id) && !r.visible)
        .count();
    assert_eq!(resp.races.len(), expected);
}

#[tokio::test]
async fn meetings_and_visibility_sorted_descending() {
    let db = Arc::new(Database::in_memory().unwrap());
    insert_race(&db, 1, 3, true, "2025-11-04T05:00:00Z");
    insert_race(&db, 2, 7, true, "2025-11-04T07:00:00Z");
    insert_race(&db, 3, 7, false, "2025-11-04T09:00:00Z");
    insert_race(&db, 4, 4, true, "2025-11-04T08:00:00Z");
    insert_race(&db, 5, 3, true, "2025-11-04T01:00:00Z");
    let svc = racing_over(db);

    let resp = svc
        .list_races(ListRacesRequest {
            filter: Some(ListFilter::meetings(vec![3, 7]).with_visible(true)),
            order_by: Some(OrderBy::new(vec![OrderByField::desc("advertised_start_time")])),
        })
        .await
        .unwrap();

    assert_eq!(ids(&resp.races), vec![2, 1, 5]);
    assert_eq!(resp.races[2].status, EntityStatus::Closed);
}

#[tokio::test]
async fn multi_field_order_breaks_ties_left_to_right() {
    let db = Arc::new(Database::in_memory().unwrap());
    insert_race(&db, 1, 2, true, "2025-11-04T05:00:00Z");
    insert_race(&db, 2, 1, true, "2025-11-04T05:00:00Z");
    insert_race(&db, 3, 2, true, "2025-11-04T06:00:00Z");
    insert_race(&db, 4, 1, true, "2025-11-04T04:00:00Z");
    let svc = racing_over(db);

    let resp = svc
        .list_races(ListRacesRequest {
            filter: None,
            order_by: Some(OrderBy::new(vec![
                OrderByField::asc("meeting_id"),
                OrderByField::desc("advertised_start_time"),
            ])),
        })
        .await
        .unwrap();
    assert_eq!(ids(&resp.races), vec![2, 4, 3, 1]);
}

#[tokio::test]
async fn status_boundaries() {
    let db = Arc::new(Database::in_memory().unwrap());
    insert_race(&db, 1, 1, true, "2025-11-04T03:00:01Z");
    insert_race(&db, 2, 1, true, "2025-11-04T02:59:59Z");
    insert_race(&db, 3, 1, true, "2025-11-04T03:00:00Z");
    let svc = racing_over(db);

    let resp = svc.list_races(ListRacesRequest::default()).await.unwrap();
    let statuses: Vec<EntityStatus> = resp.races.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![EntityStatus::Open, EntityStatus::Closed, EntityStatus::Open]
    );
}

#[tokio::test]
async fn now_is_sampled_per_row() {
    let db = Arc::new(Database::in_memory().unwrap());
    insert_race(&db, 1, 1, true, "2025-11-04T03:00:00Z");
    insert_race(&db, 2, 1, true, "2025-11-04T03:00:00Z");

    let clock = SteppingClock::new(now(), Duration::seconds(1));
    let repo = RacesRepository::races(db).with_clock(Arc::new(clock));
    let svc = RacingService::new(Arc::new(repo));

    let resp = svc.list_races(ListRacesRequest::default()).await.unwrap();
    assert_eq!(resp.races[0].status, EntityStatus::Open);
    assert_eq!(resp.races[1].status, EntityStatus::Closed);
}

#[tokio::test]
async fn get_by_id_round_trips_listed_fields() {
    let services = Services::in_memory(30).unwrap();
    let listed = services
        .racing
        .list_races(ListRacesRequest::default())
        .await
        .unwrap()
        .races;

    for race in listed.iter().take(10) {
        let fetched = services
            .racing
            .get_race_by_id(GetRaceRequest { id: race.id })
            .await
            .unwrap()
            .race
            .unwrap();
        assert_eq!(fetched.id, race.id);
        assert_eq!(fetched.meeting_id, race.meeting_id);
        assert_eq!(fetched.name, race.name);
        assert_eq!(fetched.number, race.number);
        assert_eq!(fetched.visible, race.visible);
        assert_eq!(fetched.advertised_start_time, race.advertised_start_time);
    }

    let missing = services
        .racing
        .get_race_by_id(GetRaceRequest { id: 10_000 })
        .await
        .unwrap();
    assert!(missing.race.is_none());
}

#[tokio::test]
async fn sports_service_end_to_end() {
    let services = Services::in_memory(40).unwrap();
    let resp = services
        .sports
        .list_events(ListEventsRequest {
            filter: Some(ListFilter::meetings(vec![1, 2, 3])),
            order_by: Some(OrderBy::new(vec![
                OrderByField::asc("meeting_id"),
                OrderByField::asc("advertised_start_time"),
            ])),
        })
        .await
        .unwrap();

    for pair in resp.sports.windows(2) {
        let a = (pair[0].meeting_id, pair[0].advertised_start_time);
        let b = (pair[1].meeting_id, pair[1].advertised_start_time);
        assert!(a <= b);
    }
    for event in &resp.sports {
        assert!((1..=3).contains(&event.meeting_id));
        assert_eq!(event.name, format!("{} vs {}", event.home_team, event.away_team));
    }

    let first = services
        .sports
        .get_sport_by_id(GetSportRequest { id: 1 })
        .await
        .unwrap();
    assert_eq!(first.sport.map(|s| s.id), Some(1));
}

#[tokio::test]
async fn order_field_text_is_executed_as_sql() {
    let db = Arc::new(Database::in_memory().unwrap());
    insert_race(&db, 1, 1, false, "2025-11-04T05:00:00Z");
    insert_race(&db, 2, 1, true, "2025-11-04T05:00:00Z");
    insert_race(&db, 3, 1, false, "2025-11-04T05:00:00Z");
    insert_race(&db, 4, 1, true, "2025-11-04T05:00:00Z");
    let svc = racing_over(db);

    // Field names are not validated: an arbitrary expression sorts the rows.
    let resp = svc
        .list_races(ListRacesRequest {
            filter: None,
            order_by: Some(OrderBy::new(vec![
                OrderByField::asc("(CASE WHEN visible THEN 0 ELSE 1 END)"),
                OrderByField::asc("id"),
            ])),
        })
        .await
        .unwrap();
    assert_eq!(ids(&resp.races), vec![2, 4, 1, 3]);

    let err = svc
        .list_races(ListRacesRequest {
            filter: None,
            order_by: Some(OrderBy::new(vec![OrderByField::desc("post_position")])),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PaddockError::Query(_)));
}

#[tokio::test]
async fn concurrent_requests_share_one_store() {
    let services = Arc::new(Services::in_memory(50).unwrap());

    let mut handles = Vec::new();
    for meeting in 1..=10 {
        let services = Arc::clone(&services);
        handles.push(tokio::spawn(async move {
            services
                .racing
                .list_races(ListRacesRequest {
                    filter: Some(ListFilter::meetings(vec![meeting])),
                    order_by: None,
                })
                .await
        }));
    }

    let mut total = 0;
    for handle in handles {
        total += handle.await.unwrap().unwrap().races.len();
    }
    assert_eq!(total, 50);
}
