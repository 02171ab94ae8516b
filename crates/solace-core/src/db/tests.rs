use chrono::{DateTime, Duration, TimeZone, Utc};
use tempfile::tempdir;

use super::Database;
use crate::error::SolaceError;
use crate::record::{AnalysisRecord, AnalysisResponse, CbtAnalysis, Rebuttal};
use crate::tag::Tag;

const DEFAULT_COLOR: &str = "#88C0D0";

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap()
}

fn response(severity: f64) -> AnalysisResponse {
    AnalysisResponse {
        severity,
        summary: Some("A summary".to_string()),
        explanation: "An explanation.".to_string(),
        explanations: vec![],
        cbt_analysis: CbtAnalysis {
            thought_patterns: vec![],
            coping_strategies: vec![],
        },
        rebuttals: None,
    }
}

fn record(id: &str, minutes: i64, tags: &[&str]) -> AnalysisRecord {
    let at = base_time() + Duration::minutes(minutes);
    AnalysisRecord {
        id: id.to_string(),
        content: format!("content for {}", id),
        summary: format!("summary for {}", id),
        response: response(2.0),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        favorite: false,
        last_viewed: at,
        created_at: at,
        updated_at: at,
    }
}

fn ids(records: &[AnalysisRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn open_creates_schema() {
    let dir = tempdir().unwrap();
    let db = Database::open(dir.path()).unwrap();
    assert_eq!(
        db.schema_version().unwrap(),
        i64::from(super::CURRENT_SCHEMA_VERSION)
    );
    assert_eq!(db.record_count().unwrap(), 0);
    assert_eq!(db.tag_count().unwrap(), 0);
}

#[test]
fn reopen_preserves_data() {
    let dir = tempdir().unwrap();
    {
        let db = Database::open(dir.path()).unwrap();
        db.save_record(&record("sol-1", 0, &["Work"]), DEFAULT_COLOR)
            .unwrap();
    }

    let db = Database::open(dir.path()).unwrap();
    let found = db.get_record("sol-1").unwrap().unwrap();
    assert_eq!(found.content, "content for sol-1");
    assert_eq!(found.tags, vec!["Work"]);
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempdir().unwrap();
    {
        let db = Database::open(dir.path()).unwrap();
        db.conn
            .execute(
                "UPDATE journal_meta SET value = '99' WHERE key = 'schema_version'",
                [],
            )
            .unwrap();
    }

    let err = match Database::open(dir.path()) {
        Err(e) => e,
        Ok(_) => panic!("expected open to fail on a newer schema"),
    };
    assert!(matches!(err, SolaceError::InvalidStore { .. }));
}

#[test]
fn save_and_get_round_trip() {
    let dir = tempdir().unwrap();
    let db = Database::open(dir.path()).unwrap();

    let mut rec = record("sol-1", 0, &["Level 2", "Work"]);
    rec.favorite = true;
    rec.response.rebuttals = Some(vec![Rebuttal {
        concern: "What if it goes badly?".to_string(),
        response: "Preparation covers most outcomes.".to_string(),
    }]);
    db.save_record(&rec, DEFAULT_COLOR).unwrap();

    let found = db.get_record("sol-1").unwrap().unwrap();
    assert_eq!(found.id, rec.id);
    assert_eq!(found.content, rec.content);
    assert_eq!(found.summary, rec.summary);
    assert!(found.favorite);
    assert_eq!(found.tags, vec!["Level 2", "Work"]);
    assert_eq!(found.response.severity, 2.0);
    assert_eq!(found.response.rebuttals.as_ref().unwrap().len(), 1);
    assert_eq!(found.created_at, rec.created_at);
    assert_eq!(found.last_viewed, rec.last_viewed);
    assert_eq!(found.updated_at, rec.updated_at);

    assert!(db.get_record("sol-missing").unwrap().is_none());
}

#[test]
fn resave_rewrites_tags_and_keeps_registry() {
    let dir = tempdir().unwrap();
    let db = Database::open(dir.path()).unwrap();

    let mut rec = record("sol-1", 0, &["Calm", "Work"]);
    db.save_record(&rec, DEFAULT_COLOR).unwrap();

    rec.tags = vec!["Sleep".to_string(), "Work".to_string()];
    db.save_record(&rec, DEFAULT_COLOR).unwrap();

    let found = db.get_record("sol-1").unwrap().unwrap();
    assert_eq!(found.tags, vec!["Sleep", "Work"]);

    // Dropped memberships do not garbage-collect the registry entry
    let names: Vec<String> = db.list_tags().unwrap().into_iter().map(|t| t.name).collect();
    assert_eq!(names, vec!["Calm", "Sleep", "Work"]);
}

#[test]
fn save_keeps_existing_tag_color() {
    let dir = tempdir().unwrap();
    let db = Database::open(dir.path()).unwrap();

    db.upsert_tag(&Tag::new("Work", "#111111")).unwrap();
    db.save_record(&record("sol-1", 0, &["Work"]), DEFAULT_COLOR)
        .unwrap();

    assert_eq!(db.get_tag("Work").unwrap().unwrap().color, "#111111");
}

#[test]
fn list_records_orders_and_paginates() {
    let dir = tempdir().unwrap();
    let db = Database::open(dir.path()).unwrap();

    db.save_record(&record("sol-1", 0, &[]), DEFAULT_COLOR).unwrap();
    db.save_record(&record("sol-2", 10, &[]), DEFAULT_COLOR).unwrap();
    db.save_record(&record("sol-3", 20, &[]), DEFAULT_COLOR).unwrap();

    let all = db.list_records(None, 0).unwrap();
    assert_eq!(ids(&all), vec!["sol-3", "sol-2", "sol-1"]);

    let page = db.list_records(Some(2), 0).unwrap();
    assert_eq!(ids(&page), vec!["sol-3", "sol-2"]);

    let page = db.list_records(Some(2), 1).unwrap();
    assert_eq!(ids(&page), vec!["sol-2", "sol-1"]);
}

#[test]
fn list_by_tags_requires_every_tag() {
    let dir = tempdir().unwrap();
    let db = Database::open(dir.path()).unwrap();

    db.save_record(&record("sol-1", 0, &["Work"]), DEFAULT_COLOR)
        .unwrap();
    db.save_record(&record("sol-2", 10, &["Sleep", "Work"]), DEFAULT_COLOR)
        .unwrap();
    db.save_record(&record("sol-3", 20, &["Sleep"]), DEFAULT_COLOR)
        .unwrap();

    let work = db.list_by_tags(&["Work".to_string()]).unwrap();
    assert_eq!(ids(&work), vec!["sol-2", "sol-1"]);

    let both = db
        .list_by_tags(&["Work".to_string(), "Sleep".to_string()])
        .unwrap();
    assert_eq!(ids(&both), vec!["sol-2"]);

    let all = db.list_by_tags(&[]).unwrap();
    assert_eq!(all.len(), 3);
}

#[test]
fn set_favorite_bumps_updated_at_only() {
    let dir = tempdir().unwrap();
    let db = Database::open(dir.path()).unwrap();
    db.save_record(&record("sol-1", 0, &[]), DEFAULT_COLOR).unwrap();

    let now = base_time() + Duration::minutes(60);
    assert!(db.set_favorite("sol-1", true, now).unwrap());

    let found = db.get_record("sol-1").unwrap().unwrap();
    assert!(found.favorite);
    assert_eq!(found.updated_at, now);
    assert_eq!(found.last_viewed, base_time());

    let favorites = db.list_favorites().unwrap();
    assert_eq!(ids(&favorites), vec!["sol-1"]);
    assert_eq!(db.favorite_count().unwrap(), 1);

    assert!(!db.set_favorite("sol-missing", true, now).unwrap());
}

#[test]
fn touch_last_viewed_bumps_both_timestamps() {
    let dir = tempdir().unwrap();
    let db = Database::open(dir.path()).unwrap();
    db.save_record(&record("sol-1", 0, &[]), DEFAULT_COLOR).unwrap();

    let now = base_time() + Duration::minutes(60);
    assert!(db.touch_last_viewed("sol-1", now).unwrap());

    let found = db.get_record("sol-1").unwrap().unwrap();
    assert_eq!(found.last_viewed, now);
    assert_eq!(found.updated_at, now);
}

#[test]
fn update_summary_and_content() {
    let dir = tempdir().unwrap();
    let db = Database::open(dir.path()).unwrap();
    db.save_record(&record("sol-1", 0, &[]), DEFAULT_COLOR).unwrap();

    let now = base_time() + Duration::minutes(60);
    assert!(db.update_summary("sol-1", "New summary", now).unwrap());
    assert!(db.update_content("sol-1", "New content", now).unwrap());

    let found = db.get_record("sol-1").unwrap().unwrap();
    assert_eq!(found.summary, "New summary");
    assert_eq!(found.content, "New content");
    assert_eq!(found.updated_at, now);
    assert_eq!(found.last_viewed, base_time());

    assert!(!db.update_summary("sol-missing", "x", now).unwrap());
}

#[test]
fn list_recently_viewed_orders_by_view_time() {
    let dir = tempdir().unwrap();
    let db = Database::open(dir.path()).unwrap();

    db.save_record(&record("sol-1", 0, &[]), DEFAULT_COLOR).unwrap();
    db.save_record(&record("sol-2", 10, &[]), DEFAULT_COLOR).unwrap();
    db.save_record(&record("sol-3", 20, &[]), DEFAULT_COLOR).unwrap();

    db.touch_last_viewed("sol-1", base_time() + Duration::minutes(60))
        .unwrap();

    let recent = db.list_recently_viewed(2).unwrap();
    assert_eq!(ids(&recent), vec!["sol-1", "sol-3"]);
}

#[test]
fn delete_record_removes_memberships() {
    let dir = tempdir().unwrap();
    let db = Database::open(dir.path()).unwrap();

    db.save_record(&record("sol-1", 0, &["Work"]), DEFAULT_COLOR)
        .unwrap();
    db.save_record(&record("sol-2", 10, &["Work"]), DEFAULT_COLOR)
        .unwrap();

    assert!(db.delete_record("sol-1").unwrap());
    assert!(db.get_record("sol-1").unwrap().is_none());

    let work = db.list_by_tags(&["Work".to_string()]).unwrap();
    assert_eq!(ids(&work), vec!["sol-2"]);

    // Registry entry survives the last membership
    assert!(db.get_tag("Work").unwrap().is_some());

    assert!(!db.delete_record("sol-1").unwrap());
}

#[test]
fn delete_tag_cascade_strips_records() {
    let dir = tempdir().unwrap();
    let db = Database::open(dir.path()).unwrap();

    db.save_record(&record("sol-1", 0, &["Calm", "Work"]), DEFAULT_COLOR)
        .unwrap();
    db.save_record(&record("sol-2", 10, &["Calm"]), DEFAULT_COLOR)
        .unwrap();

    let now = base_time() + Duration::minutes(60);
    assert!(db.delete_tag_cascade("Work", now).unwrap());

    let touched = db.get_record("sol-1").unwrap().unwrap();
    assert_eq!(touched.tags, vec!["Calm"]);
    assert_eq!(touched.updated_at, now);
    assert_eq!(touched.last_viewed, base_time());

    let untouched = db.get_record("sol-2").unwrap().unwrap();
    assert_eq!(untouched.updated_at, base_time() + Duration::minutes(10));

    assert!(db.get_tag("Work").unwrap().is_none());
    assert!(!db.delete_tag_cascade("Work", now).unwrap());
}

#[test]
fn rename_tag_cascade_merges_memberships() {
    let dir = tempdir().unwrap();
    let db = Database::open(dir.path()).unwrap();

    db.save_record(&record("sol-1", 0, &["Old"]), DEFAULT_COLOR)
        .unwrap();
    db.save_record(&record("sol-2", 10, &["New", "Old"]), DEFAULT_COLOR)
        .unwrap();
    db.upsert_tag(&Tag::new("Old", "#111111")).unwrap();
    db.upsert_tag(&Tag::new("New", "#222222")).unwrap();

    let now = base_time() + Duration::minutes(60);
    assert!(db.rename_tag_cascade("Old", "New", now).unwrap());

    assert_eq!(db.get_record("sol-1").unwrap().unwrap().tags, vec!["New"]);
    assert_eq!(db.get_record("sol-2").unwrap().unwrap().tags, vec!["New"]);

    assert!(db.get_tag("Old").unwrap().is_none());
    assert_eq!(db.get_tag("New").unwrap().unwrap().color, "#111111");

    assert!(!db.rename_tag_cascade("Ghost", "X", now).unwrap());
}

#[test]
fn add_record_tags_registers_and_dedups() {
    let dir = tempdir().unwrap();
    let db = Database::open(dir.path()).unwrap();
    db.save_record(&record("sol-1", 0, &["Work"]), DEFAULT_COLOR)
        .unwrap();

    let now = base_time() + Duration::minutes(60);
    assert!(db
        .add_record_tags(
            "sol-1",
            &["Work".to_string(), "Evening".to_string()],
            DEFAULT_COLOR,
            now,
        )
        .unwrap());

    let found = db.get_record("sol-1").unwrap().unwrap();
    assert_eq!(found.tags, vec!["Evening", "Work"]);
    assert_eq!(found.updated_at, now);
    assert_eq!(db.get_tag("Evening").unwrap().unwrap().color, DEFAULT_COLOR);

    assert!(!db
        .add_record_tags("sol-missing", &["X".to_string()], DEFAULT_COLOR, now)
        .unwrap());
}

#[test]
fn tag_usage_counts_memberships() {
    let dir = tempdir().unwrap();
    let db = Database::open(dir.path()).unwrap();

    db.save_record(&record("sol-1", 0, &["Work"]), DEFAULT_COLOR)
        .unwrap();
    db.save_record(&record("sol-2", 10, &["Sleep", "Work"]), DEFAULT_COLOR)
        .unwrap();
    db.upsert_tag(&Tag::new("Unused", "#333333")).unwrap();

    let usage = db.list_tags_with_usage().unwrap();
    let by_name: Vec<(&str, i64)> = usage.iter().map(|(t, n)| (t.name.as_str(), *n)).collect();
    assert_eq!(by_name, vec![("Sleep", 1), ("Unused", 0), ("Work", 2)]);
}
