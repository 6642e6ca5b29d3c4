use super::similarity::{is_duplicate, similarity_ratio};
use contracts::domain::a001_event::Event;
use contracts::usecases::u501_import_events_csv::{DeduplicationMode, ImportDecision};

/// Most similar existing event the candidate duplicates, if any
pub fn find_duplicate<'a>(candidate: &Event, existing: &'a [Event]) -> Option<&'a Event> {
    existing
        .iter()
        .filter(|e| e.base.id != candidate.base.id)
        .filter(|e| {
            is_duplicate(
                &candidate.name,
                (candidate.start_date, candidate.end_date),
                &e.name,
                (e.start_date, e.end_date),
            )
        })
        .max_by(|a, b| {
            similarity_ratio(&candidate.name, &a.name)
                .total_cmp(&similarity_ratio(&candidate.name, &b.name))
        })
}

/// Rows without a duplicate are always inserted; otherwise the mode decides
pub fn decide(mode: DeduplicationMode, duplicate: Option<&Event>) -> ImportDecision {
    let Some(existing) = duplicate else {
        return ImportDecision::Insert;
    };
    match mode {
        DeduplicationMode::Skip => ImportDecision::Skip {
            reason: format!(
                "duplicate of '{}' starting {}",
                existing.name, existing.start_date
            ),
        },
        DeduplicationMode::Update => ImportDecision::Update {
            existing_id: existing.to_string_id(),
            existing_name: existing.name.clone(),
        },
        DeduplicationMode::Import => ImportDecision::Insert,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(name: &str, start: &str) -> Event {
        let date = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
        Event::new_for_insert(name.into(), date, date, "Brno".into())
    }

    #[test]
    fn test_picks_closest_match() {
        let existing = vec![
            event("Open Source Sumit", "2025-09-01"),
            event("Open Source Summit", "2025-09-01"),
            event("Open Source Summit", "2025-09-02"),
        ];
        let candidate = event("open source summit", "2025-09-01");
        let found = find_duplicate(&candidate, &existing).unwrap();
        assert_eq!(found.name, "Open Source Summit");
        assert_eq!(found.start_date, existing[1].start_date);
    }

    #[test]
    fn test_longer_event_is_not_a_duplicate() {
        let existing = vec![event("DevConf 2025", "2025-06-12")];
        let mut candidate = event("DevConf 2025", "2025-06-12");
        candidate.end_date = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();

        assert!(find_duplicate(&candidate, &existing).is_none());
        assert_eq!(
            decide(DeduplicationMode::Update, find_duplicate(&candidate, &existing)),
            ImportDecision::Insert
        );
    }

    #[test]
    fn test_decision_per_mode() {
        let existing = event("DevConf 2025", "2025-06-12");

        assert_eq!(decide(DeduplicationMode::Skip, None), ImportDecision::Insert);
        assert!(matches!(
            decide(DeduplicationMode::Skip, Some(&existing)),
            ImportDecision::Skip { .. }
        ));
        assert_eq!(
            decide(DeduplicationMode::Update, Some(&existing)),
            ImportDecision::Update {
                existing_id: existing.to_string_id(),
                existing_name: "DevConf 2025".into(),
            }
        );
        assert_eq!(
            decide(DeduplicationMode::Import, Some(&existing)),
            ImportDecision::Insert
        );
    }
}
