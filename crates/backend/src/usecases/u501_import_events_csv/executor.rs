use super::csv_parser::{parse_csv, CsvParseError};
use super::dedup::{decide, find_duplicate};
use super::event_store::EventStore;
use super::row_mapper::RowMapper;
use super::ImportEventsCsv;
use crate::shared::format::{format_number, truncate_for_log};
use contracts::domain::a001_event::Event;
use contracts::usecases::common::{UseCaseError, UseCaseMetadata, UseCaseResult};
use contracts::usecases::u501_import_events_csv::{
    ColumnMapper, DeduplicationMode, ImportDecision, ImportRequest, ImportResult, ParseRequest,
    ParseResponse, ParsedRow, PreviewResponse, PreviewRow, RowOutcome, RowStatus,
};
use std::sync::Arc;

/// Executor of the CSV event import: parse, preview, execute
#[derive(Clone)]
pub struct ImportExecutor {
    store: Arc<dyn EventStore>,
}

impl ImportExecutor {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    /// Headers and rows of the uploaded text with an auto-mapped column suggestion
    pub fn parse(&self, request: &ParseRequest) -> UseCaseResult<ParseResponse> {
        let parsed = parse_csv(&request.csv_text).map_err(|e| match e {
            CsvParseError::NoHeaders => UseCaseError::validation(e.to_string()),
            CsvParseError::Malformed(_) => {
                UseCaseError::validation("Malformed CSV").with_details(e.to_string())
            }
        })?;

        let mapper = ColumnMapper::with_auto_mapping(&parsed.headers);
        tracing::info!(
            "{}: parsed {} columns, {} rows",
            ImportEventsCsv::full_name(),
            parsed.headers.len(),
            format_number(parsed.rows.len())
        );

        Ok(ParseResponse {
            headers: parsed.headers,
            rows: parsed.rows,
            unmapped_required: mapper.unmapped_required(),
            mappings: mapper.into_mappings(),
        })
    }

    fn validate_request(request: &ImportRequest) -> UseCaseResult<()> {
        let missing = request.missing_required();
        if missing.is_empty() {
            return Ok(());
        }
        let names: Vec<&str> = missing.iter().map(|f| f.as_str()).collect();
        Err(UseCaseError::validation(format!(
            "Required fields are neither mapped nor defaulted: {}",
            names.join(", ")
        )))
    }

    /// Decision for every row without writing anything.
    /// Rows planned for insertion count as existing events for later rows.
    pub async fn preview(&self, request: &ImportRequest) -> UseCaseResult<PreviewResponse> {
        Self::validate_request(request)?;

        let mapper = RowMapper::new(request);
        let mut planned: Vec<Event> = Vec::new();
        let mut response = PreviewResponse::default();

        for (idx, row) in request.rows.iter().enumerate() {
            let row_number = idx + 1;
            let draft = match mapper.new_event(row) {
                Ok(draft) => draft,
                Err(e) => {
                    response.invalid += 1;
                    response.rows.push(PreviewRow {
                        row: row_number,
                        name: None,
                        start_date: None,
                        decision: None,
                        error: Some(format!("Row {}: {}", row_number, e)),
                    });
                    continue;
                }
            };

            let mut candidates = self.store.find_candidates(draft.start_date).await?;
            candidates.extend(
                planned
                    .iter()
                    .filter(|e| e.start_date == draft.start_date)
                    .cloned(),
            );
            let decision = decide(
                request.deduplication_mode,
                find_duplicate(&draft, &candidates),
            );

            match &decision {
                ImportDecision::Insert => {
                    response.to_insert += 1;
                }
                ImportDecision::Update { .. } => response.to_update += 1,
                ImportDecision::Skip { .. } => response.to_skip += 1,
            }
            response.rows.push(PreviewRow {
                row: row_number,
                name: Some(draft.name.clone()),
                start_date: Some(draft.start_date.to_string()),
                decision: Some(decision.clone()),
                error: None,
            });
            if decision == ImportDecision::Insert {
                planned.push(draft);
            }
        }

        Ok(response)
    }

    /// Runs the import. Every row is handled on its own: a failing row is
    /// recorded in `errors` and the batch goes on.
    pub async fn execute(
        &self,
        request: &ImportRequest,
        created_by: Option<String>,
    ) -> UseCaseResult<ImportResult> {
        Self::validate_request(request)?;

        tracing::info!(
            "{}: importing {} rows (mode: {:?})",
            ImportEventsCsv::full_name(),
            format_number(request.rows.len()),
            request.deduplication_mode
        );

        let mapper = RowMapper::new(request);
        let mut result = ImportResult::default();

        for (idx, row) in request.rows.iter().enumerate() {
            let row_number = idx + 1;
            match self
                .import_row(&mapper, row, request.deduplication_mode, created_by.as_deref())
                .await
            {
                Ok((outcome, duplicate)) => {
                    match outcome.status {
                        RowStatus::Imported => result.imported += 1,
                        RowStatus::Updated => result.updated += 1,
                        RowStatus::Skipped => result.skipped += 1,
                        RowStatus::Failed => {}
                    }
                    if let Some(duplicate) = duplicate {
                        result
                            .duplicates
                            .push(format!("Row {}: {}", row_number, duplicate));
                    }
                    result.rows.push(RowOutcome {
                        row: row_number,
                        ..outcome
                    });
                }
                Err(e) => {
                    let message = format!("Row {}: {}", row_number, e);
                    tracing::debug!("{}", truncate_for_log(&message, 200));
                    result.errors.push(message.clone());
                    result.rows.push(RowOutcome {
                        row: row_number,
                        status: RowStatus::Failed,
                        event_id: None,
                        message: Some(message),
                    });
                }
            }
        }

        tracing::info!(
            "{}: {} imported, {} updated, {} skipped, {} failed",
            ImportEventsCsv::full_name(),
            format_number(result.imported),
            format_number(result.updated),
            format_number(result.skipped),
            format_number(result.errors.len())
        );

        Ok(result)
    }

    /// Outcome of one row plus a duplicate note when it matched an existing event
    async fn import_row(
        &self,
        mapper: &RowMapper<'_>,
        row: &ParsedRow,
        mode: DeduplicationMode,
        created_by: Option<&str>,
    ) -> anyhow::Result<(RowOutcome, Option<String>)> {
        let mut draft = mapper.new_event(row).map_err(anyhow::Error::msg)?;

        // Re-read on every row: earlier rows of this batch and concurrent
        // edits are visible here.
        let candidates = self.store.find_candidates(draft.start_date).await?;
        let duplicate = find_duplicate(&draft, &candidates);
        let note = duplicate.map(|existing| {
            format!(
                "'{}' matches existing event '{}' ({})",
                draft.name, existing.name, existing.start_date
            )
        });

        let outcome = match decide(mode, duplicate) {
            ImportDecision::Insert => {
                draft.created_by = created_by.map(str::to_string);
                draft.before_write();
                self.store.insert(&draft).await?;
                RowOutcome {
                    row: 0,
                    status: RowStatus::Imported,
                    event_id: Some(draft.to_string_id()),
                    message: None,
                }
            }
            ImportDecision::Update { existing_id, .. } => {
                let mut existing = candidates
                    .iter()
                    .find(|e| e.to_string_id() == existing_id)
                    .cloned()
                    .ok_or_else(|| anyhow::anyhow!("event {} disappeared", existing_id))?;
                mapper
                    .apply_update(row, &mut existing)
                    .map_err(anyhow::Error::msg)?;
                existing.before_write();
                self.store.update(&existing).await?;
                RowOutcome {
                    row: 0,
                    status: RowStatus::Updated,
                    event_id: Some(existing_id),
                    message: None,
                }
            }
            ImportDecision::Skip { reason } => RowOutcome {
                row: 0,
                status: RowStatus::Skipped,
                event_id: None,
                message: Some(reason),
            },
        };

        Ok((outcome, note))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u501_import_events_csv::event_store::memory::InMemoryEventStore;
    use chrono::NaiveDate;
    use contracts::usecases::u501_import_events_csv::EventField;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn existing(name: &str, start: &str) -> Event {
        Event::new_for_insert(name.into(), date(start), date(start), "Brno".into())
    }

    fn row(name: &str, start: &str, notes: &str) -> ParsedRow {
        [
            ("Name", name),
            ("Start", start),
            ("End", start),
            ("City", "Brno"),
            ("Notes", notes),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn request(rows: Vec<ParsedRow>, mode: DeduplicationMode) -> ImportRequest {
        ImportRequest {
            rows,
            column_mapping: [
                (EventField::Name, "Name"),
                (EventField::StartDate, "Start"),
                (EventField::EndDate, "End"),
                (EventField::Location, "City"),
                (EventField::Notes, "Notes"),
            ]
            .iter()
            .map(|(f, c)| (*f, c.to_string()))
            .collect(),
            default_values: Default::default(),
            deduplication_mode: mode,
        }
    }

    fn executor(store: Arc<InMemoryEventStore>) -> ImportExecutor {
        ImportExecutor::new(store)
    }

    #[tokio::test]
    async fn test_skip_mode_skips_duplicate() {
        let store = Arc::new(InMemoryEventStore::with_events(vec![existing(
            "DevConf 2025",
            "2025-06-12",
        )]));
        let req = request(
            vec![row("DevConf 2025 ", "2025-06-12", "")],
            DeduplicationMode::Skip,
        );

        let result = executor(store.clone()).execute(&req, None).await.unwrap();

        assert_eq!(result.skipped, 1);
        assert_eq!(result.imported, 0);
        assert_eq!(result.duplicates.len(), 1);
        assert_eq!(result.rows[0].status, RowStatus::Skipped);
        assert_eq!(store.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn test_update_mode_overwrites_notes() {
        let original = existing("DevConf 2025", "2025-06-12");
        assert!(original.notes.is_none());
        let id = original.to_string_id();
        let store = Arc::new(InMemoryEventStore::with_events(vec![original]));
        let req = request(
            vec![row("DevConf 2025", "2025-06-12", "Booth 12, hall B")],
            DeduplicationMode::Update,
        );

        let result = executor(store.clone()).execute(&req, None).await.unwrap();

        assert_eq!(result.updated, 1);
        assert_eq!(result.imported, 0);
        let events = store.snapshot();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].to_string_id(), id);
        assert_eq!(events[0].notes.as_deref(), Some("Booth 12, hall B"));
        assert_eq!(events[0].base.metadata.version, 1);
    }

    #[tokio::test]
    async fn test_import_mode_inserts_duplicate() {
        let store = Arc::new(InMemoryEventStore::with_events(vec![existing(
            "DevConf 2025",
            "2025-06-12",
        )]));
        let req = request(
            vec![row("DevConf 2025", "2025-06-12", "")],
            DeduplicationMode::Import,
        );

        let result = executor(store.clone())
            .execute(&req, Some("jdoe".into()))
            .await
            .unwrap();

        assert_eq!(result.imported, 1);
        assert_eq!(result.duplicates.len(), 1);
        let events = store.snapshot();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].created_by.as_deref(), Some("jdoe"));
    }

    #[tokio::test]
    async fn test_bad_row_does_not_abort_batch() {
        let store = Arc::new(InMemoryEventStore::default());
        let rows = (1..=10)
            .map(|i| {
                let start = if i == 5 {
                    "2025-13-40".to_string()
                } else {
                    format!("2025-03-{:02}", i)
                };
                row(&format!("Meetup #{}", i), &start, "")
            })
            .collect();
        let req = request(rows, DeduplicationMode::Skip);

        let result = executor(store.clone()).execute(&req, None).await.unwrap();

        assert_eq!(result.imported, 9);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("Row 5:"));
        assert_eq!(result.rows.len(), 10);
        assert_eq!(result.rows[4].status, RowStatus::Failed);
        assert_eq!(store.snapshot().len(), 9);
    }

    #[tokio::test]
    async fn test_duplicates_within_batch() {
        let store = Arc::new(InMemoryEventStore::default());
        let req = request(
            vec![
                row("FOSDEM", "2025-02-01", ""),
                row("fosdem", "2025-02-01", ""),
            ],
            DeduplicationMode::Skip,
        );

        let preview = executor(store.clone()).preview(&req).await.unwrap();
        assert_eq!(preview.to_insert, 1);
        assert_eq!(preview.to_skip, 1);
        assert!(store.snapshot().is_empty());

        let result = executor(store.clone()).execute(&req, None).await.unwrap();
        assert_eq!(result.imported, 1);
        assert_eq!(result.skipped, 1);
    }

    #[tokio::test]
    async fn test_defaults_fill_unmapped_fields() {
        let store = Arc::new(InMemoryEventStore::default());
        let mut req = request(vec![row("PyCon", "2025-05-14", "")], DeduplicationMode::Skip);
        req.column_mapping.remove(&EventField::Location);
        req.default_values
            .insert(EventField::Location, "Pittsburgh".into());

        let result = executor(store.clone()).execute(&req, None).await.unwrap();

        assert_eq!(result.imported, 1);
        assert_eq!(store.snapshot()[0].location, "Pittsburgh");
    }

    #[tokio::test]
    async fn test_missing_required_field_is_rejected() {
        let store = Arc::new(InMemoryEventStore::default());
        let mut req = request(vec![row("PyCon", "2025-05-14", "")], DeduplicationMode::Skip);
        req.column_mapping.remove(&EventField::Location);

        let err = executor(store).execute(&req, None).await.unwrap_err();

        assert!(err.is_validation());
        assert!(err.message.contains("location"));
    }

    #[test]
    fn test_parse_suggests_mapping() {
        let store = Arc::new(InMemoryEventStore::default());
        let response = executor(store)
            .parse(&ParseRequest {
                csv_text: "Event Name,Start Date,End Date,Budget\nKubeCon,2025-04-01,2025-04-04,10\n"
                    .into(),
            })
            .unwrap();

        assert_eq!(response.rows.len(), 1);
        assert_eq!(response.unmapped_required, vec![EventField::Location]);
        assert!(response.mappings[3].destination.is_none());

        let empty = executor(Arc::new(InMemoryEventStore::default()))
            .parse(&ParseRequest {
                csv_text: String::new(),
            })
            .unwrap_err();
        assert_eq!(empty.message, "No headers found");
    }
}
