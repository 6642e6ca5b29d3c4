/// Identification of a UseCase for logs and error bodies
pub trait UseCaseMetadata {
    /// UseCase index, e.g. "u501"
    fn usecase_index() -> &'static str;

    /// Technical name, e.g. "import_events_csv"
    fn usecase_name() -> &'static str;

    fn display_name() -> &'static str;

    fn description() -> &'static str {
        ""
    }

    /// "u501_import_events_csv"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}
