pub mod u501_import_events_csv;
