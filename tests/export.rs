#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use finrec::libs::config::Config;
    use finrec::libs::export::{
        ArtifactSink, DirectorySink, EngineLoader, ExportError, ExportOutcome, Exporter, SpreadsheetEngine,
        XlsxEngineLoader,
    };
    use finrec::libs::record::PaymentRecord;
    use finrec::libs::style::StyleRole;
    use finrec::libs::workbook::{Workbook, DETAIL_SHEET_NAME, SUMMARY_SHEET_NAME};
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    /// Engine that records the workbooks it is asked to serialize.
    #[derive(Clone, Default)]
    struct RecordingEngine {
        workbooks: Arc<Mutex<Vec<Workbook>>>,
    }

    impl SpreadsheetEngine for RecordingEngine {
        fn serialize<Tz: TimeZone>(&self, workbook: &Workbook, _generated_at: &DateTime<Tz>) -> Result<Vec<u8>, ExportError> {
            self.workbooks.lock().unwrap().push(workbook.clone());
            Ok(serde_json::to_vec(workbook).unwrap())
        }
    }

    #[derive(Clone, Default)]
    struct RecordingLoader {
        engine: RecordingEngine,
        loads: Arc<Mutex<usize>>,
    }

    impl EngineLoader for RecordingLoader {
        type Engine = RecordingEngine;

        async fn load(&self) -> Result<RecordingEngine, ExportError> {
            *self.loads.lock().unwrap() += 1;
            Ok(self.engine.clone())
        }
    }

    struct FailingLoader;

    impl EngineLoader for FailingLoader {
        type Engine = RecordingEngine;

        async fn load(&self) -> Result<RecordingEngine, ExportError> {
            Err(ExportError::EngineLoad("module unavailable".into()))
        }
    }

    #[derive(Clone, Default)]
    struct MemorySink {
        files: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
    }

    impl ArtifactSink for MemorySink {
        fn deliver(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
            self.files.lock().unwrap().push((file_name.to_string(), bytes.to_vec()));
            Ok(PathBuf::from(file_name))
        }
    }

    struct FailingSink;

    impl ArtifactSink for FailingSink {
        fn deliver(&self, _file_name: &str, _bytes: &[u8]) -> Result<PathBuf, ExportError> {
            Err(ExportError::Sink("download blocked".into()))
        }
    }

    fn records(json: &str) -> Vec<PaymentRecord> {
        serde_json::from_str(json).unwrap()
    }

    fn sample() -> Vec<PaymentRecord> {
        records(
            r#"[
                {"paymentStatus": "paid", "user": {"fullName": "Ana Cruz", "year": "1st Year", "block": "A"},
                 "requirement": "1st Semester", "amount": 1500, "paymentMethod": "gcash",
                 "referenceNumber": "GC-001", "paymentDate": "2025-01-05T07:07:00Z"},
                {"paymentStatus": "pending", "user": {"fullName": "Ben Reyes"}, "amount": 999},
                {"paymentStatus": "PAID", "user": {"fullName": "Carla Santos", "year": "2nd Year"},
                 "requirement": "2nd Semester", "amount": "250.25", "paymentMethod": "cash",
                 "receiptNumber": "0042"},
                {"user": {"fullName": "No Status"}, "amount": 10},
                {"paymentStatus": "Paid", "requirement": "Membership Fee", "amount": "oops",
                 "receiptPath": "https://files.example.org/receipts/7.png"}
            ]"#,
        )
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 7, 4, 30, 0).unwrap()
    }

    fn exporter<L: EngineLoader, S: ArtifactSink>(loader: L, sink: S) -> Exporter<L, S> {
        Exporter::new(&Config::default(), loader, sink)
    }

    fn values(workbook: &Workbook, sheet: &str) -> Vec<Vec<String>> {
        workbook
            .sheet(sheet)
            .unwrap()
            .rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.value.clone()).collect())
            .collect()
    }

    #[tokio::test]
    async fn test_empty_input_is_a_silent_no_op() {
        let loader = RecordingLoader::default();
        let sink = MemorySink::default();

        let outcome = exporter(loader.clone(), sink.clone()).export(&[], &now()).await.unwrap();

        assert_eq!(outcome, ExportOutcome::Skipped);
        assert_eq!(*loader.loads.lock().unwrap(), 0);
        assert!(sink.files.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_no_paid_records_notifies_without_artifact() {
        let loader = RecordingLoader::default();
        let sink = MemorySink::default();
        let input = records(r#"[{"paymentStatus": "pending"}]"#);

        let outcome = exporter(loader.clone(), sink.clone()).export(&input, &now()).await.unwrap();

        assert_eq!(outcome, ExportOutcome::NoPaidRecords);
        assert_eq!(*loader.loads.lock().unwrap(), 0);
        assert!(sink.files.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_export_delivers_dated_file() {
        let loader = RecordingLoader::default();
        let sink = MemorySink::default();

        let outcome = exporter(loader.clone(), sink.clone()).export(&sample(), &now()).await.unwrap();

        match outcome {
            ExportOutcome::Exported { file_name, rows, .. } => {
                assert_eq!(file_name, "Financial_Records_2025-03-07.xlsx");
                assert_eq!(rows, 3);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(*loader.loads.lock().unwrap(), 1);
        let files = sink.files.lock().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].0, "Financial_Records_2025-03-07.xlsx");
    }

    #[tokio::test]
    async fn test_detail_rows_match_paid_records() {
        let loader = RecordingLoader::default();
        exporter(loader.clone(), MemorySink::default()).export(&sample(), &now()).await.unwrap();

        let workbooks = loader.engine.workbooks.lock().unwrap();
        let detail = values(&workbooks[0], DETAIL_SHEET_NAME);

        assert_eq!(
            detail[0],
            vec!["No.", "Name", "Year", "Block", "Semester", "Amount", "Payment Method", "Reference No.", "Receipt", "Payment Date"]
        );
        assert_eq!(
            detail[1],
            vec!["1", "Ana Cruz", "1st", "A", "1st Semester", "₱1500.00", "GCASH", "GC-001", "No receipt", "Jan 5, 2025, 3:07 PM"]
        );
        assert_eq!(
            detail[2],
            vec!["2", "Carla Santos", "2nd", "N/A", "2nd Semester", "₱250.25", "CASH", "0042", "Receipt #0042", "-"]
        );
        assert_eq!(
            detail[3],
            vec![
                "3",
                "Unknown",
                "N/A",
                "N/A",
                "Membership Fee",
                "₱0.00",
                "N/A",
                "-",
                "https://files.example.org/receipts/7.png",
                "-"
            ]
        );
    }

    #[tokio::test]
    async fn test_sequence_numbers_are_contiguous() {
        let loader = RecordingLoader::default();
        exporter(loader.clone(), MemorySink::default()).export(&sample(), &now()).await.unwrap();

        let workbooks = loader.engine.workbooks.lock().unwrap();
        let sequence: Vec<String> = values(&workbooks[0], DETAIL_SHEET_NAME)[1..].iter().map(|r| r[0].clone()).collect();
        assert_eq!(sequence, vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_summary_agrees_with_detail_sheet() {
        let loader = RecordingLoader::default();
        let input = sample();
        exporter(loader.clone(), MemorySink::default()).export(&input, &now()).await.unwrap();

        let workbooks = loader.engine.workbooks.lock().unwrap();
        let workbook = &workbooks[0];
        let summary = values(workbook, SUMMARY_SHEET_NAME);
        let detail_rows = workbook.sheet(DETAIL_SHEET_NAME).unwrap().data_row_count();

        assert_eq!(
            summary,
            vec![
                vec!["Metric", "Value"],
                vec!["Report", "Financial Records Report"],
                vec!["Exported On", "Mar 7, 2025, 12:30 PM"],
                vec!["Total Paid Members", "3"],
                vec!["1st Semester Payments", "1"],
                vec!["2nd Semester Payments", "1"],
                vec!["Total Amount Collected", "₱1750.25"],
            ]
        );
        assert_eq!(summary[3][1], detail_rows.to_string());

        // Sum of raw amounts, rounded, equals the formatted total
        let raw: f64 = input.iter().filter(|r| r.is_paid()).map(|r| r.amount_value()).sum();
        let shown: f64 = summary[6][1].trim_start_matches('₱').parse().unwrap();
        assert_eq!((raw * 100.0).round() / 100.0, shown);
    }

    #[tokio::test]
    async fn test_period_counts_may_overlap_or_miss() {
        // The counts depend on the "1st"/"2nd" label convention; other labels go uncounted.
        let loader = RecordingLoader::default();
        let input = records(
            r#"[
                {"paymentStatus": "paid", "requirement": "1st & 2nd Semester"},
                {"paymentStatus": "paid", "requirement": "First Semester"},
                {"paymentStatus": "paid"}
            ]"#,
        );
        exporter(loader.clone(), MemorySink::default()).export(&input, &now()).await.unwrap();

        let workbooks = loader.engine.workbooks.lock().unwrap();
        let summary = values(&workbooks[0], SUMMARY_SHEET_NAME);
        assert_eq!(summary[3][1], "3");
        assert_eq!(summary[4][1], "1");
        assert_eq!(summary[5][1], "1");
    }

    #[tokio::test]
    async fn test_every_cell_is_styled_by_role() {
        let loader = RecordingLoader::default();
        exporter(loader.clone(), MemorySink::default()).export(&sample(), &now()).await.unwrap();

        let workbooks = loader.engine.workbooks.lock().unwrap();
        let detail = workbooks[0].sheet(DETAIL_SHEET_NAME).unwrap();
        assert!(detail.rows[0].iter().all(|c| c.style == Some(StyleRole::Header)));
        assert_eq!(detail.rows[1][0].style, Some(StyleRole::Centered));
        assert_eq!(detail.rows[1][1].style, Some(StyleRole::Data));
        assert_eq!(detail.rows[1][5].style, Some(StyleRole::Monetary));
        assert_eq!(detail.rows[1][8].style, Some(StyleRole::Link));

        let summary = workbooks[0].sheet(SUMMARY_SHEET_NAME).unwrap();
        assert!(summary.rows[0].iter().all(|c| c.style == Some(StyleRole::Header)));
        assert!(summary.rows[1..].iter().flatten().all(|c| c.style == Some(StyleRole::Data)));
    }

    #[tokio::test]
    async fn test_repeated_exports_are_identical() {
        let loader = RecordingLoader::default();
        let sink = MemorySink::default();
        let exporter = exporter(loader.clone(), sink.clone());
        let input = sample();

        exporter.export(&input, &now()).await.unwrap();
        exporter.export(&input, &now()).await.unwrap();

        let files = sink.files.lock().unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0], files[1]);
        assert_eq!(*loader.loads.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_exports_differ_only_in_timestamp() {
        let loader = RecordingLoader::default();
        let exporter = exporter(loader.clone(), MemorySink::default());
        let input = sample();
        let later = Utc.with_ymd_and_hms(2025, 3, 8, 1, 0, 0).unwrap();

        exporter.export(&input, &now()).await.unwrap();
        exporter.export(&input, &later).await.unwrap();

        let workbooks = loader.engine.workbooks.lock().unwrap();
        assert_eq!(values(&workbooks[0], DETAIL_SHEET_NAME), values(&workbooks[1], DETAIL_SHEET_NAME));

        let first = values(&workbooks[0], SUMMARY_SHEET_NAME);
        let second = values(&workbooks[1], SUMMARY_SHEET_NAME);
        let differing: Vec<&str> = first
            .iter()
            .zip(&second)
            .filter(|(a, b)| a != b)
            .map(|(a, _)| a[0].as_str())
            .collect();
        assert_eq!(differing, vec!["Exported On"]);
    }

    #[tokio::test]
    async fn test_engine_load_failure_produces_no_artifact() {
        let sink = MemorySink::default();

        let result = exporter(FailingLoader, sink.clone()).export(&sample(), &now()).await;

        assert!(matches!(result, Err(ExportError::EngineLoad(_))));
        assert!(sink.files.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sink_failure_is_reported() {
        let result = exporter(RecordingLoader::default(), FailingSink).export(&sample(), &now()).await;
        assert!(matches!(result, Err(ExportError::Sink(_))));
    }

    #[tokio::test]
    async fn test_single_record_without_date() {
        let loader = RecordingLoader::default();
        let input = records(r#"[{"paymentStatus": "paid", "amount": 1500}]"#);
        exporter(loader.clone(), MemorySink::default()).export(&input, &now()).await.unwrap();

        let workbooks = loader.engine.workbooks.lock().unwrap();
        let detail = values(&workbooks[0], DETAIL_SHEET_NAME);
        assert_eq!(detail[1][5], "₱1500.00");
        assert_eq!(detail[1][9], "-");
    }

    #[tokio::test]
    async fn test_xlsx_export_writes_workbook_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("exports"));

        let outcome = exporter(XlsxEngineLoader, sink).export(&sample(), &now()).await.unwrap();

        let ExportOutcome::Exported { path, .. } = outcome else {
            panic!("expected an exported workbook");
        };
        assert_eq!(path, dir.path().join("exports").join("Financial_Records_2025-03-07.xlsx"));
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.len() > 1000);
        assert_eq!(&bytes[..4], b"PK\x03\x04");
    }
}
