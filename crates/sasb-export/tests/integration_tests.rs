//! Integration tests for sasb-export
//!
//! Each test builds a project directory with a metric map and annotations,
//! runs the exporter, and reads the produced files back.

use sasb_domain::traits::AnnotationRepository;
use sasb_domain::{Annotation, BBox, MetricAnnotationFile};
use sasb_export::{ExportError, ExportOptions, Exporter};
use sasb_store::AnnotationStore;
use std::path::Path;
use tempfile::TempDir;

const METRIC_MAP: &str = r#"{
    "TC-SC-110a.1": {"topic": "110", "sid": "11001", "category": "Quantitative", "unit": "tCO2e"},
    "TC-SC-130a.1": {"topic": 130, "sid": 13001, "category": "Quantitative", "unit": "GJ"}
}"#;

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("metric_sid_map.json"), METRIC_MAP).unwrap();
    dir
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

fn confirmed(page: u32, value: &str, bboxes: Vec<BBox>) -> Annotation {
    let mut ann = Annotation::new(page, value, "tCO2e");
    ann.complete = true;
    ann.cat_ok = true;
    ann.unit_ok = true;
    ann.bboxes = bboxes;
    ann
}

#[test]
fn test_missing_metric_map_is_fatal() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        Exporter::open(dir.path()),
        Err(ExportError::MissingMetricMap(_))
    ));
}

#[test]
fn test_open_creates_exports_dir() {
    let dir = project();
    let exporter = Exporter::open(dir.path()).unwrap();
    assert!(dir.path().join("exports").is_dir());
    assert_eq!(exporter.export_dir(), dir.path().join("exports"));
}

#[test]
fn test_bbox_rows() {
    let dir = project();
    let store = AnnotationStore::open(dir.path()).unwrap();
    store
        .add_annotation(
            "TC-SC-110a.1",
            confirmed(
                12,
                "1,234",
                vec![BBox::new(1.0, 2.0, 3.0, 4.0), BBox::new(5.0, 6.0, 7.5, 8.0)],
            ),
        )
        .unwrap();
    store
        .add_annotation("TC-SC-110a.1", Annotation::new(13, "88", "%"))
        .unwrap();
    store
        .add_annotation("TC-SC-999", Annotation::new(2, "3", ""))
        .unwrap();

    let path = Exporter::open(dir.path())
        .unwrap()
        .export_bbox_rows("annotator", "tsmc")
        .unwrap();
    assert_eq!(path, dir.path().join("exports/tsmc_5.csv"));

    let rows = read_rows(&path);
    assert_eq!(
        rows[0],
        vec!["uid", "cid", "topic", "sid", "page", "value", "unit", "complete", "x1", "y1", "x2", "y2"]
    );
    assert_eq!(rows.len(), 1 + 2 + 1 + 1);
    assert_eq!(
        rows[1],
        vec!["annotator", "tsmc", "110", "11001", "12", "1,234", "tCO2e", "true", "1", "2", "3", "4"]
    );
    assert_eq!(rows[2][8..], ["5", "6", "7.5", "8"]);
    assert_eq!(
        rows[3],
        vec!["annotator", "tsmc", "110", "11001", "13", "88", "%", "false", "", "", "", ""]
    );
    assert_eq!(rows[4][2..4], ["0", "0"]);
}

#[test]
fn test_gui_written_file_keeps_integer_coordinates() {
    let dir = project();
    let store = AnnotationStore::open(dir.path()).unwrap();
    std::fs::write(
        store.path("TC-SC-110a.1").unwrap(),
        r#"{"metric_id": "TC-SC-110a.1", "annotations": [{"page": 1, "value": "2.5",
            "unit": "tCO2e", "category": "quantitative", "complete": true,
            "bboxes": [{"x1": 1, "y1": 2, "x2": 3, "y2": 4}],
            "cat_ok": true, "unit_ok": true, "timestamp": 1700000000.5}]}"#,
    )
    .unwrap();

    let exporter = Exporter::open(dir.path()).unwrap();
    let rows = read_rows(&exporter.export_bbox_rows("uid", "cid").unwrap());
    assert_eq!(
        rows[1],
        vec!["uid", "cid", "110", "11001", "1", "2.5", "tCO2e", "true", "1", "2", "3", "4"]
    );

    let agg = read_rows(&exporter.export_full_report_agg().unwrap());
    assert_eq!(agg[1], vec!["TC-SC-110a.1", "1", "True", "True"]);
    let pairs = read_rows(&exporter.export_single_page_pairs().unwrap());
    assert_eq!(pairs[1], vec!["TC-SC-110a.1", "1", "True", "True", "True"]);

    // Appending keeps the earlier annotation's coordinates as integers
    store
        .add_annotation("TC-SC-110a.1", Annotation::new(2, "3", ""))
        .unwrap();
    let saved = std::fs::read_to_string(store.path("TC-SC-110a.1").unwrap()).unwrap();
    assert!(saved.contains(r#""x1": 1,"#), "{}", saved);
}

#[test]
fn test_full_report_agg() {
    let dir = project();
    let store = AnnotationStore::open(dir.path()).unwrap();
    store
        .add_annotation("TC-SC-110a.1", confirmed(9, "1", vec![]))
        .unwrap();
    store
        .add_annotation("TC-SC-110a.1", Annotation::new(3, "2", ""))
        .unwrap();
    store.save(&MetricAnnotationFile::new("TC-SC-130a.1")).unwrap();

    let path = Exporter::open(dir.path())
        .unwrap()
        .export_full_report_agg()
        .unwrap();
    let rows = read_rows(&path);
    assert_eq!(rows[0], vec!["metric", "pages", "cat_ok", "unit_ok"]);
    assert_eq!(rows[1], vec!["TC-SC-110a.1", "3 9", "False", "False"]);
    assert_eq!(rows[2], vec!["TC-SC-130a.1", "", "True", "True"]);
}

#[test]
fn test_single_page_pairs() {
    let dir = project();
    let store = AnnotationStore::open(dir.path()).unwrap();
    store
        .add_annotation("TC-SC-110a.1", confirmed(5, "1", vec![]))
        .unwrap();
    let mut unit_wrong = confirmed(5, "2", vec![]);
    unit_wrong.unit_ok = false;
    store.add_annotation("TC-SC-110a.1", unit_wrong).unwrap();
    store
        .add_annotation("TC-SC-110a.1", confirmed(1, "3", vec![]))
        .unwrap();
    store.save(&MetricAnnotationFile::new("TC-SC-130a.1")).unwrap();

    let path = Exporter::open(dir.path())
        .unwrap()
        .export_single_page_pairs()
        .unwrap();
    let rows = read_rows(&path);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1], vec!["TC-SC-110a.1", "1", "True", "True", "True"]);
    assert_eq!(rows[2], vec!["TC-SC-110a.1", "5", "True", "True", "False"]);
}

#[test]
fn test_backups_are_not_exported() {
    let dir = project();
    let store = AnnotationStore::open(dir.path()).unwrap();
    store
        .add_annotation("TC-SC-110a.1", confirmed(1, "1", vec![]))
        .unwrap();
    store
        .add_annotation("TC-SC-110a.1", confirmed(2, "2", vec![]))
        .unwrap();
    assert_eq!(store.backups("TC-SC-110a.1").unwrap().len(), 1);

    let path = Exporter::open(dir.path())
        .unwrap()
        .export_full_report_agg()
        .unwrap();
    assert_eq!(read_rows(&path).len(), 2);
}

#[test]
fn test_malformed_annotation_file_fails_export() {
    let dir = project();
    let store = AnnotationStore::open(dir.path()).unwrap();
    std::fs::write(store.dir().join("bad.json"), "[1, 2").unwrap();

    let exporter = Exporter::open(dir.path()).unwrap();
    assert!(matches!(
        exporter.export_full_report_agg(),
        Err(ExportError::Store(_))
    ));
}

#[test]
fn test_metadata_hashes_pdf() {
    let dir = project();
    let pdf = dir.path().join("report.pdf");
    std::fs::write(&pdf, b"abc").unwrap();

    let path = Exporter::open(dir.path())
        .unwrap()
        .export_metadata("tsmc", &pdf, 2024, "en", "1.0")
        .unwrap();
    let meta: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(meta["company"], "tsmc");
    assert_eq!(
        meta["pdf_hash"],
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(meta["year"], 2024);
    assert_eq!(meta["lang"], "en");
    assert_eq!(meta["sasb_version"], "1.0");
}

#[test]
fn test_metadata_missing_pdf() {
    let dir = project();
    let exporter = Exporter::open(dir.path()).unwrap();
    assert!(matches!(
        exporter.export_metadata("tsmc", dir.path().join("missing.pdf"), 2024, "en", "1.0"),
        Err(ExportError::MissingPdf(_))
    ));
}

#[test]
fn test_session_metadata_counts_annotations() {
    let dir = project();
    let store = AnnotationStore::open(dir.path()).unwrap();
    store
        .add_annotation("TC-SC-110a.1", confirmed(1, "1", vec![]))
        .unwrap();
    store
        .add_annotation("TC-SC-130a.1", confirmed(2, "2", vec![]))
        .unwrap();
    store
        .add_annotation("TC-SC-130a.1", confirmed(3, "3", vec![]))
        .unwrap();

    let path = Exporter::open(dir.path())
        .unwrap()
        .export_session_metadata("samsung", 2024, "ko", "1.0")
        .unwrap();
    let meta: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(meta["company"], "samsung");
    assert_eq!(meta["total_annotations"], 3);
    assert!(meta["export_time"].as_f64().unwrap() > 0.0);
    assert!(meta.get("pdf_hash").is_none());
}

#[test]
fn test_export_all() {
    let dir = project();
    let store = AnnotationStore::open(dir.path()).unwrap();
    store
        .add_annotation("TC-SC-110a.1", confirmed(1, "1", vec![]))
        .unwrap();
    let pdf = dir.path().join("report.pdf");
    std::fs::write(&pdf, b"%PDF-1.7").unwrap();

    let options = ExportOptions {
        pdf_path: Some(pdf),
        ..ExportOptions::default()
    };
    let summary = Exporter::open(dir.path())
        .unwrap()
        .export_all(&options)
        .unwrap();

    assert_eq!(summary.metrics, 1);
    assert_eq!(summary.annotations, 1);
    for path in [
        &summary.bbox_rows,
        &summary.full_report_agg,
        &summary.single_page_pairs,
        &summary.metadata,
    ] {
        assert!(path.is_file(), "{} missing", path.display());
    }
    assert_eq!(read_rows(&summary.bbox_rows)[1][0], "annotator");
}

#[test]
fn test_export_all_missing_pdf_writes_nothing() {
    let dir = project();
    let options = ExportOptions {
        pdf_path: Some(dir.path().join("missing.pdf")),
        ..ExportOptions::default()
    };
    let result = Exporter::open(dir.path()).unwrap().export_all(&options);
    assert!(matches!(result, Err(ExportError::MissingPdf(_))));
    assert!(!dir.path().join("exports/tsmc_5.csv").exists());
}
