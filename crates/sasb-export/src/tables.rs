//! Flattening of metric records into table rows

use sasb_domain::bbox::format_coord;
use sasb_domain::{BBox, MetricAnnotationFile, MetricCatalog};

/// Header of `tsmc_5.csv`
pub const BBOX_HEADER: [&str; 12] = [
    "uid", "cid", "topic", "sid", "page", "value", "unit", "complete", "x1", "y1", "x2", "y2",
];

/// Header of `full_report_agg.csv`
pub const AGG_HEADER: [&str; 4] = ["metric", "pages", "cat_ok", "unit_ok"];

/// Header of `single_page_pairs.csv`
pub const PAIRS_HEADER: [&str; 5] = ["metric", "page", "present", "cat_ok", "unit_ok"];

/// Rendered when the metric map has no topic or sid for a metric
const MISSING_CODE: &str = "0";

/// Review flags in the aggregate tables are capitalized (`True`/`False`);
/// `complete` in the bbox table stays lower-case
fn flag(value: bool) -> String {
    let text = if value { "True" } else { "False" };
    text.to_string()
}

/// One row per (annotation, bbox); annotations without boxes get one row
/// with empty coordinates
pub fn bbox_rows(
    record: &MetricAnnotationFile,
    catalog: &MetricCatalog,
    uid: &str,
    cid: &str,
) -> Vec<[String; 12]> {
    let (topic, sid) = match catalog.get(&record.metric_id) {
        Some(info) => (info.topic_text(MISSING_CODE), info.sid_text(MISSING_CODE)),
        None => (MISSING_CODE.to_string(), MISSING_CODE.to_string()),
    };

    let mut rows = Vec::new();
    for ann in &record.annotations {
        let boxes: Vec<Option<&BBox>> = if ann.bboxes.is_empty() {
            vec![None]
        } else {
            ann.bboxes.iter().map(Some).collect()
        };

        for bbox in boxes {
            let [x1, y1, x2, y2] = match bbox {
                Some(b) => b.as_array().map(format_coord),
                None => Default::default(),
            };
            rows.push([
                uid.to_string(),
                cid.to_string(),
                topic.clone(),
                sid.clone(),
                ann.page.to_string(),
                ann.value.clone(),
                ann.unit.clone(),
                ann.complete.to_string(),
                x1,
                y1,
                x2,
                y2,
            ]);
        }
    }
    rows
}

/// Per-metric aggregate: annotated pages and whether every annotation is confirmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSummary {
    /// Metric id
    pub metric_id: String,
    /// Distinct annotated pages, ascending
    pub pages: Vec<u32>,
    /// All annotations have `cat_ok`; true when there are none
    pub cat_ok: bool,
    /// All annotations have `unit_ok`; true when there are none
    pub unit_ok: bool,
}

impl MetricSummary {
    /// Summarize one metric record
    pub fn from_record(record: &MetricAnnotationFile) -> Self {
        Self {
            metric_id: record.metric_id.clone(),
            pages: record.pages(),
            cat_ok: record.annotations.iter().all(|a| a.cat_ok),
            unit_ok: record.annotations.iter().all(|a| a.unit_ok),
        }
    }

    /// Row of `full_report_agg.csv`
    pub fn to_row(&self) -> [String; 4] {
        let pages: Vec<String> = self.pages.iter().map(u32::to_string).collect();
        [
            self.metric_id.clone(),
            pages.join(" "),
            flag(self.cat_ok),
            flag(self.unit_ok),
        ]
    }
}

/// Presence and confirmation state of one (metric, page) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePair {
    /// Metric id
    pub metric_id: String,
    /// Annotated page
    pub page: u32,
    /// At least one annotation exists on the page
    pub present: bool,
    /// All annotations on the page have `cat_ok`
    pub cat_ok: bool,
    /// All annotations on the page have `unit_ok`
    pub unit_ok: bool,
}

impl PagePair {
    /// Row of `single_page_pairs.csv`
    pub fn to_row(&self) -> [String; 5] {
        [
            self.metric_id.clone(),
            self.page.to_string(),
            flag(self.present),
            flag(self.cat_ok),
            flag(self.unit_ok),
        ]
    }
}

/// One pair per distinct annotated page, ascending
pub fn page_pairs(record: &MetricAnnotationFile) -> Vec<PagePair> {
    record
        .pages()
        .into_iter()
        .map(|page| {
            let on_page: Vec<_> = record.annotations_on(page).collect();
            PagePair {
                metric_id: record.metric_id.clone(),
                page,
                present: !on_page.is_empty(),
                cat_ok: on_page.iter().all(|a| a.cat_ok),
                unit_ok: on_page.iter().all(|a| a.unit_ok),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sasb_domain::Annotation;

    fn catalog() -> MetricCatalog {
        MetricCatalog::from_json_str(r#"{"m1": {"topic": "110", "sid": 11001}}"#).unwrap()
    }

    fn ann(page: u32, cat_ok: bool, unit_ok: bool) -> Annotation {
        let mut a = Annotation::new(page, "1", "%");
        a.cat_ok = cat_ok;
        a.unit_ok = unit_ok;
        a
    }

    #[test]
    fn test_empty_bbox_list_yields_one_row() {
        let mut record = MetricAnnotationFile::new("m1");
        record.annotations.push(Annotation::new(4, "12", "GJ"));

        let rows = bbox_rows(&record, &catalog(), "u", "c");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][..8], ["u", "c", "110", "11001", "4", "12", "GJ", "false"]);
        assert_eq!(rows[0][8..], ["", "", "", ""]);
    }

    #[test]
    fn test_one_row_per_bbox() {
        let mut a = Annotation::new(2, "5", "kg");
        a.complete = true;
        a.bboxes = vec![
            BBox::new(1.0, 2.0, 3.0, 4.0),
            BBox::new(5.5, 6.0, 7.0, 8.25),
            BBox::new(0.0, 0.0, 1.0, 1.0),
        ];
        let mut record = MetricAnnotationFile::new("m1");
        record.annotations.push(a);

        let rows = bbox_rows(&record, &catalog(), "u", "c");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1][7], "true");
        assert_eq!(rows[0][8..], ["1", "2", "3", "4"]);
        assert_eq!(rows[1][8..], ["5.5", "6", "7", "8.25"]);
    }

    #[test]
    fn test_unknown_metric_codes_default_to_zero() {
        let mut record = MetricAnnotationFile::new("other");
        record.annotations.push(Annotation::new(1, "x", ""));
        let rows = bbox_rows(&record, &catalog(), "u", "c");
        assert_eq!(rows[0][2], "0");
        assert_eq!(rows[0][3], "0");
    }

    #[test]
    fn test_summary_vacuous_truth() {
        let summary = MetricSummary::from_record(&MetricAnnotationFile::new("m1"));
        assert!(summary.cat_ok);
        assert!(summary.unit_ok);
        assert_eq!(summary.to_row(), ["m1", "", "True", "True"]);
    }

    #[test]
    fn test_summary_pages_and_flags() {
        let mut record = MetricAnnotationFile::new("m1");
        record.annotations = vec![ann(9, true, true), ann(2, true, false), ann(9, true, true)];
        let summary = MetricSummary::from_record(&record);
        assert_eq!(summary.to_row(), ["m1", "2 9", "True", "False"]);
    }

    #[test]
    fn test_page_pairs() {
        let mut record = MetricAnnotationFile::new("m1");
        record.annotations = vec![ann(9, true, true), ann(2, false, true), ann(9, true, false)];
        let pairs = page_pairs(&record);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].to_row(), ["m1", "2", "True", "False", "True"]);
        assert_eq!(pairs[1].to_row(), ["m1", "9", "True", "True", "False"]);
    }
}
