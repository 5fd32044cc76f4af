// src/models/paper.rs

use serde::{Deserialize, Serialize};
use url::Url;

/// Filter value meaning "no year filter".
pub const ALL_YEARS: &str = "All Years";

/// Filter value meaning "no subject filter".
pub const ALL_SUBJECTS: &str = "All Subjects";

const SUBJECTS: [(&str, &str); 4] = [
    ("Mathematics", "MATH1101"),
    ("Chemistry", "CHEM1001"),
    ("Electrical Engineering", "ELEC1001"),
    ("Mechanical Engineering", "MECH1101"),
];

const YEARS: [&str; 5] = ["2014", "2015", "2016", "2017", "2018"];

/// One downloadable past exam paper.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PastPaper {
    pub subject: String,
    pub year: String,
    pub paper: String,

    /// Path relative to the papers directory root, e.g. `pyq/MATH1101_2014.pdf`.
    pub link: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

/// Query parameters for listing papers.
#[derive(Debug, Default, Deserialize)]
pub struct PaperListParams {
    pub year: Option<String>,
    pub subject: Option<String>,
}

/// Papers of one subject, in catalogue order.
#[derive(Debug, Serialize)]
pub struct SubjectPapers {
    pub subject: String,
    pub papers: Vec<PastPaper>,
}

/// The fixed catalogue of past papers.
pub fn catalogue() -> Vec<PastPaper> {
    SUBJECTS
        .iter()
        .flat_map(|(subject, code)| {
            YEARS.iter().map(move |year| PastPaper {
                subject: subject.to_string(),
                year: year.to_string(),
                paper: format!("{} {}", code, year),
                link: format!("pyq/{}_{}.pdf", code, year),
                download_url: None,
            })
        })
        .collect()
}

fn is_active(filter: &Option<String>, all: &str) -> Option<String> {
    filter.clone().filter(|v| !v.is_empty() && v != all)
}

/// Filters the catalogue and groups it by subject.
///
/// When `base` is given, every entry gets an absolute `download_url`.
pub fn list_papers(params: &PaperListParams, base: Option<&Url>) -> Vec<SubjectPapers> {
    let year = is_active(&params.year, ALL_YEARS);
    let subject = is_active(&params.subject, ALL_SUBJECTS);

    let mut grouped: Vec<SubjectPapers> = Vec::new();
    for mut paper in catalogue() {
        if year.as_ref().is_some_and(|y| *y != paper.year) {
            continue;
        }
        if subject.as_ref().is_some_and(|s| *s != paper.subject) {
            continue;
        }
        paper.download_url = base
            .and_then(|b| b.join(&paper.link).ok())
            .map(|u| u.to_string());

        match grouped.iter_mut().find(|g| g.subject == paper.subject) {
            Some(group) => group.papers.push(paper),
            None => grouped.push(SubjectPapers {
                subject: paper.subject.clone(),
                papers: vec![paper],
            }),
        }
    }
    grouped
}
