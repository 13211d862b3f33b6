use crate::ingest::types::IpoRecord;

pub const NO_MAINLINE_TITLE: &str = "No mainline IPO closes today";

const SME_MARKER: &str = "SME";
const NO_MAINLINE_MARKER: &str = "No mainline";

#[derive(Debug, Clone)]
pub struct Classification {
    // One newline-terminated "<name> - <start>-<end>" line per mainline IPO.
    pub details: String,
    pub closing_today: Vec<String>,
    pub title: String,
}

pub fn classify(records: &[IpoRecord], today: &str) -> Classification {
    let mut details = String::new();
    let mut closing_today = Vec::new();

    for record in records {
        if record.ipo_type_tag.contains(SME_MARKER) {
            continue;
        }
        details.push_str(&format!(
            "{} - {}-{}\n",
            record.name, record.issue_start_date, record.issue_end_date
        ));
        // Substring containment, not date equality: an end date carrying
        // extra text still matches.
        if record.issue_end_date.contains(today) {
            closing_today.push(record.name.trim().to_string());
        }
    }

    let title = if closing_today.is_empty() {
        NO_MAINLINE_TITLE.to_string()
    } else {
        format!("{} close today", closing_today.join(", "))
    };

    Classification {
        details,
        closing_today,
        title,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn level(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 3,
            Priority::High => 5,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Priority::Low => "info",
            Priority::Medium => "warning",
            Priority::High => "rotating_light",
        }
    }
}

pub fn priority_for(title: &str, details: &str) -> Priority {
    if !title.contains(NO_MAINLINE_MARKER) {
        Priority::High
    } else if details.contains(NO_MAINLINE_MARKER) {
        // Keys off the details text itself, not an emptiness flag: an empty
        // details block carries no marker and resolves to Medium.
        Priority::Low
    } else {
        Priority::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, tag: &str, start: &str, end: &str) -> IpoRecord {
        IpoRecord {
            name: name.to_string(),
            ipo_type_tag: tag.to_string(),
            issue_start_date: start.to_string(),
            issue_end_date: end.to_string(),
        }
    }

    #[test]
    fn one_details_line_per_mainline_record() {
        let records = vec![
            record("Acme Ltd", "Mainline IPO", "3 Mar 2025", "5 Mar 2025"),
            record("Tiny Tools", "SME IPO", "3 Mar 2025", "5 Mar 2025"),
            record("Bolt Motors", "Mainline IPO", "4 Mar 2025", "7 Mar 2025"),
        ];

        let c = classify(&records, "5 Mar 2025");
        assert_eq!(c.details.lines().count(), 2);
        assert!(c.details.contains("Acme Ltd - 3 Mar 2025-5 Mar 2025"));
        assert!(!c.details.contains("Tiny Tools"));
    }

    #[test]
    fn sme_records_never_close_today() {
        let records = vec![record("Tiny Tools", "SME IPO", "3 Mar 2025", "5 Mar 2025")];
        let c = classify(&records, "5 Mar 2025");
        assert!(c.closing_today.is_empty());
        assert_eq!(c.title, NO_MAINLINE_TITLE);
    }

    #[test]
    fn sme_marker_is_case_sensitive() {
        let records = vec![record("Oddball", "sme ipo", "3 Mar 2025", "9 Mar 2025")];
        let c = classify(&records, "5 Mar 2025");
        assert_eq!(c.details.lines().count(), 1);
    }

    #[test]
    fn end_date_match_is_substring_containment() {
        let records = vec![record(
            "Acme Ltd",
            "Mainline IPO",
            "3 Mar 2025",
            "Wed, 5 Mar 2025",
        )];
        let c = classify(&records, "5 Mar 2025");
        assert_eq!(c.closing_today, vec!["Acme Ltd".to_string()]);
    }

    #[test]
    fn closing_names_are_trimmed_and_title_joined() {
        let records = vec![
            record(" Acme Ltd ", "Mainline IPO", "3 Mar 2025", "5 Mar 2025"),
            record("Bolt Motors", "Mainline IPO", "1 Mar 2025", "5 Mar 2025"),
        ];
        let c = classify(&records, "5 Mar 2025");
        assert_eq!(
            c.closing_today,
            vec!["Acme Ltd".to_string(), "Bolt Motors".to_string()]
        );
        assert_eq!(c.title, "Acme Ltd, Bolt Motors close today");
    }

    #[test]
    fn closing_today_scenario_sets_high_priority() {
        let records = vec![record("Acme Ltd", "Mainline IPO", "3 Mar 2025", "5 Mar 2025")];
        let c = classify(&records, "5 Mar 2025");

        assert_eq!(c.title, "Acme Ltd close today");
        let p = priority_for(&c.title, &c.details);
        assert_eq!(p, Priority::High);
        assert_eq!(p.level(), 5);
        assert_eq!(p.tag(), "rotating_light");
    }

    #[test]
    fn open_but_not_closing_is_medium() {
        let records = vec![record("Acme Ltd", "Mainline IPO", "3 Mar 2025", "9 Mar 2025")];
        let c = classify(&records, "5 Mar 2025");

        assert_eq!(c.title, NO_MAINLINE_TITLE);
        let p = priority_for(&c.title, &c.details);
        assert_eq!(p, Priority::Medium);
        assert_eq!(p.level(), 3);
        assert_eq!(p.tag(), "warning");
    }

    #[test]
    fn zero_records_resolve_to_medium() {
        // An empty details block does not contain the "No mainline" marker,
        // so the Low branch never fires here.
        let c = classify(&[], "5 Mar 2025");
        assert!(c.details.is_empty());
        assert_eq!(c.title, NO_MAINLINE_TITLE);
        assert_eq!(priority_for(&c.title, &c.details), Priority::Medium);
    }

    #[test]
    fn low_requires_marker_in_details_text() {
        let p = priority_for(NO_MAINLINE_TITLE, "No mainline IPOs today\n");
        assert_eq!(p, Priority::Low);
        assert_eq!(p.level(), 1);
        assert_eq!(p.tag(), "info");
    }
}
