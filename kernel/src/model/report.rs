use crate::model::id::{ReportId, UserId};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use derive_new::new;
use std::fmt::Write;

/// Counters captured at the moment a report is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportSnapshot {
    pub menu_items_today: i64,
    pub new_orders: i64,
    pub served_today: i64,
    pub written_off_today: i64,
    pub procurement_entries: i64,
}

impl ReportSnapshot {
    pub fn render(&self, generated_at: NaiveDateTime, creator: &str) -> String {
        let mut out = String::new();
        // writing into a String cannot fail
        let _ = writeln!(out, "=== Cafeteria management system ===");
        let _ = writeln!(out, "Generated at: {}", generated_at.format("%Y-%m-%d %H:%M:%S"));
        let _ = writeln!(out, "Created by: {creator} (admin)");
        let _ = writeln!(out);
        let _ = writeln!(out, "Summary:");
        let _ = writeln!(out, "- Menu items today: {}", self.menu_items_today);
        let _ = writeln!(out, "- New orders: {}", self.new_orders);
        let _ = writeln!(out, "- Portions served today: {}", self.served_today);
        let _ = writeln!(out, "- Portions written off today: {}", self.written_off_today);
        let _ = writeln!(out, "- Procurement entries: {}", self.procurement_entries);
        let _ = writeln!(out);
        let _ = writeln!(out, "End of report.");
        out
    }
}

pub fn report_title(number: i64, day: NaiveDate) -> String {
    format!("Report #{number} ({day})")
}

pub fn report_filename(number: i64) -> String {
    format!("report_{number}.txt")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub id: ReportId,
    pub number: i64,
    pub title: String,
    pub filename: String,
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, new)]
pub struct CreateReport {
    pub today: NaiveDate,
    pub generated_at: NaiveDateTime,
    pub created_by: UserId,
    pub creator_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_report_lists_every_counter() {
        let snapshot = ReportSnapshot {
            menu_items_today: 5,
            new_orders: 2,
            served_today: 17,
            written_off_today: 3,
            procurement_entries: 9,
        };
        let at = NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        let text = snapshot.render(at, "Administrator");
        assert!(text.contains("Generated at: 2026-10-16 12:30:00"));
        assert!(text.contains("Created by: Administrator"));
        assert!(text.contains("- Menu items today: 5"));
        assert!(text.contains("- New orders: 2"));
        assert!(text.contains("- Portions served today: 17"));
        assert!(text.contains("- Portions written off today: 3"));
        assert!(text.contains("- Procurement entries: 9"));
        assert!(text.ends_with("End of report.\n"));
    }

    #[test]
    fn titles_and_filenames_follow_the_report_number() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(report_title(4, day), "Report #4 (2026-10-16)");
        assert_eq!(report_filename(4), "report_4.txt");
    }
}
