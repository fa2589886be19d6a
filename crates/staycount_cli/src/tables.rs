use chrono::NaiveDate;
use comfy_table::{modifiers, presets, Attribute, Cell, CellAlignment, Color, Table};
use staycount_core::{DateRange, DayStatus};

const TIMELINE_DAY_FORMAT: &str = "%a %b %-d, %Y";
const RANGE_DAY_FORMAT: &str = "%b %-d, %Y";

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table
}

pub fn build_ranges_table(ranges: &[DateRange]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["ID", "Start", "End", "Days"]);
    for range in ranges {
        let days = range.days();
        table.add_row(vec![
            Cell::new(range.id.map_or_else(|| "-".to_string(), |id| id.to_string()))
                .add_attribute(Attribute::Dim),
            Cell::new(range.start.format(RANGE_DAY_FORMAT)),
            Cell::new(range.end.format(RANGE_DAY_FORMAT)),
            Cell::new(format!("{days} day{}", if days == 1 { "" } else { "s" }))
                .set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_timeline_table(statuses: &[DayStatus], today: NaiveDate, limit: u32) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Day", "Stay", "In window", "Status"]);
    for status in statuses {
        let mut day = Cell::new(status.date.format(TIMELINE_DAY_FORMAT));
        if status.date == today {
            day = day.add_attribute(Attribute::Bold);
        }
        let stay = if status.boundary {
            "●"
        } else if status.in_range {
            "■"
        } else if status.pending_start {
            "○"
        } else {
            ""
        };
        table.add_row(vec![
            day,
            Cell::new(stay).set_alignment(CellAlignment::Center),
            Cell::new(format!("{}/{limit}", status.days_in_window))
                .set_alignment(CellAlignment::Right),
            if status.exceeds_limit {
                Cell::new("over limit").fg(Color::Red)
            } else {
                Cell::new("ok").fg(Color::Green)
            },
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::build_ranges_table;
    use chrono::NaiveDate;
    use staycount_core::make_range;

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn ranges_table_shows_readable_days_and_counts() {
        let stays = [
            make_range(day(2024, 1, 1), day(2024, 1, 10)).with_id(4),
            make_range(day(2024, 2, 29), day(2024, 2, 29)),
        ];

        let rendered = build_ranges_table(&stays).to_string();

        assert!(rendered.contains("Jan 1, 2024"), "{rendered}");
        assert!(rendered.contains("Jan 10, 2024"), "{rendered}");
        assert!(rendered.contains("10 days"), "{rendered}");
        assert!(rendered.contains("1 day "), "{rendered}");
    }
}
