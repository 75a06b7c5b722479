//! Plain-text tables

use shiftboard_lib::view::Column;
use shiftboard_lib::view::DataView;
use shiftboard_lib::view::PageInfo;
use shiftboard_lib::view::SortDirection;
use shiftboard_lib::view::Tabular;

const ELLIPSIS: char = '…';

/// Renders the current page of `view` with a footer.
pub fn page<R: Tabular>(view: &DataView<R>) -> String {
    let rows = view.page_rows();
    let mut out = table(view, &rows);
    out.push_str(&footer(&view.page_info(), &view.state().search_term));
    out
}

/// Renders every matching row of `view` as one table.
pub fn all_pages<R: Tabular>(view: &DataView<R>) -> String {
    let rows = view.export_rows();
    let mut out = table(view, &rows);
    let total = rows.len();
    if total == 0 {
        out.push_str(&no_records(&view.state().search_term));
    } else {
        out.push_str(&format!("{total} records\n"));
    }
    out
}

/// Header, separator and one line per row.
///
/// The active sort column's header carries `▲` or `▼`.
pub fn table<R: Tabular>(view: &DataView<R>, rows: &[&R]) -> String {
    let columns = view.columns();
    let state = view.state();

    let headers: Vec<String> = columns
        .iter()
        .map(|c| match (state.sort_field, state.sort_direction) {
            (Some(key), SortDirection::Asc) if key == c.key => format!("{} ▲", c.label),
            (Some(key), SortDirection::Desc) if key == c.key => format!("{} ▼", c.label),
            _ => c.label.clone(),
        })
        .collect();

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| columns.iter().map(|c| c.display(&row.cell(c.key))).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| column_width(c, &headers[i], cells.iter().map(|r| r[i].as_str())))
        .collect();

    let mut out = String::new();
    push_line(&mut out, headers.iter().map(String::as_str), &widths);
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, separator.iter().map(String::as_str), &widths);
    for row in &cells {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

/// "Showing X to Y of Z" line, or a hint when the page is empty.
pub fn footer(info: &PageInfo, search_term: &str) -> String {
    if info.total_items == 0 {
        return no_records(search_term);
    }
    if info.is_out_of_range() {
        return format!(
            "Page {} is past the last page ({}). Use --page {} to see the last rows.\n",
            info.page, info.total_pages, info.total_pages
        );
    }
    format!(
        "Showing {} to {} of {} (page {} of {})\n",
        info.first_item, info.last_item, info.total_items, info.page, info.total_pages
    )
}

/// Key/value lines for a single record, using every column.
pub fn details<R: Tabular>(columns: &[Column<R::Key>], record: &R) -> String {
    let label_width = columns.iter().map(|c| c.label.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for column in columns {
        out.push_str(&format!(
            "{:<width$}  {}\n",
            column.label,
            column.display(&record.cell(column.key)),
            width = label_width
        ));
    }
    out
}

fn no_records(search_term: &str) -> String {
    if search_term.is_empty() {
        "No records found.\n".to_string()
    } else {
        format!("No records match '{search_term}'.\n")
    }
}

fn column_width<'a, K>(column: &Column<K>, header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    let header_width = header.chars().count();
    match column.width {
        Some(width) => usize::from(width).max(header_width),
        None => cells.map(|c| c.chars().count()).fold(header_width, usize::max),
    }
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells.zip(widths).map(|(cell, w)| fit(cell, *w)).collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// Pads or truncates `text` to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        format!("{text}{}", " ".repeat(width - len))
    } else if width == 0 {
        String::new()
    } else {
        let mut cut: String = text.chars().take(width - 1).collect();
        cut.push(ELLIPSIS);
        cut
    }
}

#[cfg(test)]
mod tests {
    use shiftboard_lib::view::CellValue;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Key {
        Name,
        Rate,
    }

    struct Row {
        name: &'static str,
        rate: i64,
    }

    impl Tabular for Row {
        type Key = Key;

        fn cell(&self, key: Key) -> CellValue {
            match key {
                Key::Name => self.name.into(),
                Key::Rate => self.rate.into(),
            }
        }
    }

    fn view(page_size: usize) -> DataView<Row> {
        DataView::with_records(
            vec![Column::new(Key::Name, "Name"), Column::new(Key::Rate, "Rate")],
            vec![Row { name: "Ana", rate: 10 }, Row { name: "Bob", rate: 5 }],
            page_size,
        )
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("abc", 0), "");
    }

    #[test]
    fn test_table_with_sort_indicator() {
        let mut view = view(10);
        view.click_header(Key::Rate);
        let out = page(&view);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Name  Rate ▲");
        assert_eq!(lines[1], "----  ------");
        assert_eq!(lines[2], "Bob   5");
        assert_eq!(lines[3], "Ana   10");
        assert_eq!(lines[4], "Showing 1 to 2 of 2 (page 1 of 1)");

        view.click_header(Key::Rate);
        assert!(page(&view).starts_with("Name  Rate ▼"));
    }

    #[test]
    fn test_out_of_range_hint() {
        let mut view = view(1);
        view.set_page(3);
        let out = page(&view);
        assert!(out.contains("Page 3 is past the last page (2). Use --page 2"));
    }

    #[test]
    fn test_no_match_footer() {
        let mut view = view(10);
        view.set_search("zed");
        assert!(page(&view).ends_with("No records match 'zed'.\n"));
        assert!(all_pages(&view).ends_with("No records match 'zed'.\n"));
    }

    #[test]
    fn test_all_pages_ignores_page_size() {
        let view = view(1);
        let out = all_pages(&view);
        assert!(out.contains("Ana"));
        assert!(out.contains("Bob"));
        assert!(out.ends_with("2 records\n"));
    }

    #[test]
    fn test_details() {
        let view = view(10);
        let out = details(view.columns(), &view.records()[0]);
        assert_eq!(out, "Name  Ana\nRate  10\n");
    }
}
