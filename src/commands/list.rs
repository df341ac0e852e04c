use crate::services::catalog_service::SelectionControl;
use crate::utils::Table;

pub const ITEMS_PER_PAGE: usize = 20;

/// Split `list` arguments into a filter and a page number.
/// A bare number is the page; the other words form the filter.
pub fn parse_list_args(args: &[&str]) -> (String, usize) {
    let mut filter_words = Vec::new();
    let mut page = 1;

    for arg in args {
        match arg.parse::<usize>() {
            Ok(num) => page = num,
            Err(_) => filter_words.push(*arg),
        }
    }

    (filter_words.join(" "), page)
}

/// Render one page of catalog entries matching `filter`
pub fn render_page(control: &SelectionControl, filter: &str, page: usize) -> Result<String, String> {
    let matches = control.search(filter);

    if matches.is_empty() {
        return Err(if control.is_empty() {
            "The asset catalog is empty.".to_string()
        } else {
            format!("No assets match '{}'.", filter)
        });
    }

    let total_pages = (matches.len() + ITEMS_PER_PAGE - 1) / ITEMS_PER_PAGE;
    if page < 1 || page > total_pages {
        return Err(format!(
            "Invalid page number. This listing has {} page(s)",
            total_pages
        ));
    }

    let start = (page - 1) * ITEMS_PER_PAGE;
    let end = std::cmp::min(start + ITEMS_PER_PAGE, matches.len());

    let mut table = Table::new(vec!["ID", "Name"]);
    for asset in &matches[start..end] {
        table.add_row([asset.id.as_str(), asset.display_name.as_str()]);
    }

    Ok(format!(
        "{}Page {}/{} ({} assets)",
        table.render(),
        page,
        total_pages,
        matches.len()
    ))
}

pub fn execute(control: &SelectionControl, filter: &str, page: usize) {
    match render_page(control, filter, page) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("❌ {}", e),
    }
}
