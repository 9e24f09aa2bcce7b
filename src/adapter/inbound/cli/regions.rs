//! Built-in region table listing.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::domain::region::SEOUL_DISTRICTS;

#[derive(Tabled)]
struct RegionRow {
    #[tabled(rename = "District")]
    district: &'static str,
    #[tabled(rename = "LAWD_CD")]
    code: &'static str,
}

/// List built-in district codes.
pub fn list() {
    if output::is_json() {
        let regions: Vec<_> = SEOUL_DISTRICTS
            .iter()
            .map(|(district, code)| json!({ "city": "서울특별시", "district": district, "code": code }))
            .collect();
        output::json_output(json!({ "command": "regions", "regions": regions }));
        return;
    }
    if output::is_quiet() {
        return;
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("서울특별시");
    let rows = SEOUL_DISTRICTS
        .iter()
        .map(|&(district, code)| RegionRow { district, code });
    output::lines(&Table::new(rows).to_string());
    output::hint("other regions: add them under [regions] or pass a 5-digit code as --district");
}
