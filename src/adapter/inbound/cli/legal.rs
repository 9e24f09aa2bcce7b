//! Legal maximum conversion rate display.

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::domain::money::format_rate;
use crate::infrastructure::config::settings::Config;

/// Show the configured legal cap.
pub fn show(config: &Config) {
    let cap = config.legal.cap();
    if output::is_json() {
        output::json_output(json!({ "command": "legal-rate", "legalCap": cap, "maxRate": cap.max_rate() }));
        return;
    }

    output::section("Legal Maximum Conversion Rate");
    output::field("Base rate", format_rate(cap.base_rate));
    output::field("Spread", format_rate(cap.spread));
    output::field("Maximum", output::highlight(format_rate(cap.max_rate())));
    output::note("주택임대차보호법 시행령: 기준금리 + 가산율");
}
