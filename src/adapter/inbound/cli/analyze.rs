//! Handler for `krent analyze`.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::AnalyzeArgs;
use crate::adapter::inbound::cli::output;
use crate::application::analysis::report::AssessmentResult;
use crate::application::analysis::request::AnalysisRequest;
use crate::domain::assessment::AssessmentCategory;
use crate::domain::money::{format_rate, format_won};
use crate::domain::quote::UserQuote;
use crate::domain::trend::TrendDirection;
use crate::error::Result;
use crate::infrastructure::bootstrap::build_analyzer;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct OptionRow {
    #[tabled(rename = "")]
    marker: &'static str,
    #[tabled(rename = "Option")]
    label: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Rent")]
    rent: String,
    #[tabled(rename = "Monthly")]
    monthly: String,
    #[tabled(rename = "Yearly")]
    yearly: String,
}

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Apartment")]
    apartment: String,
    #[tabled(rename = "Area")]
    area: String,
    #[tabled(rename = "Floor")]
    floor: String,
    #[tabled(rename = "Deposit")]
    deposit: String,
    #[tabled(rename = "Rent")]
    rent: String,
    #[tabled(rename = "Rate")]
    rate: String,
}

/// Build the analyzer request from CLI arguments.
///
/// # Errors
///
/// Returns an invalid-quote error for non-numeric or non-positive amounts.
pub fn build_request(args: &AnalyzeArgs) -> Result<AnalysisRequest> {
    let quote = UserQuote::parse(&args.deposit, &args.rent)?;
    let mut request = AnalysisRequest::new(
        args.district.clone(),
        quote.deposit_amount(),
        quote.monthly_rent(),
    )
    .with_city(args.city.clone());
    if let Some(dong) = &args.dong {
        request = request.with_dong(dong.clone());
    }
    if let Some(apartment) = &args.apartment {
        request = request.with_apartment(apartment.clone());
    }
    if let Some(area) = args.area {
        request = request.with_area(area);
    }
    if let Some(date) = args.as_of {
        request = request.as_of(date);
    }
    Ok(request)
}

/// Execute `analyze`.
pub async fn execute(args: &AnalyzeArgs, config: &Config) -> Result<()> {
    let request = build_request(args)?;
    let analyzer = build_analyzer(config, args.file.as_deref())?;

    let pb = output::spinner("Fetching transactions...");
    let result = match analyzer.analyze(&request).await {
        Ok(result) => {
            output::spinner_success(&pb, "Analysis complete");
            result
        }
        Err(err) => {
            output::spinner_fail(&pb, "Analysis failed");
            return Err(err.into());
        }
    };

    if output::is_json() {
        output::json_output(json!({ "command": "analyze", "result": result }));
        return Ok(());
    }
    render(&result);
    Ok(())
}

fn category_text(category: AssessmentCategory) -> String {
    let text = format!("{} ({category})", category.label_ko());
    match category {
        AssessmentCategory::GoodDeal => output::positive(text),
        AssessmentCategory::Fair => output::highlight(text),
        AssessmentCategory::Overpriced => output::caution(text),
        AssessmentCategory::SeverelyOverpriced => output::negative(text),
    }
}

fn render(result: &AssessmentResult) {
    let assessment = &result.assessment;
    let market = &result.market;

    output::section("Assessment");
    output::field("Verdict", category_text(assessment.category));
    output::field("Quote", format!(
        "보증금 {} / 월세 {} (연 {})",
        format_won(result.deposit_amount),
        format_won(result.monthly_rent),
        format_rate(assessment.quote_rate),
    ));
    output::field("Expected rent", format_won(assessment.expected_rent));
    output::field("Difference", format!(
        "{} ({}%)",
        format_won(assessment.rent_difference),
        assessment.rent_difference_percent.normalize(),
    ));
    output::field("Save vs market", format!("{} / 년", format_won(assessment.savings_vs_market)));
    output::field("Save vs legal", format!("{} / 년", format_won(assessment.savings_vs_legal)));

    output::section("Market");
    output::field("Region", format!("{} ({} scope)", result.region, result.scope));
    output::field("Window", result.window);
    output::field("Market rate", format!(
        "{} (range {} ~ {})",
        output::highlight(format_rate(market.central_rate())),
        format_rate(market.low_rate()),
        format_rate(market.high_rate()),
    ));
    output::field("Legal max", format_rate(result.legal_cap.max_rate()));
    output::field("Confidence", format!(
        "{} ({} contracts, {} outliers removed)",
        market.confidence_level(),
        market.clean_count(),
        market.outlier_count(),
    ));
    if result.low_confidence {
        output::warning("Few comparable contracts; treat the market rate as a rough guide");
    }

    if let Some(trend) = &result.trend {
        let direction = match trend.direction {
            TrendDirection::Rising => output::negative(trend.direction),
            TrendDirection::Declining => output::positive(trend.direction),
            TrendDirection::Stable => output::highlight(trend.direction),
        };
        output::field("Trend", format!("{direction} ({}%)", trend.percentage_change.normalize()));
        output::note(&trend.advisory_text);
    }

    output::section("Negotiation Options");
    let rows = result.negotiation_options.iter().map(|option| OptionRow {
        marker: if option.is_recommended { "★" } else { "" },
        label: option.label.clone(),
        rate: format_rate(option.target_rate),
        rent: format_won(option.resulting_monthly_rent),
        monthly: format_won(option.monthly_savings),
        yearly: format_won(option.yearly_savings),
    });
    output::lines(&Table::new(rows).to_string());
    // a quote at or below market has no recommendation; show the market note
    if let Some(option) = result
        .recommended_option()
        .or_else(|| result.negotiation_options.first())
    {
        output::section("Script");
        output::lines(&option.script_text);
    }

    if !result.recent_transactions.is_empty() {
        output::section("Recent Contracts");
        let rows = result.recent_transactions.iter().map(|record| TransactionRow {
            date: record.contract_date().to_string(),
            apartment: record.apartment_name().to_string(),
            area: format!("{}㎡", record.exclusive_area_sqm().normalize()),
            floor: record.floor().map(|f| f.to_string()).unwrap_or_default(),
            deposit: format_won(record.deposit_amount()),
            rent: format_won(record.monthly_rent()),
            rate: format_rate(record.implied_rate()),
        });
        output::lines(&Table::new(rows).to_string());
    }

    output::note(&format!(
        "analysis {} valid until {}",
        result.analysis_id,
        result.expires_at.format("%Y-%m-%d"),
    ));
}
