//! Negotiation options derived from an assessment.
//!
//! Options are produced in a fixed order: market rate, legal maximum,
//! meet-in-the-middle. The market option is always present; the others only
//! when they would lower the rent. At most one option is recommended: the
//! one with the largest monthly saving, ties going to the higher target
//! rate (the smaller ask from the landlord). When nothing saves money the
//! market option stays as information and nothing is recommended.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::assessment::QuoteAssessment;
use super::money::{format_rate, format_won, Rate, Won};
use super::quote::UserQuote;
use super::rate::{rent_at_rate, MONTHS_PER_YEAR};

/// Which reference rate an option targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionKind {
    MarketRate,
    LegalMaximum,
    MeetInTheMiddle,
}

impl OptionKind {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::MarketRate => "시장 전환율 적용",
            Self::LegalMaximum => "법정 상한 적용",
            Self::MeetInTheMiddle => "중간 지점 절충",
        }
    }
}

/// One proposed rent target.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NegotiationOption {
    pub kind: OptionKind,
    pub label: String,
    pub target_rate: Rate,
    pub resulting_monthly_rent: Won,
    pub monthly_savings: Won,
    pub yearly_savings: Won,
    pub script_text: String,
    pub is_recommended: bool,
}

fn script(kind: OptionKind, deposit: Won, rate: Rate, rent: Won, savings: Won) -> String {
    let savings_are_zero = savings.is_zero();
    let deposit = format_won(deposit);
    let rate = format_rate(rate);
    let rent = format_won(rent);
    let savings = format_won(savings);

    match kind {
        OptionKind::MarketRate if savings_are_zero => format!(
            "인근 실거래 기준 시장 전환율은 연 {rate}이고, 보증금 {deposit} 기준 시세 월세는 {rent}입니다. 제시된 월세가 시세와 같거나 낮으므로 현재 조건으로 계약을 진행하셔도 좋습니다."
        ),
        OptionKind::MarketRate => format!(
            "인근 실거래 기준 시장 전환율은 연 {rate}입니다. 보증금 {deposit} 기준으로는 월세 {rent}이 시세에 맞는 금액이라, 월 {savings} 조정이 가능할지 여쭙고 싶습니다."
        ),
        OptionKind::LegalMaximum => format!(
            "주택임대차보호법상 전월세 전환율 상한은 연 {rate}입니다. 보증금 {deposit} 기준 법정 상한 월세는 {rent}이므로, 월 {savings} 낮춘 {rent}으로 조정해 주시길 요청드립니다."
        ),
        OptionKind::MeetInTheMiddle => format!(
            "시세와 현재 제시 금액의 중간인 연 {rate} 수준, 월세 {rent}(월 {savings} 인하)으로 맞춰 주시면 바로 계약을 진행하겠습니다."
        ),
    }
}

fn build(kind: OptionKind, quote: &UserQuote, target_rate: Rate, monthly_rent: Won) -> NegotiationOption {
    let monthly_savings = (quote.monthly_rent() - monthly_rent).max(Decimal::ZERO);
    NegotiationOption {
        kind,
        label: kind.label().to_string(),
        target_rate,
        resulting_monthly_rent: monthly_rent,
        monthly_savings,
        yearly_savings: monthly_savings * MONTHS_PER_YEAR,
        script_text: script(kind, quote.deposit_amount(), target_rate, monthly_rent, monthly_savings),
        is_recommended: false,
    }
}

fn preference(a: &NegotiationOption, b: &NegotiationOption) -> Ordering {
    a.monthly_savings
        .cmp(&b.monthly_savings)
        .then_with(|| a.target_rate.cmp(&b.target_rate))
}

/// Generate the ordered option list for an assessed quote.
#[must_use]
pub fn generate_options(quote: &UserQuote, assessment: &QuoteAssessment) -> Vec<NegotiationOption> {
    let deposit = quote.deposit_amount();
    let mut options = vec![build(
        OptionKind::MarketRate,
        quote,
        assessment.market_rate,
        assessment.expected_rent,
    )];

    if assessment.quote_rate > assessment.legal_max_rate {
        let legal = build(
            OptionKind::LegalMaximum,
            quote,
            assessment.legal_max_rate,
            assessment.legal_rent,
        );
        if legal.monthly_savings > Decimal::ZERO {
            options.push(legal);
        }
    }

    if assessment.quote_rate > assessment.market_rate {
        let midpoint = ((assessment.quote_rate + assessment.market_rate) / dec!(2)).round_dp(4);
        // the midpoint is below the quote rate, so its rent fits whenever the quote does
        if let Some(rent) = rent_at_rate(deposit, midpoint) {
            let middle = build(OptionKind::MeetInTheMiddle, quote, midpoint, rent);
            if middle.monthly_savings > Decimal::ZERO {
                options.push(middle);
            }
        }
    }

    let recommended = options
        .iter()
        .enumerate()
        .filter(|(_, option)| option.monthly_savings > Decimal::ZERO)
        .max_by(|(_, a), (_, b)| preference(a, b))
        .map(|(index, _)| index);
    if let Some(index) = recommended {
        options[index].is_recommended = true;
    }

    options
}
