//! MOLIT response types.
//!
//! The API is loosely typed. Numbers arrive as strings or as numbers,
//! `items` is an empty string when a month has no contracts, and `item` is
//! a single object when there is exactly one. Older API versions use Korean
//! field names; both spellings are accepted.
//!
//! Example body:
//! ```json
//! {"response":{"header":{"resultCode":"000","resultMsg":"OK"},
//!  "body":{"items":{"item":[{"deposit":"50,000","monthlyRent":"150", ...}]},
//!  "numOfRows":1000,"pageNo":1,"totalCount":1}}}
//! ```

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::transaction::RawTransaction;

/// Result codes the API uses for success.
pub const SUCCESS_CODES: &[&str] = &["00", "000"];

#[derive(Debug, Deserialize)]
pub struct MolitResponse {
    pub response: MolitEnvelope,
}

#[derive(Debug, Deserialize)]
pub struct MolitEnvelope {
    pub header: MolitHeader,
    #[serde(default)]
    pub body: Option<MolitBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MolitHeader {
    #[serde(deserialize_with = "lenient_string")]
    pub result_code: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub result_msg: String,
}

impl MolitHeader {
    #[must_use]
    pub fn is_success(&self) -> bool {
        SUCCESS_CODES.contains(&self.result_code.trim())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MolitBody {
    #[serde(default, deserialize_with = "deserialize_items")]
    pub items: Vec<MolitItem>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub total_count: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub page_no: u32,
}

/// One rent contract as published.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MolitItem {
    #[serde(default, alias = "보증금액", deserialize_with = "lenient_string")]
    pub deposit: String,
    #[serde(
        default,
        rename = "monthlyRent",
        alias = "월세금액",
        deserialize_with = "lenient_string"
    )]
    pub monthly_rent: String,
    #[serde(
        default,
        rename = "excluUseAr",
        alias = "전용면적",
        deserialize_with = "lenient_string"
    )]
    pub exclusive_area: String,
    #[serde(default, alias = "층", deserialize_with = "lenient_opt_string")]
    pub floor: Option<String>,
    #[serde(default, rename = "dealYear", alias = "년", deserialize_with = "lenient_string")]
    pub year: String,
    #[serde(default, rename = "dealMonth", alias = "월", deserialize_with = "lenient_string")]
    pub month: String,
    #[serde(default, rename = "dealDay", alias = "일", deserialize_with = "lenient_string")]
    pub day: String,
    #[serde(default, rename = "umdNm", alias = "법정동", deserialize_with = "lenient_opt_string")]
    pub dong: Option<String>,
    #[serde(default, rename = "aptNm", alias = "아파트", deserialize_with = "lenient_opt_string")]
    pub apartment_name: Option<String>,
}

impl From<MolitItem> for RawTransaction {
    fn from(item: MolitItem) -> Self {
        Self {
            deposit: item.deposit,
            monthly_rent: item.monthly_rent,
            exclusive_area: item.exclusive_area,
            floor: item.floor,
            year: item.year,
            month: item.month,
            day: item.day,
            dong: item.dong,
            apartment_name: item.apartment_name,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ItemsRepr {
    Listed {
        #[serde(default)]
        item: Option<OneOrMany<MolitItem>>,
    },
    /// `"items": ""` on empty months.
    Blank(String),
}

fn deserialize_items<'de, D>(deserializer: D) -> Result<Vec<MolitItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Option::<ItemsRepr>::deserialize(deserializer)? {
        Some(ItemsRepr::Listed {
            item: Some(OneOrMany::Many(items)),
        }) => items,
        Some(ItemsRepr::Listed {
            item: Some(OneOrMany::One(item)),
        }) => vec![item],
        Some(ItemsRepr::Listed { item: None } | ItemsRepr::Blank(_)) | None => Vec::new(),
    };
    Ok(items)
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_string(Value::deserialize(deserializer)?))
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = value_to_string(Value::deserialize(deserializer)?);
    let trimmed = value.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_string(Value::deserialize(deserializer)?)
        .trim()
        .parse()
        .unwrap_or(0))
}

/// Text content of the first `<tag>` in an XML error body.
///
/// The API answers some failures (unregistered key, quota) with XML even
/// when JSON was requested.
#[must_use]
pub fn xml_tag<'a>(body: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = body.find(&open)? + open.len();
    let end = body[start..].find(&close)? + start;
    Some(body[start..end].trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> MolitResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parses_item_array_with_mixed_number_types() {
        let response = parse(
            r#"{"response":{"header":{"resultCode":"000","resultMsg":"OK"},
            "body":{"items":{"item":[
              {"deposit":"50,000","monthlyRent":150,"excluUseAr":84.97,"floor":"12",
               "dealYear":2024,"dealMonth":"5","dealDay":"3","umdNm":"공덕동","aptNm":"공덕래미안"},
              {"deposit":"3,000","monthlyRent":"120","excluUseAr":"59.9","floor":"",
               "dealYear":"2024","dealMonth":"5","dealDay":"17","umdNm":"도화동","aptNm":"도화현대"}
            ]},"numOfRows":1000,"pageNo":1,"totalCount":"2"}}}"#,
        );
        assert!(response.response.header.is_success());
        let body = response.response.body.unwrap();
        assert_eq!(body.total_count, 2);
        assert_eq!(body.items.len(), 2);

        let first = RawTransaction::from(body.items[0].clone());
        assert_eq!(first.deposit, "50,000");
        assert_eq!(first.monthly_rent, "150");
        assert_eq!(first.exclusive_area, "84.97");
        assert_eq!(first.year, "2024");
        assert_eq!(first.dong.as_deref(), Some("공덕동"));
        assert_eq!(body.items[1].floor, None);
    }

    #[test]
    fn single_item_object_is_accepted() {
        let response = parse(
            r#"{"response":{"header":{"resultCode":"00","resultMsg":"NORMAL SERVICE."},
            "body":{"items":{"item":{"보증금액":" 1,000","월세금액":"80","전용면적":"39.6",
              "층":"-1","년":"2023","월":"11","일":"2","법정동":" 아현동","아파트":"아현아이파크"}},
            "totalCount":1}}}"#,
        );
        let items = response.response.body.unwrap().items;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].deposit, " 1,000");
        assert_eq!(items[0].floor.as_deref(), Some("-1"));
        assert_eq!(items[0].dong.as_deref(), Some("아현동"));
    }

    #[test]
    fn empty_month_has_blank_items() {
        let response = parse(
            r#"{"response":{"header":{"resultCode":"000","resultMsg":"OK"},
            "body":{"items":"","numOfRows":1000,"pageNo":1,"totalCount":0}}}"#,
        );
        let body = response.response.body.unwrap();
        assert!(body.items.is_empty());
        assert_eq!(body.total_count, 0);
    }

    #[test]
    fn error_header_is_not_success() {
        let response = parse(
            r#"{"response":{"header":{"resultCode":"03","resultMsg":"NO_DATA"}}}"#,
        );
        assert!(!response.response.header.is_success());
        assert!(response.response.body.is_none());
    }

    #[test]
    fn extracts_xml_error_fields() {
        let body = "<OpenAPI_ServiceResponse><cmmMsgHeader>\
            <returnAuthMsg>SERVICE_KEY_IS_NOT_REGISTERED_ERROR</returnAuthMsg>\
            <returnReasonCode>30</returnReasonCode></cmmMsgHeader></OpenAPI_ServiceResponse>";
        assert_eq!(xml_tag(body, "returnReasonCode"), Some("30"));
        assert_eq!(
            xml_tag(body, "returnAuthMsg"),
            Some("SERVICE_KEY_IS_NOT_REGISTERED_ERROR")
        );
        assert_eq!(xml_tag(body, "missing"), None);
    }
}
