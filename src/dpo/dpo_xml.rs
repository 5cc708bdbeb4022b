//! API3G request and response documents.
//!
//! Requests are serialized with `quick-xml`'s serde support so that every
//! user supplied value (descriptions, phone numbers, tokens) is escaped.
//! Responses are deserialized leniently: elements this crate does not read
//! are ignored, while a missing `Result` is a parse error.

use quick_xml::{DeError, SeError};
use serde::de::Error as _;
use serde::{Deserialize, Serialize};

/// Root element of every request and response document.
pub const ROOT_ELEMENT: &str = "API3G";
/// Result code the gateway uses for success, for every request type.
pub const RESULT_SUCCESS: &str = "000";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateTokenRequest<'a> {
    pub company_token: &'a str,
    pub request: &'static str,
    pub transaction_amount: String,
    pub transaction_currency: &'a str,
    pub transaction_description: &'a str,
    #[serde(rename = "ServiceID")]
    pub service_id: &'a str,
    #[serde(rename = "RedirectURL")]
    pub redirect_url: &'a str,
    #[serde(rename = "BackURL")]
    pub back_url: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VerifyTokenRequest<'a> {
    pub company_token: &'a str,
    pub request: &'static str,
    pub transaction_token: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChargeTokenMobileRequest<'a> {
    pub company_token: &'a str,
    pub request: &'static str,
    pub transaction_token: &'a str,
    pub phone_number: &'a str,
    pub transaction_amount: String,
    #[serde(rename = "MNO")]
    pub mno: &'a str,
    #[serde(rename = "MNOcountry")]
    pub mno_country: &'a str,
}

/// Renders a request as a complete UTF-8 document rooted at `API3G`.
pub fn to_document<T: Serialize>(request: &T) -> Result<String, SeError> {
    let body = quick_xml::se::to_string_with_root(ROOT_ELEMENT, request)?;
    Ok(format!("{XML_DECLARATION}{body}"))
}

/// Shortest decimal rendering of an amount: `100`, `10.5`.
pub fn format_amount(amount: f64) -> String {
    amount.to_string()
}

/// A single allocation echoed back by `createToken`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    #[serde(rename = "AllocationID")]
    pub id: String,
    #[serde(rename = "AllocationCode")]
    pub code: String,
}

/// Parsed `createToken` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenCreationResult {
    pub result_code: String,
    pub result_explanation: String,
    pub transaction_token: String,
    pub transaction_ref: String,
    pub allocations: Vec<Allocation>,
}

/// Parsed `ChargeTokenMobile` (or `verifyToken`) response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChargeResult {
    pub result_code: String,
    pub result_explanation: String,
}

#[derive(Debug, Default, Deserialize)]
struct AllocationList {
    #[serde(rename = "Allocation", default)]
    allocation: Vec<Allocation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Api3gResponse {
    result: String,
    #[serde(default)]
    result_explanation: String,
    #[serde(default)]
    trans_token: Option<String>,
    #[serde(default)]
    trans_ref: Option<String>,
    #[serde(default)]
    allocations: Option<AllocationList>,
}

impl Api3gResponse {
    pub(crate) fn parse(body: &str) -> Result<Self, DeError> {
        quick_xml::de::from_str(body)
    }

    pub(crate) fn is_success(&self) -> bool {
        self.result.trim() == RESULT_SUCCESS
    }

    /// A successful `createToken` reply must carry a non-blank `TransToken`.
    pub(crate) fn into_token_creation(self) -> Result<TokenCreationResult, DeError> {
        let transaction_token = self
            .trans_token
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| DeError::custom("createToken response has no TransToken"))?;
        Ok(TokenCreationResult {
            result_code: self.result,
            result_explanation: self.result_explanation,
            transaction_token,
            transaction_ref: self.trans_ref.unwrap_or_default(),
            allocations: self.allocations.unwrap_or_default().allocation,
        })
    }

    pub(crate) fn into_charge(self) -> ChargeResult {
        ChargeResult {
            result_code: self.result,
            result_explanation: self.result_explanation,
        }
    }
}
