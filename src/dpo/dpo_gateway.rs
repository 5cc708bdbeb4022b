// dpo_gateway.rs
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::{non_blank, DpoConfig, Endpoints};
use crate::dpo::dpo_xml::{
    format_amount, to_document, Api3gResponse, ChargeResult, ChargeTokenMobileRequest,
    CreateTokenRequest, TokenCreationResult, VerifyTokenRequest,
};
use crate::dpo::error::DpoError;

/// Mobile network operator used when the caller names none.
pub const DEFAULT_MNO: &str = "airtel";
/// Returned by [`DpoClient::prompt_mobile_money_pay`] once the prompt is accepted.
pub const PAYMENT_PROMPT_CONFIRMATION: &str = "Payment prompt successful.";

/// Optional overrides for a mobile money charge.
///
/// Unset or blank fields resolve as: `mno` to [`DEFAULT_MNO`], `mno_country` to the
/// client's configured country and then to `Zambia`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MobileMoneyOptions {
    pub mno: Option<String>,
    pub mno_country: Option<String>,
}

/// Client for the DPO API3G XML gateway.
///
/// Holds only immutable configuration and a `reqwest::Client`, so one
/// instance can be cloned into every request handler.
#[derive(Debug, Clone)]
pub struct DpoClient {
    http: Client,
    config: DpoConfig,
    endpoints: Endpoints,
}

impl DpoClient {
    /// Creates a client against the live DPO endpoints.
    pub fn new(config: DpoConfig) -> Self {
        Self::with_endpoints(config, Endpoints::default())
    }

    /// Creates a client against explicit endpoints (sandbox, mock gateway).
    pub fn with_endpoints(config: DpoConfig, endpoints: Endpoints) -> Self {
        Self::with_http_client(Client::new(), config, endpoints)
    }

    /// Creates a client that reuses an existing `reqwest::Client`.
    pub fn with_http_client(http: Client, config: DpoConfig, endpoints: Endpoints) -> Self {
        Self {
            http,
            config,
            endpoints,
        }
    }

    pub fn config(&self) -> &DpoConfig {
        &self.config
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Creates a transaction token and returns it.
    ///
    /// Fails with [`DpoError::GatewayRejected`] carrying the gateway's
    /// explanation when the result code is not `000`.
    pub async fn create_token(&self, amount: f64, description: &str) -> Result<String, DpoError> {
        self.create_token_details(amount, description)
            .await
            .map(|result| result.transaction_token)
    }

    /// Same request as [`DpoClient::create_token`], returning the whole parsed response.
    pub async fn create_token_details(
        &self,
        amount: f64,
        description: &str,
    ) -> Result<TokenCreationResult, DpoError> {
        check_amount(amount)?;
        let request = CreateTokenRequest {
            company_token: &self.config.company_token,
            request: "createToken",
            transaction_amount: format_amount(amount),
            transaction_currency: self.config.currency(),
            transaction_description: description,
            service_id: &self.config.service_id,
            redirect_url: &self.config.redirect_url,
            back_url: &self.config.back_url,
        };

        let response = self.post("createToken", &request).await?;
        if !response.is_success() {
            return Err(rejected("createToken", response.into_charge()));
        }
        let result = response.into_token_creation().map_err(|e| {
            tracing::error!(request = "createToken", error = %e, "DPO response parse error");
            DpoError::MalformedResponse(e)
        })?;
        tracing::info!(trans_ref = %result.transaction_ref, "DPO transaction token created");
        Ok(result)
    }

    /// Returns whether the gateway reports the token as paid/valid.
    ///
    /// A non-`000` result is `Ok(false)`; only transport and parse failures
    /// are errors.
    pub async fn verify_token(&self, transaction_token: &str) -> Result<bool, DpoError> {
        let request = VerifyTokenRequest {
            company_token: &self.config.company_token,
            request: "verifyToken",
            transaction_token,
        };

        let response = self.post("verifyToken", &request).await?;
        let verified = response.is_success();
        if !verified {
            let result = response.into_charge();
            tracing::debug!(
                code = %result.result_code,
                explanation = %result.result_explanation,
                "DPO token not verified"
            );
        }
        Ok(verified)
    }

    /// Sends a mobile money payment prompt to `phone_number` for an existing token.
    pub async fn prompt_mobile_money_pay(
        &self,
        token: &str,
        phone_number: &str,
        amount: f64,
        options: &MobileMoneyOptions,
    ) -> Result<String, DpoError> {
        self.charge_token_mobile(token, phone_number, amount, options)
            .await
            .map(|_| PAYMENT_PROMPT_CONFIRMATION.to_string())
    }

    /// Like [`DpoClient::prompt_mobile_money_pay`], returning the parsed response.
    pub async fn charge_token_mobile(
        &self,
        token: &str,
        phone_number: &str,
        amount: f64,
        options: &MobileMoneyOptions,
    ) -> Result<ChargeResult, DpoError> {
        check_amount(amount)?;
        let mno = non_blank(options.mno.as_deref()).unwrap_or(DEFAULT_MNO);
        let mno_country =
            non_blank(options.mno_country.as_deref()).unwrap_or_else(|| self.config.country());

        let request = ChargeTokenMobileRequest {
            company_token: &self.config.company_token,
            request: "ChargeTokenMobile",
            transaction_token: token,
            phone_number,
            transaction_amount: format_amount(amount),
            mno,
            mno_country,
        };

        let response = self.post("ChargeTokenMobile", &request).await?;
        let success = response.is_success();
        let result = response.into_charge();
        if !success {
            return Err(rejected("ChargeTokenMobile", result));
        }
        tracing::info!(mno, mno_country, "DPO mobile money prompt sent");
        Ok(result)
    }

    /// Hosted payment page for a transaction token. No I/O, no validation.
    pub fn payment_url(&self, transaction_token: &str) -> String {
        format!("{}?ID={}", self.endpoints.payment_url, transaction_token)
    }

    async fn post<T: Serialize>(
        &self,
        request_name: &'static str,
        request: &T,
    ) -> Result<Api3gResponse, DpoError> {
        let document = to_document(request)?;
        tracing::debug!(request = request_name, url = %self.endpoints.api_url, "posting DPO request");

        let response = self
            .http
            .post(&self.endpoints.api_url)
            .header(CONTENT_TYPE, "application/xml")
            .body(document)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::error!(request = request_name, %status, "DPO HTTP error");
            return Err(DpoError::Status { status, body });
        }

        Api3gResponse::parse(&body).map_err(|e| {
            tracing::error!(request = request_name, error = %e, "DPO response parse error");
            DpoError::MalformedResponse(e)
        })
    }
}

fn check_amount(amount: f64) -> Result<(), DpoError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(DpoError::InvalidAmount(amount))
    }
}

fn rejected(request_name: &'static str, result: ChargeResult) -> DpoError {
    tracing::warn!(
        request = request_name,
        code = %result.result_code,
        explanation = %result.result_explanation,
        "DPO rejected request"
    );
    DpoError::GatewayRejected {
        code: result.result_code,
        explanation: result.result_explanation,
    }
}
