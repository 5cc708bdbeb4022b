// dpo_checkout.rs
use actix_web::{get, post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::dpo::dpo_gateway::{DpoClient, MobileMoneyOptions};
use crate::dpo::error::DpoError;

#[derive(Deserialize)]
pub struct CreateTokenBody {
    pub amount: f64,
    pub description: String,
}

#[derive(Serialize)]
struct CreateTokenResponse {
    token: String,
    payment_url: String,
}

#[derive(Deserialize)]
pub struct TokenQuery {
    pub token: String,
}

#[derive(Serialize)]
struct VerifyTokenResponse {
    token: String,
    verified: bool,
}

#[derive(Deserialize)]
pub struct MobileMoneyBody {
    pub token: String,
    pub phone_number: String,
    pub amount: f64,
    #[serde(flatten)]
    pub options: MobileMoneyOptions,
}

#[derive(Serialize)]
struct MessageResponse {
    message: String,
}

#[derive(Serialize)]
struct PaymentUrlResponse {
    payment_url: String,
}

/// Creates a DPO transaction token and returns it along with the hosted payment URL.
///
/// # Returns
///
/// `200` with `{token, payment_url}`, `402` with the gateway's explanation
/// when DPO rejects the request, `400` for a non-positive amount and `502`
/// when the gateway cannot be reached or answers with something unparsable.
#[post("/api/dpo/create-token")]
pub async fn create_token_handler(
    req: web::Json<CreateTokenBody>,
    client: web::Data<DpoClient>,
) -> impl Responder {
    match client.create_token(req.amount, &req.description).await {
        Ok(token) => {
            let payment_url = client.payment_url(&token);
            HttpResponse::Ok().json(CreateTokenResponse { token, payment_url })
        }
        Err(e) => error_response("createToken", e),
    }
}

/// Reports whether a transaction token verifies. A declined token is a `200`
/// with `verified: false`.
#[get("/api/dpo/verify-token")]
pub async fn verify_token_handler(
    query: web::Query<TokenQuery>,
    client: web::Data<DpoClient>,
) -> impl Responder {
    match client.verify_token(&query.token).await {
        Ok(verified) => HttpResponse::Ok().json(VerifyTokenResponse {
            token: query.token.clone(),
            verified,
        }),
        Err(e) => error_response("verifyToken", e),
    }
}

/// Prompts the customer's phone for a mobile money payment against an existing token.
#[post("/api/dpo/mobile-money")]
pub async fn mobile_money_handler(
    req: web::Json<MobileMoneyBody>,
    client: web::Data<DpoClient>,
) -> impl Responder {
    match client
        .prompt_mobile_money_pay(&req.token, &req.phone_number, req.amount, &req.options)
        .await
    {
        Ok(message) => HttpResponse::Ok().json(MessageResponse { message }),
        Err(e) => error_response("ChargeTokenMobile", e),
    }
}

#[get("/api/dpo/payment-url")]
pub async fn payment_url_handler(
    query: web::Query<TokenQuery>,
    client: web::Data<DpoClient>,
) -> impl Responder {
    HttpResponse::Ok().json(PaymentUrlResponse {
        payment_url: client.payment_url(&query.token),
    })
}

/// Registers every DPO route on an Actix service config.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_token_handler)
        .service(verify_token_handler)
        .service(mobile_money_handler)
        .service(payment_url_handler);
}

fn error_response(request_name: &str, err: DpoError) -> HttpResponse {
    match err {
        DpoError::GatewayRejected { explanation, .. } => {
            HttpResponse::PaymentRequired().json(MessageResponse {
                message: explanation,
            })
        }
        e @ DpoError::InvalidAmount(_) => HttpResponse::BadRequest().json(MessageResponse {
            message: e.to_string(),
        }),
        e if e.is_transport() => {
            tracing::error!(request = request_name, error = %e, "DPO gateway unavailable");
            HttpResponse::BadGateway().body("DPO gateway request failed")
        }
        e => {
            tracing::error!(request = request_name, error = %e, "DPO request could not be built");
            HttpResponse::InternalServerError().body("DPO request failed")
        }
    }
}
