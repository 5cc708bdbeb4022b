//! # tiny_dpo_pay
//!
//! `tiny_dpo_pay` wraps the [DPO](https://directpay.online) (3G Direct Pay) XML gateway:
//! create a transaction token, verify it, prompt a mobile money payment and build the
//! hosted payment page URL. An Actix-Web binary exposes the same operations as JSON endpoints.
//!
//! ## ✅ Features
//!
//! - 💳 `createToken`, `verifyToken` and `ChargeTokenMobile` requests over API v6
//! - 🔒 Request documents built with a real XML serializer, so user input is escaped
//! - 🔐 Rate limiting with `actix-governor` in the server binary
//! - 🧪 Environment file support (`.env`, `.env.production`, etc.)
//!
//! ## 🔧 Configuration
//!
//! Start the server like this:
//!
//! ```bash
//! cargo run -- .env.production
//! ```
//!
//! ### Required `.env` values
//!
//! - `DPO_COMPANY_TOKEN`
//! - `DPO_SERVICE_ID`
//! - `DPO_REDIRECT_URL`
//! - `DPO_BACK_URL`
//!
//! ### Optional
//!
//! - `DPO_CURRENCY=ZMW`
//! - `DPO_COUNTRY=Zambia`
//! - `SERVER_PORT=6666`
//! - `GOVERNOR_BURST=5`
//! - `GOVERNOR_PER_SECOND=2`
//!
//! ## 📚 Modules
//!
//! - [`dpo`](crate::dpo) — gateway client, XML documents and HTTP handlers
//! - [`config`](crate::config) — configuration records and defaults
//! - [`utils`](crate::utils) — environment loader
//!
//! ## Example
//!
//! ```no_run
//! use tiny_dpo_pay::{config::DpoConfig, dpo::DpoClient};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = DpoClient::new(DpoConfig::load()?);
//! let token = client.create_token(150.0, "Concert ticket").await?;
//! println!("pay at {}", client.payment_url(&token));
//! # Ok(())
//! # }
//! ```
//!
//! ## 📄 License
//!
//! MIT License © [Holger Trahe](https://github.com/holg)

pub mod config;
pub mod dpo;
pub mod utils;
