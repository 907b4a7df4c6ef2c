use crate::config::toml_config::GatewayConfig;
use crate::core::amount::{normalize_currency, parse_amount};
use crate::domain::model::{Customer, DirectDebitMandate, Money, PaymentOptions, PaymentSource};
use crate::utils::error::{GatewayError, Result};
use crate::utils::validation::{validate_required_field, Validate};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "mollie-gateway")]
#[command(about = "Run Mollie payment operations from the command line")]
pub struct CliConfig {
    #[arg(long, short = 'c', help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "MOLLIE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, help = "Override the API base URL")]
    pub base_url: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create a payment
    Purchase {
        #[command(flatten)]
        amount: AmountArgs,
        #[arg(long, required_unless_present = "card_token", conflicts_with = "card_token")]
        method: Option<String>,
        #[arg(long)]
        card_token: Option<String>,
        #[command(flatten)]
        options: OptionArgs,
    },
    /// Create the first payment of a mandate
    SetupRecurring {
        #[command(flatten)]
        amount: AmountArgs,
        #[arg(long)]
        customer: String,
        #[command(flatten)]
        options: OptionArgs,
    },
    /// Charge an existing mandate
    Recurring {
        #[command(flatten)]
        amount: AmountArgs,
        #[arg(long)]
        customer: String,
        #[arg(long)]
        mandate: Option<String>,
        #[command(flatten)]
        options: OptionArgs,
    },
    /// Refund a payment
    Refund {
        #[command(flatten)]
        amount: AmountArgs,
        #[arg(long)]
        payment: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Cancel a payment
    Void {
        #[arg(long)]
        payment: String,
    },
    /// Show the state of a payment
    Status {
        #[arg(long)]
        payment: String,
    },
    /// Register a customer
    Store {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        locale: Option<String>,
    },
    /// Delete a customer
    Unstore {
        #[arg(long)]
        customer: String,
    },
    /// Register a direct debit mandate
    Mandate {
        #[arg(long)]
        customer: String,
        #[arg(long)]
        consumer_name: String,
        #[arg(long)]
        iban: String,
        #[arg(long)]
        bic: Option<String>,
        #[arg(long, help = "Signature date, YYYY-MM-DD")]
        signature_date: Option<NaiveDate>,
        #[arg(long)]
        reference: Option<String>,
    },
    /// Revoke a mandate
    RevokeMandate {
        #[arg(long)]
        customer: String,
        #[arg(long)]
        mandate: String,
    },
}

#[derive(Debug, Clone, Args)]
pub struct AmountArgs {
    #[arg(long, help = "Amount in major units, e.g. 10.00")]
    pub amount: String,

    #[arg(long, default_value = "EUR")]
    pub currency: String,
}

impl AmountArgs {
    pub fn to_money(&self) -> Result<Money> {
        let currency = normalize_currency(&self.currency)?;
        let cents = parse_amount(&self.amount, &currency)?;
        Ok(Money::new(cents, currency))
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct OptionArgs {
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub redirect_url: Option<String>,
    #[arg(long)]
    pub cancel_url: Option<String>,
    #[arg(long)]
    pub webhook_url: Option<String>,
    #[arg(long)]
    pub locale: Option<String>,
    #[arg(long)]
    pub order_id: Option<String>,
}

impl OptionArgs {
    pub fn to_options(&self) -> PaymentOptions {
        PaymentOptions {
            description: self.description.clone(),
            redirect_url: self.redirect_url.clone(),
            cancel_url: self.cancel_url.clone(),
            webhook_url: self.webhook_url.clone(),
            locale: self.locale.clone(),
            order_id: self.order_id.clone(),
            ..Default::default()
        }
    }
}

impl Command {
    pub fn payment_source(method: Option<&str>, card_token: Option<&str>) -> Result<PaymentSource> {
        match (method, card_token) {
            (_, Some(token)) => Ok(PaymentSource::CardToken(token.to_string())),
            (Some(method), None) => Ok(PaymentSource::Method(method.to_string())),
            (None, None) => Err(GatewayError::validation(
                "either --method or --card-token is required",
            )),
        }
    }

    pub fn customer(name: Option<&str>, email: Option<&str>, locale: Option<&str>) -> Customer {
        Customer {
            name: name.map(str::to_string),
            email: email.map(str::to_string),
            locale: locale.map(str::to_string),
            metadata: None,
        }
    }

    pub fn mandate(
        consumer_name: &str,
        iban: &str,
        bic: Option<&str>,
        signature_date: Option<NaiveDate>,
        reference: Option<&str>,
    ) -> DirectDebitMandate {
        DirectDebitMandate {
            consumer_name: consumer_name.to_string(),
            consumer_account: iban.to_string(),
            consumer_bic: bic.map(str::to_string),
            signature_date,
            mandate_reference: reference.map(str::to_string),
        }
    }
}

impl CliConfig {
    /// 合併設定檔 (或 MOLLIE_* 環境變數) 與命令列參數，命令列優先
    pub fn gateway_config(&self) -> Result<GatewayConfig> {
        let mut config = match &self.config {
            Some(path) => GatewayConfig::from_file(path)?,
            None => {
                let api_key = validate_required_field("api_key", &self.api_key)?;
                GatewayConfig::new(api_key.clone()).with_env_overrides()?
            }
        };

        if let Some(api_key) = &self.api_key {
            config.gateway.api_key = api_key.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.gateway.base_url = Some(base_url.clone());
        }

        config.validate()?;
        Ok(config)
    }
}
