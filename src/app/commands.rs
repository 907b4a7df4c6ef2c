use crate::config::cli::Command;
use crate::domain::model::{GatewayResponse, PaymentOptions};
use crate::domain::ports::PaymentGateway;
use crate::utils::error::{ErrorSeverity, GatewayError, Result};

/// Exit code used when the provider declined the operation.
pub const EXIT_DECLINED: i32 = 4;

/// 執行單一子命令
pub async fn execute<G: PaymentGateway + ?Sized>(
    gateway: &G,
    command: &Command,
) -> Result<GatewayResponse> {
    tracing::debug!("Running {:?} against {}", command, gateway.name());

    match command {
        Command::Purchase {
            amount,
            method,
            card_token,
            options,
        } => {
            let source = Command::payment_source(method.as_deref(), card_token.as_deref())?;
            gateway
                .purchase(&amount.to_money()?, &source, &options.to_options())
                .await
        }
        Command::SetupRecurring {
            amount,
            customer,
            options,
        } => {
            gateway
                .setup_recurring(&amount.to_money()?, customer, &options.to_options())
                .await
        }
        Command::Recurring {
            amount,
            customer,
            mandate,
            options,
        } => {
            gateway
                .recurring(
                    &amount.to_money()?,
                    customer,
                    mandate.as_deref(),
                    &options.to_options(),
                )
                .await
        }
        Command::Refund {
            amount,
            payment,
            description,
        } => {
            let options = PaymentOptions {
                description: description.clone(),
                ..Default::default()
            };
            gateway.refund(&amount.to_money()?, payment, &options).await
        }
        Command::Void { payment } => gateway.void(payment).await,
        Command::Status { payment } => gateway.status(payment).await,
        Command::Store {
            name,
            email,
            locale,
        } => {
            let customer =
                Command::customer(name.as_deref(), email.as_deref(), locale.as_deref());
            gateway.store(&customer).await
        }
        Command::Unstore { customer } => gateway.unstore(customer).await,
        Command::Mandate {
            customer,
            consumer_name,
            iban,
            bic,
            signature_date,
            reference,
        } => {
            let mandate = Command::mandate(
                consumer_name,
                iban,
                bic.as_deref(),
                *signature_date,
                reference.as_deref(),
            );
            gateway.create_mandate(customer, &mandate).await
        }
        Command::RevokeMandate { customer, mandate } => {
            gateway.revoke_mandate(customer, mandate).await
        }
    }
}

pub fn exit_code_for_response(response: &GatewayResponse) -> i32 {
    if response.success {
        0
    } else {
        EXIT_DECLINED
    }
}

pub fn exit_code_for_error(error: &GatewayError) -> i32 {
    match error.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2, // 可重試
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

/// 輸出錯誤說明與建議，回傳對應的結束碼
pub fn report_error(error: &GatewayError) -> i32 {
    eprintln!("❌ {}", error.user_friendly_message());
    eprintln!("💡 Suggestion: {}", error.recovery_suggestion());
    exit_code_for_error(error)
}
