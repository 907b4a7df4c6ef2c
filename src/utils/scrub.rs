use regex::Regex;
use std::sync::LazyLock;

static BEARER_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(authorization:\s*bearer\s+)[A-Za-z0-9_\-]+").expect("static regex")
});

static CARD_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"("cardToken"\s*:\s*")[^"]*(")"#).expect("static regex")
});

static CONSUMER_ACCOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"("consumerAccount"\s*:\s*")[^"]*(")"#).expect("static regex")
});

/// 遮蔽請求紀錄中的敏感資料，讓它可以安全寫進日誌
pub fn scrub(transcript: &str) -> String {
    let result = BEARER_TOKEN.replace_all(transcript, "${1}[FILTERED]");
    let result = CARD_TOKEN.replace_all(&result, "${1}[FILTERED]${2}");
    let result = CONSUMER_ACCOUNT.replace_all(&result, "${1}[FILTERED]${2}");
    result.into_owned()
}
