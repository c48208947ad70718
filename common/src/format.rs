//! 表示用の整形

/// 通貨プレフィックス
pub const CURRENCY_PREFIX: &str = "NT$ ";

/// 欠損値の表示
pub const MISSING: &str = "-";

/// 整数部を3桁区切りにする（小数部はそのまま）
pub fn group_thousands(value: f64) -> String {
    let text = format!("{}", value);
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(idx) => unsigned.split_at(idx),
        None => (unsigned, ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}{}", sign, grouped, frac_part)
}

/// 指標値の表示。欠損または0は `-`
pub fn metric(value: Option<f64>, prefix: &str) -> String {
    match value {
        Some(v) if v != 0.0 => format!("{}{}", prefix, group_thousands(v)),
        _ => MISSING.to_string(),
    }
}

/// 月営収（日営収 × 30）
pub fn monthly_revenue(daily_revenue: Option<f64>) -> String {
    metric(daily_revenue.map(|d| d * 30.0), CURRENCY_PREFIX)
}

/// 総合評分（小数1桁）
pub fn score_text(score: Option<f64>) -> String {
    format!("{:.1}", score.unwrap_or(0.0))
}

/// 改行ごとに段落へ分割する
pub fn paragraphs(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect()
}
