//! CSV数値系列のパース

/// カンマ区切りの数値を固定長の系列に変換する
///
/// 欠損・数値以外の要素・要素数の不一致はすべて `default` にフォールバックする。
///
/// # Examples
/// ```
/// use store_assess_common::parse_csv_series;
///
/// let default = [25.0, 25.0, 35.0, 15.0];
/// assert_eq!(parse_csv_series(Some("10,20,30,40"), &default), vec![10.0, 20.0, 30.0, 40.0]);
/// assert_eq!(parse_csv_series(None, &default), default.to_vec());
/// ```
pub fn parse_csv_series(text: Option<&str>, default: &[f64]) -> Vec<f64> {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return default.to_vec();
    };
    let text = text.strip_suffix(',').unwrap_or(text);

    let parsed: Option<Vec<f64>> = text
        .split(',')
        .map(|part| part.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect();

    match parsed {
        Some(values) if values.len() == default.len() => values,
        _ => default.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COST: [f64; 4] = [25.0, 25.0, 35.0, 15.0];
    const AGE: [f64; 7] = [5.0, 15.0, 30.0, 25.0, 15.0, 5.0, 5.0];

    #[test]
    fn test_parse_valid() {
        assert_eq!(parse_csv_series(Some("10,20,30,40"), &COST), vec![10.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn test_parse_with_spaces_and_trailing_comma() {
        assert_eq!(
            parse_csv_series(Some(" 10, 20 ,30,40, "), &COST),
            vec![10.0, 20.0, 30.0, 40.0]
        );
    }

    #[test]
    fn test_parse_decimals() {
        assert_eq!(
            parse_csv_series(Some("2.5,17.5,30,25,15,5,5"), &AGE),
            vec![2.5, 17.5, 30.0, 25.0, 15.0, 5.0, 5.0]
        );
    }

    #[test]
    fn test_absent_falls_back() {
        assert_eq!(parse_csv_series(None, &COST), COST.to_vec());
        assert_eq!(parse_csv_series(Some("   "), &AGE), AGE.to_vec());
    }

    #[test]
    fn test_malformed_falls_back() {
        assert_eq!(parse_csv_series(Some("10,abc,30,40"), &COST), COST.to_vec());
        assert_eq!(parse_csv_series(Some("10,,30,40"), &COST), COST.to_vec());
        assert_eq!(parse_csv_series(Some("NaN,1,2,3"), &COST), COST.to_vec());
    }

    #[test]
    fn test_wrong_length_falls_back() {
        assert_eq!(parse_csv_series(Some("10,20,30"), &COST), COST.to_vec());
        assert_eq!(parse_csv_series(Some("10,20,30,40"), &AGE), AGE.to_vec());
    }
}
