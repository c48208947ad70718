use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "store-assess")]
#[command(about = "店面選址評估ツール（評估API呼び出し・レポートプレビュー）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// フォーム値を評估APIへ送信し、結果JSONを保存
    Evaluate {
        /// フォーム項目（例: address=台北市大安區 industryType=其他 industryTypeOther=寵物美容）
        #[arg(required = true, value_parser = parse_field)]
        fields: Vec<(String, String)>,

        /// 出力JSONファイル
        #[arg(short, long, default_value = "assessment.json")]
        output: PathBuf,

        /// 送信先URL（設定・環境変数より優先）
        #[arg(short, long)]
        endpoint: Option<String>,
    },

    /// 保存した評估結果をレポートとして表示
    Preview {
        /// 結果JSONファイル（raw_data、またはAPIレスポンス全体）
        #[arg(required = true)]
        input: PathBuf,

        /// 表示モデルをJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 送信先URLを設定
        #[arg(long)]
        set_endpoint: Option<String>,

        /// タイムアウト（秒）を設定
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// `key=value` を分解する
pub fn parse_field(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("key=value 形式で指定してください: {}", s))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("項目名が空です: {}", s));
    }

    Ok((key.to_string(), value.to_string()))
}
