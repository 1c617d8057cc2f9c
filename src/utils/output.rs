use crate::utils::error::{Result, ToolkitError};
use serde::Serialize;

/// `--json` 輸出；序列化失敗屬於輸出錯誤，不是目錄錯誤
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| ToolkitError::OutputError {
        message: e.to_string(),
    })
}
