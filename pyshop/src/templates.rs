//! HTMLテンプレート描画
//!
//! Tera（Jinja2/Djangoテンプレート互換の構文）を使用する。
//! テンプレートは `templates/` 配下をバイナリに埋め込み、起動時に一括登録する。
//! `.html` テンプレートは自動エスケープされる。

use crate::common::error::ShopResult;
use include_dir::{include_dir, Dir};
use std::collections::HashMap;
use std::sync::Arc;
use tera::{Context, Tera, Value};

static TEMPLATES_DIR: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// テンプレートレンダラー
#[derive(Clone)]
pub struct TemplateRenderer {
    tera: Arc<Tera>,
}

impl TemplateRenderer {
    /// 埋め込みテンプレートから生成
    pub fn embedded() -> ShopResult<Self> {
        let mut templates = Vec::new();
        collect_templates(&TEMPLATES_DIR, &mut templates);
        Self::from_raw(templates)
    }

    /// `(名前, 本文)` の組から生成
    ///
    /// 継承元（`{% extends %}`）も同じ呼び出しで渡すこと。
    pub fn from_raw<N, C>(templates: Vec<(N, C)>) -> ShopResult<Self>
    where
        N: AsRef<str>,
        C: AsRef<str>,
    {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates)?;
        tera.register_filter("money", money);
        tracing::debug!(count = tera.get_template_names().count(), "Templates loaded");
        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    /// テンプレートを描画
    pub fn render(&self, name: &str, context: &Context) -> ShopResult<String> {
        Ok(self.tera.render(name, context)?)
    }
}

fn collect_templates(dir: &'static Dir<'static>, out: &mut Vec<(String, &'static str)>) {
    for file in dir.files() {
        if let Some(contents) = file.contents_utf8() {
            // Windows でもテンプレート名は "/" 区切り
            let name = file.path().to_string_lossy().replace('\\', "/");
            out.push((name, contents));
        }
    }
    for sub in dir.dirs() {
        collect_templates(sub, out);
    }
}

/// 小数点以下2桁で表示するフィルター（`{{ price | money }}`）
fn money(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    match value.as_f64() {
        Some(v) => Ok(Value::String(format!("{:.2}", v))),
        None => Err(tera::Error::msg(format!(
            "Filter `money` expected a number, got {}",
            value
        ))),
    }
}
