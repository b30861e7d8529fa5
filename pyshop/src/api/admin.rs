//! 管理画面ハンドラー
//!
//! `/admin/` 配下。画面はすべて登録済みモデルのフィールド定義から生成する。
//! フォームは `application/x-www-form-urlencoded` のPOSTで受け取り、
//! 成功時は一覧へ 303 リダイレクトする。

use super::error::AppError;
use crate::admin::{AdminObject, FormOutcome, ModelAdmin};
use crate::common::error::ShopError;
use crate::models::{FormErrors, NON_FIELD_ERRORS};
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::info;

/// 管理画面トップの1モデル分
#[derive(Debug, Serialize)]
struct ModelSummary {
    model_name: &'static str,
    verbose_name_plural: &'static str,
    count: i64,
}

/// 変更フォームの1フィールド分
#[derive(Debug, Serialize)]
struct FormField {
    name: &'static str,
    label: &'static str,
    input_type: &'static str,
    step: Option<&'static str>,
    max_length: Option<usize>,
    value: String,
    errors: Vec<String>,
}

fn base_context(state: &AppState) -> tera::Context {
    let mut context = tera::Context::new();
    context.insert("site_title", "PyShop site admin");
    context.insert("site_header", state.admin_site.site_header());
    context.insert("app_label", state.admin_site.app_label());
    context
}

fn model_context(state: &AppState, model: &dyn ModelAdmin) -> tera::Context {
    let mut context = base_context(state);
    context.insert("model_name", model.model_name());
    context.insert("verbose_name", model.verbose_name());
    context.insert("verbose_name_plural", model.verbose_name_plural());
    context
}

fn lookup_model(
    state: &AppState,
    app: &str,
    model: &str,
) -> Result<Arc<dyn ModelAdmin>, AppError> {
    if app != state.admin_site.app_label() {
        return Err(ShopError::NotFound(format!("admin app {}", app)).into());
    }
    state
        .admin_site
        .get(model)
        .ok_or_else(|| ShopError::NotFound(format!("admin model {}", model)).into())
}

/// 数値以外のIDは存在しないものとして扱う
fn parse_object_id(model: &dyn ModelAdmin, raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>().map_err(|_| {
        ShopError::NotFound(format!("{} with id {}", model.model_name(), raw)).into()
    })
}

fn changelist_url(state: &AppState, model: &dyn ModelAdmin) -> String {
    format!(
        "/admin/{}/{}/",
        state.admin_site.app_label(),
        model.model_name()
    )
}

fn render_form(
    state: &AppState,
    model: &dyn ModelAdmin,
    object: Option<&AdminObject>,
    values: &BTreeMap<String, String>,
    errors: &FormErrors,
) -> Result<Html<String>, AppError> {
    let fields: Vec<FormField> = model
        .fields()
        .iter()
        .map(|spec| FormField {
            name: spec.name,
            label: spec.label,
            input_type: spec.kind.input_type(),
            step: spec.kind.step(),
            max_length: spec.kind.max_length(),
            value: values.get(spec.name).cloned().unwrap_or_default(),
            errors: errors.get(spec.name).to_vec(),
        })
        .collect();

    let (title, action) = match object {
        Some(obj) => (
            format!("Change {}", model.verbose_name().to_lowercase()),
            format!("{}{}/change/", changelist_url(state, model), obj.id),
        ),
        None => (
            format!("Add {}", model.verbose_name().to_lowercase()),
            format!("{}add/", changelist_url(state, model)),
        ),
    };

    let mut context = model_context(state, model);
    context.insert("title", &title);
    context.insert("action", &action);
    context.insert("fields", &fields);
    context.insert("object_id", &object.map(|o| o.id));
    context.insert("error_count", &errors.len());
    context.insert("non_field_errors", errors.get(NON_FIELD_ERRORS));

    Ok(Html(state.templates.render("admin/change_form.html", &context)?))
}

/// GET /admin/ - 登録済みモデル一覧
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let mut models = Vec::with_capacity(state.admin_site.models().len());
    for model in state.admin_site.models() {
        models.push(ModelSummary {
            model_name: model.model_name(),
            verbose_name_plural: model.verbose_name_plural(),
            count: model.count().await?,
        });
    }

    let mut context = base_context(&state);
    context.insert("models", &models);
    Ok(Html(state.templates.render("admin/index.html", &context)?))
}

/// GET /admin/:app/:model/ - 一覧（保存順）
pub async fn change_list(
    State(state): State<AppState>,
    Path((app, model_name)): Path<(String, String)>,
) -> Result<Html<String>, AppError> {
    let model = lookup_model(&state, &app, &model_name)?;
    let rows = model.list_rows().await?;

    let mut context = model_context(&state, model.as_ref());
    context.insert("columns", &model.list_columns());
    context.insert("rows", &rows);
    Ok(Html(state.templates.render("admin/change_list.html", &context)?))
}

/// GET /admin/:app/:model/add/ - 空の追加フォーム
pub async fn add_form(
    State(state): State<AppState>,
    Path((app, model_name)): Path<(String, String)>,
) -> Result<Html<String>, AppError> {
    let model = lookup_model(&state, &app, &model_name)?;
    render_form(
        &state,
        model.as_ref(),
        None,
        &BTreeMap::new(),
        &FormErrors::default(),
    )
}

/// POST /admin/:app/:model/add/ - 作成
pub async fn add_submit(
    State(state): State<AppState>,
    Path((app, model_name)): Path<(String, String)>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let model = lookup_model(&state, &app, &model_name)?;

    match model.create_from_form(&form).await? {
        FormOutcome::Saved(object) => {
            info!(
                model = model.model_name(),
                id = object.id,
                display = %object.display,
                "Admin object added"
            );
            Ok(Redirect::to(&changelist_url(&state, model.as_ref())).into_response())
        }
        FormOutcome::Invalid(errors) => {
            let values: BTreeMap<String, String> = form.into_iter().collect();
            Ok(render_form(&state, model.as_ref(), None, &values, &errors)?.into_response())
        }
    }
}

/// GET /admin/:app/:model/:id/change/ - 変更フォーム
pub async fn change_form(
    State(state): State<AppState>,
    Path((app, model_name, raw_id)): Path<(String, String, String)>,
) -> Result<Html<String>, AppError> {
    let model = lookup_model(&state, &app, &model_name)?;
    let id = parse_object_id(model.as_ref(), &raw_id)?;
    let object = model.get_object(id).await?.ok_or_else(|| {
        ShopError::NotFound(format!("{} with id {}", model.model_name(), id))
    })?;

    render_form(
        &state,
        model.as_ref(),
        Some(&object),
        &object.values,
        &FormErrors::default(),
    )
}

/// POST /admin/:app/:model/:id/change/ - 更新
pub async fn change_submit(
    State(state): State<AppState>,
    Path((app, model_name, raw_id)): Path<(String, String, String)>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let model = lookup_model(&state, &app, &model_name)?;
    let id = parse_object_id(model.as_ref(), &raw_id)?;
    let not_found = || ShopError::NotFound(format!("{} with id {}", model.model_name(), id));

    match model.update_from_form(id, &form).await?.ok_or_else(not_found)? {
        FormOutcome::Saved(object) => {
            info!(
                model = model.model_name(),
                id = object.id,
                display = %object.display,
                "Admin object changed"
            );
            Ok(Redirect::to(&changelist_url(&state, model.as_ref())).into_response())
        }
        FormOutcome::Invalid(errors) => {
            let object = model.get_object(id).await?.ok_or_else(not_found)?;
            let values: BTreeMap<String, String> = form.into_iter().collect();
            Ok(render_form(&state, model.as_ref(), Some(&object), &values, &errors)?
                .into_response())
        }
    }
}

/// GET /admin/:app/:model/:id/delete/ - 削除確認
pub async fn delete_confirm(
    State(state): State<AppState>,
    Path((app, model_name, raw_id)): Path<(String, String, String)>,
) -> Result<Html<String>, AppError> {
    let model = lookup_model(&state, &app, &model_name)?;
    let id = parse_object_id(model.as_ref(), &raw_id)?;
    let object = model.get_object(id).await?.ok_or_else(|| {
        ShopError::NotFound(format!("{} with id {}", model.model_name(), id))
    })?;

    let mut context = model_context(&state, model.as_ref());
    context.insert("object_id", &object.id);
    context.insert("object_repr", &object.display);
    Ok(Html(
        state
            .templates
            .render("admin/delete_confirmation.html", &context)?,
    ))
}

/// POST /admin/:app/:model/:id/delete/ - 削除
pub async fn delete_submit(
    State(state): State<AppState>,
    Path((app, model_name, raw_id)): Path<(String, String, String)>,
) -> Result<Redirect, AppError> {
    let model = lookup_model(&state, &app, &model_name)?;
    let id = parse_object_id(model.as_ref(), &raw_id)?;

    if !model.delete(id).await? {
        return Err(ShopError::NotFound(format!("{} with id {}", model.model_name(), id)).into());
    }
    info!(model = model.model_name(), id, "Admin object deleted");

    Ok(Redirect::to(&changelist_url(&state, model.as_ref())))
}
