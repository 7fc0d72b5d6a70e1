//! HTTP host for the dashboard.
//!
//! Every handler reads the shared [`ReportContext`]; none of them computes
//! anything beyond rendering the selected tab.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::context::ReportContext;
use crate::dashboard::html::{render_page, render_tab_content};
use crate::dashboard::{Tab, UnknownTab, render};

#[derive(Clone)]
pub struct AppState {
    context: Arc<ReportContext>,
    title: Arc<str>,
}

impl AppState {
    pub fn new(context: ReportContext, title: &str) -> Self {
        Self {
            context: Arc::new(context),
            title: Arc::from(title),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    tab: Option<String>,
}

#[derive(Serialize)]
struct TabEntry {
    id: Tab,
    label: &'static str,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/tabs/{tab}", get(tab_fragment))
        .route("/api/tabs", get(list_tabs))
        .route("/api/tabs/{tab}", get(tab_json))
        .route("/health", get(health))
        .with_state(state)
}

/// Binds `host:port` and serves until the process is stopped.
pub async fn serve(host: &str, port: u16, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("binding {host}:{port}"))?;

    info!(address = %listener.local_addr()?, "Dashboard listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

fn unknown_tab(err: UnknownTab) -> Response {
    debug!(error = %err, "Rejected tab selection");
    (StatusCode::NOT_FOUND, err.to_string()).into_response()
}

fn render_failure(err: serde_json::Error) -> Response {
    error!(error = %err, "Figure serialization failed");
    (StatusCode::INTERNAL_SERVER_ERROR, "render failed").into_response()
}

async fn index(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Response {
    let tab = match query.tab.as_deref().map(str::parse::<Tab>).transpose() {
        Ok(tab) => tab.unwrap_or_default(),
        Err(e) => return unknown_tab(e),
    };

    let view = render(tab, state.context.summaries());
    match render_page(&state.title, &view) {
        Ok(page) => Html(page).into_response(),
        Err(e) => render_failure(e),
    }
}

async fn tab_fragment(State(state): State<AppState>, Path(tab): Path<String>) -> Response {
    let tab = match tab.parse::<Tab>() {
        Ok(tab) => tab,
        Err(e) => return unknown_tab(e),
    };

    let view = render(tab, state.context.summaries());
    match render_tab_content(&view) {
        Ok(fragment) => Html(fragment).into_response(),
        Err(e) => render_failure(e),
    }
}

async fn list_tabs() -> Json<Vec<TabEntry>> {
    Json(
        Tab::ALL
            .into_iter()
            .map(|tab| TabEntry {
                id: tab,
                label: tab.label(),
            })
            .collect(),
    )
}

async fn tab_json(State(state): State<AppState>, Path(tab): Path<String>) -> Response {
    match tab.parse::<Tab>() {
        Ok(tab) => Json(render(tab, state.context.summaries())).into_response(),
        Err(e) => unknown_tab(e),
    }
}

async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Dataset;
    use crate::record::LoadRecord;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> Router {
        let dataset = Dataset {
            records: vec![
                LoadRecord {
                    produto: Some("A".into()),
                    turno: Some("T1".into()),
                    fundo_perc: Some(10.0),
                    ..Default::default()
                },
                LoadRecord {
                    produto: Some("A".into()),
                    turno: Some("T2".into()),
                    fundo_perc: Some(20.0),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        router(AppState::new(
            ReportContext::from_dataset("memory", dataset),
            "Carregamento",
        ))
    }

    async fn get_body(uri: &str) -> (StatusCode, String) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_index_defaults_to_first_tab() {
        let (status, body) = get_body("/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"<a class="tab active" href="/?tab=tab1">"#));
        assert!(body.contains("<td>15.00</td>"));
    }

    #[tokio::test]
    async fn test_index_selects_tab_from_query() {
        let (status, body) = get_body("/?tab=tab6").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"<a class="tab active" href="/?tab=tab6">"#));
        assert!(body.contains("<td>T2</td>"));
    }

    #[tokio::test]
    async fn test_unknown_tab_is_not_found() {
        let (status, body) = get_body("/?tab=tab9").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("tab9"));

        let (status, _) = get_body("/tabs/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = get_body("/api/tabs/0").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_tab_fragment() {
        let (status, body) = get_body("/tabs/tab1").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("chart-tab1"));
        assert!(!body.contains("<html"));
    }

    #[tokio::test]
    async fn test_tab_json() {
        let (status, body) = get_body("/api/tabs/6").await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["tab"], "tab6");
        assert_eq!(json["chart"]["data"][0]["type"], "pie");
        assert_eq!(json["table"]["rows"][0][0], "T1");
        assert_eq!(json["table"]["rows"][0][1], 10.0);
    }

    #[tokio::test]
    async fn test_list_tabs() {
        let (_, body) = get_body("/api/tabs").await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();

        let ids: Vec<_> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["tab1", "tab2", "tab3", "tab4", "tab5", "tab6", "tab7"]);
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_body("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }
}
