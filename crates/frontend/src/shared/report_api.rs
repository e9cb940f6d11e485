//! HTTP-клиент платформы поверх gloo-net

use crate::shared::api_utils::api_url;
use async_trait::async_trait;
use contracts::shared::error::{ConsoleError, ConsoleResult};
use contracts::shared::record::Record;
use contracts::shared::report_source::{
    parse_records, ReportQuery, ReportSource, SubmitTarget, WireForm,
};
use contracts::system::SessionContext;
use gloo_net::http::{Request, Response};

pub struct GlooReportSource {
    session: SessionContext,
}

impl GlooReportSource {
    pub fn new(session: SessionContext) -> Self {
        Self { session }
    }
}

/// Тело успешного ответа или `Network` с кодом статуса
async fn read_body(response: Response) -> ConsoleResult<String> {
    if !response.ok() {
        let status = response.status();
        let text = response.status_text();
        let message = if text.is_empty() {
            format!("HTTP {}", status)
        } else {
            format!("HTTP {}: {}", status, text)
        };
        return Err(ConsoleError::http(status, message));
    }
    response
        .text()
        .await
        .map_err(|e| ConsoleError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl ReportSource for GlooReportSource {
    async fn fetch_report(&self, query: &ReportQuery) -> ConsoleResult<Vec<Record>> {
        let url = api_url(&self.session, &query.to_path());
        log::debug!("GET {}", url);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ConsoleError::network(e.to_string()))?;
        let body = read_body(response).await?;
        parse_records(&body)
    }

    async fn submit_record(
        &self,
        target: &SubmitTarget,
        form: &WireForm,
    ) -> ConsoleResult<serde_json::Value> {
        let url = api_url(&self.session, &target.to_path());
        log::debug!("POST {} ({} полей)", url, form.len());

        let body = serde_qs::to_string(form).map_err(|e| ConsoleError::Decode(e.to_string()))?;
        let response = Request::post(&url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .map_err(|e| ConsoleError::network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ConsoleError::network(e.to_string()))?;

        let text = read_body(response).await?;
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ConsoleError::Decode(e.to_string()))
    }
}
