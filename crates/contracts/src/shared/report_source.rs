//! Граница с платформой: отчёты (`report/...?JSON_KV`) и запись форм
//! (`_m_new`, `_m_save`). Реализация для браузера живёт во frontend.

use super::error::{ConsoleError, ConsoleResult};
use super::record::Record;
use async_trait::async_trait;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Запрос отчёта по id или имени с фильтрами `FR_*`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    pub report: String,
    pub params: Vec<(String, String)>,
}

impl ReportQuery {
    pub fn new(report: impl Into<String>) -> Self {
        Self {
            report: report.into(),
            params: Vec::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Относительный путь: `report/<id>?JSON_KV&k=v`
    pub fn to_path(&self) -> String {
        let mut path = format!("report/{}?JSON_KV", urlencoding::encode(&self.report));
        for (key, value) in &self.params {
            path.push('&');
            path.push_str(&urlencoding::encode(key));
            path.push('=');
            path.push_str(&urlencoding::encode(value));
        }
        path
    }
}

/// Куда отправляется форма
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitTarget {
    Create { form_id: String },
    Update { record_id: String },
}

impl SubmitTarget {
    pub fn to_path(&self) -> String {
        match self {
            SubmitTarget::Create { form_id } => {
                format!("_m_new/{}?JSON&up=1", urlencoding::encode(form_id))
            }
            SubmitTarget::Update { record_id } => {
                format!("_m_save/{}?JSON", urlencoding::encode(record_id))
            }
        }
    }
}

/// Тело формы в порядке заполнения: ключ платформы -> значение
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WireForm {
    entries: Vec<(String, String)>,
}

impl WireForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Записывает значение; повторная запись того же ключа заменяет его
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for WireForm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Разбор ответа `JSON_KV`: массив объектов. Пустое тело и `null` дают
/// пустую выборку, элементы-не-объекты пропускаются.
pub fn parse_records(body: &str) -> ConsoleResult<Vec<Record>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ConsoleError::Decode(e.to_string()))?;
    match value {
        serde_json::Value::Null => Ok(Vec::new()),
        serde_json::Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::Object(map) => Some(map),
                _ => None,
            })
            .collect()),
        other => Err(ConsoleError::Decode(format!("ожидался массив, получено: {}", other))),
    }
}

/// Доступ к API платформы
#[async_trait(?Send)]
pub trait ReportSource {
    /// Получить строки отчёта
    async fn fetch_report(&self, query: &ReportQuery) -> ConsoleResult<Vec<Record>>;

    /// Создать или обновить запись
    async fn submit_record(
        &self,
        target: &SubmitTarget,
        form: &WireForm,
    ) -> ConsoleResult<serde_json::Value>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_path_encodes_name() {
        let q = ReportQuery::new("proc Риски").with_param("FR_procID", "15");
        assert_eq!(
            q.to_path(),
            "report/proc%20%D0%A0%D0%B8%D1%81%D0%BA%D0%B8?JSON_KV&FR_procID=15"
        );
        assert_eq!(ReportQuery::new("480").to_path(), "report/480?JSON_KV");
    }

    #[test]
    fn test_submit_paths() {
        let create = SubmitTarget::Create {
            form_id: "294".into(),
        };
        let update = SubmitTarget::Update {
            record_id: "1001".into(),
        };
        assert_eq!(create.to_path(), "_m_new/294?JSON&up=1");
        assert_eq!(update.to_path(), "_m_save/1001?JSON");
    }

    #[test]
    fn test_parse_records_keeps_key_order() {
        let records = parse_records(r#"[{"Б": 1, "А": "x", "ВID": 2}, 5]"#).unwrap();
        assert_eq!(records.len(), 1);
        let keys: Vec<&str> = records[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Б", "А", "ВID"]);

        assert!(parse_records("").unwrap().is_empty());
        assert!(parse_records("null").unwrap().is_empty());
        assert!(matches!(parse_records("{}"), Err(ConsoleError::Decode(_))));
        assert!(matches!(parse_records("<html>"), Err(ConsoleError::Decode(_))));
    }

    #[test]
    fn test_wire_form_set_replaces() {
        let mut form = WireForm::new();
        form.set("_xsrf", "token");
        form.set("t294", "a");
        form.set("t294", "b");
        assert_eq!(form.len(), 2);
        assert_eq!(form.get("t294"), Some("b"));
        assert_eq!(form.get("t600"), None);
    }
}
