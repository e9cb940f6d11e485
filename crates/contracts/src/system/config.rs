use serde::{Deserialize, Serialize};

/// Настройки консоли. Значения по умолчанию соответствуют конфигурации
/// платформы; страница-хост может переопределить их объектом
/// `window.PDN_CONSOLE_CONFIG`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Отчёт со списком процессов
    pub process_report: String,
    /// Форма создания процесса
    pub process_form_id: String,
    pub page_size: usize,
    pub tab_page_size: usize,
    pub search_debounce_ms: u32,
    /// Статус "Проект" для новых процессов
    pub draft_status_id: String,
    pub notification_ms: u32,
    /// Ограничение кэша вкладок; `None`: без ограничения
    pub tab_cache_capacity: Option<usize>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            process_report: "480".to_string(),
            process_form_id: "294".to_string(),
            page_size: 20,
            tab_page_size: 10,
            search_debounce_ms: 300,
            draft_status_id: "372".to_string(),
            notification_ms: 3000,
            tab_cache_capacity: None,
        }
    }
}
