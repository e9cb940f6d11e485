use crate::shared::record::value_to_string;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Числа из JS приходят как f64: целое `417.0` читается как "417"
fn global_text(value: &Value) -> String {
    match value.as_f64() {
        Some(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", n as i64),
        _ => value_to_string(value),
    }
}

/// Контекст сессии, который выдаёт страница-хост: пользователь, база, CSRF
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub user_id: String,
    pub db: String,
    pub xsrf: String,
}

impl SessionContext {
    pub fn new(
        user_id: impl Into<String>,
        db: impl Into<String>,
        xsrf: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            db: db.into(),
            xsrf: xsrf.into(),
        }
    }

    /// Из глобальных переменных страницы; `uid` бывает и числом, и строкой
    pub fn from_globals(uid: &Value, db: &Value, xsrf: &Value) -> Self {
        Self::new(global_text(uid), global_text(db), global_text(xsrf))
    }

    /// Гость: пользователь не определён
    pub fn is_guest(&self) -> bool {
        let uid = self.user_id.trim();
        uid.is_empty() || uid == "guest"
    }

    /// Базовый путь API платформы: `/<db>/`
    pub fn api_prefix(&self) -> String {
        format!("/{}/", self.db)
    }

    pub fn login_url(&self) -> String {
        format!("/{}/login", self.db)
    }
}
