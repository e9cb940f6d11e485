//! Запись отчёта без фиксированной схемы
//!
//! Платформа отдаёт `report/<id>?JSON_KV` как массив объектов, набор и порядок
//! ключей которых заранее неизвестен. Порядок ключей сохраняется
//! (`serde_json` с `preserve_order`), эвристики поиска полей на него опираются.

use serde_json::{Map, Value};

/// Одна запись отчёта: метка поля -> скалярное значение
pub type Record = Map<String, Value>;

/// Суффикс, по которому распознаётся поле-идентификатор
pub const ID_SUFFIX: &str = "ID";

pub fn is_id_key(key: &str) -> bool {
    key.ends_with(ID_SUFFIX)
}

/// Строковое представление значения (как `String(value)` на стороне платформы)
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Значение поля записи в виде строки, пустая строка если поля нет
pub fn field_str(record: &Record, key: &str) -> String {
    record.get(key).map(value_to_string).unwrap_or_default()
}

/// Нестрогое сравнение: `12` и `"12"` считаются равными
pub fn loose_eq(value: &Value, other: &str) -> bool {
    match value {
        Value::Null => false,
        _ => value_to_string(value).trim() == other.trim(),
    }
}

/// Проверяет, содержит ли хотя бы одно поле записи подстроку `needle`.
/// `needle` ожидается уже в нижнем регистре.
pub fn record_contains(record: &Record, needle: &str) -> bool {
    record
        .values()
        .any(|v| value_to_string(v).to_lowercase().contains(needle))
}

/// Декодирование HTML-сущностей в текстовых полях, которые платформа
/// возвращает экранированными
pub fn decode_html_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        let decoded = tail.find(';').and_then(|end| {
            // Сущности длиннее 10 символов не встречаются
            if end > 10 {
                return None;
            }
            decode_entity(&tail[1..end]).map(|ch| (ch, end + 1))
        });

        match decoded {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        "laquo" => Some('«'),
        "raquo" => Some('»'),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse::<u32>().ok()?,
            };
            char::from_u32(value)
        }
    }
}
