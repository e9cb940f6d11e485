//! Справочники: определение поля-идентификатора и поля-наименования
//! у записей без схемы, поиск наименования по идентификатору.

use super::record::{is_id_key, loose_eq, value_to_string, Record};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Форма записи справочника с точки зрения эвристики
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    /// Один идентификатор и одно наименование
    Regular,
    /// Единственный ключ: идентификатор и наименование совпадают
    SingleKey,
    /// Несколько полей-наименований, используется первое
    ManyLabels,
}

/// Результат разбора ключей записи справочника
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPair {
    pub id: String,
    pub label: String,
    pub shape: FieldShape,
}

/// Ключ идентификатора: оканчивается на "ID", иначе второй ключ, иначе первый
pub fn identifier_field(item: &Record) -> Option<&str> {
    let mut keys = item.keys();
    let first = keys.next()?;
    if let Some(key) = item.keys().find(|k| is_id_key(k)) {
        return Some(key.as_str());
    }
    Some(keys.next().unwrap_or(first).as_str())
}

/// Ключ наименования: первый ключ без суффикса "ID", иначе первый ключ
pub fn label_field(item: &Record) -> Option<&str> {
    item.keys()
        .find(|k| !is_id_key(k))
        .or_else(|| item.keys().next())
        .map(|k| k.as_str())
}

/// Разбор пары (идентификатор, наименование) с указанием неоднозначных случаев
pub fn field_pair(item: &Record) -> Option<FieldPair> {
    let id = identifier_field(item)?;
    let label = label_field(item)?;
    // ключ, выбранный идентификатором по позиции, наименованием не считается
    let label_count = item
        .keys()
        .filter(|k| k.as_str() != id && !is_id_key(k))
        .count();

    let shape = if item.len() == 1 {
        FieldShape::SingleKey
    } else if label_count > 1 {
        FieldShape::ManyLabels
    } else {
        FieldShape::Regular
    };

    Some(FieldPair {
        id: id.to_string(),
        label: label.to_string(),
        shape,
    })
}

/// Значение идентификатора записи справочника
pub fn item_id(item: &Record) -> Option<String> {
    identifier_field(item)
        .and_then(|key| item.get(key))
        .map(value_to_string)
}

/// Значение наименования записи справочника
pub fn item_label(item: &Record) -> Option<String> {
    label_field(item)
        .and_then(|key| item.get(key))
        .map(value_to_string)
}

/// Вариант выпадающего списка
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Вариант выпадающего списка из записи справочника
pub fn item_option(item: &Record) -> Option<SelectOption> {
    Some(SelectOption::new(item_id(item)?, item_label(item)?))
}

/// Загруженные справочники: имя справочника -> упорядоченный набор записей
#[derive(Debug, Clone, Default)]
pub struct ReferenceBook {
    sets: HashMap<String, Vec<Record>>,
}

impl ReferenceBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, items: Vec<Record>) {
        self.sets.insert(name.into(), items);
    }

    pub fn items(&self, name: &str) -> &[Record] {
        self.sets.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sets.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Запись справочника с указанным идентификатором (нестрогое сравнение)
    pub fn find(&self, name: &str, id: &str) -> Option<&Record> {
        if id.trim().is_empty() {
            return None;
        }
        self.sets.get(name)?.iter().find(|item| {
            identifier_field(item)
                .and_then(|key| item.get(key))
                .is_some_and(|v| loose_eq(v, id))
        })
    }

    /// Наименование по идентификатору; `None`, если справочник не загружен
    /// или запись не найдена
    pub fn resolve_label(&self, name: &str, id: &str) -> Option<String> {
        self.find(name, id).and_then(item_label)
    }

    /// Варианты выпадающего списка для справочника
    pub fn options(&self, name: &str) -> Vec<SelectOption> {
        self.items(name).iter().filter_map(item_option).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(text: &str) -> Record {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn test_identifier_by_suffix() {
        let item = rec(r#"{"Статус": "Проект", "СтатусID": "372"}"#);
        assert_eq!(identifier_field(&item), Some("СтатусID"));
        assert_eq!(label_field(&item), Some("Статус"));
    }

    #[test]
    fn test_identifier_positional_fallback() {
        let item = rec(r#"{"Наименование": "Первый", "Код": "17"}"#);
        assert_eq!(identifier_field(&item), Some("Код"));
        assert_eq!(label_field(&item), Some("Наименование"));
        assert_eq!(field_pair(&item).unwrap().shape, FieldShape::Regular);

        let wide = rec(r#"{"Наименование": "Первый", "Код": "17", "Описание": "x"}"#);
        assert_eq!(field_pair(&wide).unwrap().shape, FieldShape::ManyLabels);
    }

    #[test]
    fn test_single_key_collapses() {
        let item = rec(r#"{"Группа": "Кадры"}"#);
        assert_eq!(identifier_field(&item), Some("Группа"));
        assert_eq!(label_field(&item), Some("Группа"));
        assert_eq!(field_pair(&item).unwrap().shape, FieldShape::SingleKey);

        let only_id = rec(r#"{"ГруппаID": "5"}"#);
        assert_eq!(label_field(&only_id), Some("ГруппаID"));
    }

    #[test]
    fn test_many_labels_uses_first() {
        let item = rec(
            r#"{"МикроцельID": "9", "Микроцель": "Расчёт", "Цель обработки ПДн": "Зарплата"}"#,
        );
        let pair = field_pair(&item).unwrap();
        assert_eq!(pair.id, "МикроцельID");
        assert_eq!(pair.label, "Микроцель");
        assert_eq!(pair.shape, FieldShape::ManyLabels);
    }

    #[test]
    fn test_empty_item() {
        let item = Record::new();
        assert_eq!(identifier_field(&item), None);
        assert_eq!(field_pair(&item), None);
    }

    #[test]
    fn test_resolve_label_loose() {
        let mut book = ReferenceBook::new();
        book.insert(
            "Группа",
            vec![
                rec(r#"{"ГруппаID": 5, "Группа": "Кадры"}"#),
                rec(r#"{"ГруппаID": "6", "Группа": "Продажи"}"#),
            ],
        );

        assert_eq!(book.resolve_label("Группа", "5"), Some("Кадры".to_string()));
        assert_eq!(book.resolve_label("Группа", "6"), Some("Продажи".to_string()));
        assert_eq!(book.resolve_label("Группа", "7"), None);
        assert_eq!(book.resolve_label("Группа", ""), None);
        assert_eq!(book.resolve_label("Статус", "5"), None);
    }

    #[test]
    fn test_options_skip_empty_items() {
        let mut book = ReferenceBook::new();
        book.insert(
            "ИС",
            vec![
                rec(r#"{"ИСID": "1", "ИС": "1С:ЗУП"}"#),
                json!({}).as_object().cloned().unwrap(),
            ],
        );
        assert_eq!(book.options("ИС"), vec![SelectOption::new("1", "1С:ЗУП")]);
        assert!(book.options("Сервис").is_empty());
    }
}
